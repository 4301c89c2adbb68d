use crate::commands::print_command_output;
use crate::errors::Result;
use crate::git::add_worktree_command;
use crate::session::Session;
use crate::shell::ShellRunner;
use crate::storage::validate_name;
use crate::traits::CommandRunner;

/// Creates worktree `name` (and a branch of the same name) for a repo
///
/// # Errors
/// Returns an error if:
/// - `name` is not a single directory name
/// - No repo is given and none is active, or the repo is unknown
/// - git refuses the worktree or branch (e.g. the branch already exists)
pub fn create_worktree(session: &Session, name: &str, repo: Option<&str>) -> Result<()> {
    create_worktree_with_runner(session, &ShellRunner, name, repo)
}

/// Test version that accepts a mock command runner
///
/// # Errors
/// Same as [`create_worktree`]
pub fn create_worktree_with_runner(
    session: &Session,
    runner: &dyn CommandRunner,
    name: &str,
    repo: Option<&str>,
) -> Result<()> {
    validate_name(name)?;
    let (repo_name, info) = session.config.resolve_repo(repo)?;
    let worktree_path = info.base_path.join(name);

    println!(
        "Creating worktree '{}' for repo '{}' at: {}",
        name,
        repo_name,
        worktree_path.display()
    );

    let output = runner.run(&info.repo_path, &add_worktree_command(&worktree_path, name))?;
    print_command_output(&output);

    tracing::info!(
        event = "ww.worktree.created",
        repo = %repo_name,
        name = name,
        path = %worktree_path.display()
    );
    Ok(())
}
