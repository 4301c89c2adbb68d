use std::fs;

use crate::errors::Result;
use crate::git::{LIST_WORKTREES, WorktreeRecord, parse_worktree_list};
use crate::session::Session;
use crate::shell::ShellRunner;
use crate::traits::CommandRunner;

/// Prints the managed worktrees of a repo
///
/// # Errors
/// Returns an error if the repo cannot be resolved or git's listing fails
pub fn list_worktrees(session: &Session, repo: Option<&str>) -> Result<()> {
    list_worktrees_with_runner(session, &ShellRunner, repo)
}

/// Lists worktrees with a custom command runner (for testing)
///
/// # Errors
/// Same as [`list_worktrees`]
pub fn list_worktrees_with_runner(
    session: &Session,
    runner: &dyn CommandRunner,
    repo: Option<&str>,
) -> Result<()> {
    let (repo_name, worktrees) = collect_worktrees(session, runner, repo)?;

    if worktrees.is_empty() {
        println!("No worktrees found for repo '{}'.", repo_name);
        return Ok(());
    }

    for line in format_worktrees(&worktrees) {
        println!("{}", line);
    }

    Ok(())
}

/// Managed worktrees of the resolved repo, in the order git reports them
///
/// # Errors
/// Returns an error if the repo cannot be resolved, git fails, or its output
/// cannot be parsed
pub fn collect_worktrees(
    session: &Session,
    runner: &dyn CommandRunner,
    repo: Option<&str>,
) -> Result<(String, Vec<WorktreeRecord>)> {
    let (repo_name, info) = session.config.resolve_repo(repo)?;
    let output = runner.run(&info.repo_path, LIST_WORKTREES)?;

    // git reports resolved paths (e.g. /var -> /private/var on macOS)
    let base_path = fs::canonicalize(&info.base_path).unwrap_or(info.base_path);
    let worktrees = parse_worktree_list(&output, &base_path)?;

    tracing::debug!(
        event = "ww.worktree.listed",
        repo = %repo_name,
        count = worktrees.len()
    );
    Ok((repo_name, worktrees))
}

#[must_use]
pub fn format_worktrees(worktrees: &[WorktreeRecord]) -> Vec<String> {
    let name_width = worktrees.iter().map(|w| w.name.len()).max().unwrap_or(0);
    let path_width = worktrees
        .iter()
        .map(|w| w.path.display().to_string().len())
        .max()
        .unwrap_or(0);

    worktrees
        .iter()
        .map(|w| {
            format!(
                "{:<name_width$}  {:<path_width$}  {} [{}]",
                w.name,
                w.path.display().to_string(),
                w.commit,
                w.branch,
                name_width = name_width,
                path_width = path_width
            )
        })
        .collect()
}
