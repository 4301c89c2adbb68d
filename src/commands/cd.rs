use crate::errors::{Result, WwError};
use crate::session::Session;
use crate::storage::validate_name;

/// Queues a `cd` into worktree `name` for the wrapping shell function.
///
/// A child process cannot change its parent shell's directory, so the line
/// goes into the temp script that the `ww` function sources after we exit.
///
/// # Errors
/// Returns an error if:
/// - `name` is not a single directory name
/// - No repo is given and none is active, or the repo is unknown
/// - The worktree directory doesn't exist
/// - The temp script cannot be written
pub fn cd_worktree(session: &mut Session, name: &str, repo: Option<&str>) -> Result<()> {
    validate_name(name)?;
    let (repo_name, info) = session.config.resolve_repo(repo)?;
    let worktree_path = info.base_path.join(name);

    if !worktree_path.exists() {
        return Err(WwError::WorktreeNotFound {
            name: name.to_string(),
        });
    }

    let line = session.paths.cd_directive(&worktree_path)?;
    session.add_script_line(&line)?;

    tracing::debug!(
        event = "ww.worktree.cd",
        repo = %repo_name,
        name = name,
        line = %line
    );
    Ok(())
}
