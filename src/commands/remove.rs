use std::fs;
use std::path::Path;

use crate::commands::print_command_output;
use crate::errors::{Result, WwError};
use crate::git::{BRANCHES_CONTAINING_HEAD, PRUNE_WORKTREES, STATUS_PORCELAIN, delete_branch_command};
use crate::session::Session;
use crate::shell::ShellRunner;
use crate::storage::validate_name;
use crate::traits::CommandRunner;

/// Removes worktree `name` and deletes its branch
///
/// Unless `force` is set, the worktree must be clean and its HEAD must be
/// reachable from some other branch.
///
/// # Errors
/// Returns an error if:
/// - `name` is not a single directory name
/// - No repo is given and none is active, or the repo is unknown
/// - The worktree directory doesn't exist
/// - The worktree has uncommitted changes or an unmerged branch (without `force`)
/// - Failed to remove the worktree directory
/// - git fails to prune or delete the branch
pub fn remove_worktree(
    session: &mut Session,
    name: &str,
    repo: Option<&str>,
    force: bool,
) -> Result<()> {
    remove_worktree_with_runner(session, &ShellRunner, name, repo, force)
}

/// Removes a worktree with a custom command runner (for testing)
///
/// # Errors
/// Same as [`remove_worktree`]
pub fn remove_worktree_with_runner(
    session: &mut Session,
    runner: &dyn CommandRunner,
    name: &str,
    repo: Option<&str>,
    force: bool,
) -> Result<()> {
    validate_name(name)?;
    let (repo_name, info) = session.config.resolve_repo(repo)?;
    let worktree_path = info.base_path.join(name);

    if !worktree_path.exists() {
        return Err(WwError::WorktreeNotFound {
            name: name.to_string(),
        });
    }

    if !force {
        ensure_removable(runner, &worktree_path, name)?;
    }

    println!("Removing worktree: {}", worktree_path.display());
    fs::remove_dir_all(&worktree_path).map_err(|e| {
        WwError::io(format!("Failed to remove {}", worktree_path.display()), e)
    })?;

    print_command_output(&runner.run(&info.repo_path, PRUNE_WORKTREES)?);

    println!("Deleting branch: {}", name);
    print_command_output(&runner.run(&info.repo_path, &delete_branch_command(name, force))?);

    // TODO: confirm worktree removal should reset the repo-level selection like `repo rm` does
    if session.config.is_active(&repo_name) {
        session.config.active_repo = None;
    }

    tracing::info!(
        event = "ww.worktree.removed",
        repo = %repo_name,
        name = name,
        force = force
    );
    Ok(())
}

fn ensure_removable(runner: &dyn CommandRunner, worktree_path: &Path, name: &str) -> Result<()> {
    if runner.run_count_lines(worktree_path, STATUS_PORCELAIN)? != 0 {
        return Err(WwError::NotClean {
            name: name.to_string(),
        });
    }

    // HEAD's own branch always counts, so a second one means it is merged somewhere.
    match runner.run_count_lines(worktree_path, BRANCHES_CONTAINING_HEAD)? {
        0 => Err(WwError::Internal {
            message: "No branches contain HEAD commit".to_string(),
        }),
        1 => Err(WwError::NotMerged {
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::repo::{add_repo, set_active_repo};
    use crate::storage::WwPaths;
    use crate::traits::mock::ScriptedRunner;
    use std::path::PathBuf;

    struct Fixture {
        _home: tempfile::TempDir,
        _repo: tempfile::TempDir,
        repo_path: PathBuf,
        worktree_path: PathBuf,
        session: Session,
    }

    /// Registers `foo` as the active repo with a `feat1` checkout on disk
    fn fixture() -> Result<Fixture> {
        let home = tempfile::tempdir().map_err(|e| WwError::io("tempdir", e))?;
        let repo = tempfile::tempdir().map_err(|e| WwError::io("tempdir", e))?;
        let repo_path = repo.path().to_path_buf();
        let mut session = Session::open(WwPaths::with_home(home.path()))?;
        add_repo(&mut session, "foo", &repo_path)?;
        set_active_repo(&mut session, "foo")?;

        let worktree_path = session.paths.base_path("foo").join("feat1");
        fs::create_dir_all(&worktree_path).map_err(|e| WwError::io("mkdir", e))?;

        Ok(Fixture {
            _home: home,
            _repo: repo,
            repo_path,
            worktree_path,
            session,
        })
    }

    fn clean_with_branches(count: usize) -> ScriptedRunner {
        let branches: String = (0..count).map(|i| format!("  branch{}\n", i)).collect();
        ScriptedRunner::new()
            .with_output(STATUS_PORCELAIN, "")
            .with_output(BRANCHES_CONTAINING_HEAD, &branches)
    }

    #[test]
    fn test_merged_clean_worktree_is_removed() -> Result<()> {
        let mut fx = fixture()?;
        let runner = clean_with_branches(2);

        remove_worktree_with_runner(&mut fx.session, &runner, "feat1", None, false)?;

        assert!(!fx.worktree_path.exists());
        assert_eq!(
            runner.calls(),
            vec![
                (fx.worktree_path.clone(), STATUS_PORCELAIN.to_string()),
                (fx.worktree_path.clone(), BRANCHES_CONTAINING_HEAD.to_string()),
                (fx.repo_path.clone(), PRUNE_WORKTREES.to_string()),
                (fx.repo_path.clone(), "git branch -d 'feat1'".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_single_containing_branch_is_not_merged() -> Result<()> {
        let mut fx = fixture()?;
        let runner = clean_with_branches(1);

        let result = remove_worktree_with_runner(&mut fx.session, &runner, "feat1", None, false);

        assert!(matches!(result, Err(WwError::NotMerged { .. })));
        assert!(fx.worktree_path.exists());
        Ok(())
    }

    #[test]
    fn test_no_containing_branch_is_internal_error() -> Result<()> {
        let mut fx = fixture()?;
        let runner = clean_with_branches(0);

        let result = remove_worktree_with_runner(&mut fx.session, &runner, "feat1", None, false);

        assert!(matches!(result, Err(WwError::Internal { .. })));
        assert!(fx.worktree_path.exists());
        Ok(())
    }

    #[test]
    fn test_dirty_worktree_is_kept() -> Result<()> {
        let mut fx = fixture()?;
        let runner = ScriptedRunner::new().with_output(STATUS_PORCELAIN, "?? scratch.txt\n");

        let result = remove_worktree_with_runner(&mut fx.session, &runner, "feat1", None, false);

        assert!(matches!(result, Err(WwError::NotClean { .. })));
        assert!(fx.worktree_path.exists());
        assert_eq!(runner.commands(), vec![STATUS_PORCELAIN.to_string()]);
        Ok(())
    }

    #[test]
    fn test_force_skips_checks_and_force_deletes_branch() -> Result<()> {
        let mut fx = fixture()?;
        let runner = ScriptedRunner::new()
            .with_output(STATUS_PORCELAIN, " M README.md\n")
            .with_output(BRANCHES_CONTAINING_HEAD, "* feat1\n");

        remove_worktree_with_runner(&mut fx.session, &runner, "feat1", None, true)?;

        assert!(!fx.worktree_path.exists());
        assert_eq!(
            runner.commands(),
            vec![
                PRUNE_WORKTREES.to_string(),
                "git branch -D 'feat1'".to_string()
            ]
        );
        Ok(())
    }

    #[test]
    fn test_missing_worktree() -> Result<()> {
        let mut fx = fixture()?;
        let runner = ScriptedRunner::new();

        let result = remove_worktree_with_runner(&mut fx.session, &runner, "nope", None, true);

        assert!(matches!(result, Err(WwError::WorktreeNotFound { .. })));
        assert!(runner.calls().is_empty());
        Ok(())
    }

    #[test]
    fn test_parent_dir_name_leaves_other_repos_alone() -> Result<()> {
        let mut fx = fixture()?;
        add_repo(&mut fx.session, "bar", &fx.repo_path)?;
        let other = fx.session.paths.base_path("bar").join("precious");
        fs::create_dir_all(&other).map_err(|e| WwError::io("mkdir", e))?;
        let runner = ScriptedRunner::new();

        let result = remove_worktree_with_runner(&mut fx.session, &runner, "..", Some("foo"), true);

        assert!(matches!(result, Err(WwError::InvalidName { .. })));
        assert!(other.is_dir());
        assert!(fx.worktree_path.is_dir());
        assert!(runner.calls().is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_name_keeps_base_directory() -> Result<()> {
        let mut fx = fixture()?;
        let runner = ScriptedRunner::new();

        let result = remove_worktree_with_runner(&mut fx.session, &runner, "", None, true);

        assert!(matches!(result, Err(WwError::InvalidName { .. })));
        assert!(fx.session.paths.base_path("foo").is_dir());
        assert!(fx.worktree_path.is_dir());
        assert_eq!(fx.session.config.active_repo.as_deref(), Some("foo"));
        Ok(())
    }

    #[test]
    fn test_removal_clears_active_repo() -> Result<()> {
        let mut fx = fixture()?;
        let runner = clean_with_branches(2);

        remove_worktree_with_runner(&mut fx.session, &runner, "feat1", Some("foo"), false)?;

        assert_eq!(fx.session.config.active_repo, None);
        assert!(fx.session.config.repos.contains_key("foo"));
        Ok(())
    }

    #[test]
    fn test_removal_in_other_repo_keeps_active_repo() -> Result<()> {
        let mut fx = fixture()?;
        add_repo(&mut fx.session, "bar", &fx.repo_path)?;
        let other = fx.session.paths.base_path("bar").join("feat1");
        fs::create_dir_all(&other).map_err(|e| WwError::io("mkdir", e))?;
        let runner = clean_with_branches(3);

        remove_worktree_with_runner(&mut fx.session, &runner, "feat1", Some("bar"), false)?;

        assert!(!other.exists());
        assert!(fx.worktree_path.exists());
        assert_eq!(fx.session.config.active_repo.as_deref(), Some("foo"));
        Ok(())
    }

    #[test]
    fn test_branch_delete_failure_is_surfaced() -> Result<()> {
        let mut fx = fixture()?;
        let runner = clean_with_branches(2)
            .with_failure("git branch -d 'feat1'", "error: branch 'feat1' is not fully merged");

        let result = remove_worktree_with_runner(&mut fx.session, &runner, "feat1", None, false);

        assert!(matches!(result, Err(WwError::CommandFailed { .. })));
        Ok(())
    }
}
