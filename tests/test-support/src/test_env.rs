#![allow(clippy::unwrap_used)] // Tests use unwrap for simplicity

use anyhow::{Context, Result};
use assert_fs::TempDir;
use assert_fs::prelude::*;

use std::process::Command;

/// Isolated home directory plus any number of real git repositories.
///
/// ```text
/// <tmp>/home/           WW_HOME for every command run through this env
/// <tmp>/repos/<name>/   git repositories created with `create_repo`
/// ```
pub struct CliTestEnvironment {
    pub home_dir: assert_fs::fixture::ChildPath,
    pub repos_dir: assert_fs::fixture::ChildPath,
    _temp_dir: TempDir, // Keep temp_dir private to ensure cleanup, but don't expose it
}

impl CliTestEnvironment {
    /// Creates an empty home directory and a place for repositories
    ///
    /// # Errors
    /// Returns an error if the temporary directories cannot be created
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let home_dir = temp_dir.child("home");
        let repos_dir = temp_dir.child("repos");

        home_dir.create_dir_all()?;
        repos_dir.create_dir_all()?;

        Ok(Self {
            home_dir,
            repos_dir,
            _temp_dir: temp_dir,
        })
    }

    /// Initializes a git repository with one commit on `main`
    ///
    /// # Errors
    /// Returns an error if any git command fails
    pub fn create_repo(&self, name: &str) -> Result<assert_fs::fixture::ChildPath> {
        let repo_dir = self.repos_dir.child(name);
        repo_dir.create_dir_all()?;

        Self::git(&repo_dir, &["init"])?;
        Self::git(&repo_dir, &["config", "user.name", "Test User"])?;
        Self::git(&repo_dir, &["config", "user.email", "test@example.com"])?;

        repo_dir.child("README.md").write_str("# Test Repo")?;
        Self::git(&repo_dir, &["add", "."])?;
        Self::git(&repo_dir, &["commit", "-m", "Initial commit"])?;

        // Ensure we have a main branch (some git versions default to 'master')
        Self::git(&repo_dir, &["branch", "-M", "main"])?;

        Ok(repo_dir)
    }

    /// Run a git command in `dir`, returning its stdout
    ///
    /// # Errors
    /// Returns an error if git cannot be run or exits non-zero
    pub fn git(dir: &assert_fs::fixture::ChildPath, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir.path())
            .output()
            .context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Git command failed: {}", stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Execute a CLI command with `WW_HOME` pointing at the test home
    ///
    /// # Errors
    /// Returns an error if the command setup fails
    pub fn run_command(&self, args: &[&str]) -> Result<assert_cmd::Command> {
        let mut cmd =
            assert_cmd::Command::cargo_bin("ww-bin").context("Failed to find ww-bin binary")?;

        cmd.current_dir(self.repos_dir.path())
            .env("WW_HOME", self.home_dir.path())
            .env_remove("RUST_LOG");

        cmd.args(args);
        Ok(cmd)
    }

    /// Creates a repo on disk and registers it under the same name
    ///
    /// # Errors
    /// Returns an error if repo creation or `ww repo add` fails
    pub fn register_repo(&self, name: &str) -> Result<assert_fs::fixture::ChildPath> {
        let repo_dir = self.create_repo(name)?;
        let repo_path = repo_dir.path().to_string_lossy().to_string();
        self.run_command(&["repo", "add", name, &repo_path])?
            .assert()
            .success();
        Ok(repo_dir)
    }

    /// Directory of a managed worktree: `~/.ww/<repo>/<name>`
    pub fn worktree_path(&self, repo: &str, name: &str) -> assert_fs::fixture::ChildPath {
        self.home_dir.child(".ww").child(repo).child(name)
    }

    pub fn config_file(&self) -> assert_fs::fixture::ChildPath {
        self.home_dir.child(".wwconfig")
    }

    pub fn temp_script(&self) -> assert_fs::fixture::ChildPath {
        self.home_dir.child(".wwtmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn test_cli_test_environment_creation() -> Result<()> {
        let env = CliTestEnvironment::new()?;
        env.home_dir.assert(predicate::path::is_dir());
        env.repos_dir.assert(predicate::path::is_dir());
        Ok(())
    }

    #[test]
    fn test_create_repo_has_main_branch() -> Result<()> {
        let env = CliTestEnvironment::new()?;
        let repo = env.create_repo("sample")?;

        repo.child(".git").assert(predicate::path::exists());
        let branch = CliTestEnvironment::git(&repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        assert_eq!(branch.trim(), "main");
        Ok(())
    }

    #[test]
    fn test_worktree_path_layout() -> Result<()> {
        let env = CliTestEnvironment::new()?;
        let path = env.worktree_path("foo", "feat1");
        assert!(path.path().ends_with(".ww/foo/feat1"));
        Ok(())
    }
}
