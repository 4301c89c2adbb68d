use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::RepoInfo;
use crate::errors::{Result, WwError};
use crate::session::Session;
use crate::storage::{absolute_path, validate_name};

/// One row of `ww repo ls`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoListing {
    pub name: String,
    pub repo_path: PathBuf,
    pub is_active: bool,
}

/// Every registered repo in name order
#[must_use]
pub fn collect_repos(session: &Session) -> Vec<RepoListing> {
    session
        .config
        .repos
        .iter()
        .map(|(name, info)| RepoListing {
            name: name.clone(),
            repo_path: info.repo_path.clone(),
            is_active: session.config.is_active(name),
        })
        .collect()
}

/// Renders `* name  path` rows, names padded to the widest one
#[must_use]
pub fn format_repos(repos: &[RepoListing]) -> Vec<String> {
    let name_width = repos.iter().map(|r| r.name.len()).max().unwrap_or(0);

    repos
        .iter()
        .map(|repo| {
            let marker = if repo.is_active { '*' } else { ' ' };
            format!(
                "{} {:<width$}  {}",
                marker,
                repo.name,
                repo.repo_path.display(),
                width = name_width
            )
        })
        .collect()
}

pub fn list_repos(session: &Session) {
    for line in format_repos(&collect_repos(session)) {
        println!("{}", line);
    }
}

/// Registers `path` under `name` and creates its worktree base directory
///
/// # Errors
/// - `InvalidName` if `name` is not a single directory name
/// - `AlreadyExists` if the name is taken
/// - `PathNotFound` if `path` does not exist
/// - `BasePathExists` if `~/.ww/<name>` is already on disk
/// - `Io` if the base directory cannot be created
pub fn add_repo(session: &mut Session, name: &str, path: &Path) -> Result<()> {
    validate_name(name)?;
    if session.config.repos.contains_key(name) {
        return Err(WwError::AlreadyExists {
            name: name.to_string(),
        });
    }
    if !path.exists() {
        return Err(WwError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    let base_path = session.paths.base_path(name);
    if base_path.exists() {
        return Err(WwError::BasePathExists { path: base_path });
    }

    let repo_path = absolute_path(path)?;
    fs::create_dir(&base_path).map_err(|e| {
        WwError::io(format!("Failed to create {}", base_path.display()), e)
    })?;

    tracing::info!(
        event = "ww.repo.added",
        name = name,
        repo = %repo_path.display(),
        base = %base_path.display()
    );
    session.config.repos.insert(
        name.to_string(),
        RepoInfo {
            base_path,
            repo_path,
        },
    );
    Ok(())
}

/// Unregisters `name`, deleting every worktree checkout under its base path
///
/// # Errors
/// - `RepoNotFound` if the name is not registered
/// - `Io` if the base directory cannot be removed
pub fn remove_repo(session: &mut Session, name: &str) -> Result<()> {
    let info = session
        .config
        .repos
        .get(name)
        .ok_or_else(|| WwError::RepoNotFound {
            name: name.to_string(),
        })?;

    match fs::remove_dir_all(&info.base_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                event = "ww.repo.base_missing",
                name = name,
                base = %info.base_path.display(),
                "Base directory already gone"
            );
        }
        Err(e) => {
            return Err(WwError::io(
                format!("Failed to remove {}", info.base_path.display()),
                e,
            ));
        }
    }

    session.config.repos.remove(name);
    if session.config.is_active(name) {
        session.config.active_repo = None;
    }

    tracing::info!(event = "ww.repo.removed", name = name);
    Ok(())
}

/// Makes `name` the default target of worktree commands
///
/// # Errors
/// Returns `RepoNotFound` if the name is not registered
pub fn set_active_repo(session: &mut Session, name: &str) -> Result<()> {
    if !session.config.repos.contains_key(name) {
        return Err(WwError::RepoNotFound {
            name: name.to_string(),
        });
    }

    session.config.active_repo = Some(name.to_string());
    tracing::info!(event = "ww.repo.activated", name = name);
    Ok(())
}
