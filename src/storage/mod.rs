use std::path::{Component, Path, PathBuf};

use crate::errors::{Result, WwError};

/// Environment variable that replaces the user's home directory
pub const HOME_OVERRIDE_VAR: &str = "WW_HOME";

const WORKTREE_ROOT_NAME: &str = ".ww";
const CONFIG_FILE_NAME: &str = ".wwconfig";
const TEMP_SCRIPT_NAME: &str = ".wwtmp";

/// On-disk layout of everything `ww` owns.
///
/// ```text
/// ~/.wwconfig          registry of repos + active repo
/// ~/.wwtmp             shell snippet sourced by the `ww` function
/// ~/.ww/<repo>/<name>  one directory per managed worktree
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WwPaths {
    home_dir: PathBuf,
}

impl WwPaths {
    /// Resolves the layout from `WW_HOME` or the user's home directory
    ///
    /// # Errors
    /// Returns an error if no home directory can be determined
    pub fn from_env() -> Result<Self> {
        let home_dir = match std::env::var_os(HOME_OVERRIDE_VAR) {
            Some(custom_home) if !custom_home.is_empty() => PathBuf::from(custom_home),
            _ => dirs::home_dir().ok_or_else(|| WwError::Internal {
                message: "Failed to get user home directory".to_string(),
            })?,
        };

        Ok(Self::with_home(home_dir))
    }

    #[must_use]
    pub fn with_home(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
        }
    }

    #[must_use]
    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    #[must_use]
    pub fn worktree_root(&self) -> PathBuf {
        self.home_dir.join(WORKTREE_ROOT_NAME)
    }

    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.home_dir.join(CONFIG_FILE_NAME)
    }

    #[must_use]
    pub fn temp_script(&self) -> PathBuf {
        self.home_dir.join(TEMP_SCRIPT_NAME)
    }

    /// Directory holding every worktree of the named repo
    #[must_use]
    pub fn base_path(&self, repo_name: &str) -> PathBuf {
        self.worktree_root().join(repo_name)
    }

    /// Creates `~/.ww` if it is missing
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created
    pub fn ensure_worktree_root(&self) -> Result<()> {
        let root = self.worktree_root();
        std::fs::create_dir_all(&root)
            .map_err(|e| WwError::io(format!("Failed to create {}", root.display()), e))
    }

    /// Builds the `cd` line the shell wrapper sources for `target`.
    ///
    /// The path is written relative to `$HOME` so the same line works under
    /// MinGW-style shells on Windows; backslashes are doubled for the shell.
    /// The rest of the line is not quoted, which is why [`validate_name`]
    /// refuses whitespace in repo and worktree names.
    ///
    /// # Errors
    /// Returns an error if `target` does not live under the home directory
    pub fn cd_directive(&self, target: &Path) -> Result<String> {
        let home = normalize_path(&self.home_dir);
        let target = normalize_path(target);
        let relative = target
            .strip_prefix(&home)
            .map_err(|_| WwError::Internal {
                message: format!(
                    "{} is not under the home directory {}",
                    target.display(),
                    home.display()
                ),
            })?;

        let relative = relative.to_string_lossy().replace('\\', "\\\\");
        Ok(format!("cd $HOME/{}", relative))
    }
}

/// Checks that `name` is usable as one directory directly under a base path.
///
/// Repo and worktree names are joined onto `~/.ww` paths that get deleted
/// recursively, and they end up unquoted in the sourced `cd` line.
///
/// # Errors
/// Returns `InvalidName` for empty names, `.`, `..`, anything containing a
/// path separator, and names with whitespace
pub fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_leaf = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if single_leaf && !name.contains(['/', '\\']) && !name.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(WwError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Lexically normalizes a path: drops `.` components and folds `..` into
/// the preceding component. The filesystem is never consulted.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Absolute form of `path`, resolved against the current directory
///
/// # Errors
/// Returns an error if the current directory cannot be read
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| WwError::io("Failed to read current directory", e))?
            .join(path)
    };
    Ok(normalize_path(&joined))
}
