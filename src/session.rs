use std::fs::File;
use std::io::Write;

use crate::config::Config;
use crate::errors::{Result, WwError};
use crate::storage::WwPaths;

/// State held for the lifetime of one invocation.
///
/// Opening a session loads the registry and truncates the temp script;
/// [`Session::close`] writes the registry back. Callers close the session on
/// every path, including after a failed command.
pub struct Session {
    pub paths: WwPaths,
    pub config: Config,
    script: File,
}

impl Session {
    /// Loads the registry and starts a fresh temp script
    ///
    /// # Errors
    /// Returns an error if `~/.ww` or the temp script cannot be created
    pub fn open(paths: WwPaths) -> Result<Self> {
        paths.ensure_worktree_root()?;
        let config = Config::load(&paths.config_file());

        let script_path = paths.temp_script();
        let script = File::create(&script_path).map_err(|e| {
            WwError::io(format!("Failed to create {}", script_path.display()), e)
        })?;

        tracing::debug!(
            event = "ww.session.opened",
            home = %paths.home_dir().display(),
            repos = config.repos.len(),
            active_repo = config.active_repo.as_deref().unwrap_or("")
        );

        Ok(Self {
            paths,
            config,
            script,
        })
    }

    /// Appends one line for the wrapping shell function to source
    ///
    /// # Errors
    /// Returns an error if the temp script cannot be written
    pub fn add_script_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.script, "{}", line)
            .map_err(|e| WwError::io("Failed to write temp script", e))
    }

    /// Flushes the temp script and persists the registry
    ///
    /// # Errors
    /// Returns an error if either file cannot be written
    pub fn close(mut self) -> Result<()> {
        self.script
            .flush()
            .map_err(|e| WwError::io("Failed to flush temp script", e))?;
        self.config.save(&self.paths.config_file())
    }
}
