use std::path::PathBuf;

/// Everything that can abort a `ww` invocation.
///
/// User mistakes and broken internal invariants are reported the same way;
/// `error_code` exists for structured logging only.
#[derive(Debug, thiserror::Error)]
pub enum WwError {
    #[error("Repo '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Repo path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Internal error: base path already exists: {}", path.display())]
    BasePathExists { path: PathBuf },

    #[error("Repo '{name}' does not exist")]
    RepoNotFound { name: String },

    #[error("Worktree '{name}' does not exist")]
    WorktreeNotFound { name: String },

    #[error("Invalid name '{name}' (must be a single directory name without whitespace)")]
    InvalidName { name: String },

    #[error("No repo specified and no active repo")]
    NoRepoSpecified,

    #[error("Working tree '{name}' is not clean (override with \"-f\")")]
    NotClean { name: String },

    #[error("Branch '{name}' is not merged (override with \"-f\")")]
    NotMerged { name: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Internal error: cmd failed ({command}) with error ({detail})")]
    CommandFailed { command: String, detail: String },

    #[error("Failed to parse command output: {message}")]
    Parse { message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

impl WwError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        WwError::Io {
            context: context.into(),
            source,
        }
    }

    /// Stable identifier for logging
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            WwError::AlreadyExists { .. } => "REPO_ALREADY_EXISTS",
            WwError::PathNotFound { .. } => "REPO_PATH_NOT_FOUND",
            WwError::BasePathExists { .. } => "BASE_PATH_EXISTS",
            WwError::RepoNotFound { .. } => "REPO_NOT_FOUND",
            WwError::WorktreeNotFound { .. } => "WORKTREE_NOT_FOUND",
            WwError::InvalidName { .. } => "INVALID_NAME",
            WwError::NoRepoSpecified => "NO_REPO_SPECIFIED",
            WwError::NotClean { .. } => "WORKTREE_NOT_CLEAN",
            WwError::NotMerged { .. } => "BRANCH_NOT_MERGED",
            WwError::Internal { .. } => "INTERNAL_ERROR",
            WwError::CommandFailed { .. } => "COMMAND_FAILED",
            WwError::Parse { .. } => "PARSE_ERROR",
            WwError::Io { .. } => "IO_ERROR",
            WwError::Serialize { .. } => "SERIALIZE_ERROR",
        }
    }
}

pub type Result<T, E = WwError> = std::result::Result<T, E>;
