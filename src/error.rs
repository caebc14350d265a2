use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplgenError {
    #[error("Section '{0}' does not exist")]
    SectionNotFound(String),

    #[error("Key '{key}' does not exist in section '{section}'")]
    KeyNotFound { section: String, key: String },

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Invalid user name '{0}'")]
    InvalidUserName(String),

    #[error("Local config for '{}' already exists", path.display())]
    LocalScopeExists { path: PathBuf },

    #[error(
        "Local config for '{}' does not exist. Use 'templgen initlocal' to create one",
        path.display()
    )]
    LocalScopeMissing { path: PathBuf },

    #[error("No settings resolved yet, call read_settings_for_path() first")]
    SettingsNotResolved,

    #[error("Modified settings not saved")]
    UnsavedChanges,

    #[error("Failed to parse {path} (line {line}): {reason}")]
    ParseError {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Failed to access {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("Prompt failed: {0}")]
    PromptFailed(String),

    #[error("Could not determine the user's home directory")]
    HomeDirNotFound,

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Coarse category of a [`TemplgenError`], for callers that render or branch
/// on the kind of failure rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Precondition,
    InvalidInput,
    Filesystem,
    MalformedConfig,
}

impl TemplgenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TemplgenError::SectionNotFound(_)
            | TemplgenError::KeyNotFound { .. }
            | TemplgenError::UserNotFound(_) => ErrorKind::NotFound,
            TemplgenError::UserAlreadyExists(_) | TemplgenError::LocalScopeExists { .. } => {
                ErrorKind::AlreadyExists
            }
            TemplgenError::LocalScopeMissing { .. }
            | TemplgenError::SettingsNotResolved
            | TemplgenError::UnsavedChanges => ErrorKind::Precondition,
            TemplgenError::InvalidUserName(_) => ErrorKind::InvalidInput,
            TemplgenError::IoError { .. }
            | TemplgenError::CommandFailed { .. }
            | TemplgenError::PromptFailed(_)
            | TemplgenError::HomeDirNotFound => ErrorKind::Filesystem,
            TemplgenError::ParseError { .. }
            | TemplgenError::ConfigError(_)
            | TemplgenError::InvalidValue { .. } => ErrorKind::MalformedConfig,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TemplgenError::IoError {
            path: path.into(),
            source,
        }
    }
}
