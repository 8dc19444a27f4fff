use std::path::PathBuf;
use thiserror::Error;

/// Exit code for everything that is not a configuration problem
pub const EXIT_FAILURE: i32 = 1;

/// Configuration error (sysexits `EX_CONFIG`)
pub const EXIT_CONFIG: i32 = 78;

/// Top-level error type. These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CarError {
    #[error("{0}")]
    Usage(String),

    #[error("id is required")]
    MissingId,

    #[error("invalid command '{0}', run without arguments to list the available commands")]
    InvalidCommand(String),

    #[error("{message}")]
    Remote {
        message: String,
        response: Option<String>,
    },

    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl CarError {
    /// Raw response text of a failed remote call, if the server sent any
    pub fn response_text(&self) -> Option<&str> {
        match self {
            CarError::Remote { response, .. } => response.as_deref(),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CarError::ConfigNotFound(_) | CarError::Config(_) => EXIT_CONFIG,
            _ => EXIT_FAILURE,
        }
    }
}
