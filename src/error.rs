//! Error types for the board.
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown id, bad argument)
//! - 4: Operation failed (I/O, malformed seed or config)

use thiserror::Error;

/// Exit codes for the `kb` CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Everything that can go wrong while running a command.
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// True for the "no such record" failures of update/delete.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TaskNotFound(_) | Error::CategoryNotFound(_))
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TaskNotFound(_) | Error::CategoryNotFound(_) | Error::InvalidArgument(_) => {
                exit_codes::USER_ERROR
            }
            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Error::TaskNotFound(_) | Error::CategoryNotFound(_) => "not_found",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::TomlParse(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error body printed under `--json`.
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub kind: &'static str,
    pub code: i32,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            kind: err.kind(),
            code: err.exit_code(),
        }
    }
}
