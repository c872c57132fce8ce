use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaypostError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid clock time '{0}' (expected HH:MM)")]
    InvalidClock(String),

    #[error("No JSON object found in response")]
    EmptyResponse,

    #[error("Submission not found: {0}")]
    SubmissionNotFound(String),

    #[error("Submission {id} is already {status} and cannot be changed")]
    InvalidTransition { id: String, status: String },
}

pub type Result<T> = std::result::Result<T, WaypostError>;
