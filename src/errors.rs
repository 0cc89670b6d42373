use axum::http::StatusCode;
use std::fmt;

/// Expected, caller-visible failures of pass operations. None of these are
/// fatal; the presentation layer surfaces the message and moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum PassError {
    /// Pass id absent from the catalog.
    NotFound(String),
    /// Operation invalid for the pass's variant.
    WrongType(String),
    /// Measurement pass without a configured baseline.
    NoBaseline(String),
    /// Reading regressed past the baseline; `diff` is reported for display.
    WrongDirection { diff: f64, reason: String },
}

impl fmt::Display for PassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassError::NotFound(id) => write!(f, "unknown pass '{id}'"),
            PassError::WrongType(id) => {
                write!(f, "operation not valid for pass '{id}'")
            }
            PassError::NoBaseline(reason) => write!(f, "{reason}"),
            PassError::WrongDirection { reason, .. } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for PassError {}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<PassError> for AppError {
    fn from(err: PassError) -> Self {
        match &err {
            PassError::NotFound(_) => Self::not_found(err.to_string()),
            PassError::WrongType(_) => Self::bad_request(err.to_string()),
            PassError::NoBaseline(_) | PassError::WrongDirection { .. } => {
                Self::unprocessable(err.to_string())
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
