use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use weekplan_shared::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Store or unexpected failure, `message` is what the caller sees.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: weekplan_shared::Error,
    },

    /// Produced outside the handlers (unmatched route, rejected extractor).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl AppError {
    /// Maps a domain error, `failure` replaces the message of server errors.
    pub fn from_domain(err: weekplan_shared::Error, failure: &'static str) -> Self {
        match err {
            weekplan_shared::Error::NotFound(message) => AppError::NotFound(message),
            err if err.is_user_error() => AppError::BadRequest(err.to_string()),
            err => AppError::Internal {
                message: failure,
                source: err,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

pub trait ResultExt<T> {
    fn or_fail(self, failure: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for weekplan_shared::Result<T> {
    fn or_fail(self, failure: &'static str) -> Result<T, AppError> {
        self.map_err(|err| AppError::from_domain(err, failure))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Internal { message, source } => {
                tracing::error!(err = ?source, "{message}");
                ApiResponse::<()>::failure(message)
            }
            AppError::Rejected { status, message } => {
                tracing::debug!(status = %status, "{message}");
                ApiResponse::<()>::failure(message).with_status(status.as_u16())
            }
            AppError::BadRequest(message) | AppError::NotFound(message) => {
                ApiResponse::<()>::failure(message)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_domain_status() {
        let err = AppError::from_domain(
            weekplan_shared::Error::User("Day is required".to_owned()),
            "Failed to create event",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Day is required");

        let err = AppError::from_domain(
            weekplan_shared::Error::NotFound("Event not found".to_owned()),
            "Failed to delete event",
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Event not found");
    }

    #[test]
    fn test_server_errors_hide_cause() {
        let err = AppError::from_domain(
            weekplan_shared::Error::Server("disk I/O error".to_owned()),
            "Failed to fetch calendar data",
        );

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch calendar data");
    }
}
