//! HTTP error mapping for page handlers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use snippetbox_core::{AppError, ErrorKind};

/// Handler error that renders as a plain-text status page.
///
/// Server-side failures are logged here, once, and replaced with a generic
/// body so internal detail never reaches the client.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl HttpError {
    /// Reclassify a failed show-by-id lookup.
    ///
    /// A malformed id and a missing (or expired) snippet both become
    /// "not found"; other errors pass through.
    pub fn from_lookup(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self(AppError::NotFound),
            _ => Self(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Storage | ErrorKind::Render | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.0 {
            AppError::Validation(message) => message.clone(),
            err if status.is_server_error() => {
                tracing::error!("{:?} error: {}", err.kind(), err);
                status_text(status)
            }
            _ => status_text(status),
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

pub(crate) fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_validation_becomes_not_found() {
        let err = HttpError::from_lookup(AppError::Validation("bad id".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = HttpError::from_lookup(AppError::StorageMessage("down".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn kinds_map_to_status_classes() {
        let cases = [
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::StorageMessage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Render("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status(), expected);
        }
    }
}
