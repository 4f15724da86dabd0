use std::sync::{Arc, OnceLock};

use crate::error_responses;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Request,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

pub use response::ErrorResponse;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not_found")]
    NotFound,

    #[error("unknown endpoint")]
    UnknownEndpoint,

    // validation
    #[error("content missing")]
    ContentMissing,
    #[error("{0}")]
    Validation(String),
    #[error("malformatted id: {0}")]
    MalformedId(String),
    #[error("validation")]
    JsonValidation(#[from] JsonRejection),
    #[error("validation")]
    QueryValidation(#[from] QueryRejection),
    #[error("validation")]
    PathValidation(#[from] PathRejection),

    #[error(transparent)]
    DB(#[from] crate::db::Error),

    #[error(transparent)]
    Config(#[from] envy::Error),

    #[error("unexpected")]
    Unexpected(String),
}

/// crate::Error <--> tokio_rusqlite::Error
pub mod db_mappers {
    use super::*;
    use crate::db::rusqlite;
    use crate::db::tokio_rusqlite;

    impl From<tokio_rusqlite::Error> for Error {
        fn from(error: tokio_rusqlite::Error) -> Self {
            match error {
                tokio_rusqlite::Error::Other(err) => match err.downcast::<Error>() {
                    Ok(err) => *err,
                    Err(err) => Error::DB(tokio_rusqlite::Error::Other(err).into()),
                },
                _ => Error::DB(error.into()),
            }
        }
    }

    impl From<rusqlite::Error> for Error {
        fn from(error: rusqlite::Error) -> Self {
            Error::DB(error.into())
        }
    }

    impl From<Error> for tokio_rusqlite::Error {
        fn from(error: Error) -> Self {
            tokio_rusqlite::Error::Other(error.into())
        }
    }
}

// Response

error_responses! {
    content_missing: 400 => "content missing",
    malformatted_id: 400 => "malformatted id",
    validation: 400,
    unknown_endpoint: 404 => "unknown endpoint",
    unexpected: 500 => "unexpected error",
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let errors = errors();
        match error {
            Error::ContentMissing => errors.content_missing.clone(),
            Error::MalformedId(_) => errors.malformatted_id.clone(),
            Error::UnknownEndpoint => errors.unknown_endpoint.clone(),
            Error::Validation(message) => errors.validation.with_message(message),
            Error::JsonValidation(error) => errors.validation.with_message(error.body_text()),
            Error::QueryValidation(error) => errors.validation.with_message(error.body_text()),
            Error::PathValidation(error) => errors.validation.with_message(error.body_text()),
            _ => errors.unexpected.clone(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let error = Arc::new(self);

        let mut res = match error.as_ref() {
            Error::NotFound => StatusCode::NOT_FOUND.into_response(),
            error => {
                let error_res = ErrorResponse::from(error);
                let status = StatusCode::from_u16(error_res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, axum::Json(error_res)).into_response()
            }
        };
        res.extensions_mut().insert(error);

        res
    }
}

pub async fn on_error(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let error = response.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    if let Some(error) = error {
        if response.status().is_server_error() {
            tracing::error!("{:?}", error);
        } else {
            tracing::debug!("{:?}", error);
        }
    }

    response
}

/// Catch-all for requests no route answers, including known paths hit with an unsupported method.
pub async fn unknown_endpoint() -> Error {
    Error::UnknownEndpoint
}

mod response {
    use serde::Serialize;

    #[derive(Debug, Serialize, Clone, Default)]
    pub struct ErrorResponse {
        pub error: String,
        #[serde(skip)]
        pub status: u16,
    }

    impl ErrorResponse {
        pub fn new(error: impl Into<String>, status: u16) -> Self {
            Self {
                error: error.into(),
                status,
            }
        }

        pub fn with_message(&self, message: impl Into<String>) -> Self {
            let mut res = self.clone();
            res.error = message.into();
            res
        }
    }

    /// Named error responses with their status and, optionally, a fixed body.
    /// Entries without one always go through `with_message`.
    /// ```rust
    /// error_responses! {
    ///     not_found: 404 => "not found",
    ///     validation: 400,
    ///     unexpected: 500 => "unexpected error"
    /// }
    ///
    /// impl From<&Error> for ErrorResponse {
    ///     fn from(error: &Error) -> Self {
    ///     let errors = errors(); // <- from macro
    ///     match error {
    ///         Error::NotFound => errors.not_found.clone(),
    ///         Error::Unexpected(message) => errors.unexpected.with_message(message),
    ///     }
    /// }
    /// ```
    #[macro_export]
    macro_rules! error_responses {
        (@error $name:ident) => { "" };
        (@error $name:ident, $error:expr) => { $error };
        (
            $($name:ident: $code:expr $(=> $error:expr)?),* $(,)?
        ) => {
            #[derive(Debug, Clone)]
            struct Responses {
                $(
                    $name: ErrorResponse,
                )*
            }

            static ERRORS: OnceLock<Responses> = OnceLock::new();

            fn errors() -> &'static Responses {
                ERRORS.get_or_init(|| Responses {
                    $(
                        $name: ErrorResponse::new($crate::error_responses!(@error $name $(, $error)?), $code),
                    )*
                })
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: Error) -> (StatusCode, String) {
        let res = error.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let (status, body) = body_of(Error::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "");
    }

    #[tokio::test]
    async fn malformed_id_hides_the_offending_value() {
        let (status, body) = body_of(Error::MalformedId("abc".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"malformatted id"}"#);
    }

    #[tokio::test]
    async fn validation_carries_its_message() {
        let (status, body) = body_of(Error::Validation("too short".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"too short"}"#);
    }

    #[tokio::test]
    async fn storage_failures_are_masked() {
        let (status, body) = body_of(Error::DB(crate::db::Error::Migration("boom".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"unexpected error"}"#);
    }

    #[test]
    fn tokio_rusqlite_error_roundtrips_crate_error() {
        let error: crate::db::tokio_rusqlite::Error = Error::MalformedId("x".into()).into();
        assert!(matches!(Error::from(error), Error::MalformedId(id) if id == "x"));
    }
}
