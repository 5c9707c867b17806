/// Error types for the call push service
///
/// Resolution failures are expected and fatal only to the individual
/// notification; credential failures are fatal to any signing attempt until
/// an operator fixes the configuration.
use actix_web::{http::StatusCode, HttpResponse};
use courier_apns_auth::AuthError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Device store failure, opaque to the resolver
#[derive(Error, Debug)]
#[error("Device store error: {0}")]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError(err.to_string())
    }
}

/// Recipient VoIP token resolution failures
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No device record for recipient {0}")]
    NotFound(String),

    #[error("Recipient {0} has no VoIP token registered")]
    MissingToken(String),

    #[error("VoIP token for recipient {recipient_id} is malformed (expected 64 hex characters, got {token:?})")]
    InvalidFormat { recipient_id: String, token: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Top-level dispatch failure, tagged with the stage that failed
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Realtime push dispatch failed: {0}")]
    Provider(String),

    #[error("Ordinary push handoff failed: {0}")]
    Ordinary(String),
}

impl DispatchError {
    /// Stage label used in logs and metrics
    pub fn stage(&self) -> &'static str {
        match self {
            DispatchError::Auth(_) => "auth",
            DispatchError::Resolve(_) => "resolve",
            DispatchError::Provider(_) => "provider",
            DispatchError::Ordinary(_) => "ordinary",
        }
    }
}

/// Application error exposed over HTTP
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    UpstreamFailure(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match &err {
            DispatchError::Resolve(ResolveError::NotFound(_)) => AppError::NotFound(err.to_string()),
            DispatchError::Resolve(ResolveError::MissingToken(_))
            | DispatchError::Resolve(ResolveError::InvalidFormat { .. }) => {
                AppError::Unprocessable(err.to_string())
            }
            DispatchError::Provider(_) | DispatchError::Ordinary(_) => {
                AppError::UpstreamFailure(err.to_string())
            }
            DispatchError::Auth(_) | DispatchError::Resolve(ResolveError::Store(_)) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: self.to_string(),
        })
    }
}
