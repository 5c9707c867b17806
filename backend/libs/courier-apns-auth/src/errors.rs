use thiserror::Error;

/// APNs provider auth error types
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unusable APNs credential configuration: {0}")]
    Configuration(String),

    #[error("Failed to sign APNs provider token: {0}")]
    Signing(String),
}

impl From<AuthError> for String {
    fn from(err: AuthError) -> Self {
        err.to_string()
    }
}
