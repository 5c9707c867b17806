/// Courier APNs Auth Shared Library
///
/// This library owns provider authentication for Apple Push Notification
/// service (APNs) token-based auth across the Courier platform.
///
/// It handles:
/// - Credential configuration loading and validation
/// - ES256 provider token (JWT) minting
/// - Time-based token caching with single-flight refresh
pub mod cache;
pub mod config;
pub mod errors;
pub mod signer;

pub use cache::TokenCache;
pub use config::ApnsCredentialConfig;
pub use errors::AuthError;
pub use signer::{CredentialSigner, SignedCredential, Signer};
