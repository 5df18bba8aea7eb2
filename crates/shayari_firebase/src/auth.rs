//! Authentication module for Firebase Cloud Messaging
//!
//! Loads the service account and exchanges it for OAuth2 access tokens with
//! the messaging scope.

use crate::client::FirebaseError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use shayari_config::FirebaseConfig;
use std::path::Path;
use tracing::debug;
use yup_oauth2::{
    parse_service_account_key, read_service_account_key, ServiceAccountAuthenticator,
    ServiceAccountKey,
};

/// OAuth2 scope required by the FCM HTTP v1 API
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Loads the service account key named by the Firebase configuration
///
/// `key_path` wins when both a path and an inline base64 key are configured.
///
/// # Errors
///
/// Returns a `ConfigError` if neither source is configured, the file can't be
/// read, or the inline key is not valid base64 encoded service account JSON.
pub async fn load_service_account_key(
    config: &FirebaseConfig,
) -> Result<ServiceAccountKey, FirebaseError> {
    if let Some(key_path) = config.key_path.as_deref() {
        debug!("Reading Firebase service account from {}", key_path);
        return read_service_account_key(Path::new(key_path))
            .await
            .map_err(|e| {
                FirebaseError::ConfigError(format!(
                    "Failed to read service account key {}: {}",
                    key_path, e
                ))
            });
    }

    if let Some(encoded) = config.service_account_base64.as_deref() {
        debug!("Decoding inline Firebase service account");
        return decode_service_account_key(encoded);
    }

    Err(FirebaseError::ConfigError(
        "Missing key_path or service_account_base64 in FirebaseConfig".to_string(),
    ))
}

/// Decodes a base64 encoded service account JSON document
pub fn decode_service_account_key(encoded: &str) -> Result<ServiceAccountKey, FirebaseError> {
    let json = STANDARD.decode(encoded.trim()).map_err(|e| {
        FirebaseError::ConfigError(format!("Service account key is not valid base64: {}", e))
    })?;

    parse_service_account_key(json).map_err(|e| {
        FirebaseError::ConfigError(format!("Service account key is not valid JSON: {}", e))
    })
}

/// Obtains an OAuth2 access token for Firebase Cloud Messaging
///
/// # Errors
///
/// Returns an `AuthError` if authentication with Google's OAuth2 service fails
/// or no token is returned.
pub async fn fetch_access_token(key: ServiceAccountKey) -> Result<String, FirebaseError> {
    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| FirebaseError::AuthError(e.to_string()))?;

    let access_token = auth
        .token(&[FCM_SCOPE])
        .await
        .map_err(|e| FirebaseError::AuthError(e.to_string()))?;

    access_token
        .token()
        .map(str::to_string)
        .ok_or_else(|| FirebaseError::AuthError("No token available".to_string()))
}
