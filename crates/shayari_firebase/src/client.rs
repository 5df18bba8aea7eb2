//! Firebase Cloud Messaging client module
//!
//! The `FirebaseClient` authenticates with a service account and posts
//! messages to the FCM HTTP v1 API. Failed sends are turned into
//! `FirebaseError::ApiError` with a parsed `FcmErrorCode`, which is what the
//! dispatcher uses to decide whether a device token is dead.

use crate::auth::{fetch_access_token, load_service_account_key};
use crate::models::{FcmErrorResponse, FcmMessage, FcmResponse};
use crate::push::PushSender;
use reqwest::Client;
use shayari_common::{ShayariError, HTTP_CLIENT};
use shayari_config::FirebaseConfig;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use yup_oauth2::ServiceAccountKey;

/// Production FCM endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://fcm.googleapis.com";

/// Google access tokens live for an hour; refresh a little early
const TOKEN_TTL: Duration = Duration::from_secs(50 * 60);

/// Errors that can occur when interacting with the Firebase Cloud Messaging API
#[derive(Error, Debug)]
pub enum FirebaseError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the Firebase API
    #[error("Firebase API error ({status} {code}): {message}")]
    ApiError {
        status: u16,
        code: FcmErrorCode,
        message: String,
    },
}

impl FirebaseError {
    /// Builds an `ApiError` from a non-success FCM response.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<FcmErrorResponse>(body) {
            Ok(parsed) => {
                let code = parsed
                    .error
                    .fcm_error_code()
                    .or(parsed.error.status.as_deref())
                    .map(FcmErrorCode::parse)
                    .unwrap_or_else(|| FcmErrorCode::Unknown(String::new()));
                FirebaseError::ApiError {
                    status,
                    code,
                    message: parsed.error.message.unwrap_or_default(),
                }
            }
            Err(_) => FirebaseError::ApiError {
                status,
                code: FcmErrorCode::Unknown(String::new()),
                message: body.to_string(),
            },
        }
    }

    /// Whether FCM reported the target token as permanently undeliverable.
    ///
    /// True for unregistered tokens, for tokens FCM rejects as malformed
    /// registration tokens, and for a bare 404 on the send endpoint.
    pub fn is_dead_token(&self) -> bool {
        match self {
            FirebaseError::ApiError {
                status,
                code,
                message,
            } => match code {
                FcmErrorCode::Unregistered => true,
                FcmErrorCode::InvalidArgument => {
                    message.to_ascii_lowercase().contains("registration token")
                }
                _ => *status == 404,
            },
            _ => false,
        }
    }
}

impl From<FirebaseError> for ShayariError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::ConfigError(msg) => ShayariError::ConfigError(msg),
            FirebaseError::RequestError(e) => ShayariError::HttpError(e.to_string()),
            other => ShayariError::ExternalServiceError {
                service_name: "Firebase Cloud Messaging".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Error codes reported by FCM
///
/// Parsed from the `errorCode` detail when present, otherwise from the
/// canonical `status` of the error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FcmErrorCode {
    Unregistered,
    InvalidArgument,
    SenderIdMismatch,
    QuotaExceeded,
    Unavailable,
    Internal,
    ThirdPartyAuthError,
    Unknown(String),
}

impl FcmErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            // legacy API spellings map onto the v1 codes
            "UNREGISTERED" | "NotRegistered" => FcmErrorCode::Unregistered,
            "INVALID_ARGUMENT" | "InvalidRegistration" => FcmErrorCode::InvalidArgument,
            "SENDER_ID_MISMATCH" | "MismatchSenderId" => FcmErrorCode::SenderIdMismatch,
            "QUOTA_EXCEEDED" | "RESOURCE_EXHAUSTED" => FcmErrorCode::QuotaExceeded,
            "UNAVAILABLE" => FcmErrorCode::Unavailable,
            "INTERNAL" => FcmErrorCode::Internal,
            "THIRD_PARTY_AUTH_ERROR" => FcmErrorCode::ThirdPartyAuthError,
            other => FcmErrorCode::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for FcmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FcmErrorCode::Unregistered => write!(f, "UNREGISTERED"),
            FcmErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            FcmErrorCode::SenderIdMismatch => write!(f, "SENDER_ID_MISMATCH"),
            FcmErrorCode::QuotaExceeded => write!(f, "QUOTA_EXCEEDED"),
            FcmErrorCode::Unavailable => write!(f, "UNAVAILABLE"),
            FcmErrorCode::Internal => write!(f, "INTERNAL"),
            FcmErrorCode::ThirdPartyAuthError => write!(f, "THIRD_PARTY_AUTH_ERROR"),
            FcmErrorCode::Unknown(code) if code.is_empty() => write!(f, "UNKNOWN"),
            FcmErrorCode::Unknown(code) => write!(f, "{}", code),
        }
    }
}

enum Credentials {
    ServiceAccount(ServiceAccountKey),
    /// A fixed bearer token, for emulators and tests
    Static(String),
}

struct CachedToken {
    value: String,
    fetched_at: Instant,
}

/// Client for interacting with the Firebase Cloud Messaging API
pub struct FirebaseClient {
    /// HTTP client for making requests to the FCM API
    client: Client,
    project_id: String,
    base_url: String,
    credentials: Credentials,
    cached_token: Mutex<Option<CachedToken>>,
}

impl FirebaseClient {
    /// Creates a client authenticated with the configured service account
    ///
    /// The project ID falls back to the one in the service account key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if no service account is configured or no
    /// project ID can be determined.
    pub async fn from_config(config: FirebaseConfig) -> Result<Self, FirebaseError> {
        let key = load_service_account_key(&config).await?;
        let project_id = config
            .project_id
            .clone()
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| {
                FirebaseError::ConfigError("Missing project_id in FirebaseConfig".to_string())
            })?;

        Ok(Self::build(
            &config,
            project_id,
            Credentials::ServiceAccount(key),
        ))
    }

    /// Creates a client that sends every request with the given bearer token
    pub fn with_static_token(
        config: &FirebaseConfig,
        token: impl Into<String>,
    ) -> Result<Self, FirebaseError> {
        let project_id = config.project_id.clone().ok_or_else(|| {
            FirebaseError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;

        Ok(Self::build(
            config,
            project_id,
            Credentials::Static(token.into()),
        ))
    }

    fn build(config: &FirebaseConfig, project_id: String, credentials: Credentials) -> Self {
        let base_url = config
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            client: HTTP_CLIENT.clone(),
            project_id,
            base_url,
            credentials,
            cached_token: Mutex::new(None),
        }
    }

    /// The Firebase project messages are sent through
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn access_token(&self) -> Result<String, FirebaseError> {
        let key = match &self.credentials {
            Credentials::Static(token) => return Ok(token.clone()),
            Credentials::ServiceAccount(key) => key,
        };

        let mut cached = self.cached_token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.fetched_at.elapsed() < TOKEN_TTL {
                return Ok(token.value.clone());
            }
        }

        debug!("Fetching new FCM access token");
        let value = fetch_access_token(key.clone()).await?;
        *cached = Some(CachedToken {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }

    /// Sends a push notification message via Firebase Cloud Messaging
    ///
    /// # Returns
    ///
    /// The FCM message name, "projects/{project_id}/messages/{message_id}".
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// * Authentication fails
    /// * The HTTP request fails
    /// * The FCM API returns an error response
    pub async fn send_message(&self, message: &FcmMessage) -> Result<String, FirebaseError> {
        let url = format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url, self.project_id
        );

        let token = self.access_token().await?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(FirebaseError::from_api_response(
                status.as_u16(),
                &error_text,
            ));
        }

        let fcm_response: FcmResponse = response.json().await?;
        Ok(fcm_response.name)
    }
}

impl PushSender for FirebaseClient {
    async fn send(&self, message: &FcmMessage) -> Result<String, FirebaseError> {
        self.send_message(message).await
    }
}
