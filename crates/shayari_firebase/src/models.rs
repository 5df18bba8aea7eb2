//! Message models for the FCM HTTP v1 API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A message to be sent via Firebase Cloud Messaging
///
/// This is the top-level structure that wraps a Message object
/// according to the FCM HTTP v1 API format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FcmMessage {
    /// The message payload
    pub message: Message,
}

impl FcmMessage {
    /// A notification message for a single device token, without data or hints.
    pub fn to_token(
        token: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            message: Message {
                token: token.into(),
                notification: Some(Notification {
                    title: title.into(),
                    body: body.into(),
                }),
                data: None,
                android: None,
            },
        }
    }

    /// The target device token
    pub fn token(&self) -> &str {
        &self.message.token
    }
}

/// The message payload for Firebase Cloud Messaging
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    /// Registration token of the target device
    pub token: String,

    /// The notification to be displayed on the user's device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,

    /// Custom key-value data for the app; FCM only accepts string values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,

    /// Android specific delivery options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
}

/// The notification to be displayed on the user's device
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Android delivery hints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AndroidConfig {
    /// `high` wakes the device; `normal` may be batched
    pub priority: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<AndroidNotification>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AndroidNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Response from the Firebase Cloud Messaging API after a successful send
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    /// The message ID, "projects/{project_id}/messages/{message_id}"
    pub name: String,
}

/// Error body returned by the FCM API on failure
#[derive(Debug, Deserialize)]
pub(crate) struct FcmErrorResponse {
    pub error: FcmErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FcmErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl FcmErrorBody {
    /// The FCM specific `errorCode` from the details, if any.
    pub fn fcm_error_code(&self) -> Option<&str> {
        self.details
            .iter()
            .find_map(|detail| detail.get("errorCode").and_then(|code| code.as_str()))
    }
}
