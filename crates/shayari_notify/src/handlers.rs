//! HTTP handlers for device registration and the manual dispatch trigger
//!
//! Both handlers share the dispatcher as state: registration writes to the
//! device registry it reads from, and the trigger runs one cycle on it.

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shayari_common::{validation_error, ShayariError};
use shayari_db::{DeviceTokenRepository, PoemRepository};
use shayari_firebase::PushSender;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::dispatcher::{DispatchOutcome, DispatchReport, Dispatcher};

/// Request body for registering a device token
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterTokenRequest {
    /// The FCM registration token of the device
    pub fcm_token: Option<String>,

    /// Optional user to associate with the device
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterTokenResponse {
    pub message: String,
}

/// Response body for the manual dispatch trigger
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TriggerResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Present when messages were actually sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DispatchReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Handler for registering a device for push notifications
///
/// Upserts the token: a known token gets its timestamp refreshed.
///
/// # Responses
///
/// - 200 OK: Token registered
/// - 400 Bad Request: `fcmToken` missing or blank, or the body is not JSON
/// - 500 Internal Server Error: The device registry could not be written
pub async fn register_token_handler<T, P, S>(
    State(dispatcher): State<Arc<Dispatcher<T, P, S>>>,
    payload: Result<Json<RegisterTokenRequest>, JsonRejection>,
) -> Result<Json<RegisterTokenResponse>, ShayariError>
where
    T: DeviceTokenRepository + Send + Sync + 'static,
    P: PoemRepository + Send + Sync + 'static,
    S: PushSender + 'static,
{
    let Json(payload) = payload.map_err(|rejection| validation_error(rejection.body_text()))?;

    let token = payload
        .fcm_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| validation_error("fcmToken is required"))?;
    let user_id = payload
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|user_id| !user_id.is_empty());

    debug!("Registering device token for user: {:?}", user_id);

    let stored = dispatcher
        .tokens()
        .upsert_token(token, user_id)
        .await
        .map_err(|e| {
            error!("Failed to register device token: {}", e);
            ShayariError::from(e)
        })?;

    info!(user_id = ?stored.user_id, "Device token registered");

    Ok(Json(RegisterTokenResponse {
        message: "FCM token registered successfully".to_string(),
    }))
}

/// Handler for the manual dispatch trigger
///
/// Runs one dispatch cycle and answers once it has finished.
///
/// # Responses
///
/// - 200 OK: The cycle ran, including the no-op cases
/// - 409 Conflict: Another cycle was already running
/// - 500 Internal Server Error: A store read or delete failed
pub async fn send_random_shayari_handler<T, P, S>(
    State(dispatcher): State<Arc<Dispatcher<T, P, S>>>,
) -> Response
where
    T: DeviceTokenRepository + Send + Sync + 'static,
    P: PoemRepository + Send + Sync + 'static,
    S: PushSender + 'static,
{
    match dispatcher.dispatch_random_poem().await {
        Ok(DispatchOutcome::Skipped) => (
            StatusCode::CONFLICT,
            Json(TriggerResponse {
                success: false,
                message: None,
                report: None,
                error: Some(DispatchOutcome::Skipped.summary()),
            }),
        )
            .into_response(),
        Ok(outcome) => {
            let report = match &outcome {
                DispatchOutcome::Sent(report) => Some(report.clone()),
                _ => None,
            };
            Json(TriggerResponse {
                success: true,
                message: Some(outcome.summary()),
                report,
                error: None,
            })
            .into_response()
        }
        Err(err) => {
            error!("Manual dispatch failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TriggerResponse {
                    success: false,
                    message: None,
                    report: None,
                    error: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    }
}
