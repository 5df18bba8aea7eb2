use axum::{
    routing::{get, post},
    Router,
};
use shayari_db::{DeviceTokenRepository, PoemRepository};
use shayari_firebase::PushSender;
use std::sync::Arc;
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::handlers::{register_token_handler, send_random_shayari_handler};

/// Create the notification routes for the API
///
/// Paths are relative; the backend nests them under `/api`.
pub fn routes<T, P, S>(dispatcher: Arc<Dispatcher<T, P, S>>) -> Router
where
    T: DeviceTokenRepository + Send + Sync + 'static,
    P: PoemRepository + Send + Sync + 'static,
    S: PushSender + 'static,
{
    info!("Notification routes initialized");

    Router::new()
        .route(
            "/register-fcm-token",
            post(register_token_handler::<T, P, S>),
        )
        .route(
            "/notifications/send-random-shayari",
            get(send_random_shayari_handler::<T, P, S>),
        )
        .with_state(dispatcher)
}
