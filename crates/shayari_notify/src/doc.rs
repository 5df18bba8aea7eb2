#![allow(dead_code)]
use utoipa::OpenApi;

use crate::dispatcher::DispatchReport;
use crate::handlers::{RegisterTokenRequest, RegisterTokenResponse, TriggerResponse};

#[utoipa::path(
    post,
    path = "/register-fcm-token",
    request_body(content = RegisterTokenRequest, example = json!({
        "fcmToken": "fcm-registration-token-example",
        "userId": "user123"
    })),
    responses(
        (status = 200, description = "Token registered", body = RegisterTokenResponse,
         example = json!({"message": "FCM token registered successfully"})
        ),
        (status = 400, description = "Bad Request",
         example = json!({"error": "Validation error: fcmToken is required"})
        ),
        (status = 500, description = "Internal Server Error",
         example = json!({"error": "Database error: Database query error: disk I/O error"})
        )
    ),
    tag = "Notifications"
)]
fn doc_register_token_handler() {}

#[utoipa::path(
    get,
    path = "/notifications/send-random-shayari",
    responses(
        (status = 200, description = "Dispatch cycle finished", body = TriggerResponse,
         example = json!({
             "success": true,
             "message": "Shayari 7 sent to 2 of 3 devices",
             "report": {
                 "poem_id": 7,
                 "random_index": 4,
                 "attempted": 3,
                 "delivered": 2,
                 "pruned": 1,
                 "failed": 0
             }
         })
        ),
        (status = 409, description = "A dispatch cycle is already running", body = TriggerResponse,
         example = json!({"success": false, "error": "A dispatch cycle is already running"})
        ),
        (status = 500, description = "Internal Server Error", body = TriggerResponse,
         example = json!({"success": false, "error": "Store error: Database error: pool timed out"})
        )
    ),
    tag = "Notifications"
)]
fn doc_send_random_shayari_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_register_token_handler,
        doc_send_random_shayari_handler,
    ),
    components(
        schemas(
            RegisterTokenRequest,
            RegisterTokenResponse,
            TriggerResponse,
            DispatchReport,
        )
    ),
    tags(
        (name = "Notifications", description = "Device registration and shayari dispatch")
    ),
    servers(
        (url = "/api", description = "Shayari API server")
    )
)]
pub struct NotifyApiDoc;
