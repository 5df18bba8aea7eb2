//! HTTP wiring for the Shayari backend

pub mod app_state;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use shayari_db::DbClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use app_state::{AppState, ShayariDispatcher};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

async fn health_handler(State(db): State<DbClient>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: db.is_healthy().await,
    })
}

/// Builds the full application router
///
/// Everything is served under `/api`; the Swagger UI is added at `/api/docs`
/// when the `openapi` feature is enabled.
pub fn app(state: &AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Shayari API!" }))
        .route("/health", get(health_handler))
        .with_state(state.db.clone())
        .merge(shayari_notify::routes(state.dispatcher.clone()));

    #[allow(unused_mut)] // mutated when the openapi feature is on
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use shayari_notify::doc::NotifyApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Shayari API",
                version = "0.1.0",
                description = "Shayari push notification service"
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(NotifyApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
}
