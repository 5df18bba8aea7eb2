use shayari_common::{log_result, ShayariError};
use shayari_config::AppConfig;
use shayari_db::{
    DbClient, DeviceTokenRepository, DeviceTokenRepositoryFactory, PoemRepository,
    PoemRepositoryFactory, RepositoryFactory, SqlDeviceTokenRepository, SqlPoemRepository,
};
use shayari_firebase::FirebaseClient;
use shayari_notify::Dispatcher;
use std::sync::Arc;

/// The dispatcher wired to the SQL repositories and the FCM client
pub type ShayariDispatcher = Dispatcher<SqlDeviceTokenRepository, SqlPoemRepository, FirebaseClient>;

/// Application state that is shared across all routes.
///
/// Built once at startup; the scheduler and the HTTP handlers share the same
/// dispatcher, so the in-flight guard covers both triggers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Used by the health check
    pub db: DbClient,
    pub dispatcher: Arc<ShayariDispatcher>,
}

impl AppState {
    /// Connects to the database and FCM, and prepares the schema.
    ///
    /// # Errors
    ///
    /// Fails when the database or Firebase section is missing or unusable.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, ShayariError> {
        let db = DbClient::new(&config).await?;

        let firebase_config = config.firebase.clone().ok_or_else(|| {
            ShayariError::ConfigError("Firebase configuration is missing".to_string())
        })?;
        let sender = FirebaseClient::from_config(firebase_config).await?;

        Self::from_parts(config, db, sender).await
    }

    /// Builds the state from an open database and a ready FCM client.
    pub async fn from_parts(
        config: Arc<AppConfig>,
        db: DbClient,
        sender: FirebaseClient,
    ) -> Result<Self, ShayariError> {
        let tokens = DeviceTokenRepositoryFactory::new().create_repository(db.clone());
        let poems = PoemRepositoryFactory::new().create_repository(db.clone());

        log_result(
            tokens.init_schema().await,
            "Device token schema ready",
            "Failed to initialize device token schema",
        )?;
        log_result(
            poems.init_schema().await,
            "Poem schema ready",
            "Failed to initialize poem schema",
        )?;

        let dispatcher = Dispatcher::from_config(tokens, poems, sender, &config.notifications);

        Ok(Self {
            config,
            db,
            dispatcher: Arc::new(dispatcher),
        })
    }
}
