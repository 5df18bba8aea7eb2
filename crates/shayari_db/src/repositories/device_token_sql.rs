//! SQL implementation of the device token repository

use crate::error::DbError;
use crate::repositories::device_token::{DeviceToken, DeviceTokenRepository};
use crate::repositories::parse_timestamp;
use crate::DbClient;
use chrono::Utc;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the device token repository
#[derive(Debug, Clone)]
pub struct SqlDeviceTokenRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlDeviceTokenRepository {
    /// Create a new SQL device token repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

/// Column list shared by every read. The `Any` driver cannot decode a NULL
/// into `Option<String>`, so a missing user comes back as `''`.
const DEVICE_TOKEN_COLUMNS: &str = "token, COALESCE(user_id, '') AS user_id, last_updated_at";

fn row_to_device_token(row: &AnyRow) -> Result<DeviceToken, DbError> {
    let token: String = row.try_get("token")?;
    let user_id: String = row.try_get("user_id")?;
    let last_updated_at: String = row.try_get("last_updated_at")?;

    Ok(DeviceToken {
        token,
        user_id: Some(user_id).filter(|u| !u.is_empty()),
        last_updated_at: parse_timestamp(Some(last_updated_at)).unwrap_or_else(Utc::now),
    })
}

impl DeviceTokenRepository for SqlDeviceTokenRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing device token schema");

        // The primary key doubles as the uniqueness guarantee on the token value
        let query = r#"
            CREATE TABLE IF NOT EXISTS device_tokens (
                token TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NULL,
                last_updated_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Device token schema initialized successfully");
        Ok(())
    }

    async fn upsert_token(&self, token: &str, user_id: Option<&str>) -> Result<DeviceToken, DbError> {
        debug!("Registering device token: {}", token);

        let query = format!(
            r#"
            INSERT INTO device_tokens (token, user_id, last_updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (token) DO UPDATE SET
                user_id = COALESCE(excluded.user_id, device_tokens.user_id),
                last_updated_at = excluded.last_updated_at
            RETURNING {DEVICE_TOKEN_COLUMNS}
        "#
        );

        let row = sqlx::query(&query)
            .bind(token)
            .bind(user_id)
            .bind(Utc::now().to_rfc3339())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert device token: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let stored = row_to_device_token(&row)?;
        info!("Device token registered successfully");
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<DeviceToken>, DbError> {
        debug!("Finding all device tokens");

        let query = format!("SELECT {DEVICE_TOKEN_COLUMNS} FROM device_tokens");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find device tokens: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(row_to_device_token).collect()
    }

    async fn delete_token(&self, token: &str) -> Result<bool, DbError> {
        debug!("Deleting device token: {}", token);

        let query = r#"
            DELETE FROM device_tokens
            WHERE token = $1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete device token: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
