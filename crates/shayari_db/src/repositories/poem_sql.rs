//! SQL implementation of the poem repository

use crate::error::DbError;
use crate::repositories::parse_timestamp;
use crate::repositories::poem::{PoemRecord, PoemRepository};
use crate::DbClient;
use chrono::Utc;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the poem repository
#[derive(Debug, Clone)]
pub struct SqlPoemRepository {
    db_client: DbClient,
}

impl SqlPoemRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

/// NULL columns read back as `''`; the `Any` driver cannot decode them as `Option`.
const POEM_COLUMNS: &str = "id, COALESCE(text, '') AS text, COALESCE(created_at, '') AS created_at";

fn row_to_poem(row: &AnyRow) -> Result<PoemRecord, DbError> {
    let id: i64 = row.try_get("id")?;
    let text: String = row.try_get("text")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(PoemRecord::from_stored(
        id,
        Some(text),
        parse_timestamp(Some(created_at)),
    ))
}

impl PoemRepository for SqlPoemRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing poem schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS poems (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NULL,
                created_at TEXT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Poem schema initialized successfully");
        Ok(())
    }

    async fn insert_poem(&self, text: Option<&str>) -> Result<PoemRecord, DbError> {
        let query = format!(
            r#"
            INSERT INTO poems (text, created_at)
            VALUES ($1, $2)
            RETURNING {POEM_COLUMNS}
        "#
        );

        let row = sqlx::query(&query)
            .bind(text)
            .bind(Utc::now().to_rfc3339())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert poem: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row_to_poem(&row)
    }

    async fn find_all(&self) -> Result<Vec<PoemRecord>, DbError> {
        debug!("Finding all poems");

        let query = format!("SELECT {POEM_COLUMNS} FROM poems ORDER BY id");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find poems: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(row_to_poem).collect()
    }
}
