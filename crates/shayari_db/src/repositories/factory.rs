//! Factories for creating the SQL repositories from a database client

use crate::repositories::device_token_sql::SqlDeviceTokenRepository;
use crate::repositories::poem_sql::SqlPoemRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating device token repositories
#[derive(Debug, Clone, Default)]
pub struct DeviceTokenRepositoryFactory;

impl DeviceTokenRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlDeviceTokenRepository, DbClient> for DeviceTokenRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlDeviceTokenRepository {
        SqlDeviceTokenRepository::new(db_client)
    }
}

/// Factory for creating poem repositories
#[derive(Debug, Clone, Default)]
pub struct PoemRepositoryFactory;

impl PoemRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlPoemRepository, DbClient> for PoemRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlPoemRepository {
        SqlPoemRepository::new(db_client)
    }
}
