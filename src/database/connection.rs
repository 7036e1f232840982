use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use migration::{Migrator, MigratorTrait};
use crate::database::normalize_customer_phones;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};

/// Location of the SQLite file. Holds no open connection: every operation
/// calls [`Store::connect`] and hands the connection back through
/// [`release`] before returning.
#[derive(Clone, Debug)]
pub struct Store {
    url: String,
}

impl Store {
    pub fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        let path = config
            .resolve_path()
            .map_err(|e| AppError::ConfigError(format!("Cannot resolve database path: {e}")))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::ConfigError(format!(
                    "Cannot create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        let url = config
            .sqlite_url()
            .map_err(|e| AppError::ConfigError(format!("Cannot build database url: {e}")))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn connect(&self) -> AppResult<DatabaseConnection> {
        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(1)
            .min_connections(0)
            .sqlx_logging(false);
        log::debug!("Opening database connection: {}", self.url);
        Ok(Database::connect(options).await?)
    }
}

/// Closes `conn` and passes `result` through. A failed close is only logged
/// because the statements have already committed.
pub async fn release<T>(conn: DatabaseConnection, result: AppResult<T>) -> AppResult<T> {
    if let Err(e) = conn.close().await {
        log::warn!("Failed to close database connection: {e}");
    }
    result
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Brings the schema up to date and normalises rows written by earlier
/// deployments. Runs on every start; existing tables and rows are kept.
pub async fn run_migrations(store: &Store) -> AppResult<()> {
    let conn = store.connect().await?;
    let result = async {
        Migrator::up(&conn, None).await?;
        normalize_customer_phones(&conn).await?;
        Ok::<_, AppError>(())
    }
    .await;
    release(conn, result).await
}
