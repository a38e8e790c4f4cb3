use anyhow::Context;
use log::debug;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, Statement,
};

use crate::entity::{artists, shows, venues};

const MEMORY: &str = ":memory:";
const TABLES: [&str; 3] = ["venues", "artists", "shows"];

pub(crate) trait StoreConnection {
    async fn connect(&mut self) -> anyhow::Result<()>;
    async fn check(&self) -> anyhow::Result<()>;
    async fn is_initialized(&self) -> anyhow::Result<bool>;
    async fn initialize(&self) -> anyhow::Result<()>;
    async fn close(&self) -> anyhow::Result<()>;
}

/// Owns the process-wide database handle. Request handlers receive clones of
/// the pooled connection; nothing reads it from global state.
pub struct SQLConnector {
    path: String,
    database_connection: Option<DatabaseConnection>,
}

impl SQLConnector {
    pub fn new(path: &str) -> Self {
        SQLConnector {
            path: path.to_string(),
            database_connection: None,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MEMORY)
    }

    fn url(&self) -> String {
        if self.path == MEMORY {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}/db.sqlite?mode=rwc", self.path)
        }
    }

    pub fn connection(&self) -> anyhow::Result<DatabaseConnection> {
        self.database_connection
            .clone()
            .context("database is not connected")
    }
}

impl StoreConnection for SQLConnector {
    async fn connect(&mut self) -> anyhow::Result<()> {
        let mut options = ConnectOptions::new(self.url());
        if self.path == MEMORY {
            // every pooled sqlite memory connection would get its own database
            options.max_connections(1).min_connections(1);
        } else {
            std::fs::create_dir_all(&self.path)
                .with_context(|| format!("failed to create database directory {}", self.path))?;
        }
        options.sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .with_context(|| format!("failed to connect to {}", self.url()))?;
        self.database_connection = Some(db);
        Ok(())
    }

    async fn check(&self) -> anyhow::Result<()> {
        if let Some(ref db) = self.database_connection {
            db.ping().await?;
        }
        Ok(())
    }

    async fn is_initialized(&self) -> anyhow::Result<bool> {
        let db = self.connection()?;
        let backend = db.get_database_backend();
        let row = db
            .query_one(Statement::from_string(
                backend,
                format!(
                    "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name IN ('{}')",
                    TABLES.join("', '")
                ),
            ))
            .await?;
        let count: i64 = match row {
            Some(row) => row.try_get("", "count")?,
            None => 0,
        };
        Ok(count == TABLES.len() as i64)
    }

    async fn initialize(&self) -> anyhow::Result<()> {
        let db = self.connection()?;
        create_table(&db, venues::Entity).await?;
        create_table(&db, artists::Entity).await?;
        create_table(&db, shows::Entity).await?;
        Ok(())
    }

    async fn close(&self) -> anyhow::Result<()> {
        if let Some(ref db) = self.database_connection {
            let db = db.clone();
            db.close().await?;
        }
        Ok(())
    }
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    debug!("Creating table {}", entity.table_name());
    db.execute(backend.build(&statement))
        .await
        .with_context(|| format!("failed to create table {}", entity.table_name()))?;
    Ok(())
}

/// Connected, schema-initialised in-memory database for tests.
#[cfg(test)]
pub(crate) async fn test_connection() -> DatabaseConnection {
    let mut connector = SQLConnector::in_memory();
    connector.connect().await.unwrap();
    connector.initialize().await.unwrap();
    connector.connection().unwrap()
}
