//! Address storage
//!
//! SQLite-backed storage for address records behind a single handle. The
//! handle owns a pooled connection; each operation checks a connection out
//! of the pool for its duration and returns it on every exit path.

pub mod entity;

use std::path::Path;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, Schema,
};
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failure preparing the database file location
    #[error("Failed to prepare database path: {0}")]
    Io(#[from] std::io::Error),

    /// Error surfaced by the database driver
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

/// Field set for an address not yet persisted (no id assigned)
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Handle to the address database
#[derive(Clone)]
pub struct Storage {
    db: DatabaseConnection,
}

impl Storage {
    /// Open the SQLite database at `path`, creating the file, its parent
    /// directory and the address schema when missing.
    pub async fn connect(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        let mut options = ConnectOptions::new(url);
        options.sqlx_logging(false);

        let db = Database::connect(options).await?;
        let storage = Self { db };
        storage.ensure_schema().await?;
        Ok(storage)
    }

    /// Create the addresses table and its indices when they do not exist
    async fn ensure_schema(&self) -> StorageResult<()> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(entity::Entity);
        table.if_not_exists();
        self.db.execute(backend.build(&table)).await?;

        for mut index in schema.create_index_from_entity(entity::Entity) {
            index.if_not_exists();
            self.db.execute(backend.build(&index)).await?;
        }

        Ok(())
    }

    /// Persist a new address and return the stored record with its id
    pub async fn insert_address(&self, record: NewAddress) -> StorageResult<entity::Model> {
        let active = entity::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(record.name),
            street: ActiveValue::Set(record.street),
            city: ActiveValue::Set(record.city),
            latitude: ActiveValue::Set(record.latitude),
            longitude: ActiveValue::Set(record.longitude),
        };

        Ok(active.insert(&self.db).await?)
    }

    /// Fetch one address by id
    pub async fn fetch_address(&self, id: i32) -> StorageResult<Option<entity::Model>> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Fetch every stored address, in storage order
    pub async fn list_addresses(&self) -> StorageResult<Vec<entity::Model>> {
        Ok(entity::Entity::find().all(&self.db).await?)
    }

    /// Write a full record back under its id.
    ///
    /// Returns `None` when the row no longer exists, e.g. when it was
    /// deleted between fetch and write.
    pub async fn update_address(
        &self,
        record: entity::Model,
    ) -> StorageResult<Option<entity::Model>> {
        let active = entity::ActiveModel {
            id: ActiveValue::Unchanged(record.id),
            name: ActiveValue::Set(record.name),
            street: ActiveValue::Set(record.street),
            city: ActiveValue::Set(record.city),
            latitude: ActiveValue::Set(record.latitude),
            longitude: ActiveValue::Set(record.longitude),
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an address by id. Returns whether a row was removed.
    pub async fn delete_address(&self, id: i32) -> StorageResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
