//! Record store selected at start-up.

use crate::config::StoreConfig;
use database::postgres::{self, DatabaseConnection};
use domain_beers::InMemoryBeerRepository;
use tracing::info;

/// Backing store for the beers API. Cloning shares the underlying data/pool.
#[derive(Clone)]
pub enum Store {
    Memory(InMemoryBeerRepository),
    Postgres(DatabaseConnection),
}

impl Store {
    /// Build the store; in Postgres mode this connects with retry and migrates.
    pub async fn connect(config: &StoreConfig, app_name: &str) -> eyre::Result<Self> {
        match config {
            StoreConfig::Memory => {
                info!("Using in-memory beer store");
                Ok(Store::Memory(InMemoryBeerRepository::new()))
            }
            StoreConfig::Postgres(pg) => {
                info!("Connecting to PostgreSQL");
                let db = postgres::connect_from_config_with_retry(pg.clone(), None)
                    .await
                    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

                postgres::run_migrations::<migration::Migrator>(&db, app_name).await?;
                Ok(Store::Postgres(db))
            }
        }
    }

    pub async fn close(self) {
        match self {
            Store::Memory(_) => info!("In-memory beer store dropped"),
            Store::Postgres(db) => postgres::close(db).await,
        }
    }
}
