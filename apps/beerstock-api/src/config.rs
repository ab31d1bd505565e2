use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Which record store backs the beers API (`BEER_STORE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    Memory,
    Postgres,
}

#[derive(Clone, Debug)]
pub enum StoreConfig {
    Memory,
    Postgres(PostgresConfig),
}

/// Application configuration, composed from the shared config pieces.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080

        let store = match env_parse::<StoreKind>("BEER_STORE", "memory")? {
            StoreKind::Memory => StoreConfig::Memory,
            // DATABASE_URL is only required here
            StoreKind::Postgres => StoreConfig::Postgres(PostgresConfig::from_env()?),
        };

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            store,
        })
    }
}
