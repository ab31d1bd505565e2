//! Beers Domain
//!
//! Stock keeping for a catalog of beers: unique names, and a quantity that
//! only moves through increment/decrement and always stays within `0..=max`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP mapping, status codes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Uniqueness, existence, stock bounds
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Beer, CreateBeer, BeerType
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_beers::{BeerService, InMemoryBeerRepository, handlers};
//!
//! let service = BeerService::new(InMemoryBeerRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BeerError, BeerKey, BeerResult};
pub use handlers::ApiDoc;
pub use models::{Beer, BeerType, CreateBeer, QuantityRequest};
pub use postgres::PgBeerRepository;
pub use repository::{BeerRepository, InMemoryBeerRepository};
pub use service::BeerService;
