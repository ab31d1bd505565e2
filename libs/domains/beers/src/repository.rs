use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{BeerError, BeerResult};
use crate::models::{Beer, CreateBeer};

/// Repository trait for Beer persistence
///
/// Every call is atomic on its own; callers get no isolation across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// Store a new beer under a fresh id. Fails with `AlreadyExists` on a taken name.
    async fn create(&self, input: CreateBeer) -> BeerResult<Beer>;

    async fn find_by_id(&self, id: i64) -> BeerResult<Option<Beer>>;

    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> BeerResult<Option<Beer>>;

    /// All beers ordered by id
    async fn find_all(&self) -> BeerResult<Vec<Beer>>;

    /// Overwrite an existing beer. Fails with `NotFound` if the id is gone.
    async fn save(&self, beer: Beer) -> BeerResult<Beer>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> BeerResult<bool>;

    async fn count(&self) -> BeerResult<u64>;
}

/// In-memory implementation of BeerRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryBeerRepository {
    beers: Arc<RwLock<BTreeMap<i64, Beer>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryBeerRepository {
    pub fn new() -> Self {
        Self {
            beers: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryBeerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BeerRepository for InMemoryBeerRepository {
    async fn create(&self, input: CreateBeer) -> BeerResult<Beer> {
        let mut beers = self.beers.write().await;

        if beers.values().any(|b| b.name == input.name) {
            return Err(BeerError::AlreadyExists(input.name));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let beer = Beer::new(id, input);
        beers.insert(id, beer.clone());

        tracing::info!(beer_id = id, beer_name = %beer.name, "Created beer");
        Ok(beer)
    }

    async fn find_by_id(&self, id: i64) -> BeerResult<Option<Beer>> {
        let beers = self.beers.read().await;
        Ok(beers.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> BeerResult<Option<Beer>> {
        let beers = self.beers.read().await;
        Ok(beers.values().find(|b| b.name == name).cloned())
    }

    async fn find_all(&self) -> BeerResult<Vec<Beer>> {
        let beers = self.beers.read().await;
        Ok(beers.values().cloned().collect())
    }

    async fn save(&self, beer: Beer) -> BeerResult<Beer> {
        let mut beers = self.beers.write().await;

        let slot = beers
            .get_mut(&beer.id)
            .ok_or_else(|| BeerError::not_found_id(beer.id))?;
        *slot = beer.clone();

        tracing::info!(beer_id = beer.id, quantity = beer.quantity, "Saved beer");
        Ok(beer)
    }

    async fn delete_by_id(&self, id: i64) -> BeerResult<bool> {
        let mut beers = self.beers.write().await;

        if beers.remove(&id).is_some() {
            tracing::info!(beer_id = id, "Deleted beer");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> BeerResult<u64> {
        Ok(self.beers.read().await.len() as u64)
    }
}
