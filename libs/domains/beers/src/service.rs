//! Beer Service - stock rules on top of a [`BeerRepository`]

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{BeerError, BeerResult};
use crate::models::{Beer, CreateBeer};
use crate::repository::BeerRepository;

/// Enforces unique names, existence before mutation, and stock bounds.
///
/// Each operation is one read-check-write against the repository; two
/// concurrent adjustments of the same beer may race.
pub struct BeerService<R: BeerRepository> {
    repository: Arc<R>,
}

impl<R: BeerRepository> BeerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a beer. A taken name fails with `AlreadyExists` whatever the
    /// other fields hold; field validation only runs for a free name.
    #[instrument(skip(self, input), fields(beer_name = %input.name))]
    pub async fn create_beer(&self, input: CreateBeer) -> BeerResult<Beer> {
        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(BeerError::AlreadyExists(input.name));
        }

        input.validate()?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> BeerResult<Beer> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| BeerError::not_found_name(name))
    }

    #[instrument(skip(self))]
    pub async fn get_beer(&self, id: i64) -> BeerResult<Beer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BeerError::not_found_id(id))
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> BeerResult<Vec<Beer>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn count_beers(&self) -> BeerResult<u64> {
        self.repository.count().await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> BeerResult<()> {
        self.get_beer(id).await?;

        if !self.repository.delete_by_id(id).await? {
            // Removed by someone else between the lookup and the delete
            return Err(BeerError::not_found_id(id));
        }
        Ok(())
    }

    /// Add `amount` to the stock. Only the upper bound is checked, so a
    /// negative amount lowers the stock without a floor.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: i64, amount: i32) -> BeerResult<Beer> {
        let beer = self.get_beer(id).await?;

        match beer.quantity.checked_add(amount) {
            Some(quantity) if quantity <= beer.max => {
                self.repository.save(beer.with_quantity(quantity)).await
            }
            _ => Err(BeerError::StockExceeded {
                id,
                quantity: amount,
            }),
        }
    }

    /// Remove `amount` from the stock; the result must stay within `0..=max`.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: i64, amount: i32) -> BeerResult<Beer> {
        let beer = self.get_beer(id).await?;

        match beer.quantity.checked_sub(amount) {
            Some(quantity) if (0..=beer.max).contains(&quantity) => {
                self.repository.save(beer.with_quantity(quantity)).await
            }
            _ => Err(BeerError::StockExceeded {
                id,
                quantity: amount,
            }),
        }
    }
}

impl<R: BeerRepository> Clone for BeerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BeerKey;
    use crate::models::BeerType;
    use crate::repository::{InMemoryBeerRepository, MockBeerRepository};
    use mockall::predicate::eq;

    fn brahma() -> CreateBeer {
        CreateBeer {
            name: "Brahma".to_string(),
            brand: "Ambev".to_string(),
            max: 50,
            quantity: 10,
            beer_type: BeerType::Lager,
        }
    }

    fn named(name: &str) -> CreateBeer {
        CreateBeer {
            name: name.to_string(),
            ..brahma()
        }
    }

    fn stored_brahma() -> Beer {
        Beer::new(1, brahma())
    }

    async fn in_memory_with_brahma() -> (BeerService<InMemoryBeerRepository>, Beer) {
        let service = BeerService::new(InMemoryBeerRepository::new());
        let beer = service.create_beer(brahma()).await.unwrap();
        (service, beer)
    }

    // ---- mocked repository ----

    #[tokio::test]
    async fn test_create_beer_checks_name_then_creates() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_name()
            .withf(|name: &str| name == "Brahma")
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_create()
            .times(1)
            .returning(|input| Ok(Beer::new(1, input)));

        let service = BeerService::new(mock);
        let beer = service.create_beer(brahma()).await.unwrap();

        assert_eq!(beer.id, 1);
        assert_eq!(beer.name, "Brahma");
    }

    #[tokio::test]
    async fn test_create_beer_rejects_taken_name_without_creating() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_name()
            .returning(|_| Ok(Some(stored_brahma())));
        mock.expect_create().never();

        let service = BeerService::new(mock);
        let result = service.create_beer(brahma()).await;

        assert!(matches!(result, Err(BeerError::AlreadyExists(name)) if name == "Brahma"));
    }

    #[tokio::test]
    async fn test_create_beer_validates_before_creating() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_name()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_create().never();

        let service = BeerService::new(mock);
        let result = service
            .create_beer(CreateBeer {
                quantity: 60,
                ..brahma()
            })
            .await;

        assert!(matches!(result, Err(BeerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_increment_saves_new_quantity() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(stored_brahma())));
        mock.expect_save()
            .withf(|beer: &Beer| beer.id == 1 && beer.quantity == 40)
            .times(1)
            .returning(Ok);

        let service = BeerService::new(mock);
        let beer = service.increment(1, 30).await.unwrap();

        assert_eq!(beer.quantity, 40);
    }

    #[tokio::test]
    async fn test_increment_past_max_never_saves() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_id()
            .returning(|_| Ok(Some(stored_brahma())));
        mock.expect_save().never();

        let service = BeerService::new(mock);
        let result = service.increment(1, 41).await;

        assert!(matches!(
            result,
            Err(BeerError::StockExceeded { id: 1, quantity: 41 })
        ));
    }

    #[tokio::test]
    async fn test_increment_overflow_is_stock_exceeded() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_id()
            .returning(|_| Ok(Some(stored_brahma())));
        mock.expect_save().never();

        let service = BeerService::new(mock);
        let result = service.increment(1, i32::MAX).await;

        assert!(matches!(result, Err(BeerError::StockExceeded { .. })));
    }

    #[tokio::test]
    async fn test_decrement_missing_beer() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_id().with(eq(7)).returning(|_| Ok(None));
        mock.expect_save().never();

        let service = BeerService::new(mock);
        let result = service.decrement(7, 1).await;

        assert!(matches!(result, Err(BeerError::NotFound(BeerKey::Id(7)))));
    }

    #[tokio::test]
    async fn test_delete_race_reports_not_found() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_id()
            .returning(|_| Ok(Some(stored_brahma())));
        mock.expect_delete_by_id().with(eq(1)).returning(|_| Ok(false));

        let service = BeerService::new(mock);
        let result = service.delete_by_id(1).await;

        assert!(matches!(result, Err(BeerError::NotFound(BeerKey::Id(1)))));
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_all()
            .returning(|| Err(BeerError::Database("connection reset".into())));

        let service = BeerService::new(mock);
        assert!(matches!(
            service.list_all().await,
            Err(BeerError::Database(_))
        ));
    }

    // ---- in-memory repository ----

    #[tokio::test]
    async fn test_duplicate_name_fails_regardless_of_other_fields() {
        let (service, _) = in_memory_with_brahma().await;

        let result = service
            .create_beer(CreateBeer {
                brand: "Other".to_string(),
                max: 10,
                quantity: 0,
                beer_type: BeerType::Stout,
                ..brahma()
            })
            .await;

        assert!(matches!(result, Err(BeerError::AlreadyExists(_))));
        assert_eq!(service.count_beers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_wins_over_invalid_fields() {
        let (service, _) = in_memory_with_brahma().await;

        let over_max = service
            .create_beer(CreateBeer {
                max: 5,
                quantity: 10,
                ..brahma()
            })
            .await;
        assert!(matches!(over_max, Err(BeerError::AlreadyExists(_))));

        let empty_brand = service
            .create_beer(CreateBeer {
                brand: String::new(),
                ..brahma()
            })
            .await;
        assert!(matches!(empty_brand, Err(BeerError::AlreadyExists(_))));

        assert_eq!(service.count_beers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_beer_taken_name_skips_validation() {
        let mut mock = MockBeerRepository::new();
        mock.expect_find_by_name()
            .returning(|_| Ok(Some(stored_brahma())));
        mock.expect_create().never();

        let service = BeerService::new(mock);
        let result = service
            .create_beer(CreateBeer {
                name: "Brahma".to_string(),
                brand: String::new(),
                max: 600,
                quantity: -1,
                beer_type: BeerType::Ale,
            })
            .await;

        assert!(matches!(result, Err(BeerError::AlreadyExists(name)) if name == "Brahma"));
    }

    #[tokio::test]
    async fn test_find_by_name_round_trip() {
        let (service, created) = in_memory_with_brahma().await;

        let found = service.find_by_name("Brahma").await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_by_name_unknown() {
        let service = BeerService::new(InMemoryBeerRepository::new());

        let result = service.find_by_name("Skol").await;
        assert!(matches!(result, Err(BeerError::NotFound(BeerKey::Name(n))) if n == "Skol"));
    }

    #[tokio::test]
    async fn test_list_all_returns_every_beer() {
        let service = BeerService::new(InMemoryBeerRepository::new());
        let names = ["Brahma", "Skol", "Bohemia", "Original"];
        for name in names {
            service.create_beer(named(name)).await.unwrap();
        }

        let mut listed: Vec<String> = service
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        listed.sort();

        let mut expected: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        expected.sort();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let service = BeerService::new(InMemoryBeerRepository::new());
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let service = BeerService::new(InMemoryBeerRepository::new());

        let result = service.delete_by_id(1).await;
        assert!(matches!(result, Err(BeerError::NotFound(BeerKey::Id(1)))));
    }

    #[tokio::test]
    async fn test_deleted_beer_is_gone() {
        let (service, beer) = in_memory_with_brahma().await;

        service.delete_by_id(beer.id).await.unwrap();

        assert!(matches!(
            service.find_by_name("Brahma").await,
            Err(BeerError::NotFound(_))
        ));
        assert!(matches!(
            service.get_beer(beer.id).await,
            Err(BeerError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_by_id(beer.id).await,
            Err(BeerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_increment_then_exceed_leaves_quantity() {
        let (service, beer) = in_memory_with_brahma().await;

        let incremented = service.increment(beer.id, 30).await.unwrap();
        assert_eq!(incremented.quantity, 40);

        let result = service.increment(beer.id, 11).await;
        assert!(matches!(
            result,
            Err(BeerError::StockExceeded { quantity: 11, .. })
        ));
        assert_eq!(service.get_beer(beer.id).await.unwrap().quantity, 40);
    }

    #[tokio::test]
    async fn test_increment_to_exactly_max() {
        let (service, beer) = in_memory_with_brahma().await;

        let full = service.increment(beer.id, 40).await.unwrap();
        assert_eq!(full.quantity, full.max);
    }

    #[tokio::test]
    async fn test_decrement_then_below_zero_leaves_quantity() {
        let (service, beer) = in_memory_with_brahma().await;

        let decremented = service.decrement(beer.id, 5).await.unwrap();
        assert_eq!(decremented.quantity, 5);

        let result = service.decrement(beer.id, 6).await;
        assert!(matches!(
            result,
            Err(BeerError::StockExceeded { quantity: 6, .. })
        ));
        assert_eq!(service.get_beer(beer.id).await.unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_decrement_to_exactly_zero() {
        let (service, beer) = in_memory_with_brahma().await;

        let empty = service.decrement(beer.id, 10).await.unwrap();
        assert_eq!(empty.quantity, 0);
    }

    #[tokio::test]
    async fn test_negative_decrement_is_bounded_by_max() {
        let (service, beer) = in_memory_with_brahma().await;

        assert_eq!(service.decrement(beer.id, -40).await.unwrap().quantity, 50);
        assert!(matches!(
            service.decrement(beer.id, -1).await,
            Err(BeerError::StockExceeded { .. })
        ));
    }

    #[tokio::test]
    async fn test_negative_increment_has_no_floor() {
        let (service, beer) = in_memory_with_brahma().await;

        let drained = service.increment(beer.id, -15).await.unwrap();
        assert_eq!(drained.quantity, -5);
    }

    #[tokio::test]
    async fn test_increment_unknown_id() {
        let service = BeerService::new(InMemoryBeerRepository::new());

        let result = service.increment(3, 1).await;
        assert!(matches!(result, Err(BeerError::NotFound(BeerKey::Id(3)))));
    }

    #[tokio::test]
    async fn test_brahma_stock_scenario() {
        let service = BeerService::new(InMemoryBeerRepository::new());

        let beer = service.create_beer(brahma()).await.unwrap();
        let beer = service.increment(beer.id, 5).await.unwrap();
        assert_eq!(beer.quantity, 15);

        let result = service.decrement(beer.id, 20).await;
        assert!(matches!(result, Err(BeerError::StockExceeded { .. })));
        assert_eq!(service.find_by_name("Brahma").await.unwrap().quantity, 15);
    }

    #[tokio::test]
    async fn test_cloned_service_shares_repository() {
        let (service, _) = in_memory_with_brahma().await;
        let clone = service.clone();

        clone.create_beer(named("Skol")).await.unwrap();
        assert_eq!(service.count_beers().await.unwrap(), 2);
    }
}
