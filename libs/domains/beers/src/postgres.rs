use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{BeerError, BeerResult},
    models::{Beer, CreateBeer},
    repository::BeerRepository,
};

/// PostgreSQL-backed repository over the `beers` table.
#[derive(Clone)]
pub struct PgBeerRepository {
    db: DatabaseConnection,
}

impl PgBeerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BeerRepository for PgBeerRepository {
    async fn create(&self, input: CreateBeer) -> BeerResult<Beer> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => BeerError::AlreadyExists(name),
                _ => BeerError::from(e),
            })?;

        tracing::info!(beer_id = model.id, beer_name = %model.name, "Created beer");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> BeerResult<Option<Beer>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> BeerResult<Option<Beer>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> BeerResult<Vec<Beer>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, beer: Beer) -> BeerResult<Beer> {
        let active_model = entity::ActiveModel::from(&beer);

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => BeerError::not_found_id(beer.id),
            e => BeerError::from(e),
        })?;

        tracing::info!(beer_id = model.id, quantity = model.quantity, "Saved beer");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> BeerResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(beer_id = id, "Deleted beer");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> BeerResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BeerType;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn brahma_model() -> entity::Model {
        entity::Model {
            id: 1,
            name: "Brahma".to_string(),
            brand: "Ambev".to_string(),
            max: 50,
            quantity: 10,
            beer_type: BeerType::Lager,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![brahma_model()]])
            .into_connection();
        let repo = PgBeerRepository::new(db);

        let beer = repo.find_by_name("Brahma").await.unwrap().unwrap();
        assert_eq!(beer, Beer::from(brahma_model()));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgBeerRepository::new(db);

        assert!(repo.find_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgBeerRepository::new(db);

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_becomes_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgBeerRepository::new(db);

        let result = repo.find_all().await;
        assert!(matches!(result, Err(BeerError::Database(_))));
    }
}
