use crate::models::{Beer, BeerType};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the `beers` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "beers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub brand: String,
    pub max: i32,
    pub quantity: i32,
    pub beer_type: BeerType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Beer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            brand: model.brand,
            max: model.max,
            quantity: model.quantity,
            beer_type: model.beer_type,
        }
    }
}

/// Full-row update of an existing beer.
impl From<&Beer> for ActiveModel {
    fn from(beer: &Beer) -> Self {
        ActiveModel {
            id: Set(beer.id),
            name: Set(beer.name.clone()),
            brand: Set(beer.brand.clone()),
            max: Set(beer.max),
            quantity: Set(beer.quantity),
            beer_type: Set(beer.beer_type),
        }
    }
}

/// Insert of a new beer; the database assigns the id.
impl From<crate::models::CreateBeer> for ActiveModel {
    fn from(input: crate::models::CreateBeer) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            brand: Set(input.brand),
            max: Set(input.max),
            quantity: Set(input.quantity),
            beer_type: Set(input.beer_type),
        }
    }
}
