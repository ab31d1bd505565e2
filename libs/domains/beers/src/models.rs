use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Beer style
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "beer_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerType {
    #[sea_orm(string_value = "LAGER")]
    Lager,
    #[sea_orm(string_value = "MALZBIER")]
    Malzbier,
    #[sea_orm(string_value = "WITBIER")]
    Witbier,
    #[sea_orm(string_value = "WEISS")]
    Weiss,
    #[sea_orm(string_value = "ALE")]
    Ale,
    #[sea_orm(string_value = "IPA")]
    Ipa,
    #[sea_orm(string_value = "STOUT")]
    Stout,
}

/// A stocked beer. `0 <= quantity <= max` holds for every stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Beer {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// Unique across the catalog
    pub name: String,
    pub brand: String,
    /// Upper bound on `quantity`
    pub max: i32,
    /// Units currently in stock
    pub quantity: i32,
    pub beer_type: BeerType,
}

impl Beer {
    /// Build the stored record from a creation request and a store-assigned id.
    pub fn new(id: i64, input: CreateBeer) -> Self {
        Self {
            id,
            name: input.name,
            brand: input.brand,
            max: input.max,
            quantity: input.quantity,
            beer_type: input.beer_type,
        }
    }

    /// Same beer with a different stock level.
    pub fn with_quantity(self, quantity: i32) -> Self {
        Self { quantity, ..self }
    }
}

/// DTO for registering a beer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_stock_within_max"))]
pub struct CreateBeer {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub brand: String,
    #[validate(range(min = 0, max = 500))]
    pub max: i32,
    #[validate(range(min = 0, max = 100))]
    pub quantity: i32,
    #[serde(alias = "beerType")]
    pub beer_type: BeerType,
}

fn validate_stock_within_max(input: &CreateBeer) -> Result<(), ValidationError> {
    if input.quantity > input.max {
        let mut err = ValidationError::new("quantity_exceeds_max");
        err.message = Some("quantity must not exceed max".into());
        return Err(err);
    }
    Ok(())
}

/// Body of the increment/decrement endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuantityRequest {
    #[validate(range(max = 100))]
    pub quantity: i32,
}
