use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, StockExceededResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    error::BeerResult,
    models::{Beer, BeerType, CreateBeer, QuantityRequest},
    repository::BeerRepository,
    service::BeerService,
};

/// OpenAPI documentation for the Beers API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_beer,
        find_by_name,
        list_beers,
        delete_beer,
        increment_stock,
        decrement_stock,
    ),
    components(
        schemas(Beer, BeerType, CreateBeer, QuantityRequest),
        responses(
            NotFoundResponse,
            ConflictResponse,
            StockExceededResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "beers", description = "Beer stock management endpoints")
    )
)]
pub struct ApiDoc;

/// Create Axum router for beer endpoints.
///
/// `/{key}` is a name for `GET` and a numeric id for `DELETE`.
pub fn router<R>(service: BeerService<R>) -> Router
where
    R: BeerRepository + 'static,
{
    let service = Arc::new(service);

    Router::new()
        .route("/", get(list_beers).post(create_beer))
        .route("/{key}", get(find_by_name).delete(delete_beer))
        .route("/{key}/increment", patch(increment_stock))
        .route("/{key}/decrement", patch(decrement_stock))
        .with_state(service)
}

/// Register a beer
#[utoipa::path(
    post,
    path = "",
    tag = "beers",
    request_body = CreateBeer,
    responses(
        (status = 201, description = "Beer registered", body = Beer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_beer<R>(
    State(service): State<Arc<BeerService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateBeer>,
) -> BeerResult<impl IntoResponse>
where
    R: BeerRepository,
{
    let beer = service.create_beer(input).await?;
    Ok((StatusCode::CREATED, Json(beer)))
}

/// Get a beer by name
#[utoipa::path(
    get,
    path = "/{name}",
    tag = "beers",
    params(
        ("name" = String, Path, description = "Beer name, exact match")
    ),
    responses(
        (status = 200, description = "Beer found", body = Beer),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_by_name<R>(
    State(service): State<Arc<BeerService<R>>>,
    Path(name): Path<String>,
) -> BeerResult<impl IntoResponse>
where
    R: BeerRepository,
{
    let beer = service.find_by_name(&name).await?;
    Ok(Json(beer))
}

/// List all beers
#[utoipa::path(
    get,
    path = "",
    tag = "beers",
    responses(
        (status = 200, description = "All registered beers", body = Vec<Beer>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_beers<R>(State(service): State<Arc<BeerService<R>>>) -> BeerResult<impl IntoResponse>
where
    R: BeerRepository,
{
    let beers = service.list_all().await?;
    Ok(Json(beers))
}

/// Delete a beer by ID
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "beers",
    params(
        ("id" = i64, Path, description = "Beer ID")
    ),
    responses(
        (status = 204, description = "Beer deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_beer<R>(
    State(service): State<Arc<BeerService<R>>>,
    IdPath(id): IdPath,
) -> BeerResult<impl IntoResponse>
where
    R: BeerRepository,
{
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add units to a beer's stock
#[utoipa::path(
    patch,
    path = "/{id}/increment",
    tag = "beers",
    params(
        ("id" = i64, Path, description = "Beer ID")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Stock incremented", body = Beer),
        (status = 400, response = StockExceededResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn increment_stock<R>(
    State(service): State<Arc<BeerService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<QuantityRequest>,
) -> BeerResult<impl IntoResponse>
where
    R: BeerRepository,
{
    let beer = service.increment(id, body.quantity).await?;
    Ok(Json(beer))
}

/// Remove units from a beer's stock
#[utoipa::path(
    patch,
    path = "/{id}/decrement",
    tag = "beers",
    params(
        ("id" = i64, Path, description = "Beer ID")
    ),
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Stock decremented", body = Beer),
        (status = 400, response = StockExceededResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn decrement_stock<R>(
    State(service): State<Arc<BeerService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<QuantityRequest>,
) -> BeerResult<impl IntoResponse>
where
    R: BeerRepository,
{
    let beer = service.decrement(id, body.quantity).await?;
    Ok(Json(beer))
}
