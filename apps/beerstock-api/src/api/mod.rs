use axum::{Router, routing::get};
use domain_beers::{BeerService, PgBeerRepository, handlers};

use crate::state::Store;

pub mod health;

/// API routes without the `/api` prefix, which `create_router` adds.
pub fn routes(store: &Store) -> Router {
    let beers = match store {
        Store::Memory(repo) => handlers::router(BeerService::new(repo.clone())),
        Store::Postgres(db) => handlers::router(BeerService::new(PgBeerRepository::new(db.clone()))),
    };

    Router::new().nest("/v1/beers", beers)
}

/// `/ready`, with the store as state so it can be merged into the stateless app router.
pub fn ready_router(store: Store) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_beers::InMemoryBeerRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let store = Store::Memory(InMemoryBeerRepository::new());
        let router = temp_env::with_vars(
            [("APP_ENV", None::<&str>), ("CORS_ALLOWED_ORIGIN", None)],
            || axum_helpers::create_router::<ApiDoc>(routes(&store)).unwrap(),
        );
        router.merge(ready_router(store))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_beers_mounted_under_api_v1() {
        let app = app();

        let (status, created) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/beers",
                json!({
                    "name": "Brahma",
                    "brand": "Ambev",
                    "max": 50,
                    "quantity": 10,
                    "beerType": "LAGER"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = created["id"].as_i64().unwrap();
        let (status, beer) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/v1/beers/{}/increment", id),
                json!({ "quantity": 5 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(beer["quantity"], 15);

        let (status, error) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/api/v1/beers/{}/decrement", id),
                json!({ "quantity": 20 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "STOCK_EXCEEDED");

        let (status, beers) = send(&app, get("/api/v1/beers")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(beers[0]["quantity"], 15);
    }

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let (status, body) = send(&app(), get("/ready")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "connected");
    }

    #[tokio::test]
    async fn test_openapi_lists_beer_paths() {
        let (status, doc) = send(&app(), get("/api-docs/openapi.json")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"].get("/v1/beers/{name}").is_some());
        assert!(doc["paths"].get("/v1/beers/{id}/increment").is_some());
    }
}
