//! Readiness check against the configured record store.

use crate::state::Store;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

pub async fn ready_handler(State(store): State<Store>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = match &store {
        Store::Memory(_) => vec![("store", Box::pin(async { Ok::<(), String>(()) }))],
        Store::Postgres(db) => vec![(
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| format!("Database ping failed: {}", e))
            }),
        )],
    };

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
