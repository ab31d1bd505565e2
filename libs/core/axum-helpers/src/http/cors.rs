use axum::http::{HeaderValue, Method, header};
use core_config::Environment;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

const CORS_ENV_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer for an explicit list of origins.
///
/// - Methods: GET, POST, DELETE, PATCH, OPTIONS
/// - Headers: Content-Type, Accept
/// - Credentials allowed
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin - **DO NOT USE IN PRODUCTION**.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// The variable holds comma-separated origins, or `*` for any origin.
/// When unset, development falls back to a permissive layer and
/// production refuses to start.
///
/// # Errors
/// Returns `InvalidInput` if the variable is missing in production,
/// empty, or contains a value that is not a valid header.
pub fn cors_layer_from_env(environment: &Environment) -> io::Result<CorsLayer> {
    let origins_str = match std::env::var(CORS_ENV_VAR) {
        Ok(value) => value,
        Err(_) if environment.is_development() => {
            warn!("{} not set, allowing any origin", CORS_ENV_VAR);
            return Ok(create_permissive_cors_layer());
        }
        Err(_) => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} environment variable is required in production. Example: {}=https://example.com",
                    CORS_ENV_VAR, CORS_ENV_VAR
                ),
            ));
        }
    };

    if origins_str.trim() == "*" {
        info!("CORS configured to allow any origin");
        return Ok(create_permissive_cors_layer());
    }

    let allowed_origins = origins_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ENV_VAR, e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ENV_VAR),
        ));
    }

    info!("CORS configured with allowed origins: {}", origins_str);
    Ok(create_cors_layer(allowed_origins))
}
