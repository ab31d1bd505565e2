use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Beer Stock API",
        version = "0.1.0",
        description = "Register beers and keep their stock within bounds"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/v1/beers", api = domain_beers::ApiDoc)
    )
)]
pub struct ApiDoc;
