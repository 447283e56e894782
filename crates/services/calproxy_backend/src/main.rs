// File: services/calproxy_backend/src/main.rs
use axum::{routing::get, Json, Router};
use calproxy_common::{config_error, logging, CalproxyError, Context};
use calproxy_config::load_config;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Assembles the service: the Cal.com routes under `/api`, plus the
/// welcome and health endpoints.
fn app(calcom_router: Router) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the calproxy API!" }))
        .merge(calcom_router);

    Router::new()
        .nest("/api", api_router)
        .route("/", get(|| async { "calproxy is running. API endpoints live under /api" }))
        .route("/health", get(health))
}

#[tokio::main]
async fn main() -> Result<(), CalproxyError> {
    let config = Arc::new(load_config().map_err(config_error)?);
    logging::init_from_str(&config.logging.level);

    let calcom_router = calproxy_calcom::routes(config.clone())?;

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = app(calcom_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use calproxy_calcom::doc::CalcomApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "calproxy API",
                version = "0.1.0",
                description = "Availability, booking and profile proxy for Cal.com",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CalcomApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server terminated unexpectedly")?;
    Ok(())
}
