// --- File: crates/calproxy_calcom/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use calproxy_common::{CalproxyError, ReqwestUpstreamClient, UpstreamClient};
use calproxy_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{book_handler, get_availability_handler, get_profile_handler, CalcomState};

/// Creates the Cal.com router backed by the real HTTP client.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, CalproxyError> {
    let client = ReqwestUpstreamClient::from_timeout(config.upstream.timeout_secs)?;
    info!("Cal.com adapters targeting {}", config.upstream.base_url());
    Ok(routes_with_client(config, Arc::new(client)))
}

/// Creates the Cal.com router with an injected upstream client.
pub fn routes_with_client(config: Arc<AppConfig>, client: Arc<dyn UpstreamClient>) -> Router {
    let state = Arc::new(CalcomState { config, client });

    Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/event", get(get_availability_handler))
        .route("/booking", post(book_handler))
        .route("/book", post(book_handler))
        .route("/profile/{username}", get(get_profile_handler))
        .with_state(state)
}
