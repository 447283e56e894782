// --- File: crates/calproxy_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod http;     // HTTP response mapping and the upstream client
pub mod services; // Service abstractions
pub mod logging;  // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    CalproxyError,
    ErrorBody,
    HttpStatusCode,
    Context,
    config_error,
    validation_error,
    not_found,
    invalid_response_format,
    upstream_error,
};

// Re-export HTTP utilities for easier access
pub use http::{
    IntoHttpResponse,
    handle_json_result,
    client::{
        HTTP_CLIENT,
        create_client,
        ReqwestUpstreamClient,
    },
};

pub use services::{BoxFuture, UpstreamClient, UpstreamResponse};

// Re-export logging utilities for easier access
pub use logging::{init_from_str, init_with_level, log_result};
