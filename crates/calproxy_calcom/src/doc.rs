// File: crates/calproxy_calcom/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{BookingPayload, ProfileData};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_availability_handler,
        crate::handlers::book_handler,
        crate::handlers::get_profile_handler
    ),
    components(schemas(BookingPayload, ProfileData)),
    tags(
        (name = "Cal.com", description = "Availability, booking and profile proxy for Cal.com")
    ),
    servers(
        (url = "/api", description = "Calendar proxy API server")
    )
)]
pub struct CalcomApiDoc;
