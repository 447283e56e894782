// File: crates/calproxy_calcom/src/handlers.rs

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{Json, Response},
};
use calproxy_common::{handle_json_result, logging::log_result, CalproxyError, UpstreamClient};
use calproxy_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::availability::fetch_availability;
use crate::booking::submit_booking;
use crate::models::{
    extract_slot_map, AvailabilityQuery, AvailabilityRequest, BookingPayload, BookingRequest,
    ProfileData,
};
use crate::profile::fetch_profile;

// Shared state for the Cal.com handlers
#[derive(Clone)]
pub struct CalcomState {
    pub config: Arc<AppConfig>,
    pub client: Arc<dyn UpstreamClient>,
}

/// Handler to list the open slots of a host's event type.
///
/// The upstream schedule response is returned unchanged.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability", // Path relative to /api
    params(
        ("username" = String, Query, description = "Host username", example = "alice"),
        ("eventTypeSlug" = Option<String>, Query, description = "Event type slug, defaults to the configured slug", example = "15min"),
        ("timeZone" = Option<String>, Query, description = "IANA time zone, defaults to the configured zone", example = "Europe/Berlin"),
        ("startTime" = String, Query, description = "Window start", example = "2025-01-01T00:00"),
        ("endTime" = String, Query, description = "Window end", example = "2025-01-31T23:59")
    ),
    responses(
        (status = 200, description = "Upstream schedule response, forwarded unchanged"),
        (status = 400, description = "Missing required parameters or unreadable query string"),
        (status = 502, description = "Upstream unavailable or returned an unreadable body")
    ),
    tag = "Cal.com"
))]
pub async fn get_availability_handler(
    State(state): State<Arc<CalcomState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<Value>, Response> {
    let result = async {
        let Query(query) = query?;
        let request = AvailabilityRequest::from_query(query, &state.config.upstream)?;
        let data =
            fetch_availability(state.client.as_ref(), state.config.upstream.base_url(), &request)
                .await?;
        if let Some(slots) = extract_slot_map(&data) {
            debug!("Schedule covers {} day(s)", slots.len());
        }
        Ok::<_, CalproxyError>(data)
    }
    .await;

    handle_json_result(result)
}

/// Handler to book a slot: resolves the event type id, then submits.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/booking", // Path relative to /api
    request_body = BookingPayload,
    responses(
        (status = 200, description = "Upstream booking confirmation, forwarded unchanged"),
        (status = 400, description = "Missing required fields or malformed JSON body"),
        (status = 415, description = "Body is not sent as application/json"),
        (status = 502, description = "Event type lookup returned an unexpected shape")
    ),
    tag = "Cal.com"
))]
pub async fn book_handler(
    State(state): State<Arc<CalcomState>>,
    payload: Result<Json<BookingPayload>, JsonRejection>,
) -> Result<Json<Value>, Response> {
    let result = async {
        let Json(payload) = payload?;
        let request = BookingRequest::try_from(payload)?;
        info!(
            "Booking request for {}/{} at {}",
            request.host_username, request.event_type_slug, request.start_time
        );
        submit_booking(state.client.as_ref(), &state.config.upstream, &request).await
    }
    .await;

    handle_json_result(log_result(
        result,
        "Booking submitted to Cal.com",
        "Booking failed",
    ))
}

/// Handler to extract public profile data for a username.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/profile/{username}", // Path relative to /api
    params(
        ("username" = String, Path, description = "Public username", example = "alice")
    ),
    responses(
        (status = 200, description = "Extracted profile", body = ProfileData),
        (status = 404, description = "Profile data missing"),
        (status = 500, description = "Profile page could not be parsed")
    ),
    tag = "Cal.com"
))]
pub async fn get_profile_handler(
    State(state): State<Arc<CalcomState>>,
    Path(username): Path<String>,
) -> Result<Json<ProfileData>, Response> {
    let result = fetch_profile(state.client.as_ref(), &state.config.upstream, &username).await;
    if let Ok(profile) = &result {
        debug!(
            "Profile for {}: {} bio paragraph(s), {} social(s)",
            username,
            profile.bio.len(),
            profile.socials.len()
        );
    }
    handle_json_result(result)
}
