// --- File: crates/calproxy_calcom/src/booking.rs ---

use calproxy_common::{invalid_response_format, upstream_error, CalproxyError, UpstreamClient};
use calproxy_config::UpstreamConfig;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::models::BookingRequest;

pub const EVENT_LOOKUP_PATH: &str = "/api/trpc/public/event";
pub const BOOKING_PATH: &str = "/api/book/event";

pub fn event_lookup_url(origin: &str, username: &str, event_slug: &str) -> String {
    let input = json!({
        "0": {
            "json": {
                "username": username,
                "eventSlug": event_slug,
                "isTeamEvent": false,
                "org": null,
            }
        }
    });
    format!(
        "{}{}?batch=1&input={}",
        origin,
        EVENT_LOOKUP_PATH,
        urlencoding::encode(&input.to_string())
    )
}

/// Reads `[0].result.data.json.id` from a batched lookup response.
///
/// The id must be a non-zero JSON integer; anything else is a shape mismatch.
pub fn parse_event_type_id(data: &Value) -> Result<i64, CalproxyError> {
    data.get(0)
        .and_then(|entry| entry.pointer("/result/data/json/id"))
        .and_then(Value::as_i64)
        .filter(|id| *id != 0)
        .ok_or_else(|| invalid_response_format("Invalid response format or missing event type id"))
}

/// Phase 1: resolves the numeric event type id for `(username, event_slug)`.
/// Never cached; every booking performs a fresh lookup.
pub async fn resolve_event_type_id(
    client: &dyn UpstreamClient,
    origin: &str,
    username: &str,
    event_slug: &str,
) -> Result<i64, CalproxyError> {
    let response = client
        .get(&event_lookup_url(origin, username, event_slug))
        .await?;
    if !response.is_success() {
        warn!(
            "Event type lookup for {}/{} failed with status {}",
            username, event_slug, response.status
        );
        return Err(upstream_error(
            response.status,
            "Failed to resolve event type with Cal.com",
            response.body,
        ));
    }

    let id = parse_event_type_id(&response.json()?)?;
    info!("Resolved event type {}/{} to id {}", username, event_slug, id);
    Ok(id)
}

/// Phase 2 payload. `notes` is left out entirely when absent.
pub fn booking_payload(
    request: &BookingRequest,
    event_type_id: i64,
    upstream: &UpstreamConfig,
) -> Value {
    let mut responses = json!({
        "name": request.name,
        "email": request.email,
        "location": { "value": upstream.default_location, "optionValue": "" },
        "guests": [],
    });
    if let (Some(notes), Some(map)) = (&request.notes, responses.as_object_mut()) {
        map.insert("notes".to_string(), Value::String(notes.clone()));
    }

    json!({
        "responses": responses,
        "user": request.host_username,
        "start": request.start_time,
        "timeZone": request.time_zone,
        "eventTypeId": event_type_id,
        "language": upstream.language,
        "metadata": {},
        "hasHashedBookingLink": false,
    })
}

/// Resolves the event type, then submits the booking.
///
/// A failed lookup aborts before the write, so no partial booking can exist.
/// The write is not idempotent: submitting twice books twice.
pub async fn submit_booking(
    client: &dyn UpstreamClient,
    upstream: &UpstreamConfig,
    request: &BookingRequest,
) -> Result<Value, CalproxyError> {
    let origin = upstream.base_url();
    let event_type_id = resolve_event_type_id(
        client,
        origin,
        &request.host_username,
        &request.event_type_slug,
    )
    .await?;

    let payload = booking_payload(request, event_type_id, upstream);
    info!(
        "Submitting booking for {} at {} (event type {})",
        request.host_username, request.start_time, event_type_id
    );

    let response = client
        .post_json(&format!("{}{}", origin, BOOKING_PATH), &payload)
        .await?;
    if !response.is_success() {
        warn!("Booking submission failed with status {}", response.status);
        return Err(upstream_error(
            response.status,
            "Failed to book event with Cal.com",
            response.body,
        ));
    }

    response.json()
}
