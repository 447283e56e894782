// --- File: crates/calproxy_calcom/src/models.rs ---

use calproxy_common::{validation_error, CalproxyError};
use calproxy_config::UpstreamConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const MISSING_AVAILABILITY_PARAMS: &str =
    "Missing required parameters (username, startTime, endTime)";
pub const MISSING_BOOKING_FIELDS: &str =
    "Missing required fields: name, email, startTime, eventTypeSlug, user, timeZone";

// --- Request Query / Payload Types ---

/// Query string of `GET /availability`. Every field is optional on the wire;
/// [`AvailabilityRequest::from_query`] decides what is mandatory.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub username: Option<String>,
    pub event_type_slug: Option<String>,
    pub time_zone: Option<String>,
    pub start_time: Option<String>, // e.g. 2025-01-01T00:00
    pub end_time: Option<String>,   // e.g. 2025-01-31T23:59
}

/// JSON body of `POST /booking`.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-01-02T10:00:00.000Z"))]
    pub start_time: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "15min"))]
    pub event_type_slug: Option<String>,
    /// Host username.
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub user: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Europe/Berlin"))]
    pub time_zone: Option<String>,
    pub notes: Option<String>,
}

// --- Validated Requests ---

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRequest {
    pub host_username: String,
    pub event_slug: String,
    pub time_zone: String,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityRequest {
    pub fn from_query(
        query: AvailabilityQuery,
        defaults: &UpstreamConfig,
    ) -> Result<Self, CalproxyError> {
        let (Some(host_username), Some(start_time), Some(end_time)) = (
            present(query.username),
            present(query.start_time),
            present(query.end_time),
        ) else {
            return Err(validation_error(MISSING_AVAILABILITY_PARAMS));
        };

        Ok(Self {
            host_username,
            event_slug: present(query.event_type_slug)
                .unwrap_or_else(|| defaults.default_event_slug.clone()),
            time_zone: present(query.time_zone)
                .unwrap_or_else(|| defaults.default_time_zone.clone()),
            start_time,
            end_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub start_time: String,
    pub event_type_slug: String,
    pub host_username: String,
    pub time_zone: String,
    pub notes: Option<String>,
}

impl TryFrom<BookingPayload> for BookingRequest {
    type Error = CalproxyError;

    fn try_from(payload: BookingPayload) -> Result<Self, Self::Error> {
        let (
            Some(name),
            Some(email),
            Some(start_time),
            Some(event_type_slug),
            Some(host_username),
            Some(time_zone),
        ) = (
            present(payload.name),
            present(payload.email),
            present(payload.start_time),
            present(payload.event_type_slug),
            present(payload.user),
            present(payload.time_zone),
        )
        else {
            return Err(validation_error(MISSING_BOOKING_FIELDS));
        };

        Ok(Self {
            name,
            email,
            start_time,
            event_type_slug,
            host_username,
            time_zone,
            notes: payload.notes,
        })
    }
}

/// Empty strings count as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// --- Slots ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Slot {
    pub time: String, // ISO 8601 UTC instant
}

/// Calendar date (YYYY-MM-DD) to the bookable start instants of that day.
pub type SlotMap = BTreeMap<String, Vec<Slot>>;

/// Reads the slot map out of a forwarded schedule response.
///
/// The upstream has returned it both under `result.data.json.slots` and at
/// the top level as `slots`; both shapes are accepted.
pub fn extract_slot_map(data: &Value) -> Option<SlotMap> {
    let slots = data
        .pointer("/result/data/json/slots")
        .or_else(|| data.get("slots"))?;
    serde_json::from_value(slots.clone()).ok()
}

// --- Profile ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileData {
    #[cfg_attr(feature = "openapi", schema(example = "Alice Example"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub username: String,
    /// Always an absolute URL.
    #[cfg_attr(feature = "openapi", schema(example = "https://cal.com/api/avatar/3f2a9c.png"))]
    pub image: String,
    pub bio: Vec<String>,
    /// Integration descriptors, passed through as the upstream reports them.
    pub socials: Vec<Value>,
}
