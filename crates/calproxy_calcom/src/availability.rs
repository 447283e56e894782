// --- File: crates/calproxy_calcom/src/availability.rs ---

use calproxy_common::{upstream_error, CalproxyError, UpstreamClient};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::models::AvailabilityRequest;

pub const SCHEDULE_PATH: &str = "/api/trpc/slots/getSchedule";

/// Builds the batched-query envelope for `slots/getSchedule`.
///
/// Optional fields we never set are still sent as `null` in `json` and
/// flagged as `["undefined"]` in `meta.values`; the upstream rejects the
/// query otherwise.
pub fn schedule_input(request: &AvailabilityRequest) -> Value {
    json!({
        "json": {
            "isTeamEvent": false,
            "usernameList": [request.host_username],
            "eventTypeSlug": request.event_slug,
            "startTime": request.start_time,
            "endTime": request.end_time,
            "timeZone": request.time_zone,
            "duration": null,
            "rescheduleUid": null,
            "orgSlug": null,
            "teamMemberEmail": null,
            "routedTeamMemberIds": null,
            "skipContactOwner": false,
            "shouldServeCache": null,
            "routingFormResponseId": null,
            "email": null,
        },
        "meta": {
            "values": {
                "duration": ["undefined"],
                "orgSlug": ["undefined"],
                "teamMemberEmail": ["undefined"],
                "shouldServeCache": ["undefined"],
                "routingFormResponseId": ["undefined"],
            },
        },
    })
}

pub fn schedule_url(origin: &str, request: &AvailabilityRequest) -> String {
    let input = schedule_input(request).to_string();
    format!(
        "{}{}?input={}",
        origin,
        SCHEDULE_PATH,
        urlencoding::encode(&input)
    )
}

/// Fetches the schedule for one host and event type and returns the upstream
/// JSON unmodified. Single attempt.
pub async fn fetch_availability(
    client: &dyn UpstreamClient,
    origin: &str,
    request: &AvailabilityRequest,
) -> Result<Value, CalproxyError> {
    info!(
        "Fetching availability for {}/{} from {} to {} ({})",
        request.host_username,
        request.event_slug,
        request.start_time,
        request.end_time,
        request.time_zone
    );

    let response = client.get(&schedule_url(origin, request)).await?;
    if !response.is_success() {
        warn!("Schedule query failed with status {}", response.status);
        return Err(upstream_error(
            response.status,
            "Failed to fetch schedule from Cal.com",
            response.body,
        ));
    }

    response.json()
}
