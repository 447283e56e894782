#[cfg(test)]
mod tests {
    use crate::booking::*;
    use crate::fake_client::{FakeClient, Recorded};
    use crate::models::BookingRequest;
    use calproxy_common::CalproxyError;
    use calproxy_config::UpstreamConfig;
    use serde_json::{json, Value};

    fn request(notes: Option<&str>) -> BookingRequest {
        BookingRequest {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            start_time: "2025-01-02T10:00:00.000Z".to_string(),
            event_type_slug: "30min".to_string(),
            host_username: "alice".to_string(),
            time_zone: "Europe/Berlin".to_string(),
            notes: notes.map(str::to_string),
        }
    }

    fn lookup_body(id: Value) -> Value {
        json!([{ "result": { "data": { "json": { "id": id, "title": "30 Min Meeting" } } } }])
    }

    #[test]
    fn test_event_lookup_url_carries_batched_input() {
        let url = event_lookup_url("https://cal.com", "alice", "30min");
        let (prefix, encoded) = url.split_once("&input=").unwrap();
        assert_eq!(prefix, "https://cal.com/api/trpc/public/event?batch=1");
        let input: Value =
            serde_json::from_str(&urlencoding::decode(encoded).unwrap()).unwrap();
        assert_eq!(
            input,
            json!({"0": {"json": {
                "username": "alice",
                "eventSlug": "30min",
                "isTeamEvent": false,
                "org": null
            }}})
        );
    }

    #[test]
    fn test_parse_event_type_id() {
        assert_eq!(parse_event_type_id(&lookup_body(json!(42))).unwrap(), 42);

        for bad in [
            json!([]),
            json!({"result": {}}),
            lookup_body(json!("42")),
            lookup_body(Value::Null),
            lookup_body(json!(0)),
            json!([{ "result": { "data": {} } }]),
        ] {
            let err = parse_event_type_id(&bad).unwrap_err();
            assert!(
                matches!(err, CalproxyError::InvalidResponseFormat(_)),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_booking_payload_shape() {
        let payload = booking_payload(&request(Some("hi")), 42, &UpstreamConfig::default());
        assert_eq!(
            payload,
            json!({
                "responses": {
                    "name": "Bob",
                    "email": "bob@example.com",
                    "location": { "value": "integrations:daily", "optionValue": "" },
                    "guests": [],
                    "notes": "hi"
                },
                "user": "alice",
                "start": "2025-01-02T10:00:00.000Z",
                "timeZone": "Europe/Berlin",
                "eventTypeId": 42,
                "language": "en",
                "metadata": {},
                "hasHashedBookingLink": false
            })
        );
    }

    #[test]
    fn test_booking_payload_omits_absent_notes() {
        let payload = booking_payload(&request(None), 7, &UpstreamConfig::default());
        assert!(payload["responses"].get("notes").is_none());
    }

    #[tokio::test]
    async fn test_submit_booking_resolves_then_posts() {
        let confirmation = json!({"uid": "abc", "status": "ACCEPTED"});
        let client = FakeClient::new()
            .respond_json(200, lookup_body(json!(42)))
            .respond_json(200, confirmation.clone());

        let upstream = UpstreamConfig::default();
        let result = submit_booking(&client, &upstream, &request(None))
            .await
            .unwrap();
        assert_eq!(result, confirmation);

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Recorded::Get(url) if url.contains("/api/trpc/public/event")));
        match &calls[1] {
            Recorded::Post(url, body) => {
                assert_eq!(url, "https://cal.com/api/book/event");
                assert_eq!(body["eventTypeId"], 42);
            }
            other => panic!("expected a POST, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_lookup_never_writes() {
        let client = FakeClient::new().respond(404, r#"{"message":"not found"}"#);
        let err = submit_booking(&client, &UpstreamConfig::default(), &request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, CalproxyError::UpstreamError { status: 404, .. }));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_event_type_id_never_writes() {
        let client = FakeClient::new().respond_json(200, json!([{ "result": {} }]));
        let err = submit_booking(&client, &UpstreamConfig::default(), &request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, CalproxyError::InvalidResponseFormat(_)));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_write_keeps_upstream_status() {
        let client = FakeClient::new()
            .respond_json(200, lookup_body(json!(42)))
            .respond(409, r#"{"message":"slot taken"}"#);
        let err = submit_booking(&client, &UpstreamConfig::default(), &request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, CalproxyError::UpstreamError { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_http_error() {
        let client = FakeClient::new().fail(CalproxyError::HttpError("connection refused".into()));
        let err = submit_booking(&client, &UpstreamConfig::default(), &request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, CalproxyError::HttpError(_)));
    }
}
