#[cfg(test)]
mod tests {
    use crate::fake_client::{FakeClient, Recorded};
    use crate::profile::*;
    use calproxy_common::CalproxyError;
    use calproxy_config::UpstreamConfig;
    use serde_json::{json, Value};

    const SITE: ProfileSite<'static> = ProfileSite {
        origin: "https://cal.com",
        title_suffix: "| Cal.com",
    };

    fn next_data_page(next_data: &Value, head: &str) -> String {
        format!(
            r#"<html><head>{head}</head><body><script id="__NEXT_DATA__" type="application/json">{next_data}</script></body></html>"#
        )
    }

    #[test]
    fn test_structured_profile() {
        let page = next_data_page(
            &json!({"props": {"pageProps": {
                "profile": {"name": "Alice", "username": "alice", "avatar": "/avatar.png"},
                "safeBio": "<p>Hi</p><p></p><p>Bye</p>",
                "integrations": [{"type": "twitter"}]
            }}}),
            "",
        );
        let profile = extract_profile(&page, "alice", SITE).unwrap();
        assert_eq!(profile.name, "Alice");
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.image, "https://cal.com/avatar.png");
        assert_eq!(profile.bio, vec!["Hi", "Bye"]);
        assert_eq!(profile.socials, vec![json!({"type": "twitter"})]);
    }

    #[test]
    fn test_structured_profile_defaults() {
        let page = next_data_page(
            &json!({"props": {"pageProps": {"profile": {"image": "https://img.example/a.png"}}}}),
            "",
        );
        let profile = extract_profile(&page, "bob", SITE).unwrap();
        assert_eq!(profile.name, "");
        assert_eq!(profile.username, "bob");
        assert_eq!(profile.image, "https://img.example/a.png");
        assert!(profile.bio.is_empty());
        assert!(profile.socials.is_empty());
    }

    #[test]
    fn test_structured_profile_without_image_uses_og_image() {
        let page = next_data_page(
            &json!({"props": {"pageProps": {"profile": {"name": "Carol"}}}}),
            r#"<meta property="og:image" content="https://og.cal.com/og?meetingImage=https%253A%252F%252Fcal.com%252Fapi%252Favatar%252Fc0ffee.png">"#,
        );
        let profile = extract_profile(&page, "carol", SITE).unwrap();
        assert_eq!(profile.image, "https://cal.com/api/avatar/c0ffee.png");
    }

    #[test]
    fn test_non_string_safe_bio_falls_back_to_description() {
        let page = next_data_page(
            &json!({"props": {"pageProps": {
                "profile": {"name": "Frank"},
                "safeBio": {"x": 1}
            }}}),
            r#"<meta name="description" content="Runs the weekly sync">"#,
        );
        let profile = extract_profile(&page, "frank", SITE).unwrap();
        assert_eq!(profile.bio, vec!["Runs the weekly sync"]);
    }

    #[test]
    fn test_non_string_safe_bio_without_description_is_empty() {
        let page = next_data_page(
            &json!({"props": {"pageProps": {
                "profile": {"name": "Frank"},
                "safeBio": ["<p>ignored</p>"]
            }}}),
            "",
        );
        let profile = extract_profile(&page, "frank", SITE).unwrap();
        assert!(profile.bio.is_empty());
    }

    #[test]
    fn test_missing_page_props_is_not_found() {
        let page = next_data_page(&json!({"props": {}}), "");
        let err = extract_profile(&page, "alice", SITE).unwrap_err();
        match err {
            CalproxyError::NotFoundError(msg) => assert_eq!(msg, "Missing pageProps data for alice"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_profile_is_not_found() {
        let page = next_data_page(&json!({"props": {"pageProps": {"profile": null}}}), "");
        let err = extract_profile(&page, "alice", SITE).unwrap_err();
        assert_eq!(err.to_string(), "Profile data missing for alice");
    }

    #[test]
    fn test_invalid_next_data_is_parse_error() {
        let page = r#"<html><body><script id="__NEXT_DATA__">{not json</script></body></html>"#;
        let err = extract_profile(page, "alice", SITE).unwrap_err();
        assert!(matches!(
            err,
            CalproxyError::ProfileParseError { ref username, .. } if username == "alice"
        ));
    }

    #[test]
    fn test_meta_tag_fallback() {
        let page = r#"<html><head>
            <title>Dana Doe | Cal.com</title>
            <meta name="description" content="Product designer">
            <meta property="og:image" content="https://og.cal.com/x?meetingImage=https%3A%2F%2Fcal.com%2Fapi%2Favatar%2Fabc123.png">
        </head><body></body></html>"#;
        let profile = extract_profile(page, "dana", SITE).unwrap();
        assert_eq!(profile.name, "Dana Doe");
        assert_eq!(profile.username, "dana");
        assert_eq!(profile.image, "https://cal.com/api/avatar/abc123.png");
        assert_eq!(profile.bio, vec!["Product designer"]);
        assert!(profile.socials.is_empty());
    }

    #[test]
    fn test_meta_tag_fallback_without_og_image() {
        let page = "<html><head><title>Eve | Cal.com</title></head></html>";
        let profile = extract_profile(page, "eve", SITE).unwrap();
        assert_eq!(profile.name, "Eve");
        assert_eq!(profile.image, "https://cal.com/api/avatar/eve");
        assert_eq!(profile.bio, vec![String::new()]);
    }

    #[test]
    fn test_bio_paragraphs() {
        assert_eq!(
            bio_paragraphs("<p> one </p>\n<div><b>two</b> parts</div><p>  </p>"),
            vec!["one", "two parts"]
        );
        assert!(bio_paragraphs("").is_empty());
    }

    #[test]
    fn test_profile_url_encodes_username() {
        assert_eq!(profile_url("https://cal.com", "alice"), "https://cal.com/alice");
        assert_eq!(profile_url("https://cal.com", "a b"), "https://cal.com/a%20b");
    }

    #[tokio::test]
    async fn test_fetch_profile_failure_status() {
        let client = FakeClient::new().respond(404, "<html>Not found</html>");
        let err = fetch_profile(&client, &UpstreamConfig::default(), "ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, CalproxyError::UpstreamError { status: 404, .. }));
        assert_eq!(err.to_string(), "Failed to fetch data for ghost");
        assert_eq!(
            client.calls(),
            vec![Recorded::Get("https://cal.com/ghost".to_string())]
        );
    }
}
