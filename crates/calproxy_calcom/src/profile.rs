// --- File: crates/calproxy_calcom/src/profile.rs ---

use calproxy_common::{not_found, upstream_error, CalproxyError, UpstreamClient};
use calproxy_config::UpstreamConfig;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::avatar::{absolutize, default_avatar_url, recover_avatar_url};
use crate::models::ProfileData;

/// What the scraper needs to know about the upstream site.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSite<'a> {
    pub origin: &'a str,
    pub title_suffix: &'a str,
}

impl<'a> From<&'a UpstreamConfig> for ProfileSite<'a> {
    fn from(config: &'a UpstreamConfig) -> Self {
        Self {
            origin: config.base_url(),
            title_suffix: &config.title_suffix,
        }
    }
}

pub fn profile_url(origin: &str, username: &str) -> String {
    format!("{}/{}", origin, urlencoding::encode(username))
}

/// Fetches the public profile page of `username` and extracts its profile.
pub async fn fetch_profile(
    client: &dyn UpstreamClient,
    upstream: &UpstreamConfig,
    username: &str,
) -> Result<ProfileData, CalproxyError> {
    info!("Fetching profile for username: {}", username);
    let response = client
        .get(&profile_url(upstream.base_url(), username))
        .await?;

    if !response.is_success() {
        warn!("Profile page for {} returned {}", username, response.status);
        return Err(upstream_error(
            response.status,
            format!("Failed to fetch data for {}", username),
            String::new(),
        ));
    }
    debug!("Received HTML content length: {}", response.body.len());

    extract_profile(&response.body, username, ProfileSite::from(upstream))
}

/// Extracts profile data from a rendered profile page.
///
/// The embedded `__NEXT_DATA__` blob is preferred; without it the page's
/// `<title>` and meta tags are scraped instead.
pub fn extract_profile(
    html: &str,
    username: &str,
    site: ProfileSite<'_>,
) -> Result<ProfileData, CalproxyError> {
    let document = Html::parse_document(html);

    match next_data_text(&document) {
        Some(blob) => {
            debug!("__NEXT_DATA__ element found, parsing JSON");
            let next_data: Value =
                serde_json::from_str(&blob).map_err(|e| CalproxyError::ProfileParseError {
                    username: username.to_string(),
                    details: e.to_string(),
                })?;
            from_next_data(&next_data, &document, username, site)
        }
        None => {
            debug!("No __NEXT_DATA__ element found, falling back to meta tags");
            Ok(from_meta_tags(&document, username, site))
        }
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn next_data_text(document: &Html) -> Option<String> {
    let sel = selector("script#__NEXT_DATA__")?;
    let text: String = document.select(&sel).next()?.text().collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

fn description(document: &Html) -> Option<String> {
    meta_content(document, r#"meta[name="description"]"#).filter(|d| !d.is_empty())
}

fn og_image(document: &Html) -> Option<String> {
    meta_content(document, r#"meta[property="og:image"]"#)
}

fn title_name(document: &Html, suffix: &str) -> String {
    let title: String = selector("title")
        .and_then(|sel| document.select(&sel).next().map(|el| el.text().collect()))
        .unwrap_or_default();
    title.replacen(suffix, "", 1).trim().to_string()
}

fn image_from_og(document: &Html, username: &str, origin: &str) -> String {
    og_image(document)
        .and_then(|og| recover_avatar_url(&og, origin))
        .unwrap_or_else(|| default_avatar_url(origin, username))
}

fn from_meta_tags(document: &Html, username: &str, site: ProfileSite<'_>) -> ProfileData {
    ProfileData {
        name: title_name(document, site.title_suffix),
        username: username.to_string(),
        image: image_from_og(document, username, site.origin),
        bio: vec![description(document).unwrap_or_default()],
        socials: Vec::new(),
    }
}

fn from_next_data(
    next_data: &Value,
    document: &Html,
    username: &str,
    site: ProfileSite<'_>,
) -> Result<ProfileData, CalproxyError> {
    let page_props = next_data
        .pointer("/props/pageProps")
        .filter(|v| !v.is_null())
        .ok_or_else(|| not_found(format!("Missing pageProps data for {}", username)))?;
    let profile = page_props
        .get("profile")
        .filter(|v| !v.is_null())
        .ok_or_else(|| not_found(format!("Profile data missing for {}", username)))?;

    let bio = match page_props.get("safeBio") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(safe_bio)) => bio_paragraphs(safe_bio),
        Some(_) => {
            warn!("safeBio for {} is not an HTML string, using meta description", username);
            description(document).into_iter().collect()
        }
    };

    let image = non_empty_str(profile.get("avatar"))
        .or_else(|| non_empty_str(profile.get("image")))
        .map(|image| absolutize(image, site.origin))
        .unwrap_or_else(|| image_from_og(document, username, site.origin));

    Ok(ProfileData {
        name: non_empty_str(profile.get("name")).unwrap_or_default().to_string(),
        username: non_empty_str(profile.get("username"))
            .unwrap_or(username)
            .to_string(),
        image,
        bio,
        socials: page_props
            .get("integrations")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Splits a sanitized bio HTML fragment into paragraphs: the trimmed text of
/// each top-level element, empty ones skipped.
pub fn bio_paragraphs(safe_bio: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(safe_bio);
    fragment
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
