//! Avatar URL recovery.
//!
//! Profile pages do not always expose the avatar directly. The `og:image`
//! meta tag usually points at an image-rendering endpoint that carries the
//! real avatar location in a nested query parameter (`meetingImage=` or
//! `url=`), percent-encoded once or twice. Everything here is pure so the
//! heuristics can be tested without a network.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// `avatar/<id>.png`, plain, encoded once (`%2F`) or twice (`%252F`).
static AVATAR_ID_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)avatar/([a-f0-9-]+)\.png").expect("valid regex"),
        Regex::new(r"(?i)avatar%2F([a-f0-9-]+)\.png").expect("valid regex"),
        Regex::new(r"(?i)avatar%252F([a-f0-9-]+)\.png").expect("valid regex"),
    ]
});

/// Query parameters known to wrap the real image location, most specific first.
static NESTED_IMAGE_PARAMS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"meetingImage=([^&]+)").expect("valid regex"),
        Regex::new(r"[?&]url=([^&]+)").expect("valid regex"),
    ]
});

/// Finds an avatar identifier anywhere in `url`, whatever its encoding depth.
pub fn extract_avatar_id(url: &str) -> Option<String> {
    AVATAR_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .map(|caps| caps[1].to_string())
}

/// Percent-decodes `value` once, and a second time if it still looks encoded.
///
/// Returns `None` when a pass does not yield valid UTF-8.
pub fn decode_nested(value: &str) -> Option<String> {
    let once = urlencoding::decode(value).ok()?.into_owned();
    if !once.contains('%') {
        return Some(once);
    }
    urlencoding::decode(&once).ok().map(|twice| twice.into_owned())
}

/// Returns the raw (still encoded) value of the first nested image parameter.
fn nested_image_param(url: &str) -> Option<&str> {
    NESTED_IMAGE_PARAMS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn avatar_png_url(origin: &str, avatar_id: &str) -> String {
    format!("{}/api/avatar/{}.png", origin, avatar_id)
}

pub fn default_avatar_url(origin: &str, username: &str) -> String {
    format!("{}/api/avatar/{}", origin, username)
}

/// Rewrites a root-relative (`/path`) or bare-relative (`path`) image path
/// against `origin`. Absolute `http(s)` URLs are returned unchanged.
pub fn absolutize(image: &str, origin: &str) -> String {
    if image.starts_with("http") {
        image.to_string()
    } else if image.starts_with('/') {
        format!("{}{}", origin, image)
    } else {
        format!("{}/{}", origin, image)
    }
}

/// Recovers an absolute avatar URL from an `og:image` value.
///
/// 1. An avatar id anywhere in the URL wins.
/// 2. A nested `meetingImage=`/`url=` parameter is decoded up to two levels
///    and searched for an avatar id; an absolute decoded URL is accepted as is
///    and a root-relative one is resolved against `origin`. Anything else
///    recovers nothing.
/// 3. Without a nested parameter the og:image itself is the image.
pub fn recover_avatar_url(og_image: &str, origin: &str) -> Option<String> {
    let og_image = og_image.trim();
    if og_image.is_empty() {
        return None;
    }

    if let Some(id) = extract_avatar_id(og_image) {
        debug!(avatar_id = %id, "Avatar id found directly in og:image");
        return Some(avatar_png_url(origin, &id));
    }

    let Some(raw) = nested_image_param(og_image) else {
        return Some(absolutize(og_image, origin));
    };

    let decoded = decode_nested(raw)?;
    debug!(decoded = %decoded, "Decoded nested og:image parameter");

    if let Some(id) = extract_avatar_id(&decoded) {
        Some(avatar_png_url(origin, &id))
    } else if decoded.starts_with("http") {
        Some(decoded)
    } else if decoded.starts_with('/') {
        Some(absolutize(&decoded, origin))
    } else {
        None
    }
}
