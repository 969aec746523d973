/// Share links: palettes encoded as a base64 URL fragment.
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use url::Url;

use crate::color::normalize_color;

/// Builds the share link for `colors` on top of `base`.
///
/// Empty and invalid colors are dropped and duplicates collapse to their
/// first occurrence. Returns an empty string when nothing valid remains.
pub fn shareable_url<S: AsRef<str>>(base: &Url, colors: &[S]) -> String {
    let mut unique: Vec<String> = Vec::new();
    for color in colors.iter().map(|color| color.as_ref()) {
        if color.is_empty() {
            continue;
        }
        let Some(normalized) = normalize_color(color) else {
            continue;
        };
        if !unique.contains(&normalized) {
            unique.push(normalized);
        }
    }
    if unique.is_empty() {
        return String::new();
    }

    let encoded = STANDARD.encode(unique.join(","));
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(Some(&encoded));
    url.to_string()
}

/// Extracts the colors from a share link or a bare fragment.
///
/// Anything that fails to decode yields an empty list.
pub fn decode_shared_colors(link: &str) -> Vec<String> {
    let link = link.trim();
    let fragment = match Url::parse(link) {
        Ok(url) => url.fragment().unwrap_or_default().to_string(),
        Err(_) => link.trim_start_matches('#').to_string(),
    };
    if fragment.is_empty() {
        return Vec::new();
    }

    let Ok(bytes) = STANDARD.decode(fragment.as_bytes()) else {
        tracing::debug!(fragment = %fragment, "share fragment is not valid base64");
        return Vec::new();
    };
    let Ok(decoded) = String::from_utf8(bytes) else {
        tracing::debug!("share fragment is not valid UTF-8");
        return Vec::new();
    };
    decoded
        .split(',')
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .map(str::to_string)
        .collect()
}
