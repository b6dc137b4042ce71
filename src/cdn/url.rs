//! Icon asset URL construction.
//!
//! Pure and total: no validation is performed here. A triple that does not
//! exist on the CDN simply 404s at fetch time and surfaces as a fetch
//! failure. A given (category, name, style) triple always produces the same
//! URL — it is used both for previews and as the export fetch target.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::core::IconStyle;

/// jsDelivr mirror of google/material-design-icons sources.
pub const DEFAULT_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/google/material-design-icons@master/src";

/// Characters that must be escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Build the CDN URL for an icon SVG:
/// `{base}/{category}/{name}/{style}/24px.svg`
pub fn icon_url(base: &str, category: &str, name: &str, style: IconStyle) -> String {
    format!(
        "{}/{}/{}/{}/24px.svg",
        base.trim_end_matches('/'),
        utf8_percent_encode(category, SEGMENT),
        utf8_percent_encode(name, SEGMENT),
        style.path_segment(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url_shape() {
        let url = icon_url(DEFAULT_BASE_URL, "action", "home", IconStyle::Filled);
        assert_eq!(
            url,
            "https://cdn.jsdelivr.net/gh/google/material-design-icons@master/src/action/home/materialicons/24px.svg"
        );
    }

    #[test]
    fn test_icon_url_per_style() {
        let url = icon_url(DEFAULT_BASE_URL, "action", "home", IconStyle::TwoTone);
        assert!(url.ends_with("/action/home/materialiconstwotone/24px.svg"));
    }

    #[test]
    fn test_icon_url_deterministic() {
        let a = icon_url(DEFAULT_BASE_URL, "av", "play_arrow", IconStyle::Round);
        let b = icon_url(DEFAULT_BASE_URL, "av", "play_arrow", IconStyle::Round);
        assert_eq!(a, b);
    }

    #[test]
    fn test_base_trailing_slash_normalized() {
        let a = icon_url("https://example.com/src/", "action", "home", IconStyle::Filled);
        let b = icon_url("https://example.com/src", "action", "home", IconStyle::Filled);
        assert_eq!(a, b);
    }

    #[test]
    fn test_segment_escaping() {
        let url = icon_url("https://example.com", "odd cat", "a/b", IconStyle::Filled);
        assert_eq!(url, "https://example.com/odd%20cat/a%2Fb/materialicons/24px.svg");
    }

    #[test]
    fn test_underscores_left_intact() {
        let url = icon_url(DEFAULT_BASE_URL, "action", "shopping_cart", IconStyle::Filled);
        assert!(url.contains("/shopping_cart/"));
        assert!(!url.contains('%'));
    }

    #[test]
    fn test_url_parses_as_absolute() {
        let raw = icon_url(DEFAULT_BASE_URL, "action", "home", IconStyle::Sharp);
        let parsed = url::Url::parse(&raw).unwrap();
        assert_eq!(parsed.scheme(), "https");
        assert_eq!(parsed.host_str(), Some("cdn.jsdelivr.net"));
    }
}
