//! App Store identifier extraction
//!
//! Accepts raw numeric IDs and App Store / iTunes app links such as
//! `https://apps.apple.com/us/app/some-name/id389801252`.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::InputError;

struct Patterns {
    raw_id: Regex,
    app_url: Regex,
    developer_url: Regex,
    id_segment: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        raw_id: Regex::new(r"^\d{6,15}$").unwrap(),
        app_url: Regex::new(
            r"(?i)(?:apps\.apple\.com|itunes\.apple\.com)(?:/[a-z]{2})?/app/(?:[^/]+/)?id(\d+)",
        )
        .unwrap(),
        developer_url: Regex::new(
            r"(?i)(?:apps\.apple\.com|itunes\.apple\.com)(?:/[a-z]{2})?/developer/(?:[^/]+/)?id(\d+)",
        )
        .unwrap(),
        id_segment: Regex::new(r"(?i)/id(\d+)").unwrap(),
    })
}

/// Extract an app identifier from a raw ID or an App Store link
///
/// # Errors
///
/// Returns `InputError` for empty input, developer pages, and anything that
/// carries no `id<digits>` segment
pub fn parse_app_id(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let patterns = patterns();

    if patterns.raw_id.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    if patterns.developer_url.is_match(trimmed) {
        return Err(InputError::DeveloperLink {
            input: trimmed.to_string(),
        });
    }

    patterns
        .app_url
        .captures(trimmed)
        .or_else(|| patterns.id_segment.captures(trimmed))
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| InputError::Unrecognized {
            input: trimmed.to_string(),
        })
}
