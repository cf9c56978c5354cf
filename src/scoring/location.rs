// Location inference: keyword substring matching over headlines, with a
// fallback on the publisher's hostname.
//
// Two intentionally different questions are answered here:
//   - `infer_location` picks ONE best-guess scope + name for list filtering
//     (first table entry with any keyword hit wins).
//   - `detect_regions` collects EVERY matching region for impact estimates.
// Their keyword tables differ slightly and must stay separate.
//
// Matching is plain lowercase substring containment, so short keywords
// like "us" also hit inside longer words ("Russia", "virus"). That is the
// accepted cost of not doing real entity recognition.

use serde::{Deserialize, Serialize};

/// Geographic granularity of an inferred location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationScope {
    Country,
    Region,
    Global,
}

impl LocationScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationScope::Country => "Country",
            LocationScope::Region => "Region",
            LocationScope::Global => "Global",
        }
    }
}

impl std::fmt::Display for LocationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Region name used when nothing more specific can be inferred.
pub const GLOBAL: &str = "Global";

type RegionTable = &'static [(&'static str, &'static [&'static str])];

// Order is the tie-break for headlines naming several regions.
const SCOPE_REGIONS: RegionTable = &[
    ("UK", &["uk", "britain", "britain's", "british", "england"]),
    ("China", &["china", "chinese", "taiwan"]),
    ("Middle East", &["gaza", "israel", "palestine", "syria", "iraq"]),
    ("Ukraine", &["ukraine", "kiev", "kyiv"]),
    ("US", &["us", "united states", "america", "washington"]),
    ("India", &["india", "indian"]),
];

const IMPACT_REGIONS: RegionTable = &[
    ("US", &["us", "united states", "america", "washington"]),
    ("UK", &["uk", "britain", "british", "england"]),
    ("China", &["china", "chinese", "beijing"]),
    ("India", &["india", "indian"]),
    ("Middle East", &["gaza", "israel", "palestine", "syria", "iraq"]),
    ("Ukraine", &["ukraine", "kyiv", "kiev"]),
];

/// Lowercased hostname of a source URL: everything after the last `//`
/// up to the first `/`. Returns None for an empty or missing host.
pub fn extract_host(source: &str) -> Option<String> {
    let after_scheme = source.rsplit("//").next().unwrap_or_default();
    let host = after_scheme.split('/').next().unwrap_or_default().trim();
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

fn is_uk_host(host: &str) -> bool {
    host.contains("bbc") || host.ends_with(".co.uk")
}

/// Best-guess location for a headline.
///
/// Headline keywords win over the publisher host; with neither, the
/// result is `(Global, "Global")`. Never fails.
pub fn infer_location(headline: &str, source: &str) -> (LocationScope, String) {
    let text = headline.to_lowercase();
    for (region, keywords) in SCOPE_REGIONS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return (LocationScope::Country, region.to_string());
        }
    }

    if let Some(host) = extract_host(source) {
        if is_uk_host(&host) {
            return (LocationScope::Region, "UK".to_string());
        }
        if host.contains("aljazeera") {
            return (LocationScope::Region, "Middle East".to_string());
        }
        if host.contains("nytimes") {
            return (LocationScope::Country, "US".to_string());
        }
        if host.contains("reuters") {
            return (LocationScope::Region, GLOBAL.to_string());
        }
    }

    (LocationScope::Global, GLOBAL.to_string())
}

/// Every region a record touches, in table order, each at most once.
///
/// Keywords are searched in the headline and the source URL together.
/// With no keyword hit the publisher host may supply one region, and
/// failing that the result is `["Global"]`, so it is never empty.
pub fn detect_regions(headline: &str, source: &str) -> Vec<String> {
    let text = format!("{headline} {source}").to_lowercase();

    let mut regions: Vec<String> = IMPACT_REGIONS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(region, _)| region.to_string())
        .collect();

    if regions.is_empty() {
        if let Some(host) = extract_host(source) {
            if host.contains("aljazeera") {
                regions.push("Middle East".to_string());
            } else if is_uk_host(&host) {
                regions.push("UK".to_string());
            } else if host.contains("nytimes") || host.contains("cnn") {
                regions.push("US".to_string());
            }
        }
    }

    if regions.is_empty() {
        regions.push(GLOBAL.to_string());
    }
    regions
}
