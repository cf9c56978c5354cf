pub mod analysis;
pub mod news;
pub mod stats;
pub mod threats;

/// Parse an optional numeric query value. Missing, empty or unparseable
/// input yields `default`.
pub(crate) fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Non-empty query string value.
pub(crate) fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.is_empty())
}
