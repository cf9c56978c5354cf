// Category normalization: raw feed/classifier tags to canonical threat types.

/// Threat type reported when a record has no category at all.
pub const UNKNOWN_THREAT_TYPE: &str = "Unknown";

/// Fixed tag table. Keys match exactly (case-sensitive).
const CATEGORY_MAP: &[(&str, &str)] = &[
    ("Conflict", "Armed Conflict"),
    ("Economy", "Economic Collapse"),
    ("Environment", "Climate Change"),
    ("Technology", "Technology"),
    ("Health", "Pandemic & Health"),
    ("Climate", "Climate Change"),
];

/// Map a raw category tag onto its canonical threat type.
///
/// NULL or empty tags become "Unknown"; tags missing from the table pass
/// through unchanged.
pub fn map_category(category: Option<&str>) -> String {
    match category {
        None | Some("") => UNKNOWN_THREAT_TYPE.to_string(),
        Some(tag) => CATEGORY_MAP
            .iter()
            .find(|(key, _)| *key == tag)
            .map(|(_, canonical)| canonical.to_string())
            .unwrap_or_else(|| tag.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_map() {
        assert_eq!(map_category(Some("Conflict")), "Armed Conflict");
        assert_eq!(map_category(Some("Economy")), "Economic Collapse");
        assert_eq!(map_category(Some("Environment")), "Climate Change");
        assert_eq!(map_category(Some("Climate")), "Climate Change");
        assert_eq!(map_category(Some("Health")), "Pandemic & Health");
        assert_eq!(map_category(Some("Technology")), "Technology");
    }

    #[test]
    fn missing_tag_is_unknown() {
        assert_eq!(map_category(None), "Unknown");
        assert_eq!(map_category(Some("")), "Unknown");
    }

    #[test]
    fn lookup_is_case_sensitive_with_identity_fallback() {
        assert_eq!(map_category(Some("conflict")), "conflict");
        assert_eq!(map_category(Some("Sports")), "Sports");
    }
}
