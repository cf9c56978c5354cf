// Severity scoring: deterministic 0-100 intensity from keyword tiers.
//
// The score is the value of the HIGHEST tier with any substring hit; tiers
// never add up. Matching is substring search over the lowercased text, so
// "warehouse" trips the "war" tier. Both are deliberate and covered by tests.

/// Keyword tiers, each a point value and its trigger substrings.
pub const SEVERITY_TIERS: &[(u8, &[&str])] = &[
    (30, &["risk", "risk of", "threat"]),
    (40, &["flood", "storm", "typhoon", "hurricane", "drought", "climate"]),
    (50, &["disease", "outbreak", "pandemic", "virus", "infection"]),
    (60, &["protest", "unrest", "violence", "attack", "killed", "dead", "death"]),
    (80, &["war", "invasion", "massacre", "genocide", "collapse", "crisis"]),
];

/// Bonus applied when the bias tag mentions "potential".
pub const POTENTIAL_BIAS_BONUS: u8 = 5;

pub const MAX_SEVERITY: u8 = 100;

fn combined_text(headline: &str, category: Option<&str>, bias: Option<&str>) -> String {
    format!(
        "{} {} {}",
        headline,
        category.unwrap_or_default(),
        bias.unwrap_or_default()
    )
    .to_lowercase()
}

fn max_tier(text: &str) -> u8 {
    SEVERITY_TIERS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(points, _)| *points)
        .max()
        .unwrap_or(0)
}

/// Severity for the threat list: highest matching tier, plus the
/// "potential" bias bonus, clamped to 100.
pub fn score_severity(headline: &str, category: Option<&str>, bias: Option<&str>) -> u8 {
    let score = max_tier(&combined_text(headline, category, bias));

    let potential = bias.is_some_and(|b| b.to_lowercase().contains("potential"));
    if potential {
        score.saturating_add(POTENTIAL_BIAS_BONUS).min(MAX_SEVERITY)
    } else {
        score
    }
}

/// Severity for the single-record analysis: the same tiers over the same
/// text, without the bias bonus.
pub fn score_analysis_severity(
    headline: &str,
    category: Option<&str>,
    bias: Option<&str>,
) -> u8 {
    max_tier(&combined_text(headline, category, bias))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keywords_scores_zero() {
        assert_eq!(score_severity("Local bakery opens", None, None), 0);
    }

    #[test]
    fn highest_tier_wins_not_sum() {
        // storm (40) + outbreak (50) + attack (60) → 60
        assert_eq!(
            score_severity("Storm, outbreak and attack reported", None, None),
            60
        );
        assert_eq!(score_severity("Massive war erupts near Gaza border", Some("Conflict"), None), 80);
    }

    #[test]
    fn category_and_bias_text_count() {
        assert_eq!(score_severity("Ministers meet", Some("Climate"), None), 40);
        assert_eq!(score_severity("Ministers meet", None, Some("Threat level")), 30);
    }

    #[test]
    fn substring_false_positive_is_kept() {
        assert_eq!(score_severity("New warehouse opens", None, None), 80);
        // "warning" contains "war"
        assert_eq!(score_severity("Flood warning issued in England", None, None), 80);
    }

    #[test]
    fn potential_bias_bonus() {
        assert_eq!(score_severity("Flood alert", None, Some("Potential Bias")), 45);
        assert_eq!(score_severity("Local bakery opens", None, Some("potential")), 5);
        assert_eq!(score_severity("War declared", None, Some("POTENTIAL")), 85);
    }

    #[test]
    fn analysis_score_ignores_bias_bonus() {
        assert_eq!(
            score_analysis_severity("Flood alert", None, Some("Potential Bias")),
            40
        );
    }
}
