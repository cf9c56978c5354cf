// Impact estimation: affected population and political cost.
//
// Orders of magnitude only: populations are fixed round figures and
// overlapping regions are summed without de-duplication.

/// Population figures per region name.
const POPULATIONS: &[(&str, u64)] = &[
    ("US", 330_000_000),
    ("UK", 67_000_000),
    ("China", 1_400_000_000),
    ("India", 1_380_000_000),
    ("Middle East", 300_000_000),
    ("Ukraine", 44_000_000),
    ("Global", 8_000_000_000),
];

/// Population assumed for regions missing from the table.
pub const DEFAULT_POPULATION: u64 = 10_000_000;

/// Exposure runs linearly from 0.1% at severity 0 to 25% at severity 100.
const MIN_EXPOSURE: f64 = 0.001;
const EXPOSURE_SPAN: f64 = 0.249;

const POLITICAL_BASE_PCT: f64 = 0.1;
const POLITICAL_SEVERITY_PCT: f64 = 5.0;
const CONFLICT_BONUS_PCT: f64 = 1.0;
const ECONOMIC_BONUS_PCT: f64 = 0.5;
pub const MAX_POLITICAL_LOSS_PCT: f64 = 30.0;

/// Estimated impact of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub citizens_affected: u64,
    pub political_loss_pct: f64,
}

pub fn population_for(region: &str) -> u64 {
    POPULATIONS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, population)| *population)
        .unwrap_or(DEFAULT_POPULATION)
}

/// Summed population of all regions.
pub fn total_population<S: AsRef<str>>(regions: &[S]) -> u64 {
    regions.iter().map(|r| population_for(r.as_ref())).sum()
}

/// Fraction of a population exposed at the given severity (clamped to 0-100).
pub fn exposure_fraction(severity: u8) -> f64 {
    let severity = f64::from(severity.min(100));
    MIN_EXPOSURE + (severity / 100.0) * EXPOSURE_SPAN
}

/// Political capital lost, in percent, rounded to two decimals and
/// clamped to [0, 30]. "Conflict" threat types weigh heavier than
/// "Economic" ones; a type naming both takes the economic bonus.
pub fn political_loss_pct(severity: u8, threat_type: &str) -> f64 {
    let category_bonus = if threat_type.contains("Economic") {
        ECONOMIC_BONUS_PCT
    } else if threat_type.contains("Conflict") {
        CONFLICT_BONUS_PCT
    } else {
        0.0
    };

    let raw = POLITICAL_BASE_PCT
        + (f64::from(severity) / 100.0) * POLITICAL_SEVERITY_PCT
        + category_bonus;
    round2(raw.clamp(0.0, MAX_POLITICAL_LOSS_PCT))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn estimate_impact<S: AsRef<str>>(regions: &[S], severity: u8, threat_type: &str) -> Impact {
    let population = total_population(regions);
    let exposed = (population as f64 * exposure_fraction(severity)).floor();

    Impact {
        citizens_affected: exposed as u64,
        political_loss_pct: political_loss_pct(severity, threat_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_at_severity_sixty() {
        let impact = estimate_impact(&["US"], 60, "Unknown");
        assert_eq!(impact.citizens_affected, 49_632_000);
    }

    #[test]
    fn unknown_region_uses_default_population() {
        assert_eq!(population_for("Atlantis"), DEFAULT_POPULATION);
        // 10M * 0.1%
        assert_eq!(estimate_impact(&["Atlantis"], 0, "").citizens_affected, 10_000);
    }

    #[test]
    fn overlapping_regions_are_summed() {
        assert_eq!(total_population(&["UK", "UK"]), 134_000_000);
        assert_eq!(total_population(&["US", "Global"]), 8_330_000_000);
    }

    #[test]
    fn exposure_bounds() {
        assert!((exposure_fraction(0) - 0.001).abs() < 1e-12);
        assert!((exposure_fraction(100) - 0.25).abs() < 1e-12);
        assert!((exposure_fraction(255) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn citizens_monotonic_in_severity() {
        let regions = ["China", "India"];
        let mut last = 0;
        for s in 0..=100u8 {
            let now = estimate_impact(&regions, s, "Unknown").citizens_affected;
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn political_loss_bonuses() {
        assert!((political_loss_pct(0, "Technology") - 0.1).abs() < 1e-9);
        assert!((political_loss_pct(80, "Armed Conflict") - 5.1).abs() < 1e-9);
        assert!((political_loss_pct(50, "Economic Collapse") - 3.1).abs() < 1e-9);
        assert!((political_loss_pct(100, "Unknown") - 5.1).abs() < 1e-9);
    }

    #[test]
    fn political_loss_is_rounded_and_bounded() {
        for s in 0..=100u8 {
            let pct = political_loss_pct(s, "Armed Conflict");
            assert!((0.0..=MAX_POLITICAL_LOSS_PCT).contains(&pct));
            assert!(((pct * 100.0).round() - pct * 100.0).abs() < 1e-6);
        }
    }
}
