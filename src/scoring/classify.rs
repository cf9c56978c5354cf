// Maturity and urgency tiers derived from severity and record age.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Accepted timestamp layouts, tried in order.
pub const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

const SECONDS_PER_DAY: i64 = 86_400;

/// Lifecycle tier of a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Maturity {
    Emerging,
    Escalating,
    Critical,
}

impl Maturity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Maturity::Emerging => "Emerging",
            Maturity::Escalating => "Escalating",
            Maturity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Maturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency tier, a function of severity alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Emergency {
    Low,
    Medium,
    High,
}

impl Emergency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emergency::Low => "Low",
            Emergency::Medium => "Medium",
            Emergency::High => "High",
        }
    }
}

impl std::fmt::Display for Emergency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a stored timestamp, trying each accepted layout.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
}

/// Whole days from `then` to `now`, rounded down. Negative for future
/// timestamps.
pub fn age_days(then: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - then).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// The local wall clock, in the same naive form stored timestamps use.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Maturity relative to the local clock.
pub fn derive_maturity(severity: u8, timestamp: &str) -> Maturity {
    derive_maturity_at(severity, timestamp, now_local())
}

/// Maturity relative to an explicit `now`.
///
/// An unparseable timestamp yields `Emerging` regardless of severity.
pub fn derive_maturity_at(severity: u8, timestamp: &str, now: NaiveDateTime) -> Maturity {
    let Some(then) = parse_timestamp(timestamp) else {
        return Maturity::Emerging;
    };
    let age = age_days(then, now);

    if severity >= 80 || (age <= 1 && severity >= 60) {
        Maturity::Critical
    } else if severity >= 55 || age <= 7 {
        Maturity::Escalating
    } else {
        Maturity::Emerging
    }
}

pub fn derive_emergency(severity: u8) -> Emergency {
    match severity {
        s if s >= 75 => Emergency::High,
        s if s >= 50 => Emergency::Medium,
        _ => Emergency::Low,
    }
}
