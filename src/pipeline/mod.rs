// View assemblers: compose the scoring functions over stored records.
//
// Each entry point reads the store once, then derives everything in memory.

pub mod analysis;
pub mod classify;
pub mod insights;
pub mod threats;

pub use analysis::{build_analysis, compute_analysis, AnalysisResult};
pub use classify::classify_record;
pub use insights::{compute_insights, compute_stats, summarize, Insights, Stats};
pub use threats::{
    build_threat_item, compute_threats, derive_threats, ThreatFilter, ThreatItem, ThreatPage,
    DEFAULT_LIMIT, DEFAULT_OFFSET,
};
