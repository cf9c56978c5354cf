// ThreatLens: rule-based threat analytics over collected news headlines.
//
// This is the library root. Each module corresponds to a major subsystem:
// collection (feeds), storage (db), derivation (scoring, pipeline) and the
// CLI and HTTP surfaces that present the results.

pub mod config;
pub mod db;
pub mod error;
pub mod feeds;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
