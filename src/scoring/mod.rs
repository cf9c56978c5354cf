// Pure derivation functions: headline text and record metadata in,
// structured threat signals out. Nothing here does I/O or holds state.

pub mod category;
pub mod classify;
pub mod impact;
pub mod location;
pub mod severity;

pub use category::map_category;
pub use classify::{
    derive_emergency, derive_maturity, derive_maturity_at, now_local, Emergency, Maturity,
};
pub use impact::{estimate_impact, Impact};
pub use location::{detect_regions, infer_location, LocationScope};
pub use severity::{score_analysis_severity, score_severity};
