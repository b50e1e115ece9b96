//! Evidence-only ecosystem and framework detection.

mod frameworks;
mod tooling;

pub use frameworks::detect_frameworks;
pub use tooling::{detect_other_tooling, determine_primary_tooling};
