//! Report rendering - all user-facing text composition lives here

pub mod analysis_report;
pub mod summary;

pub use analysis_report::*;
pub use summary::*;
