//! Pipeline module - feature derivation and hypothesis-testing stages

pub mod features;
pub mod hypotheses;
pub mod loader;
pub mod missing;
pub mod posthoc;
pub mod schema;
pub mod stats;

pub use features::*;
pub use hypotheses::*;
pub use loader::*;
pub use missing::*;
pub use posthoc::*;
pub use schema::*;
pub use stats::{AnovaResult, KsResult, PearsonResult};
