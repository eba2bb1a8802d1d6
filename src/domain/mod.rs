pub mod types;

pub use types::{ClassificationResult, HealthReport, ModelTarget, UnknownModelTarget};
