//! Built-in compilation passes.

mod optimization;
mod translation;
mod verification;

pub use optimization::{CombineRotations, RemoveTrivialRotations};
pub use translation::BasisTranslation;
pub use verification::{MeasurementVerification, VerificationResult};
