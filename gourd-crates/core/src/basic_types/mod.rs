mod model_error;
mod propagation_status;
mod random;
pub mod sequence_generators;
pub(crate) mod time;

pub use model_error::ModelError;
pub use propagation_status::EmptyDomain;
pub use propagation_status::Inconsistency;
pub use propagation_status::PropagationStatus;
pub use random::Random;
#[cfg(test)]
pub(crate) use random::tests;
