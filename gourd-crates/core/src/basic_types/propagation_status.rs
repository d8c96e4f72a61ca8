/// The result of invoking a propagator which did not fail.
///
/// The error variant tells the fixpoint loop that the space is failed.
pub type PropagationStatus<T> = Result<T, Inconsistency>;

/// Raised by a domain operation which would have left the domain empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// The reason a propagator reports failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A narrowing operation emptied a domain.
    EmptyDomain,
    /// The propagator detected the conflict itself, without emptying a domain.
    Conflict,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
