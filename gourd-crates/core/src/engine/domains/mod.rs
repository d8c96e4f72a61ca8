//! The domain representations owned by the [`VariableStore`](super::VariableStore).
//!
//! Domains are immutable once created; a narrowing operation produces a new domain which
//! replaces the old one in the store. Every domain operation first checks whether it would empty
//! the domain, in which case nothing is replaced, so a stored domain is never empty.
mod float_domain;
mod int_domain;
mod set_domain;

pub use float_domain::FloatDomain;
pub use int_domain::IntDomain;
pub use set_domain::SetDomain;

/// The outcome of applying a narrowing operation to a domain.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Narrowing<Domain> {
    Unchanged,
    Empty,
    Changed(Domain),
}
