//! Time types used by the budgets and the statistics.
//!
//! All code in gourd-core should use these types instead of `std::time` directly.

pub(crate) use std::time::Duration;
pub(crate) use std::time::Instant;
