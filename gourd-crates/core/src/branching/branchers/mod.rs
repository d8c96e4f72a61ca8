//! The [`Brancher`](super::Brancher) implementations for the different kinds of variables.
mod float_brancher;
mod int_brancher;
mod set_brancher;

pub use float_brancher::FloatBrancher;
pub use float_brancher::FloatChoice;
pub use int_brancher::IntBrancher;
pub use int_brancher::IntChoice;
pub use set_brancher::SetBrancher;
pub use set_brancher::SetChoice;
