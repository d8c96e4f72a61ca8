//! The engines running on the calling thread.
mod bab;
mod dfs;
mod lds;

pub(crate) use bab::Bab;
pub(crate) use dfs::Dfs;
pub(crate) use lds::Lds;
