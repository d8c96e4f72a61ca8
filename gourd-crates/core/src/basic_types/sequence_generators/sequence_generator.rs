use std::fmt::Debug;

/// An infinite sequence of positive values, e.g. the failure limits between restarts.
pub trait SequenceGenerator: Debug + Send {
    fn next(&mut self) -> i64;
}
