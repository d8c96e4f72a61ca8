use thiserror::Error;

/// Errors raised while building a model or configuring a search, before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Cannot create a variable with domain [{lower}, {upper}] since it is empty")]
    EmptyDomain { lower: i64, upper: i64 },
    #[error("Expected arrays of equal length but got {left} and {right}")]
    SizeMismatch { left: usize, right: usize },
    #[error("Adding constraint failed because the space is in an infeasible state")]
    InfeasibleState,
    #[error("The same variable occurs more than once where distinct variables are required")]
    DuplicateVariable,
    #[error("An optimising search requires the space to have an objective")]
    MissingObjective,
    #[error("Invalid search option: {0}")]
    InvalidOption(String),
}
