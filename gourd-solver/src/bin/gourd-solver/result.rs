use gourd_solver::ModelError;
use thiserror::Error;

pub(crate) type GourdResult<T> = Result<T, GourdError>;

#[derive(Error, Debug)]
pub(crate) enum GourdError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to build the model, more details: {0}")]
    Model(#[from] ModelError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
