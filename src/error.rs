use crate::distance::error::DistanceMatrixError;
use crate::driver::error::DriverError;
use crate::frames::error::FrameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AqMetError {
    #[error(transparent)]
    DistanceMatrix(#[from] DistanceMatrixError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Frame(#[from] FrameError),
}
