use fieldpose_core::PipelineIdError;

use crate::io::{FieldPoseConfigError, FieldPoseIoError};

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum FieldPoseError {
    #[error(transparent)]
    Io(#[from] FieldPoseIoError),

    #[error(transparent)]
    Config(#[from] FieldPoseConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineIdError),
}
