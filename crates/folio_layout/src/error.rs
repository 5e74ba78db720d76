//! Layout errors

use crate::section::Target;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout engine error: {0}")]
    Taffy(String),
    #[error("layout node does not exist")]
    UnknownNode,
    #[error("layout has no `{0}` region")]
    MissingTarget(Target),
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

impl LayoutError {
    pub(crate) fn taffy(err: impl std::fmt::Display) -> Self {
        LayoutError::Taffy(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
