//! Error types for canvas operations.

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Item not found in the store.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Component type is not registered.
    #[error("Unknown component type: {0}")]
    UnknownComponent(String),

    /// Props rejected by a registered validator.
    #[error("Invalid props for component type: {0}")]
    InvalidProps(String),

    /// Config or saved-canvas serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Renderable construction failed.
    #[error("Render error: {0}")]
    Render(String),
}
