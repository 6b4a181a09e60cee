/// Convenience result type used across juxta.
pub type JuxtaResult<T> = Result<T, JuxtaError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum JuxtaError {
    /// Structural comparator problems: wrong compared-element count,
    /// missing left/right designation, undeterminable source size.
    #[error("setup error: {0}")]
    Setup(String),

    /// Invalid user-provided values or media data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while compositing a frame onto the canvas.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JuxtaError {
    /// Build a [`JuxtaError::Setup`] value.
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Build a [`JuxtaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`JuxtaError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
