/// Result alias used throughout the crate.
pub type GestaltResult<T> = Result<T, GestaltError>;

/// Errors surfaced by planning, probing and rendering.
#[derive(thiserror::Error, Debug)]
pub enum GestaltError {
    /// Source metadata is missing, malformed or non-positive.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration makes the grid unsatisfiable even at its minimum size.
    #[error("layout constraint: {0}")]
    LayoutConstraint(String),

    /// The media engine failed while extracting, compositing or encoding.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else, usually I/O with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GestaltError {
    /// Build an [`GestaltError::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`GestaltError::LayoutConstraint`].
    pub fn layout_constraint(msg: impl Into<String>) -> Self {
        Self::LayoutConstraint(msg.into())
    }

    /// Build a [`GestaltError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
