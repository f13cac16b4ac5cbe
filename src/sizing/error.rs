use thiserror::Error;

/// Reasons a sizing run is refused before any arithmetic happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput {
        /// Dotted field path (e.g., `"panel.width_m"`).
        field: &'static str,
        reason: String,
    },
}

impl SizingError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Field path the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}
