/// Convenience result type used across pixrle.
pub type PixrleResult<T> = Result<T, PixrleError>;

/// Error taxonomy shared by node construction, the wire codec and template evaluation.
#[derive(thiserror::Error, Debug)]
pub enum PixrleError {
    /// A pixel intensity outside `[0, 256)`.
    #[error("range error: {0}")]
    Range(String),

    /// A repeat count or child list that does not fit the wire format.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed bytes handed to the decoder.
    #[error("format error: {0}")]
    Format(String),

    /// A placeholder reported a failure while a template was evaluated.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixrleError {
    /// Build a [`PixrleError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`PixrleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixrleError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`PixrleError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
