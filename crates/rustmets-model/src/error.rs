//! Error types for the METS model.

/// Errors raised while decoding primitive values into model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A token is not a member of the closed set for an enumerated attribute.
    #[error("invalid value '{token}' for {kind}")]
    InvalidEnumValue {
        /// Name of the enumeration (e.g. `CHECKSUMTYPE`).
        kind: &'static str,
        /// The offending token, verbatim.
        token: String,
    },

    /// A string could not be parsed as an XML Schema `dateTime`.
    #[error("invalid dateTime '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending lexical value.
        value: String,
        /// What went wrong.
        reason: String,
    },
}

/// Convenience result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
