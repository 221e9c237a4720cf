//! Error types for METS XML reading and writing.

use std::io;

use rustmets_model::ModelError;

/// Errors that can occur while parsing, unmarshalling or rendering METS XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The input is not well-formed XML.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// A prefix was used without a namespace declaration in scope.
    #[error("unbound namespace prefix: {0}")]
    UnboundPrefix(String),

    /// Elements nest deeper than the configured limit.
    #[error("element nesting exceeds the limit of {0}")]
    DepthLimitExceeded(usize),

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// A required attribute was missing.
    #[error("missing required attribute {attribute} on <{element}>")]
    MissingAttribute {
        /// Local name of the element.
        element: &'static str,
        /// Attribute name as written.
        attribute: &'static str,
    },

    /// An unexpected XML element was encountered.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// An enumerated attribute holds a token outside its closed set.
    #[error("invalid value '{token}' for {kind}")]
    InvalidEnumValue {
        /// Attribute name of the enumeration.
        kind: &'static str,
        /// The offending token.
        token: String,
    },

    /// A `dateTime` attribute could not be parsed.
    #[error("invalid dateTime '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending lexical value.
        value: String,
        /// What went wrong.
        reason: String,
    },

    /// A numeric attribute could not be parsed.
    #[error("invalid number '{value}' for {attribute}: {reason}")]
    InvalidNumber {
        /// Attribute name.
        attribute: &'static str,
        /// The offending value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

impl From<ModelError> for XmlError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidEnumValue { kind, token } => Self::InvalidEnumValue { kind, token },
            ModelError::InvalidTimestamp { value, reason } => {
                Self::InvalidTimestamp { value, reason }
            }
        }
    }
}

/// Convenience result type for XML operations.
pub type XmlResult<T> = Result<T, XmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_carry_enum_token_from_model_error() {
        let err: XmlError = ModelError::InvalidEnumValue {
            kind: "CHECKSUMTYPE",
            token: "NOT-A-REAL-TYPE".to_owned(),
        }
        .into();
        assert!(matches!(
            &err,
            XmlError::InvalidEnumValue { kind: "CHECKSUMTYPE", token } if token == "NOT-A-REAL-TYPE"
        ));
        assert_eq!(
            err.to_string(),
            "invalid value 'NOT-A-REAL-TYPE' for CHECKSUMTYPE"
        );
    }

    #[test]
    fn test_should_name_element_and_attribute_when_missing() {
        let err = XmlError::MissingAttribute {
            element: "agent",
            attribute: "ROLE",
        };
        assert_eq!(err.to_string(), "missing required attribute ROLE on <agent>");
    }
}
