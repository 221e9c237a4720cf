//! Reading METS documents.

use rustmets_model::Mets;
use tracing::debug;

use crate::dom::{DEFAULT_MAX_DEPTH, parse_document};
use crate::error::XmlError;
use crate::unmarshal::MetsUnmarshal;

/// Limits applied while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Maximum element nesting accepted.
    pub max_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses METS XML into a [`Mets`] tree.
#[derive(Debug, Clone, Default)]
pub struct MetsReader {
    options: ReaderOptions,
}

impl MetsReader {
    /// A reader with the given options.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// The options this reader was built with.
    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Parse a complete METS document.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the input is malformed, the root is not `mets`,
    /// or any attribute fails to decode.
    pub fn read(&self, xml: &[u8]) -> Result<Mets, XmlError> {
        let root = parse_document(xml, self.options.max_depth)?;
        if root.local_name() != "mets" {
            return Err(XmlError::UnexpectedElement(format!(
                "expected root <mets>, found <{}>",
                root.name.qualified()
            )));
        }
        let mets = Mets::unmarshal(&root)?;
        debug!(
            objid = mets.objid.as_deref().unwrap_or_default(),
            struct_maps = mets.struct_maps.len(),
            "read METS document"
        );
        Ok(mets)
    }
}
