//! Writing METS documents.

use std::fmt;
use std::sync::Arc;

use rustmets_model::{Mets, XmlElement, XsdDateTime};

use crate::dom::{RenderOptions, render_document};
use crate::error::XmlError;
use crate::marshal::{MarshalContext, MetsMarshal, mets_element};
use crate::ns::{
    METS_NS, METS_PREFIX, METS_SCHEMA_LOCATION, XLINK_NS, XLINK_PREFIX, XSI_NS, XSI_PREFIX,
};

/// Source of the "now" timestamp stamped into headers on write.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current time.
    fn now(&self) -> XsdDateTime;
}

/// The system clock, in UTC with millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> XsdDateTime {
        XsdDateTime::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock(pub XsdDateTime);

impl Clock for FixedClock {
    fn now(&self) -> XsdDateTime {
        self.0.clone()
    }
}

/// Output settings for [`MetsWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per nesting level; `0` writes compact output.
    pub indent: usize,
    /// Emit the XML declaration.
    pub declaration: bool,
    /// Value of `xsi:schemaLocation` on the root.
    pub schema_location: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
            schema_location: METS_SCHEMA_LOCATION.to_string(),
        }
    }
}

/// Serializes a [`Mets`] tree to XML.
#[derive(Debug, Clone)]
pub struct MetsWriter {
    options: WriterOptions,
    clock: Arc<dyn Clock>,
}

impl Default for MetsWriter {
    fn default() -> Self {
        Self::new(WriterOptions::default())
    }
}

impl MetsWriter {
    /// A writer using the system clock.
    #[must_use]
    pub fn new(options: WriterOptions) -> Self {
        Self {
            options,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for header timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The options this writer was built with.
    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Marshal the document into its root element.
    ///
    /// The document is updated in place: header dates are stamped and any
    /// missing mandatory substructure is inserted.
    pub fn to_element(&self, mets: &mut Mets) -> XmlElement {
        let ctx = MarshalContext::new(self.clock.now());

        let mut root = mets_element("mets");
        root.declare_namespace(Some(METS_PREFIX), METS_NS);
        root.declare_namespace(Some(XLINK_PREFIX), XLINK_NS);
        root.declare_namespace(Some(XSI_PREFIX), XSI_NS);
        root.set_attr_ns(
            XSI_NS,
            XSI_PREFIX,
            "schemaLocation",
            self.options.schema_location.as_str(),
        );

        mets.marshal(&mut root, &ctx);
        root
    }

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` only if the output buffer cannot be written.
    pub fn write(&self, mets: &mut Mets) -> Result<Vec<u8>, XmlError> {
        let root = self.to_element(mets);
        render_document(
            &root,
            RenderOptions {
                indent: self.options.indent,
                declaration: self.options.declaration,
            },
        )
    }
}
