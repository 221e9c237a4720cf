//! METS XML marshalling and unmarshalling for RustMETS.
//!
//! This crate converts between [`rustmets_model::Mets`] trees and METS XML.
//!
//! # Key components
//!
//! - [`dom`]: quick-xml based parse/render of a namespace-aware element tree
//! - [`MetsMarshal`] / [`MetsUnmarshal`]: one implementation per entity type,
//!   composed recursively
//! - [`MetsReader`] / [`MetsWriter`]: document-level entry points holding
//!   immutable options and an injected [`Clock`]
//!
//! # Conventions
//!
//! - Namespaces: METS `http://www.loc.gov/METS/` (prefix `mets`), XLink
//!   `http://www.w3.org/1999/xlink`, XSI `http://www.w3.org/2001/XMLSchema-instance`
//! - Reference lists (`ADMID`, `DMDID`, `CONTENTIDS`) are whitespace separated
//!   and written with single spaces
//! - Writing inserts a `structMap`, a `fileGrp` in `fileSec` and a root `div`
//!   when missing; reading never does

pub mod codec;
pub mod dom;
pub mod error;
pub mod marshal;
pub mod ns;
pub mod reader;
pub mod unmarshal;
pub mod writer;

pub use error::{XmlError, XmlResult};
pub use marshal::{MarshalContext, MetsMarshal};
pub use reader::{MetsReader, ReaderOptions};
pub use unmarshal::MetsUnmarshal;
pub use writer::{Clock, FixedClock, MetsWriter, SystemClock, WriterOptions};

use rustmets_model::Mets;

/// Read a METS document with default options.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or any value fails to decode.
pub fn read(xml: &[u8]) -> Result<Mets, XmlError> {
    MetsReader::default().read(xml)
}

/// Write a METS document with default options and the system clock.
///
/// # Errors
///
/// Returns `XmlError` only if the output buffer cannot be written.
pub fn write(mets: &mut Mets) -> Result<Vec<u8>, XmlError> {
    MetsWriter::default().write(mets)
}
