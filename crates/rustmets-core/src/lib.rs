//! Configuration, file I/O and document checks for RustMETS.
//!
//! The XML engine in `rustmets-xml` never resolves or enforces cross
//! references. This crate adds the pieces around it: a configuration layer,
//! identifier minting, an `ID` index and a validation report.
//!
//! # Architecture
//!
//! ```text
//! RustMetsConfig (env, builder)
//!        |
//!        v
//!     MetsIo  ---- read_file / write_file
//!        |
//!        v
//! MetsReader / MetsWriter (rustmets-xml)
//!        |
//!        v
//!      Mets  ---> IdIndex ---> validate() -> Vec<Finding>
//! ```

pub mod config;
pub mod error;
pub mod idgen;
pub mod index;
pub mod io;
pub mod validate;

pub use config::RustMetsConfig;
pub use error::{RustMetsError, RustMetsResult};
pub use idgen::IdGenerator;
pub use index::{IdIndex, IdTarget};
pub use io::MetsIo;
pub use validate::{Finding, validate};
