//! Entity model for METS (Metadata Encoding and Transmission Standard) documents.
//!
//! The tree is strictly owned: a [`Mets`] owns its sections, a [`Div`] owns its
//! children. Cross references (`ADMID`, `DMDID`, `FILEID`, ...) are plain
//! strings and are never resolved here.
//!
//! Optional attributes are `Option`s; repeatable reference attributes are
//! `Vec<String>`, where an empty list means the attribute is absent.
#![allow(missing_docs)]

pub mod datetime;
pub mod document;
pub mod dom;
pub mod enums;
pub mod error;
pub mod files;
pub mod links;
pub mod metadata;
pub mod structure;

pub use datetime::{XsdDateTime, Zone};
pub use document::{Agent, Mets, MetsHeader, RecordId};
pub use dom::{NamespaceDecl, QName, XmlAttribute, XmlElement, XmlNode};
pub use enums::{
    Actuate, AgentRole, AgentType, BeType, ChecksumType, ExtType, FileBeType, LocType, MdType,
    MetsEnum, Shape, Show, TransformType, XlinkType,
};
pub use error::{ModelError, ModelResult};
pub use files::{FContent, FLocat, File, FileGrp, FileSec, Stream, TransformFile};
pub use links::{SmLink, StructLink, StructLinkEntry};
pub use metadata::{AmdSec, Locator, MdRef, MdSec, MdWrap};
pub use structure::{
    Area, Div, DivChild, Fptr, FptrContent, Mptr, Par, ParMember, Seq, SeqMember, StructMap,
};
