//! The file inventory: `fileSec`, `fileGrp`, `file` and their parts.

use serde::{Deserialize, Serialize};

use crate::datetime::XsdDateTime;
use crate::dom::XmlElement;
use crate::enums::{ChecksumType, FileBeType, TransformType};
use crate::metadata::Locator;

/// METS `fileSec`. Writing it inserts an empty group when `file_grps` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSec {
    pub id: Option<String>,
    pub file_grps: Vec<FileGrp>,
}

/// METS `fileGrp`; groups nest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGrp {
    pub id: Option<String>,
    pub versdate: Option<XsdDateTime>,
    pub admid: Vec<String>,
    pub r#use: Option<String>,
    pub file_grps: Vec<FileGrp>,
    pub files: Vec<File>,
}

/// METS `file`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub id: Option<String>,
    pub seq: Option<i32>,
    pub owner_id: Option<String>,
    pub admid: Vec<String>,
    pub dmdid: Vec<String>,
    pub group_id: Option<String>,
    pub r#use: Option<String>,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub be_type: Option<FileBeType>,
    pub mimetype: Option<String>,
    pub size: Option<i64>,
    pub created: Option<XsdDateTime>,
    pub checksum: Option<String>,
    pub checksum_type: Option<ChecksumType>,
    pub flocats: Vec<FLocat>,
    pub fcontent: Option<FContent>,
    pub streams: Vec<Stream>,
    pub transform_files: Vec<TransformFile>,
    /// Component files of a container file.
    pub files: Vec<File>,
}

impl File {
    /// An empty file entry with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// METS `FLocat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FLocat {
    pub id: Option<String>,
    pub locator: Locator,
    pub r#use: Option<String>,
}

/// METS `FContent`; only the `xmlData` form is carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FContent {
    pub id: Option<String>,
    pub r#use: Option<String>,
    pub xml_data: Vec<XmlElement>,
}

/// METS `stream`: a component byte stream inside a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stream {
    pub id: Option<String>,
    pub stream_type: Option<String>,
    pub owner_id: Option<String>,
    pub admid: Vec<String>,
    pub dmdid: Vec<String>,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub be_type: Option<FileBeType>,
}

/// METS `transformFile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformFile {
    pub id: Option<String>,
    pub transform_type: Option<TransformType>,
    pub algorithm: Option<String>,
    pub key: Option<String>,
    pub behavior: Option<String>,
    pub order: Option<u64>,
}
