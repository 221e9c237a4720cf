//! The structural map: `structMap`, `div` and the pointers hanging off it.

use serde::{Deserialize, Serialize};

use crate::enums::{BeType, ExtType, Shape};
use crate::metadata::Locator;

/// METS `structMap`. Writing it inserts an empty root `div` when `div` is unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructMap {
    pub id: Option<String>,
    pub label: Option<String>,
    pub r#type: Option<String>,
    pub div: Option<Div>,
}

/// METS `div`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Div {
    pub id: Option<String>,
    pub order: Option<i64>,
    pub order_label: Option<String>,
    pub label: Option<String>,
    pub r#type: Option<String>,
    pub dmdid: Vec<String>,
    pub admid: Vec<String>,
    pub content_ids: Vec<String>,
    pub xlink_label: Option<String>,
    /// Nested divisions and pointers, in document order.
    pub children: Vec<DivChild>,
}

impl Div {
    /// Nested divisions, skipping pointers.
    pub fn divs(&self) -> impl Iterator<Item = &Div> {
        self.children.iter().filter_map(|child| match child {
            DivChild::Div(div) => Some(div),
            _ => None,
        })
    }

    /// File pointers, skipping divisions and METS pointers.
    pub fn fptrs(&self) -> impl Iterator<Item = &Fptr> {
        self.children.iter().filter_map(|child| match child {
            DivChild::Fptr(fptr) => Some(fptr),
            _ => None,
        })
    }
}

/// A child of a `div`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DivChild {
    Div(Div),
    Mptr(Mptr),
    Fptr(Fptr),
}

/// METS `mptr`: a pointer to another METS document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mptr {
    pub id: Option<String>,
    pub locator: Locator,
    pub content_ids: Vec<String>,
}

/// METS `fptr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fptr {
    pub id: Option<String>,
    pub file_id: Option<String>,
    pub content_ids: Vec<String>,
    pub content: Option<FptrContent>,
}

/// The single optional child of an `fptr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FptrContent {
    Par(Par),
    Seq(Seq),
    Area(Area),
}

/// METS `par`: parallel content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Par {
    pub id: Option<String>,
    pub members: Vec<ParMember>,
}

/// A child of a `par`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParMember {
    Area(Area),
    Seq(Seq),
}

/// METS `seq`: sequential content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seq {
    pub id: Option<String>,
    pub members: Vec<SeqMember>,
}

/// A child of a `seq`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeqMember {
    Area(Area),
    Par(Par),
}

/// METS `area`: a region of a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Area {
    pub id: Option<String>,
    pub file_id: Option<String>,
    pub shape: Option<Shape>,
    pub coords: Option<String>,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub be_type: Option<BeType>,
    pub extent: Option<String>,
    pub ext_type: Option<ExtType>,
    pub admid: Vec<String>,
    pub content_ids: Vec<String>,
}

impl Area {
    /// An area of the file `file_id`.
    #[must_use]
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: Some(file_id.into()),
            ..Self::default()
        }
    }
}
