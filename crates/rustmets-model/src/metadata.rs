//! Metadata sections and the shared locator attribute group.

use serde::{Deserialize, Serialize};

use crate::datetime::XsdDateTime;
use crate::dom::XmlElement;
use crate::enums::{Actuate, ChecksumType, LocType, MdType, Show, XlinkType};

/// The XLink locator group shared by `mdRef`, `FLocat` and `mptr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locator {
    pub xlink_type: Option<XlinkType>,
    pub href: Option<String>,
    pub role: Option<String>,
    pub arcrole: Option<String>,
    pub title: Option<String>,
    pub show: Option<Show>,
    pub actuate: Option<Actuate>,
    pub loctype: Option<LocType>,
    pub other_loctype: Option<String>,
}

impl Locator {
    /// A locator pointing at `href`.
    #[must_use]
    pub fn new(loctype: LocType, href: impl Into<String>) -> Self {
        Self {
            loctype: Some(loctype),
            href: Some(href.into()),
            ..Self::default()
        }
    }
}

/// A metadata section: `dmdSec`, `techMD`, `rightsMD`, `sourceMD` or
/// `digiprovMD`.
///
/// The schema wants exactly one of `md_ref` / `md_wrap`; the model does not
/// enforce that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdSec {
    pub id: Option<String>,
    pub group_id: Option<String>,
    pub admid: Vec<String>,
    pub created: Option<XsdDateTime>,
    pub status: Option<String>,
    pub md_ref: Option<MdRef>,
    pub md_wrap: Option<MdWrap>,
}

impl MdSec {
    /// An empty section with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// METS `mdRef`: metadata held outside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdRef {
    pub id: Option<String>,
    pub locator: Locator,
    pub label: Option<String>,
    pub xptr: Option<String>,
    pub mdtype: MdType,
    pub other_mdtype: Option<String>,
    pub mdtype_version: Option<String>,
    pub mimetype: Option<String>,
    pub size: Option<i64>,
    pub created: Option<XsdDateTime>,
    pub checksum: Option<String>,
    pub checksum_type: Option<ChecksumType>,
}

impl MdRef {
    /// A reference of the given metadata type located by `locator`.
    #[must_use]
    pub fn new(locator: Locator, mdtype: MdType) -> Self {
        Self {
            id: None,
            locator,
            label: None,
            xptr: None,
            mdtype,
            other_mdtype: None,
            mdtype_version: None,
            mimetype: None,
            size: None,
            created: None,
            checksum: None,
            checksum_type: None,
        }
    }
}

/// METS `mdWrap`: metadata embedded as `xmlData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdWrap {
    pub id: Option<String>,
    pub label: Option<String>,
    pub mdtype: MdType,
    pub other_mdtype: Option<String>,
    pub mdtype_version: Option<String>,
    pub mimetype: Option<String>,
    pub size: Option<i64>,
    pub created: Option<XsdDateTime>,
    pub checksum: Option<String>,
    pub checksum_type: Option<ChecksumType>,
    /// Top-level elements of `xmlData`, carried verbatim.
    pub xml_data: Vec<XmlElement>,
}

impl MdWrap {
    /// An empty wrapper of the given metadata type.
    #[must_use]
    pub fn new(mdtype: MdType) -> Self {
        Self {
            id: None,
            label: None,
            mdtype,
            other_mdtype: None,
            mdtype_version: None,
            mimetype: None,
            size: None,
            created: None,
            checksum: None,
            checksum_type: None,
            xml_data: Vec::new(),
        }
    }
}

/// METS `amdSec`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmdSec {
    pub id: Option<String>,
    pub tech_md: Vec<MdSec>,
    pub rights_md: Vec<MdSec>,
    pub source_md: Vec<MdSec>,
    pub digiprov_md: Vec<MdSec>,
}

impl AmdSec {
    /// All contained sections with their element names, in schema order.
    pub fn sections(&self) -> impl Iterator<Item = (&'static str, &MdSec)> {
        self.tech_md
            .iter()
            .map(|sec| ("techMD", sec))
            .chain(self.rights_md.iter().map(|sec| ("rightsMD", sec)))
            .chain(self.source_md.iter().map(|sec| ("sourceMD", sec)))
            .chain(self.digiprov_md.iter().map(|sec| ("digiprovMD", sec)))
    }
}
