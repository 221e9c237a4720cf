//! The document root and its header.

use serde::{Deserialize, Serialize};

use crate::datetime::XsdDateTime;
use crate::dom::XmlElement;
use crate::enums::{AgentRole, AgentType};
use crate::files::FileSec;
use crate::links::StructLink;
use crate::metadata::{AmdSec, MdSec};
use crate::structure::StructMap;

/// METS `mets` (the document root).
///
/// `struct_maps` may be empty in memory; writing the document inserts an
/// empty structural map so the serialized form is schema-valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mets {
    pub id: Option<String>,
    pub objid: Option<String>,
    pub label: Option<String>,
    pub r#type: Option<String>,
    pub profile: Option<String>,
    pub header: Option<MetsHeader>,
    pub dmd_secs: Vec<MdSec>,
    pub amd_secs: Vec<AmdSec>,
    pub file_sec: Option<FileSec>,
    pub struct_maps: Vec<StructMap>,
    pub struct_link: Option<StructLink>,
    /// `behaviorSec` elements, carried verbatim.
    pub behavior_secs: Vec<XmlElement>,
}

impl Mets {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// METS `metsHdr`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetsHeader {
    pub id: Option<String>,
    pub admid: Vec<String>,
    pub created: Option<XsdDateTime>,
    /// Overwritten with the write time on every write.
    pub last_modified: Option<XsdDateTime>,
    pub record_status: Option<String>,
    pub agents: Vec<Agent>,
    pub alt_record_ids: Vec<RecordId>,
    pub mets_document_id: Option<RecordId>,
}

/// METS `agent` inside `metsHdr`.
///
/// Role and name are mandatory, so there is no `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: Option<String>,
    pub role: AgentRole,
    /// Free-text role, meaningful when `role` is [`AgentRole::Other`].
    pub other_role: Option<String>,
    pub agent_type: Option<AgentType>,
    /// Free-text type, meaningful when `agent_type` is [`AgentType::Other`].
    pub other_type: Option<String>,
    pub name: String,
    pub notes: Vec<String>,
}

impl Agent {
    /// An agent with the mandatory role and name.
    #[must_use]
    pub fn new(role: AgentRole, name: impl Into<String>) -> Self {
        Self {
            id: None,
            role,
            other_role: None,
            agent_type: None,
            other_type: None,
            name: name.into(),
            notes: Vec::new(),
        }
    }
}

/// A record identifier: `altRecordID` or `metsDocumentID`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordId {
    pub id: Option<String>,
    pub value: String,
    pub r#type: Option<String>,
}

impl RecordId {
    /// An identifier with the given text.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}
