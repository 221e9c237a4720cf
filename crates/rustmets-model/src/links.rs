//! Structural links between divisions.

use serde::{Deserialize, Serialize};

use crate::dom::XmlElement;
use crate::enums::{Actuate, Show};

/// METS `structLink`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructLink {
    pub id: Option<String>,
    pub links: Vec<StructLinkEntry>,
}

/// A child of `structLink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructLinkEntry {
    Link(SmLink),
    /// `smLinkGrp`, carried verbatim.
    Group(XmlElement),
}

/// METS `smLink`: an arc between two `div` elements, named by their `ID`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmLink {
    pub id: Option<String>,
    pub from: String,
    pub to: String,
    pub arcrole: Option<String>,
    pub title: Option<String>,
    pub show: Option<Show>,
    pub actuate: Option<Actuate>,
}

impl SmLink {
    /// A link from one division to another.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: None,
            from: from.into(),
            to: to.into(),
            arcrole: None,
            title: None,
            show: None,
            actuate: None,
        }
    }
}
