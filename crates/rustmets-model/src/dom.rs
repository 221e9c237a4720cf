//! Generic, namespace-aware element tree.
//!
//! The marshal engine reads and writes METS entities through this tree. It is
//! also the carrier for opaque content (`xmlData` payloads, `behaviorSec`,
//! `smLinkGrp`), which is kept verbatim.

use serde::{Deserialize, Serialize};

/// A possibly prefixed XML name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    /// Namespace prefix as written, if any.
    pub prefix: Option<String>,
    /// Local part.
    pub local: String,
}

impl QName {
    /// An unprefixed name.
    #[must_use]
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    /// A prefixed name.
    #[must_use]
    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Split a lexical `prefix:local` name.
    #[must_use]
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once(':') {
            Some((prefix, local)) => Self::prefixed(prefix, local),
            None => Self::local(qualified),
        }
    }

    /// The lexical form, `prefix:local` or `local`.
    #[must_use]
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute with its resolved namespace (unprefixed attributes have none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlAttribute {
    /// Name as written.
    pub name: QName,
    /// Namespace URI bound to the prefix.
    pub namespace: Option<String>,
    /// Unescaped value.
    pub value: String,
}

/// An `xmlns` / `xmlns:prefix` declaration carried on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    /// Declared prefix; `None` for the default namespace.
    pub prefix: Option<String>,
    /// Bound URI (empty undeclares the default namespace).
    pub uri: String,
}

/// A child node of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum XmlNode {
    /// A nested element.
    Element(XmlElement),
    /// Character data, already unescaped.
    Text(String),
}

/// An XML element with resolved namespaces and ordered children.
///
/// Equality compares names, namespaces, attributes and children. Where the
/// namespace declarations happen to sit is not part of equality.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct XmlElement {
    /// Name as written.
    pub name: QName,
    /// Namespace URI the element is in.
    pub namespace: Option<String>,
    /// Declarations written on this element.
    pub namespace_decls: Vec<NamespaceDecl>,
    /// Attributes in document order.
    pub attributes: Vec<XmlAttribute>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

impl PartialEq for XmlElement {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.namespace == other.namespace
            && self.attributes == other.attributes
            && self.children == other.children
    }
}

impl XmlElement {
    /// An element in no namespace.
    #[must_use]
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            name: QName::local(local),
            namespace: None,
            namespace_decls: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An element in `namespace`, written with `prefix`.
    #[must_use]
    pub fn new_ns(namespace: &str, prefix: Option<&str>, local: impl Into<String>) -> Self {
        let local = local.into();
        Self {
            name: match prefix {
                Some(prefix) => QName::prefixed(prefix, local),
                None => QName::local(local),
            },
            namespace: Some(namespace.to_owned()),
            namespace_decls: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Local part of the element name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// Value of an unqualified attribute.
    #[must_use]
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Value of a namespace-qualified attribute.
    #[must_use]
    pub fn attr_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Set an unqualified attribute, replacing any existing value.
    pub fn set_attr(&mut self, local: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.is_none() && a.name.local == local)
        {
            existing.value = value;
            return;
        }
        self.attributes.push(XmlAttribute {
            name: QName::local(local),
            namespace: None,
            value,
        });
    }

    /// Set a namespace-qualified attribute, replacing any existing value.
    pub fn set_attr_ns(
        &mut self,
        namespace: &str,
        prefix: &str,
        local: &str,
        value: impl Into<String>,
    ) {
        let value = value.into();
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name.local == local)
        {
            existing.value = value;
            return;
        }
        self.attributes.push(XmlAttribute {
            name: QName::prefixed(prefix, local),
            namespace: Some(namespace.to_owned()),
            value,
        });
    }

    /// Declare a namespace binding on this element.
    pub fn declare_namespace(&mut self, prefix: Option<&str>, uri: &str) {
        let prefix = prefix.map(str::to_owned);
        if let Some(decl) = self.namespace_decls.iter_mut().find(|d| d.prefix == prefix) {
            uri.clone_into(&mut decl.uri);
        } else {
            self.namespace_decls.push(NamespaceDecl {
                prefix,
                uri: uri.to_owned(),
            });
        }
    }

    /// Child elements in document order, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// The first child element, if any.
    #[must_use]
    pub fn first_child_element(&self) -> Option<&XmlElement> {
        self.child_elements().next()
    }

    /// Append a child element.
    pub fn append_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Concatenated text of the direct text children.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![XmlNode::Text(text.into())];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:example";

    #[test]
    fn test_should_split_qualified_names() {
        assert_eq!(QName::parse("xlink:href"), QName::prefixed("xlink", "href"));
        assert_eq!(QName::parse("div"), QName::local("div"));
        assert_eq!(QName::prefixed("mets", "div").qualified(), "mets:div");
    }

    #[test]
    fn test_should_keep_plain_and_qualified_attributes_apart() {
        let mut element = XmlElement::new("mptr");
        element.set_attr("href", "plain");
        element.set_attr_ns(NS, "ex", "href", "qualified");

        assert_eq!(element.attr("href"), Some("plain"));
        assert_eq!(element.attr_ns(NS, "href"), Some("qualified"));
        assert_eq!(element.attributes.len(), 2);

        element.set_attr_ns(NS, "ex", "href", "changed");
        assert_eq!(element.attr_ns(NS, "href"), Some("changed"));
        assert_eq!(element.attributes.len(), 2);
    }

    #[test]
    fn test_should_enumerate_children_in_order() {
        let mut root = XmlElement::new("div");
        root.append_child(XmlElement::new("mptr"));
        root.children.push(XmlNode::Text("ignored".to_owned()));
        let mut inner = XmlElement::new("div");
        inner.set_attr("ID", "inner");
        root.append_child(inner);
        root.append_child(XmlElement::new("fptr"));

        let names: Vec<&str> = root.child_elements().map(XmlElement::local_name).collect();
        assert_eq!(names, ["mptr", "div", "fptr"]);
        assert_eq!(root.first_child_element().map(XmlElement::local_name), Some("mptr"));
        assert_eq!(root.text_content(), "ignored");
    }

    #[test]
    fn test_should_ignore_declaration_placement_in_equality() {
        let mut a = XmlElement::new_ns(NS, Some("ex"), "record");
        let b = a.clone();
        a.declare_namespace(Some("ex"), NS);
        assert_eq!(a, b);

        let mut c = b.clone();
        c.set_text("payload");
        assert_ne!(b, c);
    }
}
