//! quick-xml adapter: parse bytes into an [`XmlElement`] tree and render it back.
//!
//! Parsing resolves namespace prefixes against the declarations in scope and
//! keeps the declarations on the element that carried them. Text is kept
//! verbatim, except whitespace-only runs inside METS elements that also hold
//! child elements: that is layout. CDATA is folded into text, comments and
//! processing instructions are discarded.
//!
//! Rendering re-emits the recorded declarations and adds one wherever an
//! element or attribute uses a prefix that is not bound to its namespace at
//! that point. Opaque fragments lifted out of one document therefore stay
//! well-formed when written into another. Indentation only applies to METS
//! elements without text children; anything else is written as it stands.

use std::io::{self, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use rustmets_model::{NamespaceDecl, QName, XmlAttribute, XmlElement, XmlNode};

use crate::error::XmlError;
use crate::ns::{METS_NS, XML_NS};

/// Default maximum element depth accepted by [`parse_document`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A chain of namespace scopes, innermost last.
#[derive(Debug, Default)]
struct NsScopes {
    frames: Vec<Vec<NamespaceDecl>>,
}

impl NsScopes {
    fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some("xml") {
            return Some(XML_NS);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|decl| decl.prefix.as_deref() == prefix)
            .map(|decl| decl.uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    fn push(&mut self, frame: Vec<NamespaceDecl>) {
        self.frames.push(frame);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a complete document and return its root element.
///
/// # Errors
///
/// Returns `XmlError` if the input is not well-formed, uses an undeclared
/// prefix, nests deeper than `max_depth`, or has no root element.
pub fn parse_document(xml: &[u8], max_depth: usize) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_reader(xml);
    let mut scopes = NsScopes::default();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut text = String::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                flush_text(&mut stack, &mut text);
                ensure_single_root(root.as_ref())?;
                if stack.len() >= max_depth {
                    return Err(XmlError::DepthLimitExceeded(max_depth));
                }
                stack.push(open_element(&e, &mut scopes)?);
            }
            Event::Empty(e) => {
                flush_text(&mut stack, &mut text);
                ensure_single_root(root.as_ref())?;
                if stack.len() >= max_depth {
                    return Err(XmlError::DepthLimitExceeded(max_depth));
                }
                let element = open_element(&e, &mut scopes)?;
                scopes.pop();
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                flush_text(&mut stack, &mut text);
                let mut element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unmatched end tag".to_string()))?;
                scopes.pop();
                strip_layout(&mut element);
                attach(&mut stack, &mut root, element);
            }
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                push_text(&stack, &mut text, &unescaped)?;
            }
            Event::CData(e) => {
                let content = std::str::from_utf8(&e)
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                push_text(&stack, &mut text, content)?;
            }
            Event::GeneralRef(e) => {
                let resolved = match e
                    .resolve_char_ref()
                    .map_err(|err| XmlError::Malformed(err.to_string()))?
                {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = e
                            .decode()
                            .map_err(|err| XmlError::Malformed(err.to_string()))?;
                        quick_xml::escape::resolve_predefined_entity(&name)
                            .ok_or_else(|| {
                                XmlError::Malformed(format!("undeclared entity &{name};"))
                            })?
                            .to_string()
                    }
                };
                push_text(&stack, &mut text, &resolved)?;
            }
            Event::Eof => break,
            // Declaration, doctype, comments and processing instructions.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Malformed(format!(
            "unclosed element <{}>",
            open.name.qualified()
        )));
    }
    root.ok_or_else(|| XmlError::MissingElement("root element".to_string()))
}

fn ensure_single_root(root: Option<&XmlElement>) -> Result<(), XmlError> {
    match root {
        Some(existing) => Err(XmlError::Malformed(format!(
            "content after root element <{}>",
            existing.name.qualified()
        ))),
        None => Ok(()),
    }
}

/// Build an element from a start tag and push its namespace frame.
fn open_element(start: &BytesStart<'_>, scopes: &mut NsScopes) -> Result<XmlElement, XmlError> {
    let raw_name = start.name();
    let name = QName::parse(
        std::str::from_utf8(raw_name.as_ref()).map_err(|e| XmlError::Malformed(e.to_string()))?,
    );

    let mut decls = Vec::new();
    let mut raw_attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| XmlError::Malformed(e.to_string()))?
            .to_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::Malformed(e.to_string()))?
            .into_owned();

        if key == "xmlns" {
            decls.push(NamespaceDecl {
                prefix: None,
                uri: value,
            });
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            decls.push(NamespaceDecl {
                prefix: Some(prefix.to_owned()),
                uri: value,
            });
        } else {
            raw_attributes.push((QName::parse(&key), value));
        }
    }
    scopes.push(decls.clone());

    let namespace = match name.prefix.as_deref() {
        Some(prefix) => Some(
            scopes
                .resolve(Some(prefix))
                .ok_or_else(|| XmlError::UnboundPrefix(prefix.to_owned()))?
                .to_owned(),
        ),
        None => scopes.resolve(None).map(str::to_owned),
    };

    let mut attributes = Vec::with_capacity(raw_attributes.len());
    for (attr_name, value) in raw_attributes {
        // Unprefixed attributes are in no namespace, whatever the default is.
        let attr_ns = match attr_name.prefix.as_deref() {
            Some(prefix) => Some(
                scopes
                    .resolve(Some(prefix))
                    .ok_or_else(|| XmlError::UnboundPrefix(prefix.to_owned()))?
                    .to_owned(),
            ),
            None => None,
        };
        attributes.push(XmlAttribute {
            name: attr_name,
            namespace: attr_ns,
            value,
        });
    }

    Ok(XmlElement {
        name,
        namespace,
        namespace_decls: decls,
        attributes,
        children: Vec::new(),
    })
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => *root = Some(element),
    }
}

fn push_text(stack: &[XmlElement], pending: &mut String, text: &str) -> Result<(), XmlError> {
    if stack.is_empty() {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(XmlError::Malformed(
            "character data outside the root element".to_string(),
        ));
    }
    pending.push_str(text);
    Ok(())
}

/// Move buffered character data into the current element.
fn flush_text(stack: &mut [XmlElement], pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Text(text));
    }
}

fn is_xml_whitespace(text: &str) -> bool {
    text.bytes()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

/// Drop whitespace-only text from a METS element that has child elements.
fn strip_layout(element: &mut XmlElement) {
    if element.namespace.as_deref() != Some(METS_NS) {
        return;
    }
    if !element
        .children
        .iter()
        .any(|node| matches!(node, XmlNode::Element(_)))
    {
        return;
    }
    element
        .children
        .retain(|node| !matches!(node, XmlNode::Text(text) if is_xml_whitespace(text)));
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Output layout for [`render_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level; `0` writes everything on one line.
    pub indent: usize,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>`.
    pub declaration: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
        }
    }
}

/// Render an element tree as a document.
///
/// # Errors
///
/// Returns `XmlError` if writing to the output buffer fails.
pub fn render_document(root: &XmlElement, options: RenderOptions) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(4096);
    {
        let mut writer = if options.indent > 0 {
            Writer::new_with_indent(&mut buf, b' ', options.indent)
        } else {
            Writer::new(&mut buf)
        };

        if options.declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        let mut scopes = NsScopes::default();
        write_element(&mut writer, root, &mut scopes, options.indent > 0)?;
    }
    if options.indent > 0 {
        buf.push(b'\n');
    }
    Ok(buf)
}

/// Whether the indenting writer may add line breaks inside `element`.
fn takes_layout(element: &XmlElement) -> bool {
    element.namespace.as_deref() == Some(METS_NS)
        && !element
            .children
            .iter()
            .any(|node| matches!(node, XmlNode::Text(_)))
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
    scopes: &mut NsScopes,
    indented: bool,
) -> io::Result<()> {
    if indented && !takes_layout(element) {
        // Rendered flat and handed over as pre-escaped text, which the
        // indenting writer never breaks around.
        let mut raw = Vec::new();
        write_element(&mut Writer::new(&mut raw), element, scopes, false)?;
        let raw = String::from_utf8(raw).map_err(io::Error::other)?;
        return writer.write_event(Event::Text(BytesText::from_escaped(raw)));
    }

    let frame = required_declarations(element, scopes);
    let qualified = element.name.qualified();

    let mut start = BytesStart::new(qualified.as_str());
    for decl in &frame {
        let key = match &decl.prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        start.push_attribute((key.as_str(), decl.uri.as_str()));
    }
    for attr in &element.attributes {
        start.push_attribute((attr.name.qualified().as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    scopes.push(frame);
    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(nested) => write_element(writer, nested, scopes, indented)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(qualified.as_str())))?;
    scopes.pop();
    Ok(())
}

/// The element's own declarations plus whatever its name and attributes need
/// that the enclosing scopes do not already provide.
fn required_declarations(element: &XmlElement, scopes: &NsScopes) -> Vec<NamespaceDecl> {
    let mut frame = element.namespace_decls.clone();

    let lookup = |frame: &[NamespaceDecl], prefix: Option<&str>| -> Option<String> {
        if let Some(decl) = frame.iter().find(|d| d.prefix.as_deref() == prefix) {
            return Some(decl.uri.clone()).filter(|uri| !uri.is_empty());
        }
        scopes.resolve(prefix).map(str::to_owned)
    };

    let prefix = element.name.prefix.as_deref();
    match (prefix, element.namespace.as_deref()) {
        (_, Some(ns)) if prefix != Some("xml") => {
            if lookup(&frame, prefix).as_deref() != Some(ns) {
                frame.push(NamespaceDecl {
                    prefix: prefix.map(str::to_owned),
                    uri: ns.to_owned(),
                });
            }
        }
        // An unprefixed element in no namespace must not inherit a default.
        (None, None) => {
            if lookup(&frame, None).is_some() {
                frame.push(NamespaceDecl {
                    prefix: None,
                    uri: String::new(),
                });
            }
        }
        _ => {}
    }

    for attr in &element.attributes {
        let (Some(attr_prefix), Some(ns)) = (attr.name.prefix.as_deref(), attr.namespace.as_deref())
        else {
            continue;
        };
        if attr_prefix == "xml" {
            continue;
        }
        if lookup(&frame, Some(attr_prefix)).as_deref() != Some(ns) {
            frame.push(NamespaceDecl {
                prefix: Some(attr_prefix.to_owned()),
                uri: ns.to_owned(),
            });
        }
    }

    frame
}
