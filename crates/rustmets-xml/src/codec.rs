//! Primitive attribute codecs shared by the marshal and unmarshal passes.

use std::fmt::Display;
use std::str::FromStr;

use rustmets_model::{MetsEnum, XmlElement, XsdDateTime};

use crate::error::XmlError;
use crate::ns::{XLINK_NS, XLINK_PREFIX};

/// Split an `IDREFS`-style value on whitespace runs.
#[must_use]
pub fn decode_id_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_owned).collect()
}

/// Join identifiers with exactly one space.
#[must_use]
pub fn encode_id_list(ids: &[String]) -> String {
    ids.join(" ")
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

pub(crate) fn parse_enum<E: MetsEnum>(value: Option<&str>) -> Result<Option<E>, XmlError> {
    value
        .map(E::from_token)
        .transpose()
        .map_err(XmlError::from)
}

pub(crate) fn parse_datetime(value: Option<&str>) -> Result<Option<XsdDateTime>, XmlError> {
    value
        .map(XsdDateTime::parse)
        .transpose()
        .map_err(XmlError::from)
}

pub(crate) fn parse_number<T>(
    attribute: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, XmlError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| XmlError::InvalidNumber {
                attribute,
                value: raw.to_owned(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

pub(crate) fn attr_string(element: &XmlElement, name: &str) -> Option<String> {
    element.attr(name).map(str::to_owned)
}

pub(crate) fn attr_id_list(element: &XmlElement, name: &str) -> Vec<String> {
    element.attr(name).map(decode_id_list).unwrap_or_default()
}

pub(crate) fn xlink_attr<'a>(element: &'a XmlElement, local: &str) -> Option<&'a str> {
    element.attr_ns(XLINK_NS, local)
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub(crate) fn set_opt_str(element: &mut XmlElement, name: &str, value: Option<&str>) {
    if let Some(v) = value {
        element.set_attr(name, v);
    }
}

/// Set an attribute from any value whose `Display` is its lexical form
/// (enums, timestamps, numbers).
pub(crate) fn set_opt_display<T: Display>(element: &mut XmlElement, name: &str, value: Option<&T>) {
    if let Some(v) = value {
        element.set_attr(name, v.to_string());
    }
}

/// Set a reference-list attribute; an empty list leaves it absent.
pub(crate) fn set_id_list(element: &mut XmlElement, name: &str, ids: &[String]) {
    if !ids.is_empty() {
        element.set_attr(name, encode_id_list(ids));
    }
}

pub(crate) fn set_xlink(element: &mut XmlElement, local: &str, value: Option<&str>) {
    if let Some(v) = value {
        element.set_attr_ns(XLINK_NS, XLINK_PREFIX, local, v);
    }
}
