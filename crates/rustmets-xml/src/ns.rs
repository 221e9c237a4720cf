//! Namespace URIs and prefixes used on the wire.

/// The METS namespace.
pub const METS_NS: &str = "http://www.loc.gov/METS/";

/// Prefix written for [`METS_NS`].
pub const METS_PREFIX: &str = "mets";

/// The XLink namespace.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Prefix written for [`XLINK_NS`].
pub const XLINK_PREFIX: &str = "xlink";

/// The XML Schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix written for [`XSI_NS`].
pub const XSI_PREFIX: &str = "xsi";

/// The namespace permanently bound to the `xml` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Default value of `xsi:schemaLocation` on the root element.
pub const METS_SCHEMA_LOCATION: &str =
    "http://www.loc.gov/METS/ http://www.loc.gov/standards/mets/mets.xsd";
