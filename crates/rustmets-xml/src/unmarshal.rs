//! Unmarshalling: building METS entities from an element tree.
//!
//! Every entity is built fresh from its element. Children are dispatched on
//! local name in document order; unrecognized children are logged and
//! dropped. Reading never inserts defaulted substructure.

use rustmets_model::{
    Agent, AgentRole, AmdSec, Area, Div, DivChild, FContent, FLocat, File, FileGrp, FileSec, Fptr,
    FptrContent, Locator, MdRef, MdSec, MdType, MdWrap, Mets, MetsHeader, Mptr, Par, ParMember,
    RecordId, Seq, SeqMember, SmLink, Stream, StructLink, StructLinkEntry, StructMap,
    TransformFile, XmlElement,
};
use tracing::debug;

use crate::codec::{
    attr_id_list, attr_string, parse_datetime, parse_enum, parse_number, xlink_attr,
};
use crate::error::XmlError;

/// Trait for building a METS entity from its element.
pub trait MetsUnmarshal: Sized {
    /// Build an instance from `element`.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` for unknown enumeration tokens, unparseable
    /// timestamps or numbers, and missing mandatory parts.
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError>;
}

fn ignore(parent: &'static str, child: &XmlElement) {
    debug!(
        parent,
        element = %child.name.qualified(),
        "ignoring unrecognized child element"
    );
}

/// Top-level elements of an `xmlData` child, or nothing.
fn read_xml_data(element: &XmlElement, parent: &'static str) -> Vec<XmlElement> {
    let mut payload = Vec::new();
    for child in element.child_elements() {
        match child.local_name() {
            "xmlData" => payload.extend(child.child_elements().cloned()),
            _ => ignore(parent, child),
        }
    }
    payload
}

// ---------------------------------------------------------------------------
// Document and header
// ---------------------------------------------------------------------------

impl MetsUnmarshal for Mets {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut mets = Mets {
            id: attr_string(element, "ID"),
            objid: attr_string(element, "OBJID"),
            label: attr_string(element, "LABEL"),
            r#type: attr_string(element, "TYPE"),
            profile: attr_string(element, "PROFILE"),
            ..Mets::default()
        };

        for child in element.child_elements() {
            match child.local_name() {
                "metsHdr" => mets.header = Some(MetsHeader::unmarshal(child)?),
                "dmdSec" => mets.dmd_secs.push(MdSec::unmarshal(child)?),
                "amdSec" => mets.amd_secs.push(AmdSec::unmarshal(child)?),
                "fileSec" => mets.file_sec = Some(FileSec::unmarshal(child)?),
                "structMap" => mets.struct_maps.push(StructMap::unmarshal(child)?),
                "structLink" => mets.struct_link = Some(StructLink::unmarshal(child)?),
                "behaviorSec" => mets.behavior_secs.push(child.clone()),
                _ => ignore("mets", child),
            }
        }

        Ok(mets)
    }
}

impl MetsUnmarshal for MetsHeader {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut header = MetsHeader {
            id: attr_string(element, "ID"),
            admid: attr_id_list(element, "ADMID"),
            created: parse_datetime(element.attr("CREATEDATE"))?,
            last_modified: parse_datetime(element.attr("LASTMODDATE"))?,
            record_status: attr_string(element, "RECORDSTATUS"),
            ..MetsHeader::default()
        };

        for child in element.child_elements() {
            match child.local_name() {
                "agent" => header.agents.push(Agent::unmarshal(child)?),
                "altRecordID" => header.alt_record_ids.push(RecordId::unmarshal(child)?),
                "metsDocumentID" => header.mets_document_id = Some(RecordId::unmarshal(child)?),
                _ => ignore("metsHdr", child),
            }
        }

        Ok(header)
    }
}

impl MetsUnmarshal for Agent {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let role = parse_enum::<AgentRole>(element.attr("ROLE"))?.ok_or(
            XmlError::MissingAttribute {
                element: "agent",
                attribute: "ROLE",
            },
        )?;

        let mut name = None;
        let mut notes = Vec::new();
        for child in element.child_elements() {
            match child.local_name() {
                "name" => name = Some(child.text_content()),
                "note" => notes.push(child.text_content()),
                _ => ignore("agent", child),
            }
        }
        let name = name.ok_or_else(|| XmlError::MissingElement("name in agent".to_string()))?;

        Ok(Agent {
            id: attr_string(element, "ID"),
            role,
            other_role: attr_string(element, "OTHERROLE"),
            agent_type: parse_enum(element.attr("TYPE"))?,
            other_type: attr_string(element, "OTHERTYPE"),
            name,
            notes,
        })
    }
}

impl MetsUnmarshal for RecordId {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(RecordId {
            id: attr_string(element, "ID"),
            value: element.text_content(),
            r#type: attr_string(element, "TYPE"),
        })
    }
}

// ---------------------------------------------------------------------------
// Metadata sections
// ---------------------------------------------------------------------------

impl MetsUnmarshal for Locator {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Locator {
            xlink_type: parse_enum(xlink_attr(element, "type"))?,
            href: xlink_attr(element, "href").map(str::to_owned),
            role: xlink_attr(element, "role").map(str::to_owned),
            arcrole: xlink_attr(element, "arcrole").map(str::to_owned),
            title: xlink_attr(element, "title").map(str::to_owned),
            show: parse_enum(xlink_attr(element, "show"))?,
            actuate: parse_enum(xlink_attr(element, "actuate"))?,
            loctype: parse_enum(element.attr("LOCTYPE"))?,
            other_loctype: attr_string(element, "OTHERLOCTYPE"),
        })
    }
}

impl MetsUnmarshal for MdSec {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut section = MdSec {
            id: attr_string(element, "ID"),
            group_id: attr_string(element, "GROUPID"),
            admid: attr_id_list(element, "ADMID"),
            created: parse_datetime(element.attr("CREATED"))?,
            status: attr_string(element, "STATUS"),
            md_ref: None,
            md_wrap: None,
        };

        for child in element.child_elements() {
            match child.local_name() {
                "mdRef" => section.md_ref = Some(MdRef::unmarshal(child)?),
                "mdWrap" => section.md_wrap = Some(MdWrap::unmarshal(child)?),
                _ => ignore("mdSec", child),
            }
        }

        Ok(section)
    }
}

impl MetsUnmarshal for MdRef {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mdtype = parse_enum::<MdType>(element.attr("MDTYPE"))?.ok_or(
            XmlError::MissingAttribute {
                element: "mdRef",
                attribute: "MDTYPE",
            },
        )?;

        Ok(MdRef {
            id: attr_string(element, "ID"),
            locator: Locator::unmarshal(element)?,
            label: attr_string(element, "LABEL"),
            xptr: attr_string(element, "XPTR"),
            mdtype,
            other_mdtype: attr_string(element, "OTHERMDTYPE"),
            mdtype_version: attr_string(element, "MDTYPEVERSION"),
            mimetype: attr_string(element, "MIMETYPE"),
            size: parse_number("SIZE", element.attr("SIZE"))?,
            created: parse_datetime(element.attr("CREATED"))?,
            checksum: attr_string(element, "CHECKSUM"),
            checksum_type: parse_enum(element.attr("CHECKSUMTYPE"))?,
        })
    }
}

impl MetsUnmarshal for MdWrap {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mdtype = parse_enum::<MdType>(element.attr("MDTYPE"))?.ok_or(
            XmlError::MissingAttribute {
                element: "mdWrap",
                attribute: "MDTYPE",
            },
        )?;

        Ok(MdWrap {
            id: attr_string(element, "ID"),
            label: attr_string(element, "LABEL"),
            mdtype,
            other_mdtype: attr_string(element, "OTHERMDTYPE"),
            mdtype_version: attr_string(element, "MDTYPEVERSION"),
            mimetype: attr_string(element, "MIMETYPE"),
            size: parse_number("SIZE", element.attr("SIZE"))?,
            created: parse_datetime(element.attr("CREATED"))?,
            checksum: attr_string(element, "CHECKSUM"),
            checksum_type: parse_enum(element.attr("CHECKSUMTYPE"))?,
            xml_data: read_xml_data(element, "mdWrap"),
        })
    }
}

impl MetsUnmarshal for AmdSec {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut amd = AmdSec {
            id: attr_string(element, "ID"),
            ..AmdSec::default()
        };

        for child in element.child_elements() {
            match child.local_name() {
                "techMD" => amd.tech_md.push(MdSec::unmarshal(child)?),
                "rightsMD" => amd.rights_md.push(MdSec::unmarshal(child)?),
                "sourceMD" => amd.source_md.push(MdSec::unmarshal(child)?),
                "digiprovMD" => amd.digiprov_md.push(MdSec::unmarshal(child)?),
                _ => ignore("amdSec", child),
            }
        }

        Ok(amd)
    }
}

// ---------------------------------------------------------------------------
// File inventory
// ---------------------------------------------------------------------------

impl MetsUnmarshal for FileSec {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut file_sec = FileSec {
            id: attr_string(element, "ID"),
            file_grps: Vec::new(),
        };

        for child in element.child_elements() {
            match child.local_name() {
                "fileGrp" => file_sec.file_grps.push(FileGrp::unmarshal(child)?),
                _ => ignore("fileSec", child),
            }
        }

        Ok(file_sec)
    }
}

impl MetsUnmarshal for FileGrp {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut group = FileGrp {
            id: attr_string(element, "ID"),
            versdate: parse_datetime(element.attr("VERSDATE"))?,
            admid: attr_id_list(element, "ADMID"),
            r#use: attr_string(element, "USE"),
            ..FileGrp::default()
        };

        for child in element.child_elements() {
            match child.local_name() {
                "fileGrp" => group.file_grps.push(FileGrp::unmarshal(child)?),
                "file" => group.files.push(File::unmarshal(child)?),
                _ => ignore("fileGrp", child),
            }
        }

        Ok(group)
    }
}

impl MetsUnmarshal for File {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut file = File {
            id: attr_string(element, "ID"),
            seq: parse_number("SEQ", element.attr("SEQ"))?,
            owner_id: attr_string(element, "OWNERID"),
            admid: attr_id_list(element, "ADMID"),
            dmdid: attr_id_list(element, "DMDID"),
            group_id: attr_string(element, "GROUPID"),
            r#use: attr_string(element, "USE"),
            begin: attr_string(element, "BEGIN"),
            end: attr_string(element, "END"),
            be_type: parse_enum(element.attr("BETYPE"))?,
            mimetype: attr_string(element, "MIMETYPE"),
            size: parse_number("SIZE", element.attr("SIZE"))?,
            created: parse_datetime(element.attr("CREATED"))?,
            checksum: attr_string(element, "CHECKSUM"),
            checksum_type: parse_enum(element.attr("CHECKSUMTYPE"))?,
            ..File::default()
        };

        for child in element.child_elements() {
            match child.local_name() {
                "FLocat" => file.flocats.push(FLocat::unmarshal(child)?),
                "FContent" => file.fcontent = Some(FContent::unmarshal(child)?),
                "stream" => file.streams.push(Stream::unmarshal(child)?),
                "transformFile" => file.transform_files.push(TransformFile::unmarshal(child)?),
                "file" => file.files.push(File::unmarshal(child)?),
                _ => ignore("file", child),
            }
        }

        Ok(file)
    }
}

impl MetsUnmarshal for FLocat {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(FLocat {
            id: attr_string(element, "ID"),
            locator: Locator::unmarshal(element)?,
            r#use: attr_string(element, "USE"),
        })
    }
}

impl MetsUnmarshal for FContent {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(FContent {
            id: attr_string(element, "ID"),
            r#use: attr_string(element, "USE"),
            xml_data: read_xml_data(element, "FContent"),
        })
    }
}

impl MetsUnmarshal for Stream {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Stream {
            id: attr_string(element, "ID"),
            stream_type: attr_string(element, "streamType"),
            owner_id: attr_string(element, "OWNERID"),
            admid: attr_id_list(element, "ADMID"),
            dmdid: attr_id_list(element, "DMDID"),
            begin: attr_string(element, "BEGIN"),
            end: attr_string(element, "END"),
            be_type: parse_enum(element.attr("BETYPE"))?,
        })
    }
}

impl MetsUnmarshal for TransformFile {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(TransformFile {
            id: attr_string(element, "ID"),
            transform_type: parse_enum(element.attr("TRANSFORMTYPE"))?,
            algorithm: attr_string(element, "TRANSFORMALGORITHM"),
            key: attr_string(element, "TRANSFORMKEY"),
            behavior: attr_string(element, "TRANSFORMBEHAVIOR"),
            order: parse_number("TRANSFORMORDER", element.attr("TRANSFORMORDER"))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Structural map
// ---------------------------------------------------------------------------

impl MetsUnmarshal for StructMap {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut div = None;
        for child in element.child_elements() {
            match child.local_name() {
                "div" if div.is_none() => div = Some(Div::unmarshal(child)?),
                _ => ignore("structMap", child),
            }
        }

        Ok(StructMap {
            id: attr_string(element, "ID"),
            label: attr_string(element, "LABEL"),
            r#type: attr_string(element, "TYPE"),
            div,
        })
    }
}

impl MetsUnmarshal for Div {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut div = Div {
            id: attr_string(element, "ID"),
            order: parse_number("ORDER", element.attr("ORDER"))?,
            order_label: attr_string(element, "ORDERLABEL"),
            label: attr_string(element, "LABEL"),
            r#type: attr_string(element, "TYPE"),
            dmdid: attr_id_list(element, "DMDID"),
            admid: attr_id_list(element, "ADMID"),
            content_ids: attr_id_list(element, "CONTENTIDS"),
            xlink_label: xlink_attr(element, "label").map(str::to_owned),
            children: Vec::new(),
        };

        for child in element.child_elements() {
            match child.local_name() {
                "div" => div.children.push(DivChild::Div(Div::unmarshal(child)?)),
                "mptr" => div.children.push(DivChild::Mptr(Mptr::unmarshal(child)?)),
                "fptr" => div.children.push(DivChild::Fptr(Fptr::unmarshal(child)?)),
                _ => ignore("div", child),
            }
        }

        Ok(div)
    }
}

impl MetsUnmarshal for Mptr {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Mptr {
            id: attr_string(element, "ID"),
            locator: Locator::unmarshal(element)?,
            content_ids: attr_id_list(element, "CONTENTIDS"),
        })
    }
}

impl MetsUnmarshal for Fptr {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut content = None;
        for child in element.child_elements() {
            let parsed = match child.local_name() {
                "par" => FptrContent::Par(Par::unmarshal(child)?),
                "seq" => FptrContent::Seq(Seq::unmarshal(child)?),
                "area" => FptrContent::Area(Area::unmarshal(child)?),
                _ => {
                    ignore("fptr", child);
                    continue;
                }
            };
            if content.is_some() {
                ignore("fptr", child);
            } else {
                content = Some(parsed);
            }
        }

        Ok(Fptr {
            id: attr_string(element, "ID"),
            file_id: attr_string(element, "FILEID"),
            content_ids: attr_id_list(element, "CONTENTIDS"),
            content,
        })
    }
}

impl MetsUnmarshal for Par {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut members = Vec::new();
        for child in element.child_elements() {
            match child.local_name() {
                "area" => members.push(ParMember::Area(Area::unmarshal(child)?)),
                "seq" => members.push(ParMember::Seq(Seq::unmarshal(child)?)),
                _ => ignore("par", child),
            }
        }
        Ok(Par {
            id: attr_string(element, "ID"),
            members,
        })
    }
}

impl MetsUnmarshal for Seq {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut members = Vec::new();
        for child in element.child_elements() {
            match child.local_name() {
                "area" => members.push(SeqMember::Area(Area::unmarshal(child)?)),
                "par" => members.push(SeqMember::Par(Par::unmarshal(child)?)),
                _ => ignore("seq", child),
            }
        }
        Ok(Seq {
            id: attr_string(element, "ID"),
            members,
        })
    }
}

impl MetsUnmarshal for Area {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        Ok(Area {
            id: attr_string(element, "ID"),
            file_id: attr_string(element, "FILEID"),
            shape: parse_enum(element.attr("SHAPE"))?,
            coords: attr_string(element, "COORDS"),
            begin: attr_string(element, "BEGIN"),
            end: attr_string(element, "END"),
            be_type: parse_enum(element.attr("BETYPE"))?,
            extent: attr_string(element, "EXTENT"),
            ext_type: parse_enum(element.attr("EXTTYPE"))?,
            admid: attr_id_list(element, "ADMID"),
            content_ids: attr_id_list(element, "CONTENTIDS"),
        })
    }
}

// ---------------------------------------------------------------------------
// Structural links
// ---------------------------------------------------------------------------

impl MetsUnmarshal for StructLink {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let mut links = Vec::new();
        for child in element.child_elements() {
            match child.local_name() {
                "smLink" => links.push(StructLinkEntry::Link(SmLink::unmarshal(child)?)),
                "smLinkGrp" => links.push(StructLinkEntry::Group(child.clone())),
                _ => ignore("structLink", child),
            }
        }
        Ok(StructLink {
            id: attr_string(element, "ID"),
            links,
        })
    }
}

impl MetsUnmarshal for SmLink {
    fn unmarshal(element: &XmlElement) -> Result<Self, XmlError> {
        let from = xlink_attr(element, "from").ok_or(XmlError::MissingAttribute {
            element: "smLink",
            attribute: "xlink:from",
        })?;
        let to = xlink_attr(element, "to").ok_or(XmlError::MissingAttribute {
            element: "smLink",
            attribute: "xlink:to",
        })?;

        Ok(SmLink {
            id: attr_string(element, "ID"),
            from: from.to_owned(),
            to: to.to_owned(),
            arcrole: xlink_attr(element, "arcrole").map(str::to_owned),
            title: xlink_attr(element, "title").map(str::to_owned),
            show: parse_enum(xlink_attr(element, "show"))?,
            actuate: parse_enum(xlink_attr(element, "actuate"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rustmets_model::{ChecksumType, Show};

    use super::*;
    use crate::dom::{DEFAULT_MAX_DEPTH, parse_document};

    const HEAD: &str = r#"xmlns:mets="http://www.loc.gov/METS/" xmlns:xlink="http://www.w3.org/1999/xlink""#;

    fn parse(xml: &str) -> XmlElement {
        parse_document(xml.as_bytes(), DEFAULT_MAX_DEPTH).expect("well-formed")
    }

    #[test]
    fn test_should_read_div_children_in_document_order() {
        let element = parse(&format!(
            r#"<mets:div {HEAD} ORDER="3"><mets:mptr LOCTYPE="URL" xlink:href="a.xml"/><mets:div LABEL="one"/><mets:fptr FILEID="f1"/><mets:div LABEL="two"/></mets:div>"#
        ));
        let div = Div::unmarshal(&element).expect("div");

        assert_eq!(div.order, Some(3));
        let kinds: Vec<&str> = div
            .children
            .iter()
            .map(|c| match c {
                DivChild::Div(_) => "div",
                DivChild::Mptr(_) => "mptr",
                DivChild::Fptr(_) => "fptr",
            })
            .collect();
        assert_eq!(kinds, ["mptr", "div", "fptr", "div"]);
        assert!(matches!(
            &div.children[0],
            DivChild::Mptr(m) if m.locator.href.as_deref() == Some("a.xml")
        ));
    }

    #[test]
    fn test_should_fail_on_unknown_checksum_type() {
        let element = parse(&format!(
            r#"<mets:file {HEAD} ID="f1" CHECKSUM="00" CHECKSUMTYPE="NOT-A-REAL-TYPE"/>"#
        ));
        let err = File::unmarshal(&element).expect_err("invalid token");
        assert!(matches!(
            err,
            XmlError::InvalidEnumValue { kind: "CHECKSUMTYPE", ref token } if token == "NOT-A-REAL-TYPE"
        ));
    }

    #[test]
    fn test_should_decode_admid_list() {
        let element = parse(&format!(r#"<mets:div {HEAD} ADMID="id1  id2	id3"/>"#));
        let div = Div::unmarshal(&element).expect("div");
        assert_eq!(div.admid, ["id1", "id2", "id3"]);
    }

    #[test]
    fn test_should_reject_agent_without_role_or_name() {
        let no_role = parse(&format!(r#"<mets:agent {HEAD}><mets:name>X</mets:name></mets:agent>"#));
        assert!(matches!(
            Agent::unmarshal(&no_role),
            Err(XmlError::MissingAttribute { attribute: "ROLE", .. })
        ));

        let no_name = parse(&format!(r#"<mets:agent {HEAD} ROLE="CREATOR"/>"#));
        assert!(matches!(
            Agent::unmarshal(&no_name),
            Err(XmlError::MissingElement(_))
        ));

        let ok = parse(&format!(
            r#"<mets:agent {HEAD} ROLE="CREATOR"><mets:name>Lab</mets:name><mets:note>n</mets:note></mets:agent>"#
        ));
        let agent = Agent::unmarshal(&ok).expect("agent");
        assert_eq!(agent.role, AgentRole::Creator);
        assert_eq!(agent.name, "Lab");
        assert_eq!(agent.notes, ["n"]);
    }

    #[test]
    fn test_should_ignore_unknown_children() {
        let element = parse(&format!(
            r#"<mets:fileSec {HEAD}><mets:bogus/><mets:fileGrp USE="master"/></mets:fileSec>"#
        ));
        let file_sec = FileSec::unmarshal(&element).expect("fileSec");
        assert_eq!(file_sec.file_grps.len(), 1);
        assert_eq!(file_sec.file_grps[0].r#use.as_deref(), Some("master"));
    }

    #[test]
    fn test_should_not_default_on_read() {
        let element = parse(&format!(r#"<mets:structMap {HEAD} TYPE="physical"/>"#));
        let struct_map = StructMap::unmarshal(&element).expect("structMap");
        assert!(struct_map.div.is_none());
    }

    #[test]
    fn test_should_read_nested_par_and_seq() {
        let element = parse(&format!(
            r#"<mets:fptr {HEAD}><mets:par><mets:area FILEID="a" SHAPE="RECT"/><mets:seq><mets:area FILEID="b"/><mets:par/></mets:seq></mets:par></mets:fptr>"#
        ));
        let fptr = Fptr::unmarshal(&element).expect("fptr");
        let Some(FptrContent::Par(par)) = fptr.content else {
            panic!("expected par content");
        };
        assert_eq!(par.members.len(), 2);
        let ParMember::Seq(seq) = &par.members[1] else {
            panic!("expected seq second");
        };
        assert!(matches!(seq.members[0], SeqMember::Area(_)));
        assert!(matches!(seq.members[1], SeqMember::Par(_)));
    }

    #[test]
    fn test_should_read_sm_link_and_keep_groups_verbatim() {
        let element = parse(&format!(
            r#"<mets:structLink {HEAD}><mets:smLink xlink:from="d1" xlink:to="d2" xlink:show="new"/><mets:smLinkGrp><mets:smLocatorLink xlink:label="x"/></mets:smLinkGrp></mets:structLink>"#
        ));
        let link = StructLink::unmarshal(&element).expect("structLink");
        assert_eq!(link.links.len(), 2);
        let StructLinkEntry::Link(sm) = &link.links[0] else {
            panic!("expected smLink first");
        };
        assert_eq!((sm.from.as_str(), sm.to.as_str()), ("d1", "d2"));
        assert_eq!(sm.show, Some(Show::New));
        assert!(matches!(&link.links[1], StructLinkEntry::Group(g) if g.local_name() == "smLinkGrp"));
    }

    #[test]
    fn test_should_read_md_ref_numbers_and_enums() {
        let element = parse(&format!(
            r#"<mets:mdRef {HEAD} LOCTYPE="URL" xlink:href="dc.xml" MDTYPE="DC" SIZE="42" CHECKSUMTYPE="MD5" CREATED="2020-01-01T00:00:00"/>"#
        ));
        let md_ref = MdRef::unmarshal(&element).expect("mdRef");
        assert_eq!(md_ref.size, Some(42));
        assert_eq!(md_ref.checksum_type, Some(ChecksumType::Md5));
        assert_eq!(
            md_ref.created.as_ref().map(ToString::to_string).as_deref(),
            Some("2020-01-01T00:00:00")
        );

        let bad_size = parse(&format!(r#"<mets:mdRef {HEAD} MDTYPE="DC" SIZE="big"/>"#));
        assert!(matches!(
            MdRef::unmarshal(&bad_size),
            Err(XmlError::InvalidNumber { attribute: "SIZE", .. })
        ));
    }

    #[test]
    fn test_should_reject_bad_timestamp() {
        let element = parse(&format!(r#"<mets:metsHdr {HEAD} CREATEDATE="last tuesday"/>"#));
        assert!(matches!(
            MetsHeader::unmarshal(&element),
            Err(XmlError::InvalidTimestamp { .. })
        ));
    }
}
