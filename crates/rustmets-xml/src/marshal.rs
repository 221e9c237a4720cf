//! Marshalling: writing METS entities into an element tree.
//!
//! Each entity fills a target element that its parent has already created:
//! attributes for every populated field, then one child per populated
//! sub-entity in schema order. Unset fields are skipped.
//!
//! Marshalling takes `&mut self` because writing inserts the substructure the
//! schema requires (a `structMap` on the document, a `fileGrp` in `fileSec`, a
//! root `div` in each `structMap`) and stamps the header dates. Repeated
//! writes do not insert anything further.

use rustmets_model::{
    Agent, AmdSec, Area, Div, DivChild, FContent, FLocat, File, FileGrp, FileSec, Fptr,
    FptrContent, Locator, MdRef, MdSec, MdWrap, Mets, MetsHeader, Mptr, Par, ParMember, RecordId,
    Seq, SeqMember, SmLink, Stream, StructLink, StructLinkEntry, StructMap, TransformFile,
    XmlElement, XsdDateTime,
};
use tracing::debug;

use crate::codec::{set_id_list, set_opt_display, set_opt_str, set_xlink};
use crate::ns::{METS_NS, METS_PREFIX};

/// State carried through one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalContext {
    /// The write time, taken once per document.
    pub now: XsdDateTime,
}

impl MarshalContext {
    /// A context stamped with `now`.
    #[must_use]
    pub fn new(now: XsdDateTime) -> Self {
        Self { now }
    }
}

/// Trait for writing a METS entity into a pre-created element.
pub trait MetsMarshal {
    /// Set attributes on `element` and append its children.
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext);
}

/// A new, empty element in the METS namespace.
#[must_use]
pub fn mets_element(local: &str) -> XmlElement {
    XmlElement::new_ns(METS_NS, Some(METS_PREFIX), local)
}

/// Marshal `value` into a new `local` element and append it to `parent`.
fn append<T: MetsMarshal>(
    parent: &mut XmlElement,
    local: &str,
    value: &mut T,
    ctx: &MarshalContext,
) {
    let mut child = mets_element(local);
    value.marshal(&mut child, ctx);
    parent.append_child(child);
}

fn append_all<T: MetsMarshal>(
    parent: &mut XmlElement,
    local: &str,
    values: &mut [T],
    ctx: &MarshalContext,
) {
    for value in values {
        append(parent, local, value, ctx);
    }
}

fn append_text(parent: &mut XmlElement, local: &str, text: &str) {
    let mut child = mets_element(local);
    child.set_text(text);
    parent.append_child(child);
}

fn append_xml_data(parent: &mut XmlElement, payload: &[XmlElement]) {
    let mut xml_data = mets_element("xmlData");
    for fragment in payload {
        xml_data.append_child(fragment.clone());
    }
    parent.append_child(xml_data);
}

// ---------------------------------------------------------------------------
// Document and header
// ---------------------------------------------------------------------------

impl MetsMarshal for Mets {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "OBJID", self.objid.as_deref());
        set_opt_str(element, "LABEL", self.label.as_deref());
        set_opt_str(element, "TYPE", self.r#type.as_deref());
        set_opt_str(element, "PROFILE", self.profile.as_deref());

        if let Some(header) = self.header.as_mut() {
            append(element, "metsHdr", header, ctx);
        }
        append_all(element, "dmdSec", &mut self.dmd_secs, ctx);
        append_all(element, "amdSec", &mut self.amd_secs, ctx);
        if let Some(file_sec) = self.file_sec.as_mut() {
            append(element, "fileSec", file_sec, ctx);
        }

        if self.struct_maps.is_empty() {
            debug!("inserting empty structMap");
            self.struct_maps.push(StructMap::default());
        }
        append_all(element, "structMap", &mut self.struct_maps, ctx);

        if let Some(struct_link) = self.struct_link.as_mut() {
            append(element, "structLink", struct_link, ctx);
        }
        for behavior in &self.behavior_secs {
            element.append_child(behavior.clone());
        }
    }
}

impl MetsMarshal for MetsHeader {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        if self.created.is_none() {
            self.created = Some(ctx.now.clone());
        }
        self.last_modified = Some(ctx.now.clone());

        set_opt_str(element, "ID", self.id.as_deref());
        set_id_list(element, "ADMID", &self.admid);
        set_opt_display(element, "CREATEDATE", self.created.as_ref());
        set_opt_display(element, "LASTMODDATE", self.last_modified.as_ref());
        set_opt_str(element, "RECORDSTATUS", self.record_status.as_deref());

        append_all(element, "agent", &mut self.agents, ctx);
        append_all(element, "altRecordID", &mut self.alt_record_ids, ctx);
        if let Some(doc_id) = self.mets_document_id.as_mut() {
            append(element, "metsDocumentID", doc_id, ctx);
        }
    }
}

impl MetsMarshal for Agent {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        element.set_attr("ROLE", self.role.as_str());
        set_opt_str(element, "OTHERROLE", self.other_role.as_deref());
        set_opt_display(element, "TYPE", self.agent_type.as_ref());
        set_opt_str(element, "OTHERTYPE", self.other_type.as_deref());

        append_text(element, "name", &self.name);
        for note in &self.notes {
            append_text(element, "note", note);
        }
    }
}

impl MetsMarshal for RecordId {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "TYPE", self.r#type.as_deref());
        element.set_text(self.value.as_str());
    }
}

// ---------------------------------------------------------------------------
// Metadata sections
// ---------------------------------------------------------------------------

impl MetsMarshal for Locator {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_display(element, "LOCTYPE", self.loctype.as_ref());
        set_opt_str(element, "OTHERLOCTYPE", self.other_loctype.as_deref());
        set_xlink(element, "type", self.xlink_type.map(|t| t.as_str()));
        set_xlink(element, "href", self.href.as_deref());
        set_xlink(element, "role", self.role.as_deref());
        set_xlink(element, "arcrole", self.arcrole.as_deref());
        set_xlink(element, "title", self.title.as_deref());
        set_xlink(element, "show", self.show.map(|s| s.as_str()));
        set_xlink(element, "actuate", self.actuate.map(|a| a.as_str()));
    }
}

impl MetsMarshal for MdSec {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "GROUPID", self.group_id.as_deref());
        set_id_list(element, "ADMID", &self.admid);
        set_opt_display(element, "CREATED", self.created.as_ref());
        set_opt_str(element, "STATUS", self.status.as_deref());

        if let Some(md_ref) = self.md_ref.as_mut() {
            append(element, "mdRef", md_ref, ctx);
        }
        if let Some(md_wrap) = self.md_wrap.as_mut() {
            append(element, "mdWrap", md_wrap, ctx);
        }
    }
}

impl MetsMarshal for MdRef {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        self.locator.marshal(element, ctx);
        set_opt_str(element, "LABEL", self.label.as_deref());
        set_opt_str(element, "XPTR", self.xptr.as_deref());
        element.set_attr("MDTYPE", self.mdtype.as_str());
        set_opt_str(element, "OTHERMDTYPE", self.other_mdtype.as_deref());
        set_opt_str(element, "MDTYPEVERSION", self.mdtype_version.as_deref());
        set_opt_str(element, "MIMETYPE", self.mimetype.as_deref());
        set_opt_display(element, "SIZE", self.size.as_ref());
        set_opt_display(element, "CREATED", self.created.as_ref());
        set_opt_str(element, "CHECKSUM", self.checksum.as_deref());
        set_opt_display(element, "CHECKSUMTYPE", self.checksum_type.as_ref());
    }
}

impl MetsMarshal for MdWrap {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "LABEL", self.label.as_deref());
        element.set_attr("MDTYPE", self.mdtype.as_str());
        set_opt_str(element, "OTHERMDTYPE", self.other_mdtype.as_deref());
        set_opt_str(element, "MDTYPEVERSION", self.mdtype_version.as_deref());
        set_opt_str(element, "MIMETYPE", self.mimetype.as_deref());
        set_opt_display(element, "SIZE", self.size.as_ref());
        set_opt_display(element, "CREATED", self.created.as_ref());
        set_opt_str(element, "CHECKSUM", self.checksum.as_deref());
        set_opt_display(element, "CHECKSUMTYPE", self.checksum_type.as_ref());
        append_xml_data(element, &self.xml_data);
    }
}

impl MetsMarshal for AmdSec {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        append_all(element, "techMD", &mut self.tech_md, ctx);
        append_all(element, "rightsMD", &mut self.rights_md, ctx);
        append_all(element, "sourceMD", &mut self.source_md, ctx);
        append_all(element, "digiprovMD", &mut self.digiprov_md, ctx);
    }
}

// ---------------------------------------------------------------------------
// File inventory
// ---------------------------------------------------------------------------

impl MetsMarshal for FileSec {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        if self.file_grps.is_empty() {
            debug!("inserting empty fileGrp");
            self.file_grps.push(FileGrp::default());
        }
        append_all(element, "fileGrp", &mut self.file_grps, ctx);
    }
}

impl MetsMarshal for FileGrp {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_display(element, "VERSDATE", self.versdate.as_ref());
        set_id_list(element, "ADMID", &self.admid);
        set_opt_str(element, "USE", self.r#use.as_deref());
        append_all(element, "fileGrp", &mut self.file_grps, ctx);
        append_all(element, "file", &mut self.files, ctx);
    }
}

impl MetsMarshal for File {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_display(element, "SEQ", self.seq.as_ref());
        set_opt_str(element, "OWNERID", self.owner_id.as_deref());
        set_id_list(element, "ADMID", &self.admid);
        set_id_list(element, "DMDID", &self.dmdid);
        set_opt_str(element, "GROUPID", self.group_id.as_deref());
        set_opt_str(element, "USE", self.r#use.as_deref());
        set_opt_str(element, "BEGIN", self.begin.as_deref());
        set_opt_str(element, "END", self.end.as_deref());
        set_opt_display(element, "BETYPE", self.be_type.as_ref());
        set_opt_str(element, "MIMETYPE", self.mimetype.as_deref());
        set_opt_display(element, "SIZE", self.size.as_ref());
        set_opt_display(element, "CREATED", self.created.as_ref());
        set_opt_str(element, "CHECKSUM", self.checksum.as_deref());
        set_opt_display(element, "CHECKSUMTYPE", self.checksum_type.as_ref());

        append_all(element, "FLocat", &mut self.flocats, ctx);
        if let Some(fcontent) = self.fcontent.as_mut() {
            append(element, "FContent", fcontent, ctx);
        }
        append_all(element, "stream", &mut self.streams, ctx);
        append_all(element, "transformFile", &mut self.transform_files, ctx);
        append_all(element, "file", &mut self.files, ctx);
    }
}

impl MetsMarshal for FLocat {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        self.locator.marshal(element, ctx);
        set_opt_str(element, "USE", self.r#use.as_deref());
    }
}

impl MetsMarshal for FContent {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "USE", self.r#use.as_deref());
        append_xml_data(element, &self.xml_data);
    }
}

impl MetsMarshal for Stream {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "streamType", self.stream_type.as_deref());
        set_opt_str(element, "OWNERID", self.owner_id.as_deref());
        set_id_list(element, "ADMID", &self.admid);
        set_id_list(element, "DMDID", &self.dmdid);
        set_opt_str(element, "BEGIN", self.begin.as_deref());
        set_opt_str(element, "END", self.end.as_deref());
        set_opt_display(element, "BETYPE", self.be_type.as_ref());
    }
}

impl MetsMarshal for TransformFile {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_display(element, "TRANSFORMTYPE", self.transform_type.as_ref());
        set_opt_str(element, "TRANSFORMALGORITHM", self.algorithm.as_deref());
        set_opt_str(element, "TRANSFORMKEY", self.key.as_deref());
        set_opt_str(element, "TRANSFORMBEHAVIOR", self.behavior.as_deref());
        set_opt_display(element, "TRANSFORMORDER", self.order.as_ref());
    }
}

// ---------------------------------------------------------------------------
// Structural map
// ---------------------------------------------------------------------------

impl MetsMarshal for StructMap {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "TYPE", self.r#type.as_deref());
        set_opt_str(element, "LABEL", self.label.as_deref());
        let div = self.div.get_or_insert_with(|| {
            debug!("inserting empty root div");
            Div::default()
        });
        append(element, "div", div, ctx);
    }
}

impl MetsMarshal for Div {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_display(element, "ORDER", self.order.as_ref());
        set_opt_str(element, "ORDERLABEL", self.order_label.as_deref());
        set_opt_str(element, "LABEL", self.label.as_deref());
        set_id_list(element, "DMDID", &self.dmdid);
        set_id_list(element, "ADMID", &self.admid);
        set_opt_str(element, "TYPE", self.r#type.as_deref());
        set_id_list(element, "CONTENTIDS", &self.content_ids);
        set_xlink(element, "label", self.xlink_label.as_deref());

        for child in &mut self.children {
            match child {
                DivChild::Div(div) => append(element, "div", div, ctx),
                DivChild::Mptr(mptr) => append(element, "mptr", mptr, ctx),
                DivChild::Fptr(fptr) => append(element, "fptr", fptr, ctx),
            }
        }
    }
}

impl MetsMarshal for Mptr {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        self.locator.marshal(element, ctx);
        set_id_list(element, "CONTENTIDS", &self.content_ids);
    }
}

impl MetsMarshal for Fptr {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "FILEID", self.file_id.as_deref());
        set_id_list(element, "CONTENTIDS", &self.content_ids);
        match self.content.as_mut() {
            Some(FptrContent::Par(par)) => append(element, "par", par, ctx),
            Some(FptrContent::Seq(seq)) => append(element, "seq", seq, ctx),
            Some(FptrContent::Area(area)) => append(element, "area", area, ctx),
            None => {}
        }
    }
}

impl MetsMarshal for Par {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        for member in &mut self.members {
            match member {
                ParMember::Area(area) => append(element, "area", area, ctx),
                ParMember::Seq(seq) => append(element, "seq", seq, ctx),
            }
        }
    }
}

impl MetsMarshal for Seq {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        for member in &mut self.members {
            match member {
                SeqMember::Area(area) => append(element, "area", area, ctx),
                SeqMember::Par(par) => append(element, "par", par, ctx),
            }
        }
    }
}

impl MetsMarshal for Area {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_opt_str(element, "FILEID", self.file_id.as_deref());
        set_opt_display(element, "SHAPE", self.shape.as_ref());
        set_opt_str(element, "COORDS", self.coords.as_deref());
        set_opt_str(element, "BEGIN", self.begin.as_deref());
        set_opt_str(element, "END", self.end.as_deref());
        set_opt_display(element, "BETYPE", self.be_type.as_ref());
        set_opt_str(element, "EXTENT", self.extent.as_deref());
        set_opt_display(element, "EXTTYPE", self.ext_type.as_ref());
        set_id_list(element, "ADMID", &self.admid);
        set_id_list(element, "CONTENTIDS", &self.content_ids);
    }
}

// ---------------------------------------------------------------------------
// Structural links
// ---------------------------------------------------------------------------

impl MetsMarshal for StructLink {
    fn marshal(&mut self, element: &mut XmlElement, ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        for entry in &mut self.links {
            match entry {
                StructLinkEntry::Link(link) => append(element, "smLink", link, ctx),
                StructLinkEntry::Group(group) => element.append_child(group.clone()),
            }
        }
    }
}

impl MetsMarshal for SmLink {
    fn marshal(&mut self, element: &mut XmlElement, _ctx: &MarshalContext) {
        set_opt_str(element, "ID", self.id.as_deref());
        set_xlink(element, "arcrole", self.arcrole.as_deref());
        set_xlink(element, "title", self.title.as_deref());
        set_xlink(element, "show", self.show.map(|s| s.as_str()));
        set_xlink(element, "actuate", self.actuate.map(|a| a.as_str()));
        set_xlink(element, "to", Some(self.to.as_str()));
        set_xlink(element, "from", Some(self.from.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use rustmets_model::{AgentRole, ChecksumType, FileBeType, LocType, MdType};

    use super::*;
    use crate::ns::XLINK_NS;

    fn ctx() -> MarshalContext {
        MarshalContext::new(XsdDateTime::parse("2024-01-02T03:04:05.678Z").expect("valid"))
    }

    fn marshal_into<T: MetsMarshal>(local: &str, value: &mut T) -> XmlElement {
        let mut element = mets_element(local);
        value.marshal(&mut element, &ctx());
        element
    }

    fn child_names(element: &XmlElement) -> Vec<&str> {
        element.child_elements().map(XmlElement::local_name).collect()
    }

    #[test]
    fn test_should_synthesize_struct_map_with_root_div() {
        let mut mets = Mets::new();
        let element = marshal_into("mets", &mut mets);

        assert_eq!(child_names(&element), ["structMap"]);
        let struct_map = element.first_child_element().expect("structMap");
        assert_eq!(child_names(struct_map), ["div"]);
        assert_eq!(mets.struct_maps.len(), 1);
        assert!(mets.struct_maps[0].div.is_some());
    }

    #[test]
    fn test_should_not_synthesize_twice() {
        let mut mets = Mets::new();
        mets.file_sec = Some(FileSec::default());
        let first = marshal_into("mets", &mut mets);
        let second = marshal_into("mets", &mut mets);

        assert_eq!(first, second);
        assert_eq!(mets.struct_maps.len(), 1);
        assert_eq!(mets.file_sec.as_ref().map(|f| f.file_grps.len()), Some(1));
    }

    #[test]
    fn test_should_stamp_header_dates() {
        let created = XsdDateTime::parse("2001-01-01T00:00:00Z").expect("valid");
        let mut header = MetsHeader {
            created: Some(created.clone()),
            last_modified: Some(created),
            ..MetsHeader::default()
        };
        let element = marshal_into("metsHdr", &mut header);

        assert_eq!(element.attr("CREATEDATE"), Some("2001-01-01T00:00:00Z"));
        assert_eq!(element.attr("LASTMODDATE"), Some("2024-01-02T03:04:05.678Z"));

        let mut fresh = MetsHeader::default();
        let element = marshal_into("metsHdr", &mut fresh);
        assert_eq!(element.attr("CREATEDATE"), Some("2024-01-02T03:04:05.678Z"));
        assert_eq!(fresh.created, Some(ctx().now));
    }

    #[test]
    fn test_should_write_agent_role_and_children_in_order() {
        let mut agent = Agent::new(AgentRole::Other, "Digitization Lab");
        agent.other_role = Some("SCANNER".to_owned());
        agent.notes = vec!["first".to_owned(), "second".to_owned()];
        let element = marshal_into("agent", &mut agent);

        assert_eq!(element.attr("ROLE"), Some("OTHER"));
        assert_eq!(element.attr("OTHERROLE"), Some("SCANNER"));
        assert!(element.attr("TYPE").is_none());
        assert_eq!(child_names(&element), ["name", "note", "note"]);
    }

    #[test]
    fn test_should_write_locator_attributes_in_xlink_namespace() {
        let mut md_ref = MdRef::new(
            Locator::new(LocType::Url, "http://example.org/dc.xml"),
            MdType::Dc,
        );
        md_ref.checksum = Some("abc".to_owned());
        md_ref.checksum_type = Some(ChecksumType::Sha256);
        let element = marshal_into("mdRef", &mut md_ref);

        assert_eq!(element.attr("LOCTYPE"), Some("URL"));
        assert_eq!(
            element.attr_ns(XLINK_NS, "href"),
            Some("http://example.org/dc.xml")
        );
        assert!(element.attr("href").is_none());
        assert_eq!(element.attr("MDTYPE"), Some("DC"));
        assert_eq!(element.attr("CHECKSUMTYPE"), Some("SHA-256"));
    }

    #[test]
    fn test_should_preserve_mixed_div_child_order() {
        let mut div = Div {
            children: vec![
                DivChild::Mptr(Mptr::default()),
                DivChild::Div(Div::default()),
                DivChild::Fptr(Fptr::default()),
                DivChild::Div(Div::default()),
            ],
            ..Div::default()
        };
        let element = marshal_into("div", &mut div);
        assert_eq!(child_names(&element), ["mptr", "div", "fptr", "div"]);
    }

    #[test]
    fn test_should_join_reference_lists_with_single_spaces() {
        let mut file = File::new("f1");
        file.admid = vec!["id1".to_owned(), "id2".to_owned(), "id3".to_owned()];
        file.be_type = Some(FileBeType::Byte);
        let element = marshal_into("file", &mut file);

        assert_eq!(element.attr("ADMID"), Some("id1 id2 id3"));
        assert!(element.attr("DMDID").is_none());
        assert_eq!(element.attr("BETYPE"), Some("BYTE"));
    }

    #[test]
    fn test_should_always_write_xml_data_for_md_wrap() {
        let mut wrap = MdWrap::new(MdType::Mods);
        let element = marshal_into("mdWrap", &mut wrap);
        assert_eq!(child_names(&element), ["xmlData"]);
    }
}
