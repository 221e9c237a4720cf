//! Whole-document read/write round trips over the book fixture.

#[cfg(test)]
mod tests {
    use rustmets_model::{
        AgentRole, AgentType, ChecksumType, DivChild, FptrContent, LocType, MdType, SeqMember,
        StructLinkEntry,
    };

    use crate::{read_book, write_string, write_time};

    #[test]
    fn test_should_read_every_section_of_the_fixture() {
        let mets = read_book();

        assert_eq!(mets.objid.as_deref(), Some("urn:example:book:42"));
        assert_eq!(mets.profile.as_deref(), Some("urn:example:profile"));

        let header = mets.header.as_ref().expect("header");
        assert_eq!(header.agents.len(), 2);
        assert_eq!(header.agents[0].role, AgentRole::Creator);
        assert_eq!(header.agents[0].agent_type, Some(AgentType::Organization));
        assert_eq!(header.agents[1].other_role.as_deref(), Some("SCANNER"));
        assert_eq!(
            header.mets_document_id.as_ref().map(|r| r.value.as_str()),
            Some("urn:example:mets:42")
        );

        let wrap = mets.dmd_secs[0].md_wrap.as_ref().expect("mdWrap");
        assert_eq!(wrap.mdtype, MdType::Mods);
        assert_eq!(wrap.xml_data.len(), 1);
        assert_eq!(wrap.xml_data[0].local_name(), "mods");

        let amd = &mets.amd_secs[0];
        let tech = amd.tech_md[0].md_ref.as_ref().expect("mdRef");
        assert_eq!(tech.locator.loctype, Some(LocType::Url));
        assert_eq!(tech.size, Some(2048));
        assert_eq!(tech.checksum_type, Some(ChecksumType::Md5));
        assert_eq!(
            amd.digiprov_md[0].md_wrap.as_ref().map(|w| w.mdtype),
            Some(MdType::PremisEvent)
        );

        let top = &mets.file_sec.as_ref().expect("fileSec").file_grps[0];
        assert_eq!(top.file_grps.len(), 2);
        let p1 = &top.file_grps[0].files[0];
        assert_eq!(p1.admid, ["tech-img1", "prov-1"]);
        assert_eq!(p1.streams.len(), 1);
        assert_eq!(p1.transform_files[0].order, Some(1));

        assert_eq!(mets.behavior_secs.len(), 1);
    }

    #[test]
    fn test_should_round_trip_fixture_except_last_modified() {
        let original = read_book();
        let mut written = original.clone();
        let xml = write_string(&mut written);

        let mut back = rustmets_xml::read(xml.as_bytes()).expect("reread");
        let header = back.header.as_mut().expect("header");
        assert_eq!(header.last_modified, Some(write_time()));
        assert_eq!(
            header.created.as_ref().map(ToString::to_string).as_deref(),
            Some("2021-04-12T09:30:00.125+02:00")
        );

        header.last_modified = original.header.as_ref().and_then(|h| h.last_modified.clone());
        assert_eq!(back, original);
    }

    #[test]
    fn test_should_produce_identical_output_on_second_write() {
        let mut mets = read_book();
        let first = write_string(&mut mets);
        let mut again = rustmets_xml::read(first.as_bytes()).expect("reread");
        let second = write_string(&mut again);
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_keep_structure_order_and_nesting() {
        let mets = read_book();
        let root = mets.struct_maps[0].div.as_ref().expect("root div");

        assert!(matches!(root.children[0], DivChild::Mptr(_)));
        let pages: Vec<_> = root.divs().filter_map(|d| d.order).collect();
        assert_eq!(pages, [1, 2]);

        let p2 = root.divs().nth(1).expect("second page");
        let fptr = p2.fptrs().next().expect("fptr");
        let Some(FptrContent::Seq(seq)) = &fptr.content else {
            panic!("expected seq, got {:?}", fptr.content);
        };
        assert!(matches!(seq.members[0], SeqMember::Area(_)));
        assert!(matches!(&seq.members[1], SeqMember::Par(par) if par.members.len() == 2));
    }

    #[test]
    fn test_should_reemit_opaque_sections_and_payload_namespaces() {
        let mut mets = read_book();
        let xml = write_string(&mut mets);

        assert!(xml.contains(r#"xmlns:mods="http://www.loc.gov/mods/v3""#));
        assert!(xml.contains(r#"xmlns:premis="http://www.loc.gov/premis/v3""#));
        assert!(xml.contains(r#"xmlns="urn:example:ocr""#));
        assert!(xml.contains("Field Notes &amp; Sketches"));
        assert!(xml.contains("<mets:smLinkGrp>"));
        assert!(xml.contains(r#"<mets:behaviorSec ID="behavior-1">"#));

        let links = &mets.struct_link.as_ref().expect("structLink").links;
        assert!(matches!(&links[0], StructLinkEntry::Link(l) if l.from == "div-p1"));
        assert!(matches!(&links[1], StructLinkEntry::Group(g) if g.child_elements().count() == 3));
    }
}
