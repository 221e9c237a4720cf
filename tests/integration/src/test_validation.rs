//! Validation report and ID index over the book fixture.

#[cfg(test)]
mod tests {
    use rustmets_core::{Finding, IdIndex, IdTarget, validate};
    use rustmets_model::{DivChild, Fptr, MdSec};
    use rustmets_xml::XmlError;

    use crate::read_book;

    #[test]
    fn test_should_find_nothing_in_consistent_fixture() {
        let mets = read_book();
        let findings = validate(&mets);
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn test_should_index_fixture_ids() {
        let mets = read_book();
        let index = IdIndex::build(&mets);

        assert!(index.duplicates().is_empty());
        assert!(matches!(index.get("file-ocr"), Some(IdTarget::File(f)) if f.fcontent.is_some()));
        assert_eq!(
            index.get("prov-1").map(|t| t.element_name()),
            Some("digiprovMD")
        );
        assert_eq!(index.get("div-p2").map(|t| t.element_name()), Some("div"));
        assert!(!index.contains("behavior-1"));
    }

    #[test]
    fn test_should_report_broken_edits() {
        let mut mets = read_book();
        mets.amd_secs[0].source_md.push(MdSec::new("file-p2"));
        if let Some(div) = mets.struct_maps[0].div.as_mut() {
            div.children.push(DivChild::Fptr(Fptr {
                file_id: Some("file-p9".to_owned()),
                ..Fptr::default()
            }));
        }

        let findings = validate(&mets);
        assert_eq!(
            findings,
            [
                Finding::DuplicateId {
                    id: "file-p2".to_owned()
                },
                Finding::MissingContent {
                    section: "sourceMD",
                    id: Some("file-p2".to_owned()),
                },
                Finding::DanglingReference {
                    element: "fptr",
                    attribute: "FILEID",
                    target: "file-p9".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_should_reject_unknown_checksum_type() {
        let xml = String::from_utf8_lossy(crate::BOOK_FIXTURE)
            .replace(r#"CHECKSUMTYPE="MD5""#, r#"CHECKSUMTYPE="NOT-A-REAL-TYPE""#);
        let err = rustmets_xml::read(xml.as_bytes()).expect_err("invalid enum");
        assert!(matches!(
            err,
            XmlError::InvalidEnumValue { ref token, .. } if token == "NOT-A-REAL-TYPE"
        ));
    }

    #[test]
    fn test_should_reject_agent_without_role() {
        let xml = String::from_utf8_lossy(crate::BOOK_FIXTURE).replace(
            r#"<mets:agent ID="agent-lib" ROLE="CREATOR""#,
            r#"<mets:agent ID="agent-lib""#,
        );
        let err = rustmets_xml::read(xml.as_bytes()).expect_err("missing role");
        assert!(matches!(
            err,
            XmlError::MissingAttribute {
                element: "agent",
                attribute: "ROLE"
            }
        ));
    }
}
