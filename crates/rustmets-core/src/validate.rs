//! Structural checks that the engine itself never enforces.
//!
//! [`validate`] only reports. It does not touch the document, and a document
//! with findings still reads and writes normally.

use std::fmt;

use rustmets_model::{
    Area, Div, DivChild, File, FileGrp, Fptr, FptrContent, MdSec, Mets, Par, ParMember, Seq,
    SeqMember, StructLinkEntry,
};
use serde::Serialize;
use tracing::warn;

use crate::index::IdIndex;

/// One problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Finding {
    /// A metadata section holds both `mdRef` and `mdWrap`.
    AmbiguousContent {
        section: &'static str,
        id: Option<String>,
    },
    /// A metadata section holds neither `mdRef` nor `mdWrap`.
    MissingContent {
        section: &'static str,
        id: Option<String>,
    },
    /// The same `ID` appears on more than one entity.
    DuplicateId { id: String },
    /// An IDREF attribute names an identifier no entity carries.
    DanglingReference {
        element: &'static str,
        attribute: &'static str,
        target: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousContent { section, id } => {
                write!(f, "{section}{} has both mdRef and mdWrap", show_id(id.as_deref()))
            }
            Self::MissingContent { section, id } => {
                write!(f, "{section}{} has neither mdRef nor mdWrap", show_id(id.as_deref()))
            }
            Self::DuplicateId { id } => write!(f, "ID {id:?} is used more than once"),
            Self::DanglingReference {
                element,
                attribute,
                target,
            } => write!(f, "{element} {attribute} refers to unknown ID {target:?}"),
        }
    }
}

fn show_id(id: Option<&str>) -> String {
    id.map(|id| format!(" {id:?}")).unwrap_or_default()
}

/// Check `mets` and return every finding.
///
/// Duplicate `ID`s come first, in the order the repeats occur. The other
/// findings follow in document order.
///
/// Checked: metadata sections carry exactly one of `mdRef`/`mdWrap`, `ID`s are
/// unique, and `ADMID`, `DMDID`, `FILEID` and smLink `xlink:from`/`xlink:to`
/// resolve to some `ID`. `CONTENTIDS` hold URIs and are not checked.
#[must_use]
pub fn validate(mets: &Mets) -> Vec<Finding> {
    let index = IdIndex::build(mets);
    let mut checker = Checker {
        index: &index,
        findings: index
            .duplicates()
            .iter()
            .map(|id| Finding::DuplicateId {
                id: (*id).to_owned(),
            })
            .collect(),
    };
    checker.check_mets(mets);

    for finding in &checker.findings {
        warn!(%finding, "validation finding");
    }
    checker.findings
}

struct Checker<'i, 'a> {
    index: &'i IdIndex<'a>,
    findings: Vec<Finding>,
}

impl Checker<'_, '_> {
    fn check_mets(&mut self, mets: &Mets) {
        if let Some(header) = &mets.header {
            self.refs("metsHdr", "ADMID", &header.admid);
        }
        for sec in &mets.dmd_secs {
            self.check_md_sec("dmdSec", sec);
        }
        for amd in &mets.amd_secs {
            for (name, sec) in amd.sections() {
                self.check_md_sec(name, sec);
            }
        }
        if let Some(file_sec) = &mets.file_sec {
            for group in &file_sec.file_grps {
                self.check_file_grp(group);
            }
        }
        for div in mets.struct_maps.iter().filter_map(|m| m.div.as_ref()) {
            self.check_div(div);
        }
        if let Some(struct_link) = &mets.struct_link {
            for entry in &struct_link.links {
                if let StructLinkEntry::Link(link) = entry {
                    self.reference("smLink", "xlink:from", &link.from);
                    self.reference("smLink", "xlink:to", &link.to);
                }
            }
        }
    }

    fn check_md_sec(&mut self, section: &'static str, sec: &MdSec) {
        let id = sec.id.clone();
        match (&sec.md_ref, &sec.md_wrap) {
            (Some(_), Some(_)) => self.findings.push(Finding::AmbiguousContent { section, id }),
            (None, None) => self.findings.push(Finding::MissingContent { section, id }),
            _ => {}
        }
        self.refs(section, "ADMID", &sec.admid);
    }

    fn check_file_grp(&mut self, group: &FileGrp) {
        self.refs("fileGrp", "ADMID", &group.admid);
        for nested in &group.file_grps {
            self.check_file_grp(nested);
        }
        for file in &group.files {
            self.check_file(file);
        }
    }

    fn check_file(&mut self, file: &File) {
        self.refs("file", "ADMID", &file.admid);
        self.refs("file", "DMDID", &file.dmdid);
        for stream in &file.streams {
            self.refs("stream", "ADMID", &stream.admid);
            self.refs("stream", "DMDID", &stream.dmdid);
        }
        for nested in &file.files {
            self.check_file(nested);
        }
    }

    fn check_div(&mut self, div: &Div) {
        self.refs("div", "ADMID", &div.admid);
        self.refs("div", "DMDID", &div.dmdid);
        for child in &div.children {
            match child {
                DivChild::Div(nested) => self.check_div(nested),
                DivChild::Fptr(fptr) => self.check_fptr(fptr),
                DivChild::Mptr(_) => {}
            }
        }
    }

    fn check_fptr(&mut self, fptr: &Fptr) {
        if let Some(file_id) = &fptr.file_id {
            self.reference("fptr", "FILEID", file_id);
        }
        match &fptr.content {
            Some(FptrContent::Par(par)) => self.check_par(par),
            Some(FptrContent::Seq(seq)) => self.check_seq(seq),
            Some(FptrContent::Area(area)) => self.check_area(area),
            None => {}
        }
    }

    fn check_par(&mut self, par: &Par) {
        for member in &par.members {
            match member {
                ParMember::Area(area) => self.check_area(area),
                ParMember::Seq(seq) => self.check_seq(seq),
            }
        }
    }

    fn check_seq(&mut self, seq: &Seq) {
        for member in &seq.members {
            match member {
                SeqMember::Area(area) => self.check_area(area),
                SeqMember::Par(par) => self.check_par(par),
            }
        }
    }

    fn check_area(&mut self, area: &Area) {
        if let Some(file_id) = &area.file_id {
            self.reference("area", "FILEID", file_id);
        }
        self.refs("area", "ADMID", &area.admid);
    }

    fn refs(&mut self, element: &'static str, attribute: &'static str, ids: &[String]) {
        for id in ids {
            self.reference(element, attribute, id);
        }
    }

    fn reference(&mut self, element: &'static str, attribute: &'static str, target: &str) {
        if !self.index.contains(target) {
            self.findings.push(Finding::DanglingReference {
                element,
                attribute,
                target: target.to_owned(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use rustmets_model::{
        AmdSec, FileSec, Locator, LocType, MdRef, MdType, MdWrap, SmLink, StructLink, StructMap,
    };

    use super::*;

    fn valid() -> Mets {
        let mut dmd = MdSec::new("dmd1");
        dmd.md_wrap = Some(MdWrap::new(MdType::Dc));

        let mut tech = MdSec::new("tech1");
        tech.md_ref = Some(MdRef::new(
            Locator::new(LocType::Url, "http://example.org/tech.xml"),
            MdType::Premis,
        ));

        let mut file = File::new("file1");
        file.admid = vec!["tech1".to_owned()];
        file.dmdid = vec!["dmd1".to_owned()];

        let root = Div {
            id: Some("div-root".to_owned()),
            dmdid: vec!["dmd1".to_owned()],
            children: vec![
                DivChild::Fptr(Fptr {
                    file_id: Some("file1".to_owned()),
                    ..Fptr::default()
                }),
                DivChild::Div(Div {
                    id: Some("div-page".to_owned()),
                    ..Div::default()
                }),
            ],
            ..Div::default()
        };

        Mets {
            dmd_secs: vec![dmd],
            amd_secs: vec![AmdSec {
                tech_md: vec![tech],
                ..AmdSec::default()
            }],
            file_sec: Some(FileSec {
                id: None,
                file_grps: vec![FileGrp {
                    files: vec![file],
                    ..FileGrp::default()
                }],
            }),
            struct_maps: vec![StructMap {
                div: Some(root),
                ..StructMap::default()
            }],
            struct_link: Some(StructLink {
                id: None,
                links: vec![StructLinkEntry::Link(SmLink::new("div-root", "div-page"))],
            }),
            ..Mets::default()
        }
    }

    #[test]
    fn test_should_accept_consistent_document() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn test_should_report_md_content_problems() {
        let mut mets = valid();
        mets.dmd_secs[0].md_ref = Some(MdRef::new(Locator::default(), MdType::Dc));
        mets.amd_secs[0].rights_md.push(MdSec::new("rights1"));

        let findings = validate(&mets);
        assert_eq!(
            findings,
            [
                Finding::AmbiguousContent {
                    section: "dmdSec",
                    id: Some("dmd1".to_owned()),
                },
                Finding::MissingContent {
                    section: "rightsMD",
                    id: Some("rights1".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn test_should_report_duplicate_ids() {
        let mut mets = valid();
        let mut again = MdSec::new("file1");
        again.md_wrap = Some(MdWrap::new(MdType::Mods));
        mets.dmd_secs.push(again);

        let findings = validate(&mets);
        assert_eq!(
            findings,
            [Finding::DuplicateId {
                id: "file1".to_owned()
            }]
        );
        assert_eq!(findings[0].to_string(), r#"ID "file1" is used more than once"#);
    }

    #[test]
    fn test_should_report_dangling_references() {
        let mut mets = valid();
        mets.struct_maps[0]
            .div
            .as_mut()
            .expect("div")
            .children
            .push(DivChild::Fptr(Fptr {
                file_id: Some("nope".to_owned()),
                content: Some(FptrContent::Area(Area {
                    admid: vec!["tech1".to_owned(), "gone".to_owned()],
                    ..Area::new("file1")
                })),
                ..Fptr::default()
            }));
        mets.struct_link = Some(StructLink {
            id: None,
            links: vec![StructLinkEntry::Link(SmLink::new("div-root", "missing"))],
        });

        let findings = validate(&mets);
        assert_eq!(
            findings,
            [
                Finding::DanglingReference {
                    element: "fptr",
                    attribute: "FILEID",
                    target: "nope".to_owned(),
                },
                Finding::DanglingReference {
                    element: "area",
                    attribute: "ADMID",
                    target: "gone".to_owned(),
                },
                Finding::DanglingReference {
                    element: "smLink",
                    attribute: "xlink:to",
                    target: "missing".to_owned(),
                },
            ]
        );
        assert_eq!(
            findings[2].to_string(),
            r#"smLink xlink:to refers to unknown ID "missing""#
        );
    }

    #[test]
    fn test_should_not_check_content_ids() {
        let mut mets = valid();
        if let Some(div) = mets.struct_maps[0].div.as_mut() {
            div.content_ids = vec!["http://example.org/anything".to_owned()];
        }
        assert!(validate(&mets).is_empty());
    }

    #[test]
    fn test_should_list_duplicate_ids_before_other_findings() {
        let mut mets = valid();
        mets.dmd_secs[0].md_wrap = None;
        mets.amd_secs[0].rights_md.push(MdSec::new("dmd1"));

        let findings = validate(&mets);
        assert_eq!(
            findings,
            [
                Finding::DuplicateId {
                    id: "dmd1".to_owned()
                },
                Finding::MissingContent {
                    section: "dmdSec",
                    id: Some("dmd1".to_owned()),
                },
                Finding::MissingContent {
                    section: "rightsMD",
                    id: Some("dmd1".to_owned()),
                },
            ]
        );
    }
}
