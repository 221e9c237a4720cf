//! Identifier index over a document tree.
//!
//! The model keeps cross references as strings. [`IdIndex`] is the separate
//! post-pass that maps every `ID` in a document to the entity carrying it.

use std::collections::HashMap;

use rustmets_model::{
    Agent, AmdSec, Area, Div, DivChild, FContent, FLocat, File, FileGrp, FileSec, Fptr,
    FptrContent, MdRef, MdSec, MdWrap, Mets, MetsHeader, Mptr, Par, ParMember, RecordId, Seq,
    SeqMember, SmLink, Stream, StructLink, StructLinkEntry, StructMap, TransformFile,
};

/// A borrowed entity found by [`IdIndex`].
#[derive(Debug, Clone, Copy)]
pub enum IdTarget<'a> {
    Document(&'a Mets),
    Header(&'a MetsHeader),
    Agent(&'a Agent),
    RecordId(&'a RecordId),
    /// A metadata section, with its element name (`dmdSec`, `techMD`, ...).
    MdSec(&'static str, &'a MdSec),
    MdRef(&'a MdRef),
    MdWrap(&'a MdWrap),
    AmdSec(&'a AmdSec),
    FileSec(&'a FileSec),
    FileGrp(&'a FileGrp),
    File(&'a File),
    FLocat(&'a FLocat),
    FContent(&'a FContent),
    Stream(&'a Stream),
    TransformFile(&'a TransformFile),
    StructMap(&'a StructMap),
    Div(&'a Div),
    Mptr(&'a Mptr),
    Fptr(&'a Fptr),
    Par(&'a Par),
    Seq(&'a Seq),
    Area(&'a Area),
    StructLink(&'a StructLink),
    SmLink(&'a SmLink),
}

impl IdTarget<'_> {
    /// Element name of the target.
    #[must_use]
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Document(_) => "mets",
            Self::Header(_) => "metsHdr",
            Self::Agent(_) => "agent",
            Self::RecordId(_) => "altRecordID",
            Self::MdSec(name, _) => *name,
            Self::MdRef(_) => "mdRef",
            Self::MdWrap(_) => "mdWrap",
            Self::AmdSec(_) => "amdSec",
            Self::FileSec(_) => "fileSec",
            Self::FileGrp(_) => "fileGrp",
            Self::File(_) => "file",
            Self::FLocat(_) => "FLocat",
            Self::FContent(_) => "FContent",
            Self::Stream(_) => "stream",
            Self::TransformFile(_) => "transformFile",
            Self::StructMap(_) => "structMap",
            Self::Div(_) => "div",
            Self::Mptr(_) => "mptr",
            Self::Fptr(_) => "fptr",
            Self::Par(_) => "par",
            Self::Seq(_) => "seq",
            Self::Area(_) => "area",
            Self::StructLink(_) => "structLink",
            Self::SmLink(_) => "smLink",
        }
    }
}

/// Map from `ID` to the entity carrying it.
///
/// The first occurrence of an identifier wins; later ones are recorded as
/// duplicates rather than rejected.
#[derive(Debug, Default)]
pub struct IdIndex<'a> {
    entries: HashMap<&'a str, IdTarget<'a>>,
    duplicates: Vec<&'a str>,
}

impl<'a> IdIndex<'a> {
    /// Index every identified entity of `mets`.
    #[must_use]
    pub fn build(mets: &'a Mets) -> Self {
        let mut index = Self::default();
        index.visit_mets(mets);
        index
    }

    /// The entity with identifier `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<IdTarget<'a>> {
        self.entries.get(id).copied()
    }

    /// Whether any entity carries `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Identifiers seen more than once, in document order of the repeats.
    #[must_use]
    pub fn duplicates(&self) -> &[&'a str] {
        &self.duplicates
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no identifiers were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, id: Option<&'a String>, target: IdTarget<'a>) {
        let Some(id) = id else { return };
        if self.entries.contains_key(id.as_str()) {
            self.duplicates.push(id.as_str());
        } else {
            self.entries.insert(id.as_str(), target);
        }
    }

    fn visit_mets(&mut self, mets: &'a Mets) {
        self.insert(mets.id.as_ref(), IdTarget::Document(mets));
        if let Some(header) = &mets.header {
            self.visit_header(header);
        }
        for sec in &mets.dmd_secs {
            self.visit_md_sec("dmdSec", sec);
        }
        for amd in &mets.amd_secs {
            self.insert(amd.id.as_ref(), IdTarget::AmdSec(amd));
            for (name, sec) in amd.sections() {
                self.visit_md_sec(name, sec);
            }
        }
        if let Some(file_sec) = &mets.file_sec {
            self.insert(file_sec.id.as_ref(), IdTarget::FileSec(file_sec));
            for group in &file_sec.file_grps {
                self.visit_file_grp(group);
            }
        }
        for struct_map in &mets.struct_maps {
            self.insert(struct_map.id.as_ref(), IdTarget::StructMap(struct_map));
            if let Some(div) = &struct_map.div {
                self.visit_div(div);
            }
        }
        if let Some(struct_link) = &mets.struct_link {
            self.visit_struct_link(struct_link);
        }
    }

    fn visit_header(&mut self, header: &'a MetsHeader) {
        self.insert(header.id.as_ref(), IdTarget::Header(header));
        for agent in &header.agents {
            self.insert(agent.id.as_ref(), IdTarget::Agent(agent));
        }
        for record in header.alt_record_ids.iter().chain(&header.mets_document_id) {
            self.insert(record.id.as_ref(), IdTarget::RecordId(record));
        }
    }

    fn visit_md_sec(&mut self, name: &'static str, sec: &'a MdSec) {
        self.insert(sec.id.as_ref(), IdTarget::MdSec(name, sec));
        if let Some(md_ref) = &sec.md_ref {
            self.insert(md_ref.id.as_ref(), IdTarget::MdRef(md_ref));
        }
        if let Some(md_wrap) = &sec.md_wrap {
            self.insert(md_wrap.id.as_ref(), IdTarget::MdWrap(md_wrap));
        }
    }

    fn visit_file_grp(&mut self, group: &'a FileGrp) {
        self.insert(group.id.as_ref(), IdTarget::FileGrp(group));
        for nested in &group.file_grps {
            self.visit_file_grp(nested);
        }
        for file in &group.files {
            self.visit_file(file);
        }
    }

    fn visit_file(&mut self, file: &'a File) {
        self.insert(file.id.as_ref(), IdTarget::File(file));
        for flocat in &file.flocats {
            self.insert(flocat.id.as_ref(), IdTarget::FLocat(flocat));
        }
        if let Some(fcontent) = &file.fcontent {
            self.insert(fcontent.id.as_ref(), IdTarget::FContent(fcontent));
        }
        for stream in &file.streams {
            self.insert(stream.id.as_ref(), IdTarget::Stream(stream));
        }
        for transform in &file.transform_files {
            self.insert(transform.id.as_ref(), IdTarget::TransformFile(transform));
        }
        for nested in &file.files {
            self.visit_file(nested);
        }
    }

    fn visit_div(&mut self, div: &'a Div) {
        self.insert(div.id.as_ref(), IdTarget::Div(div));
        for child in &div.children {
            match child {
                DivChild::Div(nested) => self.visit_div(nested),
                DivChild::Mptr(mptr) => self.insert(mptr.id.as_ref(), IdTarget::Mptr(mptr)),
                DivChild::Fptr(fptr) => self.visit_fptr(fptr),
            }
        }
    }

    fn visit_fptr(&mut self, fptr: &'a Fptr) {
        self.insert(fptr.id.as_ref(), IdTarget::Fptr(fptr));
        match &fptr.content {
            Some(FptrContent::Par(par)) => self.visit_par(par),
            Some(FptrContent::Seq(seq)) => self.visit_seq(seq),
            Some(FptrContent::Area(area)) => self.insert(area.id.as_ref(), IdTarget::Area(area)),
            None => {}
        }
    }

    fn visit_par(&mut self, par: &'a Par) {
        self.insert(par.id.as_ref(), IdTarget::Par(par));
        for member in &par.members {
            match member {
                ParMember::Area(area) => self.insert(area.id.as_ref(), IdTarget::Area(area)),
                ParMember::Seq(seq) => self.visit_seq(seq),
            }
        }
    }

    fn visit_seq(&mut self, seq: &'a Seq) {
        self.insert(seq.id.as_ref(), IdTarget::Seq(seq));
        for member in &seq.members {
            match member {
                SeqMember::Area(area) => self.insert(area.id.as_ref(), IdTarget::Area(area)),
                SeqMember::Par(par) => self.visit_par(par),
            }
        }
    }

    fn visit_struct_link(&mut self, struct_link: &'a StructLink) {
        self.insert(struct_link.id.as_ref(), IdTarget::StructLink(struct_link));
        for entry in &struct_link.links {
            if let StructLinkEntry::Link(link) = entry {
                self.insert(link.id.as_ref(), IdTarget::SmLink(link));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rustmets_model::{AgentRole, MdType};

    use super::*;

    fn sample() -> Mets {
        let mut header = MetsHeader::default();
        let mut agent = Agent::new(AgentRole::Creator, "Lab");
        agent.id = Some("agent1".to_owned());
        header.agents.push(agent);

        let mut dmd = MdSec::new("dmd1");
        dmd.md_wrap = Some(MdWrap::new(MdType::Mods));

        let mut file = File::new("file1");
        file.streams.push(Stream {
            id: Some("stream1".to_owned()),
            ..Stream::default()
        });

        let div = Div {
            id: Some("div1".to_owned()),
            children: vec![DivChild::Fptr(Fptr {
                id: Some("fptr1".to_owned()),
                content: Some(FptrContent::Area(Area {
                    id: Some("area1".to_owned()),
                    ..Area::new("file1")
                })),
                ..Fptr::default()
            })],
            ..Div::default()
        };

        Mets {
            header: Some(header),
            dmd_secs: vec![dmd],
            amd_secs: vec![AmdSec {
                id: Some("amd1".to_owned()),
                tech_md: vec![MdSec::new("tech1")],
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
                div: Some(div),
                ..StructMap::default()
            }],
            ..Mets::default()
        }
    }

    #[test]
    fn test_should_index_ids_across_the_tree() {
        let mets = sample();
        let index = IdIndex::build(&mets);

        for id in [
            "agent1", "dmd1", "amd1", "tech1", "file1", "stream1", "div1", "fptr1", "area1",
        ] {
            assert!(index.contains(id), "{id} should be indexed");
        }
        assert_eq!(index.len(), 9);
        assert!(index.duplicates().is_empty());
        assert_eq!(index.get("tech1").map(|t| t.element_name()), Some("techMD"));
        assert!(matches!(index.get("file1"), Some(IdTarget::File(f)) if f.streams.len() == 1));
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_should_record_duplicates_and_keep_first() {
        let mut mets = sample();
        mets.dmd_secs.push(MdSec::new("file1"));
        let index = IdIndex::build(&mets);

        assert_eq!(index.duplicates(), ["file1"]);
        assert_eq!(index.get("file1").map(|t| t.element_name()), Some("dmdSec"));
    }
}
