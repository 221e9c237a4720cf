//! Mandatory substructure inserted on write.

#[cfg(test)]
mod tests {
    use rustmets_model::{FileSec, Mets, StructMap};

    use crate::write_string;

    #[test]
    fn test_should_write_one_struct_map_with_one_div_for_empty_document() {
        let mut mets = Mets::new();
        let xml = write_string(&mut mets);

        assert_eq!(xml.matches("<mets:structMap").count(), 1);
        assert_eq!(xml.matches("<mets:div").count(), 1);
        assert!(!xml.contains("<mets:fileSec"));
        assert!(!xml.contains("<mets:metsHdr"));
    }

    #[test]
    fn test_should_give_file_sec_a_group() {
        let mut mets = Mets::new();
        mets.file_sec = Some(FileSec::default());
        let xml = write_string(&mut mets);

        assert_eq!(xml.matches("<mets:fileGrp").count(), 1);
        assert_eq!(mets.file_sec.as_ref().map(|f| f.file_grps.len()), Some(1));
    }

    #[test]
    fn test_should_not_default_twice() {
        let mut mets = Mets::new();
        mets.file_sec = Some(FileSec::default());
        mets.struct_maps.push(StructMap::default());

        let first = write_string(&mut mets);
        let second = write_string(&mut mets);
        assert_eq!(first, second);
        assert_eq!(mets.struct_maps.len(), 1);
    }

    #[test]
    fn test_should_not_default_on_read() {
        let xml = br#"<mets:mets xmlns:mets="http://www.loc.gov/METS/"><mets:fileSec/></mets:mets>"#;
        let mets = rustmets_xml::read(xml).expect("read");

        assert!(mets.struct_maps.is_empty());
        assert_eq!(mets.file_sec.map(|f| f.file_grps.len()), Some(0));
    }
}
