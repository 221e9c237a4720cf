//! File-level reading and writing through `MetsIo`.

#[cfg(test)]
mod tests {
    use rustmets_core::{MetsIo, RustMetsConfig, RustMetsError};
    use rustmets_xml::FixedClock;

    use crate::{BOOK_FIXTURE, read_book, write_time};

    fn io(config: &RustMetsConfig) -> MetsIo {
        MetsIo::from_config(config)
            .expect("valid config")
            .with_clock(FixedClock(write_time()))
    }

    #[test]
    fn test_should_normalize_fixture_through_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.xml");
        let output = dir.path().join("out.xml");
        std::fs::write(&input, BOOK_FIXTURE)?;

        let io = io(&RustMetsConfig::default());
        let mut mets = io.read_file(&input)?;
        io.write_file(&mut mets, &output)?;

        let back = io.read_file(&output)?;
        assert_eq!(back, mets);
        assert_eq!(back.struct_maps.len(), read_book().struct_maps.len());
        Ok(())
    }

    #[test]
    fn test_should_write_compact_output_without_declaration() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("compact.xml");
        let config = RustMetsConfig::builder()
            .indent(0)
            .xml_declaration(false)
            .build();

        let mut mets = read_book();
        io(&config).write_file(&mut mets, &path)?;

        let text = std::fs::read_to_string(&path)?;
        assert!(text.starts_with("<mets:mets"));
        assert!(!text.contains('\n'));
        Ok(())
    }

    #[test]
    fn test_should_enforce_configured_depth_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.xml");
        std::fs::write(&path, BOOK_FIXTURE).expect("write fixture");

        let config = RustMetsConfig::builder().max_depth(4).build();
        let err = io(&config).read_file(&path).expect_err("too deep");
        assert!(matches!(err, RustMetsError::Xml(_)));
    }

    #[test]
    fn test_should_dump_model_as_json() {
        let mets = read_book();
        let json = serde_json::to_value(&mets).expect("serialize");
        assert_eq!(json["objid"], "urn:example:book:42");
        assert_eq!(json["header"]["agents"][0]["role"], "CREATOR");
    }
}
