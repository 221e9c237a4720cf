//! File-level reading and writing.

use std::path::Path;

use rustmets_model::Mets;
use rustmets_xml::{Clock, MetsReader, MetsWriter};
use tracing::{debug, info};

use crate::config::RustMetsConfig;
use crate::error::{RustMetsError, RustMetsResult};

/// Reads and writes METS files with one configured reader and writer.
#[derive(Debug, Default)]
pub struct MetsIo {
    reader: MetsReader,
    writer: MetsWriter,
}

impl MetsIo {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RustMetsError::Config`] if the configuration is rejected by
    /// [`RustMetsConfig::validate`].
    pub fn from_config(config: &RustMetsConfig) -> RustMetsResult<Self> {
        config.validate()?;
        Ok(Self {
            reader: MetsReader::new(config.reader_options()),
            writer: MetsWriter::new(config.writer_options()),
        })
    }

    /// Replace the clock used to stamp headers on write.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.writer = self.writer.with_clock(clock);
        self
    }

    /// The configured reader.
    #[must_use]
    pub fn reader(&self) -> &MetsReader {
        &self.reader
    }

    /// The configured writer.
    #[must_use]
    pub fn writer(&self) -> &MetsWriter {
        &self.writer
    }

    /// Read the METS document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RustMetsError::Io`] if the file cannot be read and
    /// [`RustMetsError::Xml`] if its content does not decode.
    pub fn read_file(&self, path: impl AsRef<Path>) -> RustMetsResult<Mets> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| RustMetsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "reading METS file");
        Ok(self.reader.read(&bytes)?)
    }

    /// Write `mets` to `path`, replacing any existing file.
    ///
    /// Writing applies the usual defaulting to `mets` in place.
    ///
    /// # Errors
    ///
    /// Returns [`RustMetsError::Io`] if the file cannot be written.
    pub fn write_file(&self, mets: &mut Mets, path: impl AsRef<Path>) -> RustMetsResult<()> {
        let path = path.as_ref();
        let bytes = self.writer.write(mets)?;
        std::fs::write(path, &bytes).map_err(|source| RustMetsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote METS file");
        Ok(())
    }
}
