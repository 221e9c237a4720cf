//! Integration tests for RustMETS.
//!
//! Each module reads the fixture documents under `fixtures/` through the
//! public crates and checks whole-document behavior.
//!
//! ```text
//! cargo test -p rustmets-integration
//! ```

use std::sync::Once;

use rustmets_model::{Mets, XsdDateTime};
use rustmets_xml::{FixedClock, MetsWriter};

mod test_defaulting;
mod test_file_io;
mod test_round_trip;
mod test_validation;

static INIT: Once = Once::new();

/// A book with header, metadata, nested file groups, structure and links.
pub const BOOK_FIXTURE: &[u8] = include_bytes!("../fixtures/book.xml");

/// Write time used by [`fixed_writer`].
pub const WRITE_TIME: &str = "2024-11-05T08:00:00.000Z";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Parse the book fixture.
#[must_use]
pub fn read_book() -> Mets {
    init_tracing();
    rustmets_xml::read(BOOK_FIXTURE).expect("book fixture should parse")
}

/// The fixed write time.
#[must_use]
pub fn write_time() -> XsdDateTime {
    XsdDateTime::parse(WRITE_TIME).expect("valid timestamp")
}

/// A writer with default options whose clock always returns [`WRITE_TIME`].
#[must_use]
pub fn fixed_writer() -> MetsWriter {
    init_tracing();
    MetsWriter::default().with_clock(FixedClock(write_time()))
}

/// Write `mets` with [`fixed_writer`] and return the text.
#[must_use]
pub fn write_string(mets: &mut Mets) -> String {
    let bytes = fixed_writer().write(mets).expect("write should succeed");
    String::from_utf8(bytes).expect("output is UTF-8")
}
