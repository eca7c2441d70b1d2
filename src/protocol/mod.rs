//! Text framing shared by artifact headers and source lists
//!
//! Both formats are CRLF-delimited. A bare LF is ordinary line content.

pub mod header;
pub mod uri_list;

pub use header::{parse_header, Metadata};
pub use uri_list::{parse_uri_list, uri_lines};

/// Line separator for every Amber text format
pub const CRLF: &str = "\r\n";

/// Byte offset of the first CRLF in `bytes`
pub(crate) fn find_crlf(bytes: &[u8]) -> Option<usize> {
    bytes.windows(CRLF.len()).position(|w| w == CRLF.as_bytes())
}
