//! Source URI lists
//!
//! One URI per CRLF-terminated line. Lines whose first non-space character
//! is `#` are comments. Order is kept since it expresses fetch priority.

use crate::protocol::CRLF;

/// Iterate the URIs in `blob` without allocating
pub fn uri_lines(blob: &str) -> impl Iterator<Item = &str> {
    blob.split(CRLF).filter(|line| {
        let content = line.trim_start();
        !content.is_empty() && !content.starts_with('#')
    })
}

/// Parse `blob` into its URIs, in listing order.
///
/// Lines are kept verbatim; nothing beyond the CRLF split is trimmed.
pub fn parse_uri_list(blob: &str) -> Vec<String> {
    uri_lines(blob).map(str::to_string).collect()
}
