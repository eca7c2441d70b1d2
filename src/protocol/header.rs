//! Artifact header block
//!
//! Every cached artifact starts with a short block of `X-Amber-<Field>: value`
//! lines naming the digest and cipher that produced it, followed by a blank
//! line and the body:
//!
//! ```text
//! X-Amber-Hash: sha1\r\n
//! X-Amber-Encryption: aes256\r\n
//! \r\n
//! <body>
//! ```

use crate::config::schema::DefaultsConfig;
use crate::error::{AmberError, AmberResult};
use crate::protocol::{find_crlf, CRLF};
use tracing::trace;

/// Header field carrying the digest name
pub const HASH_FIELD: &str = "X-Amber-Hash";

/// Header field carrying the cipher name
pub const ENCRYPTION_FIELD: &str = "X-Amber-Encryption";

const SEPARATOR: &str = ": ";

/// Digest and cipher recorded for one artifact.
///
/// An empty field was not present in the header and means "use the
/// caller's default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub hash_name: String,
    pub encryption_name: String,
}

impl Metadata {
    pub fn new(hash_name: impl Into<String>, encryption_name: impl Into<String>) -> Self {
        Self {
            hash_name: hash_name.into(),
            encryption_name: encryption_name.into(),
        }
    }

    /// Copy with unset fields taken from the configured defaults
    pub fn with_defaults(&self, defaults: &DefaultsConfig) -> Self {
        let pick = |value: &str, default: &str| {
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            hash_name: pick(&self.hash_name, &defaults.hash),
            encryption_name: pick(&self.encryption_name, &defaults.encryption),
        }
    }

    /// Render the header block, blank terminator line included.
    ///
    /// Unset fields are left out so that a reader falls back to its own
    /// defaults for them.
    pub fn to_header(&self) -> String {
        let mut header = String::new();
        for (field, value) in [
            (HASH_FIELD, &self.hash_name),
            (ENCRYPTION_FIELD, &self.encryption_name),
        ] {
            if !value.is_empty() {
                header.push_str(field);
                header.push_str(SEPARATOR);
                header.push_str(value);
                header.push_str(CRLF);
            }
        }
        header.push_str(CRLF);
        header
    }
}

/// Parse the header block at the start of `blob`.
///
/// Stops at the first blank line or at end of input. Bytes after the blank
/// line are not inspected.
pub fn parse_header(blob: &[u8]) -> AmberResult<Metadata> {
    parse_block(blob).map(|(metadata, _)| metadata)
}

/// Parse the header block, also returning where the body starts.
///
/// The offset is `None` when input ran out before a blank line.
pub(crate) fn parse_block(blob: &[u8]) -> AmberResult<(Metadata, Option<usize>)> {
    let mut hash_name = String::new();
    let mut encryption_name = String::new();
    let mut offset = 0;

    loop {
        let rest = &blob[offset..];
        let (line, next) = match find_crlf(rest) {
            Some(pos) => (&rest[..pos], Some(offset + pos + CRLF.len())),
            None => (rest, None),
        };

        // Only a truly empty line ends the block; " " is a malformed line.
        if line.is_empty() {
            let metadata = Metadata {
                hash_name,
                encryption_name,
            };
            return Ok((metadata, next));
        }

        let (key, value) = split_line(line)?;
        match key.as_str() {
            HASH_FIELD => hash_name = value,
            ENCRYPTION_FIELD => encryption_name = value,
            other => trace!("Ignoring header field {}", other),
        }

        match next {
            Some(n) => offset = n,
            None => {
                let metadata = Metadata {
                    hash_name,
                    encryption_name,
                };
                return Ok((metadata, None));
            }
        }
    }
}

/// Split one header line into trimmed key and value
fn split_line(line: &[u8]) -> AmberResult<(String, String)> {
    let text = String::from_utf8_lossy(line);
    let parts: Vec<&str> = text.split(SEPARATOR).collect();
    match parts.as_slice() {
        [key, value] => Ok((key.trim().to_string(), value.trim().to_string())),
        _ => Err(AmberError::InvalidLineFormat(text.into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(blob: &str) -> AmberResult<Metadata> {
        parse_header(blob.as_bytes())
    }

    #[test]
    fn gets_hash_name() {
        assert_eq!(parse("X-Amber-Hash: foo").unwrap(), Metadata::new("foo", ""));
    }

    #[test]
    fn gets_encryption_name() {
        assert_eq!(
            parse("X-Amber-Encryption: bar").unwrap(),
            Metadata::new("", "bar")
        );
    }

    #[test]
    fn gets_hash_and_encryption_name() {
        let metadata = parse("X-Amber-Hash: foo\r\nX-Amber-Encryption: bar\r\n").unwrap();
        assert_eq!(metadata, Metadata::new("foo", "bar"));
    }

    #[test]
    fn stops_at_empty_line() {
        let metadata = parse("X-Amber-Hash: foo\r\n\r\nX-Amber-Encryption: bar\r\n").unwrap();
        assert_eq!(metadata, Metadata::new("foo", ""));
    }

    #[test]
    fn empty_input_is_empty_metadata() {
        assert_eq!(parse("").unwrap(), Metadata::default());
        assert_eq!(parse("\r\n").unwrap(), Metadata::default());
    }

    #[test]
    fn rejects_line_without_separator() {
        let err = parse("one two three").unwrap_err();
        assert_eq!(err.to_string(), "invalid line format: one two three");
    }

    #[test]
    fn splits_on_crlf_only() {
        let blob = "X-Amber-Hash: foo\nX-Amber-Encryption: bar\n";
        let err = parse(blob).unwrap_err();
        assert_eq!(err.to_string(), format!("invalid line format: {}", blob));
    }

    #[test]
    fn fails_fast_on_malformed_line() {
        let err = parse("X-Amber-Hash: foo\r\nbogus\r\nX-Amber-Encryption: bar\r\n").unwrap_err();
        assert!(matches!(err, AmberError::InvalidLineFormat(ref line) if line == "bogus"));
    }

    #[test]
    fn whitespace_only_line_is_not_a_terminator() {
        let err = parse("X-Amber-Hash: foo\r\n \r\nX-Amber-Encryption: bar\r\n").unwrap_err();
        assert!(matches!(err, AmberError::InvalidLineFormat(ref line) if line == " "));
        assert_eq!(err.to_string(), "invalid line format:  ");
    }

    #[test]
    fn tolerates_unknown_fields() {
        let metadata = parse("X-Amber-Origin: mirror\r\nX-Amber-Hash: sha256\r\n").unwrap();
        assert_eq!(metadata, Metadata::new("sha256", ""));
    }

    #[test]
    fn trims_tokens() {
        let metadata = parse("  X-Amber-Hash :  sha512  \r\n").unwrap();
        assert_eq!(metadata.hash_name, "sha512");
    }

    #[test]
    fn last_repeated_field_wins() {
        let metadata = parse("X-Amber-Hash: sha1\r\nX-Amber-Hash: sha256\r\n").unwrap();
        assert_eq!(metadata.hash_name, "sha256");
    }

    #[test]
    fn block_reports_body_offset() {
        let blob = b"X-Amber-Hash: sha1\r\n\r\nbody\r\nbytes";
        let (metadata, offset) = parse_block(blob).unwrap();
        assert_eq!(metadata.hash_name, "sha1");
        assert_eq!(&blob[offset.unwrap()..], b"body\r\nbytes");

        let (_, offset) = parse_block(b"X-Amber-Hash: sha1\r\n").unwrap();
        assert_eq!(offset, None);
    }

    #[test]
    fn header_renders_set_fields() {
        assert_eq!(
            Metadata::new("sha1", "aes128").to_header(),
            "X-Amber-Hash: sha1\r\nX-Amber-Encryption: aes128\r\n\r\n"
        );
        assert_eq!(Metadata::new("", "-").to_header(), "X-Amber-Encryption: -\r\n\r\n");
        assert_eq!(Metadata::default().to_header(), "\r\n");
    }

    #[test]
    fn rendered_header_parses_back() {
        let metadata = Metadata::new("sha256", "aes192");
        assert_eq!(parse(&metadata.to_header()).unwrap(), metadata);
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let defaults = DefaultsConfig {
            hash: "sha1".to_string(),
            encryption: "-".to_string(),
        };
        assert_eq!(
            Metadata::new("", "aes256").with_defaults(&defaults),
            Metadata::new("sha1", "aes256")
        );
        assert_eq!(
            Metadata::new("sha512", "").with_defaults(&defaults),
            Metadata::new("sha512", "-")
        );
    }
}
