//! Sealing and opening framed artifacts
//!
//! An artifact is a header block, a blank line, and the body. The body is
//! the payload encrypted with the cipher the header names, under an IV
//! derived from the payload length with the digest the header names.

use crate::config::DefaultsConfig;
use crate::crypto::{self, Cipher, HashAlgorithm};
use crate::error::{AmberError, AmberResult};
use crate::protocol::header::{parse_block, Metadata};
use tracing::debug;

/// Frame `plaintext` as an artifact.
///
/// The header records `metadata` as given. An empty or `-` encryption name
/// stores the payload as-is; otherwise the payload is encrypted with `key`.
/// Set fields must name a known digest and cipher, so that every sealed
/// header parses back.
pub fn seal(plaintext: &[u8], metadata: &Metadata, key: &[u8]) -> AmberResult<Vec<u8>> {
    if !metadata.hash_name.is_empty() {
        metadata.hash_name.parse::<HashAlgorithm>()?;
    }
    if !metadata.encryption_name.is_empty() {
        metadata.encryption_name.parse::<Cipher>()?;
    }

    let body = match metadata.encryption_name.as_str() {
        "" => plaintext.to_vec(),
        name if name == Cipher::Passthrough.name() => plaintext.to_vec(),
        name => {
            let iv = crypto::select_iv(name, &metadata.hash_name, plaintext)?;
            crypto::encrypt(plaintext, name, key, &iv)?
        }
    };

    let header = metadata.to_header();
    debug!(
        "Sealed {} byte payload (hash: {:?}, encryption: {:?})",
        plaintext.len(),
        metadata.hash_name,
        metadata.encryption_name
    );

    let mut artifact = Vec::with_capacity(header.len() + body.len());
    artifact.extend_from_slice(header.as_bytes());
    artifact.extend_from_slice(&body);
    Ok(artifact)
}

/// Separate an artifact into its header and body
pub fn split(blob: &[u8]) -> AmberResult<(Metadata, &[u8])> {
    match parse_block(blob)? {
        (metadata, Some(offset)) => Ok((metadata, &blob[offset..])),
        (_, None) => Err(AmberError::MissingHeaderTerminator),
    }
}

/// Recover the payload of an artifact.
///
/// Fields the header leaves unset are taken from `defaults`.
pub fn open(blob: &[u8], key: &[u8], defaults: &DefaultsConfig) -> AmberResult<Vec<u8>> {
    let (metadata, body) = split(blob)?;
    let metadata = metadata.with_defaults(defaults);
    debug!(
        "Opening {} byte body (hash: {}, encryption: {})",
        body.len(),
        metadata.hash_name,
        metadata.encryption_name
    );

    if metadata.encryption_name == Cipher::Passthrough.name() {
        return Ok(body.to_vec());
    }

    let iv = crypto::select_iv_for_len(
        &metadata.encryption_name,
        &metadata.hash_name,
        body.len(),
    )
    .map_err(|e| match e {
        AmberError::UnknownEncryption(name) => AmberError::UnknownDecryption(name),
        other => other,
    })?;
    crypto::decrypt(body, &metadata.encryption_name, key, &iv)
}
