//! Deterministic IV derivation
//!
//! IVs are never stored. Both ends recompute them from the payload length
//! and the digest named in the artifact header: the decimal length is
//! hashed, hex-encoded, and the leading hex characters become the IV bytes.
//! CFB keeps ciphertext and plaintext the same length, so a reader holding
//! only the ciphertext arrives at the same IV as the writer.

use crate::crypto::cipher::Cipher;
use crate::error::{AmberError, AmberResult};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Supported digests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// `sha1`
    Sha1,
    /// `sha256`
    Sha256,
    /// `sha512`
    Sha512,
}

impl HashAlgorithm {
    /// Every identifier the deriver accepts
    pub const ALL: [Self; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    /// Resolve an identifier. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// The identifier written into artifact headers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Lowercase hex digest of `data`
    pub fn hex_digest(&self, data: &[u8]) -> String {
        match self {
            Self::Sha1 => hex::encode(Sha1::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = AmberError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| AmberError::UnknownHash(name.to_string()))
    }
}

/// Derive the IV for encrypting `plaintext`.
///
/// The cipher name is checked before the digest name; the passthrough
/// cipher has no IV and is rejected like any unknown name.
pub fn select_iv(cipher_name: &str, hash_name: &str, plaintext: &[u8]) -> AmberResult<Vec<u8>> {
    select_iv_for_len(cipher_name, hash_name, plaintext.len())
}

/// Derive the IV for a payload of `len` bytes.
///
/// Used on the decrypt side, where only the ciphertext (of equal length)
/// is at hand.
pub fn select_iv_for_len(cipher_name: &str, hash_name: &str, len: usize) -> AmberResult<Vec<u8>> {
    let iv_len = Cipher::from_name(cipher_name)
        .and_then(|cipher| cipher.iv_len())
        .ok_or_else(|| AmberError::UnknownEncryption(cipher_name.to_string()))?;

    let hash = HashAlgorithm::from_name(hash_name)
        .ok_or_else(|| AmberError::UnknownHash(hash_name.to_string()))?;

    let digest = hash.hex_digest(len.to_string().as_bytes());
    Ok(digest.as_bytes()[..iv_len].to_vec())
}
