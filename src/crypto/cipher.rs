//! Name-selected ciphers for artifact payloads
//!
//! The AES variants run in CFB mode, which keeps the ciphertext exactly as
//! long as the plaintext. Consumers rely on that to recompute the
//! length-derived IV from the stored body alone.

use crate::error::{AmberError, AmberResult};
use aes::{Aes128, Aes192, Aes256};
use cfb_mode::cipher::{
    AsyncStreamCipher, BlockCipher, BlockEncryptMut, InvalidLength, KeyInit, KeyIvInit,
};
use std::fmt;
use std::str::FromStr;

/// AES block size; CFB consumes exactly one block of IV.
pub const AES_BLOCK_LEN: usize = 16;

/// Supported payload ciphers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cipher {
    /// `-`: payload stored as-is, key and IV ignored
    Passthrough,
    /// `aes128`: 16-byte key, 16-byte derived IV
    Aes128,
    /// `aes192`: 24-byte key, 24-byte derived IV
    Aes192,
    /// `aes256`: 32-byte key, 32-byte derived IV
    Aes256,
}

impl Cipher {
    /// Every identifier the registry accepts
    pub const ALL: [Self; 4] = [Self::Passthrough, Self::Aes128, Self::Aes192, Self::Aes256];

    /// Resolve an identifier. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "-" => Some(Self::Passthrough),
            "aes128" => Some(Self::Aes128),
            "aes192" => Some(Self::Aes192),
            "aes256" => Some(Self::Aes256),
            _ => None,
        }
    }

    /// The identifier written into artifact headers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Passthrough => "-",
            Self::Aes128 => "aes128",
            Self::Aes192 => "aes192",
            Self::Aes256 => "aes256",
        }
    }

    /// Required key length, `None` for passthrough
    pub fn key_len(&self) -> Option<usize> {
        match self {
            Self::Passthrough => None,
            Self::Aes128 => Some(16),
            Self::Aes192 => Some(24),
            Self::Aes256 => Some(32),
        }
    }

    /// Length of the IV derived for this cipher, `None` for passthrough.
    ///
    /// Equal to the key length. Only the leading block is fed to CFB.
    pub fn iv_len(&self) -> Option<usize> {
        self.key_len()
    }

    /// Encrypt `plaintext` with this cipher
    pub fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> AmberResult<Vec<u8>> {
        if *self == Self::Passthrough {
            return Ok(plaintext.to_vec());
        }
        let iv = self.check_params(key, iv)?;

        let mut buf = plaintext.to_vec();
        match self {
            Self::Passthrough => Ok(()),
            Self::Aes128 => cfb_encrypt::<Aes128>(&mut buf, key, iv),
            Self::Aes192 => cfb_encrypt::<Aes192>(&mut buf, key, iv),
            Self::Aes256 => cfb_encrypt::<Aes256>(&mut buf, key, iv),
        }
        .map_err(|_| self.key_error(key))?;
        Ok(buf)
    }

    /// Decrypt `ciphertext` with this cipher
    pub fn decrypt(&self, ciphertext: &[u8], key: &[u8], iv: &[u8]) -> AmberResult<Vec<u8>> {
        if *self == Self::Passthrough {
            return Ok(ciphertext.to_vec());
        }
        let iv = self.check_params(key, iv)?;

        let mut buf = ciphertext.to_vec();
        match self {
            Self::Passthrough => Ok(()),
            Self::Aes128 => cfb_decrypt::<Aes128>(&mut buf, key, iv),
            Self::Aes192 => cfb_decrypt::<Aes192>(&mut buf, key, iv),
            Self::Aes256 => cfb_decrypt::<Aes256>(&mut buf, key, iv),
        }
        .map_err(|_| self.key_error(key))?;
        Ok(buf)
    }

    /// Validate key and IV lengths, returning the IV block CFB consumes
    fn check_params<'a>(&self, key: &[u8], iv: &'a [u8]) -> AmberResult<&'a [u8]> {
        if self.key_len() != Some(key.len()) {
            return Err(self.key_error(key));
        }
        if iv.len() < AES_BLOCK_LEN {
            return Err(AmberError::InvalidIvLength {
                cipher: self.name().to_string(),
                expected: AES_BLOCK_LEN,
                actual: iv.len(),
            });
        }
        Ok(&iv[..AES_BLOCK_LEN])
    }

    fn key_error(&self, key: &[u8]) -> AmberError {
        AmberError::InvalidKeyLength {
            cipher: self.name().to_string(),
            expected: self.key_len().unwrap_or(0),
            actual: key.len(),
        }
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Cipher {
    type Err = AmberError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| AmberError::UnknownEncryption(name.to_string()))
    }
}

fn cfb_encrypt<C>(buf: &mut [u8], key: &[u8], iv: &[u8]) -> Result<(), InvalidLength>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    cfb_mode::Encryptor::<C>::new_from_slices(key, iv)?.encrypt(buf);
    Ok(())
}

fn cfb_decrypt<C>(buf: &mut [u8], key: &[u8], iv: &[u8]) -> Result<(), InvalidLength>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    cfb_mode::Decryptor::<C>::new_from_slices(key, iv)?.decrypt(buf);
    Ok(())
}

/// Encrypt `plaintext` with the cipher named `cipher_name`
pub fn encrypt(
    plaintext: &[u8],
    cipher_name: &str,
    key: &[u8],
    iv: &[u8],
) -> AmberResult<Vec<u8>> {
    Cipher::from_name(cipher_name)
        .ok_or_else(|| AmberError::UnknownEncryption(cipher_name.to_string()))?
        .encrypt(plaintext, key, iv)
}

/// Decrypt `ciphertext` with the cipher named `cipher_name`
pub fn decrypt(
    ciphertext: &[u8],
    cipher_name: &str,
    key: &[u8],
    iv: &[u8],
) -> AmberResult<Vec<u8>> {
    Cipher::from_name(cipher_name)
        .ok_or_else(|| AmberError::UnknownDecryption(cipher_name.to_string()))?
        .decrypt(ciphertext, key, iv)
}
