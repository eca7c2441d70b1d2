//! Amber - Local Artifact Cache Core
//!
//! Locates the cache root, frames cached artifacts with a small header
//! block, and encrypts their payloads under IVs derived on the fly so that
//! nothing besides the header needs to be stored.

pub mod artifact;
pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;
pub mod repository;

pub use crypto::{decrypt, encrypt, select_iv, Cipher, HashAlgorithm};
pub use error::{AmberError, AmberResult};
pub use protocol::{parse_header, parse_uri_list, Metadata};
pub use repository::{locate_root, locate_root_from_cwd, Repository};
