//! Payload encryption and IV derivation
//!
//! Ciphers and digests are closed sets selected by name. The names are
//! what artifact headers record, so they are matched exactly.

pub mod cipher;
pub mod digest;

pub use cipher::{decrypt, encrypt, Cipher};
pub use digest::{select_iv, select_iv_for_len, HashAlgorithm};
