//! Configuration schema for Amber
//!
//! User settings live at `~/.config/amber/config.toml`; a repository may
//! override them in `<marker>/config.toml`.

use crate::crypto::{Cipher, HashAlgorithm};
use crate::error::AmberResult;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository discovery settings
    pub repository: RepositoryConfig,

    /// Algorithms used when an artifact header leaves them unset
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Reject default algorithm names the registries do not know
    pub fn validate(&self) -> AmberResult<()> {
        self.defaults.hash.parse::<HashAlgorithm>()?;
        self.defaults.encryption.parse::<Cipher>()?;
        Ok(())
    }
}

/// Repository discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Name of the directory marking a repository root
    pub marker: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            marker: ".amber".to_string(),
        }
    }
}

/// Default algorithms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Digest used for IV derivation
    pub hash: String,

    /// Payload cipher (`-` stores artifacts unencrypted)
    pub encryption: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::Sha1.name().to_string(),
            encryption: Cipher::Passthrough.name().to_string(),
        }
    }
}

/// Partially specified configuration, as read from a single file.
///
/// Merging needs to know which keys a file actually set, so every field is
/// optional here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigLayer {
    pub repository: RepositoryLayer,
    pub defaults: DefaultsLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RepositoryLayer {
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DefaultsLayer {
    pub hash: Option<String>,
    pub encryption: Option<String>,
}

impl ConfigLayer {
    /// Overwrite the fields of `config` this layer sets
    pub fn apply(self, config: &mut Config) {
        if let Some(marker) = self.repository.marker {
            config.repository.marker = marker;
        }
        if let Some(hash) = self.defaults.hash {
            config.defaults.hash = hash;
        }
        if let Some(encryption) = self.defaults.encryption {
            config.defaults.encryption = encryption;
        }
    }
}
