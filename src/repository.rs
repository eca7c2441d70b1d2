//! Repository root discovery
//!
//! A repository is marked by a directory with a well-known name (`.amber` by
//! default), the way `.git` marks a work tree. Discovery walks from a
//! starting directory towards the filesystem root and stops at the first
//! level holding an entry with the marker's name.

use crate::config::Config;
use crate::error::{AmberError, AmberResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// File inside the marker directory holding repository-level settings
pub const CONFIG_FILE: &str = "config.toml";

/// Find the marker directory nearest to `start`.
///
/// Returns the absolute path of the marker directory itself. A same-named
/// entry that is not a directory stops the walk with
/// [`AmberError::RepositoryConflict`]; it is never skipped over.
pub fn locate_root(marker: &str, start: &Path) -> AmberResult<PathBuf> {
    let start = std::path::absolute(start)
        .map(|path| clean(&path))
        .map_err(|e| AmberError::io(format!("resolving {}", start.display()), e))?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(marker);
        trace!("Checking {}", candidate.display());

        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_dir() => {
                debug!("Found repository root: {}", candidate.display());
                return Ok(candidate);
            }
            Ok(_) => {
                debug!("{} exists but is not a directory", candidate.display());
                return Err(AmberError::RepositoryConflict { path: candidate });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(AmberError::io(
                    format!("checking {}", candidate.display()),
                    e,
                ))
            }
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => {
                return Err(AmberError::NoRepository {
                    marker: marker.to_string(),
                    start: start.clone(),
                })
            }
        }
    }
}

/// Fold `.` and `..` components so that `parent()` walks real ancestors.
///
/// Purely lexical, like Go's `filepath.Clean`; `..` at the root stays at
/// the root.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = cleaned.components().next_back();
                let pops = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if pops {
                    cleaned.pop();
                } else if !at_root {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Find the marker directory nearest to the process working directory
pub fn locate_root_from_cwd(marker: &str) -> AmberResult<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| AmberError::io("getting current directory", e))?;
    locate_root(marker, &cwd)
}

/// A located repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Locate the repository enclosing `start`
    pub fn discover(marker: &str, start: &Path) -> AmberResult<Self> {
        locate_root(marker, start).map(|root| Self { root })
    }

    /// Locate the repository enclosing `start`, using the configured marker
    pub fn discover_with(config: &Config, start: &Path) -> AmberResult<Self> {
        Self::discover(&config.repository.marker, start)
    }

    /// Absolute path of the marker directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory containing the marker, i.e. the project directory
    pub fn project_dir(&self) -> &Path {
        self.root.parent().unwrap_or(&self.root)
    }

    /// Repository-level configuration file
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}
