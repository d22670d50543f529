//! JSON file backing for the coordinate map.

use super::CoordinateMap;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and writes the coordinate store file.
#[derive(Debug, Clone)]
pub struct CoordinateStore {
    path: PathBuf,
}

impl CoordinateStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole map.
    pub fn load(&self) -> Result<CoordinateMap> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| Error::ConfigRead {
            path: self.path.clone(),
            source,
        })?;

        let map: CoordinateMap =
            serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
                path: self.path.clone(),
                source,
            })?;

        debug!("Loaded {} positions from {}", map.len(), self.path.display());
        Ok(map)
    }

    /// Write the whole map, replacing the file.
    pub fn save(&self, map: &CoordinateMap) -> Result<()> {
        let content = serde_json::to_string_pretty(map).map_err(|e| Error::ConfigWrite {
            path: self.path.clone(),
            source: std::io::Error::other(e),
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| Error::ConfigWrite {
                path: self.path.clone(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| Error::ConfigWrite {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved {} positions to {}", map.len(), self.path.display());
        Ok(())
    }
}
