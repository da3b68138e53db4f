// CLASSIFICATION: COMMUNITY
// Filename: file.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! JSON snapshot of the variable store for host-side boot replays.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{MemoryStore, Namespace, StoredVariable, VariableAttributes, VariableStore};
use crate::error::{ConfigError, StoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    variables: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    namespace: String,
    name: String,
    attributes: u32,
    /// Hex-encoded payload.
    data: String,
}

/// [`MemoryStore`] persisted to a JSON file.
///
/// Writes only reach disk on [`JsonFileStore::save`]. Variables written
/// without [`VariableAttributes::NON_VOLATILE`] are not saved.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Load the snapshot at `path`; a missing file starts an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        let mut inner = MemoryStore::new();
        if !path.exists() {
            info!("[store] {display} missing, starting with an empty store");
            return Ok(Self { path, inner });
        }
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        for entry in snapshot.variables {
            let namespace: Namespace = entry.namespace.parse().map_err(|e| ConfigError::Parse {
                path: display.clone(),
                reason: format!("namespace {:?}: {e}", entry.namespace),
            })?;
            let data = hex::decode(&entry.data).map_err(|e| ConfigError::Parse {
                path: display.clone(),
                reason: format!("{}: {e}", entry.name),
            })?;
            inner.insert(
                namespace,
                entry.name,
                StoredVariable {
                    attributes: VariableAttributes::from_bits_truncate(entry.attributes),
                    data,
                },
            );
        }
        debug!("[store] loaded {} variables from {display}", inner.len());
        Ok(Self { path, inner })
    }

    /// Write non-volatile variables back to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let display = self.path.display().to_string();
        let variables = self
            .inner
            .iter()
            .filter(|(_, _, var)| var.attributes.contains(VariableAttributes::NON_VOLATILE))
            .map(|(ns, name, var)| SnapshotEntry {
                namespace: ns.to_string(),
                name: name.to_string(),
                attributes: var.attributes.bits(),
                data: hex::encode(&var.data),
            })
            .collect();
        let text = serde_json::to_string_pretty(&Snapshot { variables }).map_err(|e| {
            ConfigError::Parse {
                path: display.clone(),
                reason: e.to_string(),
            }
        })?;
        fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: display,
            source,
        })
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }
}

impl VariableStore for JsonFileStore {
    fn get(&self, namespace: &Namespace, name: &str, buf: &mut [u8]) -> Result<usize, StoreError> {
        self.inner.get(namespace, name, buf)
    }

    fn set(
        &mut self,
        namespace: &Namespace,
        name: &str,
        data: &[u8],
        attributes: VariableAttributes,
    ) -> Result<(), StoreError> {
        self.inner.set(namespace, name, data, attributes)
    }
}
