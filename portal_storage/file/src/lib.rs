use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf, sync::Arc};

use anyhow::Context;
use portal_storage_contracts::StorageService;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Key-value storage backed by a single JSON file on disk.
///
/// The file holds one flat object mapping keys to values and is rewritten
/// wholesale on every mutation. That is plenty for the three session entries
/// this application persists and keeps every operation synchronous.
#[derive(Debug, Clone)]
pub struct FileStorageService {
    path: Arc<PathBuf>,
}

impl FileStorageService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, Value>> {
        match std::fs::read(&*self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).with_context(|| {
                format!("Failed to decode storage file at {}", self.path.display())
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err).with_context(|| {
                format!("Failed to read storage file at {}", self.path.display())
            }),
        }
    }

    fn store(&self, entries: &BTreeMap<String, Value>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create storage directory at {}", parent.display())
            })?;
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&*self.path, bytes)
            .with_context(|| format!("Failed to write storage file at {}", self.path.display()))
    }
}

impl StorageService for FileStorageService {
    #[tracing::instrument(level = "trace", skip(self))]
    fn read<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let Some(value) = self.load()?.remove(key) else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .with_context(|| format!("Failed to decode stored value for key {key:?}"))
    }

    #[tracing::instrument(level = "trace", skip(self, value))]
    fn write<T: Serialize + Sync + 'static>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.into(), serde_json::to_value(value)?);
        self.store(&entries)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn remove(&self, key: &str) -> anyhow::Result<()> {
        match self.load() {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.store(&entries)?;
                }
                Ok(())
            }
            // The file is exclusively ours; if it no longer decodes, erasing
            // it entirely is the only way to honor the removal.
            Err(err) => {
                tracing::warn!(%err, "Storage file is unreadable, erasing it");
                match std::fs::remove_file(&*self.path) {
                    Ok(()) => Ok(()),
                    Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                    Err(err) => Err(err).with_context(|| {
                        format!("Failed to erase storage file at {}", self.path.display())
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sut() -> FileStorageService {
        let path = std::env::temp_dir()
            .join("portal-storage-tests")
            .join(format!("{}.json", uuid::Uuid::new_v4()));
        FileStorageService::new(path)
    }

    #[test]
    fn written_values_survive_a_fresh_instance() {
        // Arrange
        let storage = sut();
        storage.write("auth-token", &"tok".to_owned()).unwrap();

        // Act
        let reopened = FileStorageService::new((*storage.path).clone());
        let result = reopened.read::<String>("auth-token").unwrap();

        // Assert
        assert_eq!(result.as_deref(), Some("tok"));
    }

    #[test]
    fn absent_keys_read_as_none() {
        // Arrange
        let storage = sut();

        // Act + Assert
        assert_eq!(storage.read::<String>("auth-token").unwrap(), None);
    }

    #[test]
    fn removed_keys_read_as_none() {
        // Arrange
        let storage = sut();
        storage.write("auth-token", &"tok".to_owned()).unwrap();
        storage.write("auth-user", &"u1".to_owned()).unwrap();

        // Act
        storage.remove("auth-token").unwrap();

        // Assert
        assert_eq!(storage.read::<String>("auth-token").unwrap(), None);
        assert_eq!(
            storage.read::<String>("auth-user").unwrap().as_deref(),
            Some("u1")
        );
    }

    #[test]
    fn removing_an_absent_key_is_a_no_op() {
        let storage = sut();
        storage.remove("auth-token").unwrap();
    }

    #[test]
    fn mismatched_value_shape_is_an_error_not_a_panic() {
        // Arrange
        let storage = sut();
        storage.write("auth-user", &42u32).unwrap();

        // Act + Assert
        assert!(storage.read::<String>("auth-user").is_err());
    }

    #[test]
    fn remove_erases_an_undecodable_file() {
        // Arrange
        let storage = sut();
        std::fs::create_dir_all(storage.path.parent().unwrap()).unwrap();
        std::fs::write(&*storage.path, b"{ not json").unwrap();

        // Act
        storage.remove("auth-token").unwrap();

        // Assert
        assert_eq!(storage.read::<String>("auth-token").unwrap(), None);
    }
}
