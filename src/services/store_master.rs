use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read-only registry of known store identifiers.
///
/// Loaded once at startup from a JSON object mapping store id to store
/// name, then only queried for the rest of the process lifetime.
#[derive(Debug)]
pub struct StoreRegistry {
    stores: HashMap<String, String>,
}

impl StoreRegistry {
    pub fn new(stores: HashMap<String, String>) -> Self {
        Self { stores }
    }

    /// Load the store master dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreMasterError> {
        let file = File::open(path.as_ref()).map_err(|source| StoreMasterError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        let stores = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::new(stores))
    }

    pub fn is_valid(&self, store_id: &str) -> bool {
        self.stores.contains_key(store_id)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreMasterError {
    #[error("failed to open store master file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse store master file: {0}")]
    Parse(#[from] serde_json::Error),
}
