use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::store::{memory::InMemoryStore, remote::RemoteStore, PersonStore};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageEngine {
    /// In-process list, optionally pre-filled with the sample contacts
    Memory { seed: bool },
    /// REST collection reachable at this base url, e.g. `http://localhost:3000`
    Remote(String),
}

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Invalid remote store url: {0}")]
    InvalidRemoteUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone)]
pub struct DirectoryOptions {
    pub storage_engine: StorageEngine,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DirectoryOptions {
    pub fn set_storage_engine(mut self, storage_engine: StorageEngine) -> Self {
        self.storage_engine = storage_engine;
        self
    }

    /// Creates the store these options describe, shared by every request handler
    pub fn build(self) -> Result<Arc<dyn PersonStore>, OptionsError> {
        let store: Arc<dyn PersonStore> = match self.storage_engine {
            StorageEngine::Memory { seed: true } => Arc::new(InMemoryStore::seeded()),
            StorageEngine::Memory { seed: false } => Arc::new(InMemoryStore::new()),
            StorageEngine::Remote(base_url) => Arc::new(RemoteStore::new(Url::parse(&base_url)?)),
        };

        Ok(store)
    }
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            storage_engine: StorageEngine::Memory { seed: true },
        }
    }
}
