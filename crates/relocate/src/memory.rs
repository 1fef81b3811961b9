//! In-memory reference implementations of the collaborator traits.
//!
//! Suitable for tests and for rehearsing a plan without a live backend.
//! Both implementations honor the idempotence contract: creating an
//! existing folder and copying onto an existing destination succeed.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use keytree::ObjectKey;
use tokio::sync::Mutex;

use crate::client::{IndexClient, ObjectStoreClient, StoreError, StoreResult};

#[derive(Default)]
struct StoreState {
    objects: BTreeMap<String, Vec<u8>>,
    folders: BTreeSet<String>,
    fail_copies_of: BTreeSet<String>,
}

/// BTreeMap-backed object store.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub async fn put_object(&self, key: &ObjectKey, content: &[u8]) {
        let mut state = self.state.lock().await;
        state.objects.insert(key.as_str().to_string(), content.to_vec());
    }

    pub async fn put_folder(&self, path: &str) {
        let mut state = self.state.lock().await;
        state.folders.insert(path.trim_end_matches('/').to_string());
    }

    /// Make every copy from `source` fail, for failure-isolation tests.
    pub async fn fail_copies_of(&self, source: &ObjectKey) {
        let mut state = self.state.lock().await;
        state.fail_copies_of.insert(source.as_str().to_string());
    }

    pub async fn clear_copy_failures(&self) {
        let mut state = self.state.lock().await;
        state.fail_copies_of.clear();
    }

    pub async fn contains_object(&self, key: &ObjectKey) -> bool {
        self.state.lock().await.objects.contains_key(key.as_str())
    }

    pub async fn contains_folder(&self, path: &str) -> bool {
        self.state.lock().await.folders.contains(path)
    }

    pub async fn object_keys(&self) -> Vec<ObjectKey> {
        let state = self.state.lock().await;
        state
            .objects
            .keys()
            .map(|key| ObjectKey::new(key.as_str()))
            .collect()
    }

    pub async fn folder_paths(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state.folders.iter().cloned().collect()
    }
}

#[async_trait]
impl ObjectStoreClient for MemoryStore {
    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<ObjectKey>> {
        let scope = format!("{}/", prefix.trim_end_matches('/'));
        let state = self.state.lock().await;
        let mut keys: Vec<ObjectKey> = state
            .objects
            .keys()
            .filter(|key| key.starts_with(&scope))
            .map(|key| ObjectKey::new(key.as_str()))
            .collect();
        // Folder markers are listed too, rendered with their trailing slash.
        keys.extend(
            state
                .folders
                .iter()
                .filter(|path| path.starts_with(&scope))
                .map(|path| ObjectKey::new(format!("{path}/"))),
        );
        keys.sort();
        Ok(keys)
    }

    async fn create_folder(&self, path: &str) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.folders.insert(path.trim_end_matches('/').to_string());
        Ok(())
    }

    async fn copy_object(&self, source: &ObjectKey, dest: &ObjectKey) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if state.fail_copies_of.contains(source.as_str()) {
            return Err(StoreError::new(format!("injected copy failure: {source}")));
        }
        if state.objects.contains_key(dest.as_str()) {
            // Already copied; success-if-exists per the idempotence contract.
            return Ok(());
        }
        let Some(content) = state.objects.get(source.as_str()).cloned() else {
            return Err(StoreError::new(format!("source not found: {source}")));
        };
        state.objects.insert(dest.as_str().to_string(), content);
        Ok(())
    }

    async fn delete_object(&self, key: &ObjectKey) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.objects.remove(key.as_str());
        Ok(())
    }

    async fn delete_folder_marker(&self, path: &str) -> StoreResult<()> {
        let trimmed = path.trim_end_matches('/').to_string();
        let scope = format!("{trimmed}/");
        let mut state = self.state.lock().await;
        state.folders.remove(&trimmed);
        state.folders.retain(|folder| !folder.starts_with(&scope));
        state.objects.retain(|key, _| !key.starts_with(&scope));
        Ok(())
    }
}

#[derive(Default)]
struct IndexState {
    records: BTreeMap<String, String>,
    fail_updates_of: BTreeSet<String>,
}

/// BTreeMap-backed relational index.
#[derive(Default)]
pub struct MemoryIndex {
    state: Mutex<IndexState>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        MemoryIndex::default()
    }

    pub async fn put_record(&self, record_id: &str, key: &ObjectKey) {
        let mut state = self.state.lock().await;
        state
            .records
            .insert(record_id.to_string(), key.as_str().to_string());
    }

    /// Make every update of `record_id` fail, for failure-isolation tests.
    pub async fn fail_updates_of(&self, record_id: &str) {
        let mut state = self.state.lock().await;
        state.fail_updates_of.insert(record_id.to_string());
    }

    pub async fn record(&self, record_id: &str) -> Option<String> {
        self.state.lock().await.records.get(record_id).cloned()
    }
}

#[async_trait]
impl IndexClient for MemoryIndex {
    async fn update_record(&self, record_id: &str, new_key: &ObjectKey) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if state.fail_updates_of.contains(record_id) {
            return Err(StoreError::new(format!(
                "injected index failure: {record_id}"
            )));
        }
        state
            .records
            .insert(record_id.to_string(), new_key.as_str().to_string());
        Ok(())
    }
}
