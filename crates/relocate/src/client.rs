//! Collaborator traits for the external object store and relational index.
//!
//! The core issues one outstanding call at a time and imposes no timeout or
//! cancellation of its own; per-call policy belongs to the implementation.

use async_trait::async_trait;
use keytree::ObjectKey;

/// Failure from a collaborator call, isolated to the step that made it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        StoreError { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The flat object store, consumed only through this contract.
///
/// Idempotence requirements: `create_folder` on an existing path and
/// `copy_object` onto an existing destination must succeed, so that a
/// partially failed plan can be retried wholesale.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// All object keys under `prefix`, recursively, folder markers included.
    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<ObjectKey>>;

    /// Create a folder marker at `path`; succeeds if it already exists.
    async fn create_folder(&self, path: &str) -> StoreResult<()>;

    /// Copy one object; succeeds if the destination already holds a copy.
    async fn copy_object(&self, source: &ObjectKey, dest: &ObjectKey) -> StoreResult<()>;

    async fn delete_object(&self, key: &ObjectKey) -> StoreResult<()>;

    /// Delete the folder marker at `path` and everything under its prefix.
    async fn delete_folder_marker(&self, path: &str) -> StoreResult<()>;
}

/// The relational index that mirrors object locations.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Point the record at the object's new key.
    async fn update_record(&self, record_id: &str, new_key: &ObjectKey) -> StoreResult<()>;
}
