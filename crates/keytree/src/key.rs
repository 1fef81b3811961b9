//! The flat-store key model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one object in the flat store.
///
/// Always of the form `<tenant>/<namespace>/<segment>/.../<segment>`, with
/// each segment percent-encoded. Keys are immutable once created; a "move"
/// is modeled as create-new + delete-old, never in-place mutation. A key
/// ending in `/` is a folder marker: a sentinel object that simulates the
/// existence of an otherwise empty directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        ObjectKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key denotes a folder marker rather than a leaf object.
    pub fn is_folder_marker(&self) -> bool {
        self.0.ends_with('/')
    }

    /// The scope prefix shared by every key in one tenant's namespace.
    pub fn scope(tenant: &str, namespace: &str) -> String {
        format!("{tenant}/{namespace}/")
    }

    /// The part of the key after the scope prefix, computed by plain string
    /// slicing. `None` when the key lies outside the scope; `Some("")` when
    /// the key denotes the namespace root itself.
    pub fn relative_to<'a>(&'a self, scope: &str) -> Option<&'a str> {
        if let Some(rest) = self.0.strip_prefix(scope) {
            return Some(rest);
        }
        // "t/ns" without the trailing slash still denotes the namespace root.
        if Some(self.0.as_str()) == scope.strip_suffix('/') {
            return Some("");
        }
        None
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectKey {
    fn from(key: &str) -> Self {
        ObjectKey::new(key)
    }
}

impl From<String> for ObjectKey {
    fn from(key: String) -> Self {
        ObjectKey(key)
    }
}
