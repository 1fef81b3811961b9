use serde::Serialize;

/// One virtual directory in the rebuilt namespace view.
///
/// Only directory markers become nodes; leaf objects do not appear in the
/// tree. Nodes are built fresh on every listing and never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderNode {
    /// Decoded display segment.
    pub name: String,
    /// Decoded slash-joined path from the namespace root.
    pub path: String,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub fn new<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        FolderNode {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node (builder pattern, handy in tests).
    pub fn with_child(mut self, child: FolderNode) -> Self {
        self.children.push(child);
        self
    }
}
