//! Pure queries over a built forest, plus the path string laws.
//!
//! Paths here are decoded slash-joined paths from the namespace root; the
//! empty string is the root itself.

use serde::Serialize;

use crate::node::FolderNode;

/// One entry in a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

/// The node at `path`, searching the whole forest.
pub fn find<'a>(forest: &'a [FolderNode], path: &str) -> Option<&'a FolderNode> {
    for node in forest {
        if node.path == path {
            return Some(node);
        }
        if let Some(found) = find(&node.children, path) {
            return Some(found);
        }
    }
    None
}

/// The children of the folder at `path`; the top-level forest for the empty
/// root path. An unknown path yields an empty slice, not an error - a
/// not-yet-populated folder is indistinguishable from an empty one here.
pub fn children<'a>(forest: &'a [FolderNode], path: &str) -> &'a [FolderNode] {
    if path.is_empty() {
        return forest;
    }
    find(forest, path).map_or(&[], |node| node.children.as_slice())
}

/// Whether a folder exists at `path`. The root always exists.
pub fn exists(forest: &[FolderNode], path: &str) -> bool {
    path.is_empty() || find(forest, path).is_some()
}

/// Breadcrumb trail for `path`, derived purely from the string - it does
/// not consult the tree, so it works for paths that no longer exist.
pub fn breadcrumb(path: &str) -> Vec<Crumb> {
    let mut crumbs = Vec::new();
    let mut so_far = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !so_far.is_empty() {
            so_far.push('/');
        }
        so_far.push_str(segment);
        crumbs.push(Crumb {
            name: segment.to_string(),
            path: so_far.clone(),
        });
    }
    crumbs
}

/// Drops the last segment; the parent of a top-level path is the empty root.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

/// The final segment of `path`.
pub fn leaf(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Joins a parent path and a child name.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
