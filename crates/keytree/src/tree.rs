//! Rebuilds a folder forest from a flat key listing.

use std::collections::{BTreeMap, BTreeSet};

use diagnostics::{log_debug, log_warn};

use crate::key::ObjectKey;
use crate::node::FolderNode;
use crate::segment::decode_segment;

/// Build the virtual folder forest for one tenant namespace.
///
/// Every key is reduced to the folder path it implies: a key ending in `/`
/// is a folder marker and contributes all of its segments; any other key
/// denotes a leaf object and contributes all segments except the last (the
/// leaf itself is not a node). Keys outside the scope, keys denoting the
/// namespace root, and keys with segments that fail to decode are skipped -
/// building is best-effort over the whole listing, and one corrupt entry
/// must not blank the tree.
///
/// Children order is not part of the contract; callers that need a
/// particular display order must sort after building.
pub fn build_tree(keys: &[ObjectKey], tenant: &str, namespace: &str) -> Vec<FolderNode> {
    let scope = ObjectKey::scope(tenant, namespace);
    let mut folders: BTreeSet<Vec<String>> = BTreeSet::new();

    for key in keys {
        let Some(remainder) = key.relative_to(&scope) else {
            log_debug!("key outside scope, skipping: {key}", key: key.as_str());
            continue;
        };

        let segments: Vec<&str> = remainder.split('/').filter(|s| !s.is_empty()).collect();
        let folder_depth = if key.is_folder_marker() {
            segments.len()
        } else {
            // The final segment names a leaf object, not a folder.
            segments.len().saturating_sub(1)
        };
        if folder_depth == 0 {
            continue;
        }

        match decode_segments(&segments[..folder_depth]) {
            Ok(decoded) => {
                // Every ancestor prefix is a folder too; shared prefixes
                // from different keys merge into one entry here.
                for depth in 1..=decoded.len() {
                    folders.insert(decoded[..depth].to_vec());
                }
            }
            Err(err) => {
                log_debug!("skipping malformed key {key}: {reason}",
                    key: key.as_str(), reason: err.to_string());
            }
        }
    }

    materialize(&folders)
}

/// Build the forest, falling back to a flat listing when hierarchy
/// reconstruction yields nothing from a non-empty input.
///
/// The fallback is a degraded-mode display, not silent data loss: each key
/// becomes a pseudo-node named by its raw key.
pub fn build_tree_or_flat(keys: &[ObjectKey], tenant: &str, namespace: &str) -> Vec<FolderNode> {
    let forest = build_tree(keys, tenant, namespace);
    if forest.is_empty() && !keys.is_empty() {
        log_warn!("no folders reconstructed from {count} keys, using flat listing",
            count: keys.len());
        return flat_fallback(keys);
    }
    forest
}

/// The degraded-mode flat listing: one childless pseudo-node per raw key.
pub fn flat_fallback(keys: &[ObjectKey]) -> Vec<FolderNode> {
    keys.iter()
        .map(|key| FolderNode::new(key.as_str(), key.as_str()))
        .collect()
}

fn decode_segments(encoded: &[&str]) -> crate::Result<Vec<String>> {
    encoded.iter().map(|seg| decode_segment(seg)).collect()
}

/// Turn the folder-path set into a forest. Iterating the sorted set in
/// reverse visits every folder before its parent, so children are complete
/// by the time they attach.
fn materialize(folders: &BTreeSet<Vec<String>>) -> Vec<FolderNode> {
    let mut pending: BTreeMap<&[String], Vec<FolderNode>> = BTreeMap::new();
    let mut roots = Vec::new();

    for segments in folders.iter().rev() {
        let name = segments.last().cloned().unwrap_or_default();
        let mut node = FolderNode::new(name, segments.join("/"));
        if let Some(mut children) = pending.remove(segments.as_slice()) {
            // Collected in reverse; restore name order.
            children.reverse();
            node.children = children;
        }

        if segments.len() == 1 {
            roots.push(node);
        } else {
            pending
                .entry(&segments[..segments.len() - 1])
                .or_default()
                .push(node);
        }
    }

    roots.reverse();
    roots
}
