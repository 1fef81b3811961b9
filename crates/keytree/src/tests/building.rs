use crate::key::ObjectKey;
use crate::node::FolderNode;
use crate::tree::{build_tree, build_tree_or_flat, flat_fallback};

fn keys(raw: &[&str]) -> Vec<ObjectKey> {
    raw.iter().map(|k| ObjectKey::new(*k)).collect()
}

/// Flatten a forest into (name, path) identities for order-insensitive
/// comparison.
fn identities(forest: &[FolderNode]) -> std::collections::BTreeSet<(String, String)> {
    let mut out = std::collections::BTreeSet::new();
    fn walk(nodes: &[FolderNode], out: &mut std::collections::BTreeSet<(String, String)>) {
        for node in nodes {
            out.insert((node.name.clone(), node.path.clone()));
            walk(&node.children, out);
        }
    }
    walk(forest, &mut out);
    out
}

#[test]
fn test_shared_prefix_merging() {
    let forest = build_tree(&keys(&["t/ns/a/b/x.png", "t/ns/a/c/y.png"]), "t", "ns");

    assert_eq!(forest.len(), 1, "exactly one node for 'a'");
    let a = &forest[0];
    assert_eq!(a.name, "a");
    assert_eq!(a.path, "a");
    let child_names: Vec<&str> = a.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(child_names, vec!["b", "c"]);
}

#[test]
fn test_namespace_root_contributes_no_node() {
    assert!(build_tree(&keys(&["t/ns/"]), "t", "ns").is_empty());
    assert!(build_tree(&keys(&["t/ns"]), "t", "ns").is_empty());
}

#[test]
fn test_single_segment_marker_is_top_level_node() {
    let forest = build_tree(&keys(&["t/ns/a/"]), "t", "ns");
    assert_eq!(forest, vec![FolderNode::new("a", "a")]);
}

#[test]
fn test_leaf_objects_are_not_nodes() {
    // A root-level leaf implies no folders at all.
    assert!(build_tree(&keys(&["t/ns/readme.txt"]), "t", "ns").is_empty());
}

#[test]
fn test_end_to_end_scenario() {
    let forest = build_tree(
        &keys(&["u1/audio/songs/track1.mp3", "u1/audio/songs/sub/track2.mp3"]),
        "u1",
        "audio",
    );

    assert_eq!(
        forest,
        vec![FolderNode::new("songs", "songs")
            .with_child(FolderNode::new("sub", "songs/sub"))]
    );
}

#[test]
fn test_permutation_insensitive_identities() {
    let listing = [
        "t/ns/a/b/x.png",
        "t/ns/a/c/y.png",
        "t/ns/d/",
        "t/ns/a/b/deep/z.png",
        "t/ns/top.txt",
    ];
    let forward = build_tree(&keys(&listing), "t", "ns");

    let mut reversed: Vec<&str> = listing.to_vec();
    reversed.reverse();
    let backward = build_tree(&keys(&reversed), "t", "ns");

    assert_eq!(identities(&forward), identities(&backward));
    assert!(!identities(&forward).is_empty());
}

#[test]
fn test_malformed_key_is_skipped_not_fatal() {
    // "%zz" is not a valid percent escape; only that key is dropped.
    let forest = build_tree(&keys(&["t/ns/ok/x.png", "t/ns/bad%zz/y.png"]), "t", "ns");
    assert_eq!(identities(&forest).len(), 1);
    assert!(identities(&forest).contains(&("ok".to_string(), "ok".to_string())));
}

#[test]
fn test_encoded_names_decode_for_display() {
    let forest = build_tree(&keys(&["t/ns/mix%20tapes/track.mp3"]), "t", "ns");
    assert_eq!(forest, vec![FolderNode::new("mix tapes", "mix tapes")]);
}

#[test]
fn test_keys_outside_scope_are_ignored() {
    let forest = build_tree(&keys(&["other/ns/a/", "t/other/b/", "t/ns/c/"]), "t", "ns");
    assert_eq!(forest, vec![FolderNode::new("c", "c")]);
}

#[test]
fn test_flat_fallback_on_unreconstructable_listing() {
    // All keys fail hierarchy reconstruction, but the listing is non-empty:
    // degraded mode shows one pseudo-node per raw key.
    let listing = keys(&["t/ns/bad%zz/x.png", "t/ns/also%/y.png"]);
    let forest = build_tree_or_flat(&listing, "t", "ns");

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].name, "t/ns/bad%zz/x.png");
    assert!(forest.iter().all(|node| node.children.is_empty()));
}

#[test]
fn test_no_fallback_when_hierarchy_exists() {
    let listing = keys(&["t/ns/a/", "t/ns/bad%zz/x.png"]);
    let forest = build_tree_or_flat(&listing, "t", "ns");
    assert_eq!(forest, vec![FolderNode::new("a", "a")]);
}

#[test]
fn test_flat_fallback_shape() {
    let listing = keys(&["t/ns/one", "t/ns/two"]);
    let flat = flat_fallback(&listing);
    assert_eq!(flat[1], FolderNode::new("t/ns/two", "t/ns/two"));
}

#[test]
fn test_empty_listing_builds_empty_forest() {
    assert!(build_tree_or_flat(&[], "t", "ns").is_empty());
}
