//! The rename/move planner.
//!
//! Planning is pure: it turns a snapshot listing of the objects under the
//! old prefix into an ordered step list, and leaves all I/O to the engine.
//! Relative paths are computed by string-prefix slicing, never by regex, so
//! folder names containing metacharacters cannot corrupt the plan.

use std::collections::{BTreeMap, BTreeSet};

use diagnostics::log_debug;
use keytree::{ObjectKey, decode_segment, encode_segment, ops};
use serde::{Deserialize, Serialize};

/// One unit of work in a rename/move plan. Steps execute strictly in plan
/// order; the source-prefix `DeleteFolderMarker` is always last, so an
/// interrupted plan duplicates data but never loses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanStep {
    CreateFolder { path: String },
    CopyObject { source: ObjectKey, dest: ObjectKey },
    UpdateIndexRecord { record_id: String, new_key: ObjectKey },
    DeleteObject { key: ObjectKey },
    DeleteFolderMarker { path: String },
}

/// An object beneath the rename source, with its index record if it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedObject {
    pub key: ObjectKey,
    pub record_id: Option<String>,
}

impl IndexedObject {
    pub fn new<K: Into<ObjectKey>>(key: K, record_id: Option<String>) -> Self {
        IndexedObject { key: key.into(), record_id }
    }
}

/// Plan renaming the folder at `old_prefix` to `new_leaf_name` (a decoded
/// display name), given a snapshot listing of everything under the prefix.
///
/// Step order:
/// 1. `CreateFolder` for the new prefix.
/// 2. Copy + index-update pairs for objects directly inside the old prefix.
///    Copy precedes the index update so a failed copy never leaves the
///    index pointing at a missing object.
/// 3. Per discovered subfolder, parents before children: its `CreateFolder`,
///    then its direct objects' copy/index pairs.
/// 4. Exactly one final `DeleteFolderMarker(old_prefix)` - the collaborator
///    deletes the old prefix transitively - strictly after every copy and
///    index step at any depth.
///
/// Renaming a folder to its own decoded name returns the empty plan: a
/// self-copy followed by a delete of the same path would race toward data
/// loss, so the no-op is detected up front.
pub fn plan_rename(
    old_prefix: &str,
    new_leaf_name: &str,
    objects: &[IndexedObject],
) -> Vec<PlanStep> {
    // Callers (the CLI included) may pass the prefix with its marker slash;
    // internally folder paths carry no trailing slash, and an unnormalized
    // prefix would fail every strip_prefix below and plan a delete with no
    // copies.
    let old_prefix = old_prefix.trim_end_matches('/');
    let old_leaf = ops::leaf(old_prefix);
    let old_leaf_decoded =
        decode_segment(old_leaf).unwrap_or_else(|_| old_leaf.to_string());
    if old_leaf_decoded == new_leaf_name || new_leaf_name.is_empty() {
        log_debug!("rename of {prefix} is a no-op", prefix: old_prefix);
        return Vec::new();
    }

    let new_prefix = ops::join(ops::parent(old_prefix), &encode_segment(new_leaf_name));
    let old_scope = format!("{old_prefix}/");

    // Group objects by their directory relative to the old prefix, and
    // collect every subfolder (including ancestors that hold no objects of
    // their own, and empty subfolders known only through their markers).
    let mut by_dir: BTreeMap<String, Vec<&IndexedObject>> = BTreeMap::new();
    let mut subfolders: BTreeSet<String> = BTreeSet::new();
    for object in objects {
        let Some(relative) = object.key.as_str().strip_prefix(&old_scope) else {
            log_debug!("object outside rename source, skipping: {key}",
                key: object.key.as_str());
            continue;
        };
        if relative.is_empty() {
            // The old folder's own marker; the final delete covers it.
            continue;
        }

        if let Some(marker_dir) = relative.strip_suffix('/') {
            insert_with_ancestors(&mut subfolders, marker_dir);
            continue;
        }

        let dir = match relative.rfind('/') {
            Some(index) => &relative[..index],
            None => "",
        };
        if !dir.is_empty() {
            insert_with_ancestors(&mut subfolders, dir);
        }
        by_dir.entry(dir.to_string()).or_default().push(object);
    }

    let mut steps = vec![PlanStep::CreateFolder { path: new_prefix.clone() }];

    // Objects directly inside the old prefix first.
    push_object_steps(&mut steps, &new_prefix, "", by_dir.get(""));

    // Then each subfolder; BTreeSet order puts parents before children,
    // which is all the ordering a CreateFolder depends on.
    for dir in &subfolders {
        steps.push(PlanStep::CreateFolder { path: ops::join(&new_prefix, dir) });
        push_object_steps(&mut steps, &new_prefix, dir, by_dir.get(dir));
    }

    steps.push(PlanStep::DeleteFolderMarker { path: old_prefix.to_string() });
    steps
}

fn insert_with_ancestors(subfolders: &mut BTreeSet<String>, dir: &str) {
    let mut end = dir.len();
    loop {
        subfolders.insert(dir[..end].to_string());
        match dir[..end].rfind('/') {
            Some(index) => end = index,
            None => break,
        }
    }
}

fn push_object_steps(
    steps: &mut Vec<PlanStep>,
    new_prefix: &str,
    dir: &str,
    objects: Option<&Vec<&IndexedObject>>,
) {
    let Some(objects) = objects else { return };
    let dest_dir = if dir.is_empty() {
        new_prefix.to_string()
    } else {
        ops::join(new_prefix, dir)
    };
    for object in objects {
        let name = ops::leaf(object.key.as_str());
        let dest = ObjectKey::new(ops::join(&dest_dir, name));
        steps.push(PlanStep::CopyObject {
            source: object.key.clone(),
            dest: dest.clone(),
        });
        if let Some(record_id) = &object.record_id {
            steps.push(PlanStep::UpdateIndexRecord {
                record_id: record_id.clone(),
                new_key: dest,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(key: &str, record: Option<&str>) -> IndexedObject {
        IndexedObject::new(key, record.map(str::to_string))
    }

    fn sample_objects() -> Vec<IndexedObject> {
        vec![
            obj("u1/vault/art/a.png", Some("r1")),
            obj("u1/vault/art/drafts/b.png", Some("r2")),
            obj("u1/vault/art/drafts/deep/c.png", None),
            obj("u1/vault/art/empty/", None),
        ]
    }

    #[test]
    fn test_same_name_is_noop() {
        assert!(plan_rename("u1/vault/art", "art", &sample_objects()).is_empty());
    }

    #[test]
    fn test_same_decoded_name_is_noop() {
        // The old leaf is stored encoded; comparison happens decoded.
        let objects = [obj("u1/vault/mix%20tapes/t.mp3", None)];
        assert!(plan_rename("u1/vault/mix%20tapes", "mix tapes", &objects).is_empty());
    }

    #[test]
    fn test_empty_new_name_is_noop() {
        assert!(plan_rename("u1/vault/art", "", &sample_objects()).is_empty());
    }

    #[test]
    fn test_first_step_creates_new_prefix() {
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        assert_eq!(
            plan.first(),
            Some(&PlanStep::CreateFolder { path: "u1/vault/artwork".to_string() })
        );
    }

    #[test]
    fn test_new_leaf_name_is_encoded() {
        let plan = plan_rename("u1/vault/art", "new art", &[]);
        assert_eq!(
            plan.first(),
            Some(&PlanStep::CreateFolder { path: "u1/vault/new%20art".to_string() })
        );
    }

    #[test]
    fn test_delete_marker_is_last_and_unique() {
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        assert_eq!(
            plan.last(),
            Some(&PlanStep::DeleteFolderMarker { path: "u1/vault/art".to_string() })
        );
        let deletes = plan
            .iter()
            .filter(|s| matches!(s, PlanStep::DeleteFolderMarker { .. }))
            .count();
        assert_eq!(deletes, 1);
    }

    #[test]
    fn test_every_transfer_precedes_the_delete() {
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        let delete_index = plan
            .iter()
            .position(|s| matches!(s, PlanStep::DeleteFolderMarker { .. }))
            .expect("plan has a delete step");
        let last_transfer = plan
            .iter()
            .rposition(|s| {
                matches!(
                    s,
                    PlanStep::CopyObject { .. } | PlanStep::UpdateIndexRecord { .. }
                )
            })
            .expect("plan has transfer steps");
        assert!(last_transfer < delete_index);
    }

    #[test]
    fn test_copy_precedes_its_index_update() {
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        let copy = plan.iter().position(|s| matches!(s,
            PlanStep::CopyObject { source, .. } if source.as_str() == "u1/vault/art/a.png"));
        let update = plan.iter().position(|s| matches!(s,
            PlanStep::UpdateIndexRecord { record_id, .. } if record_id == "r1"));
        assert!(copy.expect("copy planned") < update.expect("update planned"));
    }

    #[test]
    fn test_destination_keys_rebase_onto_new_prefix() {
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        assert!(plan.contains(&PlanStep::CopyObject {
            source: ObjectKey::new("u1/vault/art/drafts/deep/c.png"),
            dest: ObjectKey::new("u1/vault/artwork/drafts/deep/c.png"),
        }));
    }

    #[test]
    fn test_subfolder_creates_come_parents_first() {
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        let creates: Vec<&str> = plan
            .iter()
            .filter_map(|s| match s {
                PlanStep::CreateFolder { path } => Some(path.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            creates,
            vec![
                "u1/vault/artwork",
                "u1/vault/artwork/drafts",
                "u1/vault/artwork/drafts/deep",
                "u1/vault/artwork/empty",
            ]
        );
    }

    #[test]
    fn test_empty_subfolder_marker_survives_rename() {
        // "empty/" holds no objects; its marker alone earns a CreateFolder.
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        assert!(plan.contains(&PlanStep::CreateFolder {
            path: "u1/vault/artwork/empty".to_string()
        }));
    }

    #[test]
    fn test_object_without_record_gets_no_index_step() {
        let plan = plan_rename("u1/vault/art", "artwork", &sample_objects());
        let updates: Vec<&PlanStep> = plan
            .iter()
            .filter(|s| matches!(s, PlanStep::UpdateIndexRecord { .. }))
            .collect();
        assert_eq!(updates.len(), 2, "only r1 and r2 have records");
    }

    #[test]
    fn test_trailing_slash_prefix_is_normalized() {
        let objects = sample_objects();
        let plan = plan_rename("u1/vault/art/", "artwork", &objects);
        assert_eq!(plan, plan_rename("u1/vault/art", "artwork", &objects));

        // Every object still gets a copy; a normalization failure would
        // leave only the create and the delete.
        let copies = plan
            .iter()
            .filter(|s| matches!(s, PlanStep::CopyObject { .. }))
            .count();
        assert_eq!(copies, 3);
        assert_eq!(
            plan.last(),
            Some(&PlanStep::DeleteFolderMarker { path: "u1/vault/art".to_string() })
        );
    }

    #[test]
    fn test_objects_outside_prefix_are_ignored() {
        let objects = [obj("u1/vault/other/x.png", Some("r9"))];
        let plan = plan_rename("u1/vault/art", "artwork", &objects);
        assert_eq!(
            plan,
            vec![
                PlanStep::CreateFolder { path: "u1/vault/artwork".to_string() },
                PlanStep::DeleteFolderMarker { path: "u1/vault/art".to_string() },
            ]
        );
    }

    #[test]
    fn test_metacharacter_folder_names_are_safe() {
        // Regex-based prefix stripping chokes on names like "a.b(c)"; plain
        // slicing must not.
        let objects = [obj("u1/vault/a.b(c)/x.png", Some("r1"))];
        let plan = plan_rename("u1/vault/a.b(c)", "renamed", &objects);
        assert!(plan.contains(&PlanStep::CopyObject {
            source: ObjectKey::new("u1/vault/a.b(c)/x.png"),
            dest: ObjectKey::new("u1/vault/renamed/x.png"),
        }));
    }

    #[test]
    fn test_top_level_prefix_has_no_parent_junk() {
        let objects = [obj("art/x.png", None)];
        let plan = plan_rename("art", "artwork", &objects);
        assert_eq!(
            plan.first(),
            Some(&PlanStep::CreateFolder { path: "artwork".to_string() })
        );
    }
}
