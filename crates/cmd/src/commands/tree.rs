use anyhow::Result;
use diagnostics::log_info;
use keytree::tree::build_tree_or_flat;
use keytree::tree_format::format_forest;
use relocate::IndexedObject;

use crate::common::keys_of;

/// Render the virtual folder tree for one tenant namespace.
pub fn tree_command(
    objects: &[IndexedObject],
    tenant: &str,
    namespace: &str,
    output: &mut dyn FnMut(String),
) -> Result<()> {
    let keys = keys_of(objects);
    log_info!("building tree from {count} keys", count: keys.len());

    let forest = build_tree_or_flat(&keys, tenant, namespace);
    let root_label = format!("{tenant}/{namespace}");
    output(format_forest(&root_label, &forest));
    Ok(())
}
