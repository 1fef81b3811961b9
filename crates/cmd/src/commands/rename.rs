use std::collections::HashMap;

use anyhow::Result;
use diagnostics::log_info;
use relocate::{
    IndexedObject, MemoryIndex, MemoryStore, ObjectStoreClient, PlanStep, StepOutcome,
    StepResult, execute, plan_rename,
};

/// Print the rename plan for a folder prefix, without executing anything.
pub fn plan_command(
    objects: &[IndexedObject],
    old_prefix: &str,
    new_name: &str,
    json: bool,
    output: &mut dyn FnMut(String),
) -> Result<()> {
    let plan = plan_rename(old_prefix, new_name, objects);

    if json {
        output(serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }
    if plan.is_empty() {
        output("no-op: nothing to rename".to_string());
        return Ok(());
    }
    for (index, step) in plan.iter().enumerate() {
        output(format!("{:>3}. {}", index + 1, describe(step)));
    }
    Ok(())
}

/// Rehearse a rename: seed the in-memory store from the listing, snapshot
/// it through the collaborator interface, plan, execute, and report every
/// step's outcome.
pub async fn rename_command(
    objects: &[IndexedObject],
    old_prefix: &str,
    new_name: &str,
    json: bool,
    output: &mut dyn FnMut(String),
) -> Result<()> {
    let store = MemoryStore::new();
    let index = MemoryIndex::new();
    for object in objects {
        if object.key.is_folder_marker() {
            store.put_folder(object.key.as_str()).await;
        } else {
            store.put_object(&object.key, b"").await;
        }
        if let Some(record_id) = &object.record_id {
            index.put_record(record_id, &object.key).await;
        }
    }
    store.put_folder(old_prefix).await;

    // Snapshot through the collaborator, then join record ids back in.
    let records: HashMap<&str, &str> = objects
        .iter()
        .filter_map(|o| o.record_id.as_deref().map(|r| (o.key.as_str(), r)))
        .collect();
    let snapshot: Vec<IndexedObject> = store
        .list_objects(old_prefix)
        .await?
        .into_iter()
        .map(|key| {
            let record = records.get(key.as_str()).map(|r| (*r).to_string());
            IndexedObject::new(key, record)
        })
        .collect();

    let plan = plan_rename(old_prefix, new_name, &snapshot);
    log_info!("executing {count} steps for {prefix}",
        count: plan.len(), prefix: old_prefix);
    let results = execute(&plan, &store, &index).await;

    if json {
        output(serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    if results.is_empty() {
        output("no-op: nothing to rename".to_string());
        return Ok(());
    }
    for result in &results {
        output(format!("{} {}", mark(result), describe(&result.step)));
        if let StepOutcome::Failed { reason } = &result.outcome {
            output(format!("      ({reason})"));
        }
    }
    let failed = results.iter().filter(|r| r.outcome.is_failure()).count();
    output(format!(
        "{} steps: {} succeeded, {} failed",
        results.len(),
        results.len() - failed,
        failed
    ));
    Ok(())
}

fn describe(step: &PlanStep) -> String {
    match step {
        PlanStep::CreateFolder { path } => format!("create-folder {path}"),
        PlanStep::CopyObject { source, dest } => format!("copy {source} -> {dest}"),
        PlanStep::UpdateIndexRecord { record_id, new_key } => {
            format!("update-index {record_id} -> {new_key}")
        }
        PlanStep::DeleteObject { key } => format!("delete-object {key}"),
        PlanStep::DeleteFolderMarker { path } => format!("delete-folder {path}"),
    }
}

fn mark(result: &StepResult) -> &'static str {
    match result.outcome {
        StepOutcome::Succeeded => "ok  ",
        StepOutcome::Failed { .. } => "FAIL",
    }
}
