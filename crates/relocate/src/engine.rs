//! Sequential, best-effort plan execution.

use std::collections::HashSet;

use diagnostics::{log_debug, log_warn};
use keytree::ObjectKey;
use serde::Serialize;

use crate::client::{IndexClient, ObjectStoreClient, StoreResult};
use crate::plan::PlanStep;

/// Outcome of one executed (or deliberately skipped) step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded,
    Failed { reason: String },
}

impl StepOutcome {
    pub fn failed<S: Into<String>>(reason: S) -> Self {
        StepOutcome::Failed { reason: reason.into() }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

/// One record per plan step, in plan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub step: PlanStep,
    pub outcome: StepOutcome,
}

/// Execute a plan strictly in sequence, one outstanding collaborator call
/// at a time, never aborting the whole plan on a single step's failure.
///
/// Failure isolation:
/// - a failed `CopyObject` marks its destination, and the paired
///   `UpdateIndexRecord` for that destination is reported as
///   `Failed("skipped: copy failed")` without being attempted;
/// - unrelated steps for other objects keep executing;
/// - once any copy or index step has failed, `DeleteFolderMarker` steps are
///   reported as skipped and never attempted, so the old data is preserved
///   whenever the new location is not fully populated.
///
/// Sequential execution is deliberate: the final delete depends on every
/// earlier copy, and a dependency graph buys parallelism the UI-scale call
/// volume does not need. Re-running the same plan after a partial failure
/// is safe under the collaborator idempotence contract.
pub async fn execute(
    plan: &[PlanStep],
    store: &dyn ObjectStoreClient,
    index: &dyn IndexClient,
) -> Vec<StepResult> {
    let mut results = Vec::with_capacity(plan.len());
    let mut failed_dests: HashSet<&ObjectKey> = HashSet::new();
    let mut transfer_failed = false;

    for step in plan {
        let outcome = match step {
            PlanStep::CreateFolder { path } => {
                outcome_of(store.create_folder(path).await)
            }
            PlanStep::CopyObject { source, dest } => {
                let outcome = outcome_of(store.copy_object(source, dest).await);
                if outcome.is_failure() {
                    failed_dests.insert(dest);
                    transfer_failed = true;
                }
                outcome
            }
            PlanStep::UpdateIndexRecord { record_id, new_key } => {
                if failed_dests.contains(new_key) {
                    // transfer_failed is already set by the copy that put
                    // the destination in failed_dests.
                    StepOutcome::failed("skipped: copy failed")
                } else {
                    let outcome = outcome_of(index.update_record(record_id, new_key).await);
                    if outcome.is_failure() {
                        transfer_failed = true;
                    }
                    outcome
                }
            }
            PlanStep::DeleteObject { key } => outcome_of(store.delete_object(key).await),
            PlanStep::DeleteFolderMarker { path } => {
                if transfer_failed {
                    StepOutcome::failed("skipped: earlier copy or index step failed")
                } else {
                    outcome_of(store.delete_folder_marker(path).await)
                }
            }
        };

        match &outcome {
            StepOutcome::Succeeded => {
                log_debug!("step succeeded: {step}", step: format!("{step:?}"));
            }
            StepOutcome::Failed { reason } => {
                log_warn!("step failed: {step}: {reason}",
                    step: format!("{step:?}"), reason: reason.as_str());
            }
        }
        results.push(StepResult { step: step.clone(), outcome });
    }

    results
}

fn outcome_of(result: StoreResult<()>) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome::Succeeded,
        Err(err) => StepOutcome::failed(err.to_string()),
    }
}
