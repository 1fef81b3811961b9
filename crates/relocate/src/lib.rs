//! Rename/move emulation for a flat object store.
//!
//! The backing store has no native rename: renaming a folder prefix means
//! copying every object under the old prefix to the new one, repointing the
//! relational index, and only then deleting the old prefix. This crate
//! splits that workflow into a pure planner ([`plan_rename`]) that produces
//! an ordered step list, and a sequential best-effort engine ([`execute`])
//! that runs a plan against abstract collaborators.
//!
//! The central ordering decision: every copy and index update appears
//! strictly before the single final delete of the old prefix, so an
//! interrupted or partially failed run leaves data duplicated (recoverable
//! with an idempotent retry of the same plan), never lost.

pub mod client;
pub mod engine;
pub mod memory;
pub mod plan;

pub use client::{IndexClient, ObjectStoreClient, StoreError, StoreResult};
pub use engine::{StepOutcome, StepResult, execute};
pub use memory::{MemoryIndex, MemoryStore};
pub use plan::{IndexedObject, PlanStep, plan_rename};
