//! Library surface of the flatns CLI, exposed so integration tests can
//! drive the command functions directly.

pub mod commands;
pub mod common;
