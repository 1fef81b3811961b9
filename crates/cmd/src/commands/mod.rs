pub mod rename;
pub mod tree;

pub use rename::{plan_command, rename_command};
pub use tree::tree_command;
