//! Virtual hierarchical namespace over a flat object store.
//!
//! A flat store identifies everything by string keys of the form
//! `<tenant>/<namespace>/<segment>/...`; there are no real directories.
//! This crate reconstructs a browsable folder tree from a flat key listing
//! and provides the pure path operations a caller needs to navigate it:
//!
//! - [`segment`] - percent codec for individual path segments, so display
//!   names survive transport as URL-safe tokens and round-trip exactly.
//! - [`key`] - the [`ObjectKey`] model and scope-prefix slicing.
//! - [`tree`] - rebuilds a [`FolderNode`] forest from a key listing.
//! - [`ops`] - children / breadcrumb / parent queries over a built forest.
//! - [`tree_format`] - box-drawing rendering of a forest.
//!
//! The tree is always rebuilt from a fresh listing; nothing here mutates a
//! built forest in place.

pub mod error;
pub mod key;
pub mod node;
pub mod ops;
pub mod segment;
pub mod tree;
pub mod tree_format;

pub use error::{Error, Result};
pub use key::ObjectKey;
pub use node::FolderNode;
pub use ops::{breadcrumb, children, exists, find, parent, Crumb};
pub use segment::{decode_segment, encode_segment};
pub use tree::{build_tree, build_tree_or_flat, flat_fallback};

#[cfg(test)]
mod tests;
