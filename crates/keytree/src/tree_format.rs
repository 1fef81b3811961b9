//! Box-drawing rendering of a folder forest.
//!
//! ```
//! use keytree::{FolderNode, tree_format::format_forest};
//!
//! let forest = vec![
//!     FolderNode::new("songs", "songs")
//!         .with_child(FolderNode::new("sub", "songs/sub")),
//! ];
//! let output = format_forest("u1/audio", &forest);
//! // u1/audio
//! // └─┬ songs
//! //   └── sub
//! ```

use crate::node::FolderNode;

/// Render the forest under a root label (typically `<tenant>/<namespace>`).
pub fn format_forest(root_label: &str, forest: &[FolderNode]) -> String {
    let mut output = String::new();
    output.push_str(root_label);
    output.push('\n');
    format_children(&mut output, forest, "");
    output
}

fn format_children(output: &mut String, children: &[FolderNode], prefix: &str) {
    let count = children.len();

    for (index, child) in children.iter().enumerate() {
        let is_last = index == count - 1;

        // Tee connector for nodes with children, simple connector for leaves.
        let (connector, continuation) = match (child.children.is_empty(), is_last) {
            (true, true) => ("└──", ' '),
            (true, false) => ("├──", '│'),
            (false, true) => ("└─┬", ' '),
            (false, false) => ("├─┬", '│'),
        };

        output.push_str(prefix);
        output.push_str(connector);
        output.push(' ');
        output.push_str(&child.name);
        output.push('\n');

        if !child.children.is_empty() {
            let child_prefix = format!("{prefix}{continuation} ");
            format_children(output, &child.children, &child_prefix);
        }
    }
}
