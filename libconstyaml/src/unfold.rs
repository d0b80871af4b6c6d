//! Phase 5: Unfolder
//!
//! Decodes a flat document back into a [`Value`], starting at the root and
//! following child index ranges. Childless nodes read their text straight
//! from the source.

use crate::flatten::{FlatDocument, FlatNode};
use crate::parser::NodeKind;
use crate::value::Value;

impl FlatDocument {
    /// Decode the document. `source` must be the text it was parsed from.
    ///
    /// # Panics
    ///
    /// Panics if the flat encoding is inconsistent (a map key that is not a
    /// scalar, an odd number of map children, or a punctuation node in value
    /// position). The flattener never produces such documents.
    pub fn unfold(&self, source: &str) -> Value {
        unfold_node(self, source, 0)
    }
}

fn unfold_node(doc: &FlatDocument, source: &str, index: usize) -> Value {
    let node = doc.nodes()[index];
    match node.kind {
        NodeKind::Scalar => Value::Scalar(source[node.lo..node.hi].to_string()),
        NodeKind::None => Value::Empty,
        NodeKind::List => Value::List(
            (node.lo..node.hi)
                .map(|child| unfold_node(doc, source, child))
                .collect(),
        ),
        NodeKind::Map => Value::Map(unfold_entries(doc, source, node)),
        kind => panic!("corrupt flat document: {:?} node at index {}", kind, index),
    }
}

fn unfold_entries(doc: &FlatDocument, source: &str, node: FlatNode) -> Vec<(String, Value)> {
    assert!(
        (node.hi - node.lo) % 2 == 0,
        "corrupt flat document: map with {} children",
        node.hi - node.lo
    );
    (node.lo..node.hi)
        .step_by(2)
        .map(|key| {
            let Value::Scalar(name) = unfold_node(doc, source, key) else {
                panic!("corrupt flat document: non-scalar map key at index {}", key);
            };
            (name, unfold_node(doc, source, key + 1))
        })
        .collect()
}
