//! Phase 4: Flattener
//!
//! Serializes the syntax tree breadth-first into a flat array. Index 0 is the
//! root and every parent has a lower index than its children. Each node
//! stores a `lo..hi` range whose meaning depends on the node:
//! - a node with children stores the index range of those children, which
//!   are always contiguous siblings
//! - a childless node (scalar or empty value) stores its byte range in the
//!   source text

use std::collections::VecDeque;

use crate::error::{ParseContext, ParseError, Result};
use crate::parser::{NodeKind, TreeNode};

/// One entry of a flattened document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatNode {
    pub lo: usize,
    pub hi: usize,
    pub kind: NodeKind,
}

/// A document in flat breadth-first form.
///
/// Only the flattener constructs this, so the range encoding is always
/// consistent with the node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDocument {
    nodes: Vec<FlatNode>,
}

impl FlatDocument {
    /// All nodes, root first.
    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &FlatNode {
        &self.nodes[0]
    }

    /// The node at `index`.
    pub fn get(&self, index: usize) -> Option<&FlatNode> {
        self.nodes.get(index)
    }
}

/// Flatten a tree, failing if it has more than `max_nodes` nodes.
pub fn flatten(
    root: &TreeNode,
    max_nodes: usize,
    source: &str,
    ctx: &ParseContext,
) -> Result<FlatDocument> {
    if max_nodes == 0 {
        return Err(ParseError::Capacity {
            limit: max_nodes,
            location: ctx.offset_suffix(source, root.start),
        });
    }

    // `queued` counts every node ever enqueued, which is also the index the
    // next enqueued node will receive.
    let mut queue = VecDeque::from([root]);
    let mut queued = 1;
    let mut nodes = Vec::new();

    while let Some(node) = queue.pop_front() {
        let lo = queued;
        for child in &node.children {
            if queued >= max_nodes {
                return Err(ParseError::Capacity {
                    limit: max_nodes,
                    location: ctx.offset_suffix(source, child.start),
                });
            }
            queue.push_back(child);
            queued += 1;
        }
        let hi = queued;

        let (lo, hi) = if lo == hi {
            (node.start, node.end)
        } else {
            (lo, hi)
        };
        nodes.push(FlatNode {
            lo,
            hi,
            kind: node.kind,
        });
    }

    tracing::debug!(nodes = nodes.len(), "flattened tree");
    Ok(FlatDocument { nodes })
}
