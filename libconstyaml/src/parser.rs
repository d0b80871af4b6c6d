//! Phase 3: Tree Builder
//!
//! A shift-reduce parser. Each token is shifted onto a stack as a leaf node,
//! then the rule table is scanned top to bottom and the first rule whose
//! pattern matches the top of the stack is reduced. Scanning restarts from
//! the first rule after every reduction until no rule applies, so the table
//! order is the tie-break whenever several rules could fire.
//!
//! An `Obj` node is a value closed by a dedent. It only lives on the stack:
//! entries and items unwrap it, and a root `Obj` is unwrapped in `finish`.

use crate::error::{ParseContext, ParseError, Result};
use crate::lexer::{Token, TokenKind};

/// Node kind, covering both tree nodes and tokens shifted onto the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Placeholder for a missing value.
    None,
    Indent,
    Dedent,
    Scalar,
    Dash,
    Colon,
    /// Children alternate key, value.
    Map,
    List,
    /// Single child, terminated by a dedent.
    Obj,
}

impl From<TokenKind> for NodeKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Indent => NodeKind::Indent,
            TokenKind::Dedent => NodeKind::Dedent,
            TokenKind::Scalar => NodeKind::Scalar,
            TokenKind::Dash => NodeKind::Dash,
            TokenKind::Colon => NodeKind::Colon,
        }
    }
}

/// A node of the syntax tree, spanning `start..end` of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub start: usize,
    pub end: usize,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

impl Default for TreeNode {
    fn default() -> Self {
        Self::leaf(NodeKind::None, 0, 0)
    }
}

impl From<Token> for TreeNode {
    fn from(token: Token) -> Self {
        Self::leaf(token.kind.into(), token.start, token.end)
    }
}

impl TreeNode {
    fn leaf(kind: NodeKind, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind,
            children: Vec::new(),
        }
    }

    /// The wrapped value of an `Obj`; any other node is returned as is.
    fn unwrap_obj(self) -> TreeNode {
        match self.kind {
            NodeKind::Obj => self.children.into_iter().next().unwrap_or_default(),
            _ => self,
        }
    }
}

/// How a matched pattern collapses into a single node.
#[derive(Debug, Clone, Copy)]
enum Reduction {
    /// Close a value with the dedent that follows it.
    Wrap,
    /// Key, colon, value (possibly with an indent in between).
    Entry,
    /// Key and colon with nothing before the dedent.
    EmptyEntry,
    /// List marker followed by a closed value.
    Item,
    /// List marker with nothing before the dedent.
    EmptyItem,
    /// Two adjacent containers of the same kind.
    Merge(NodeKind),
}

impl Reduction {
    /// Build the replacement node from the first and last nodes of the match.
    /// Nodes in between are pure punctuation.
    fn apply(self, first: TreeNode, last: TreeNode) -> TreeNode {
        let (start, end) = (first.start, last.end);
        let (kind, children) = match self {
            Reduction::Wrap => (NodeKind::Obj, vec![first]),
            Reduction::Entry => (NodeKind::Map, vec![first, last.unwrap_obj()]),
            Reduction::EmptyEntry => (NodeKind::Map, vec![first, TreeNode::default()]),
            Reduction::Item => (NodeKind::List, vec![last.unwrap_obj()]),
            Reduction::EmptyItem => (NodeKind::List, vec![TreeNode::default()]),
            Reduction::Merge(kind) => {
                let mut children = first.children;
                children.extend(last.children);
                (kind, children)
            }
        };
        TreeNode {
            start,
            end,
            kind,
            children,
        }
    }
}

/// A grammar rule: a stack-suffix pattern and its reduction.
struct Rule {
    pattern: &'static [NodeKind],
    reduction: Reduction,
}

use NodeKind::{Colon, Dash, Dedent, Indent, List, Map, Obj, Scalar};

/// The grammar, in priority order.
const RULES: &[Rule] = &[
    Rule {
        pattern: &[Scalar, Dedent],
        reduction: Reduction::Wrap,
    },
    Rule {
        pattern: &[List, Dedent],
        reduction: Reduction::Wrap,
    },
    Rule {
        pattern: &[Map, Dedent],
        reduction: Reduction::Wrap,
    },
    Rule {
        pattern: &[Scalar, Colon, Obj],
        reduction: Reduction::Entry,
    },
    Rule {
        pattern: &[Scalar, Colon, Indent, Obj],
        reduction: Reduction::Entry,
    },
    Rule {
        pattern: &[Scalar, Colon, Dedent],
        reduction: Reduction::EmptyEntry,
    },
    Rule {
        pattern: &[Map, Map],
        reduction: Reduction::Merge(Map),
    },
    Rule {
        pattern: &[Dash, Obj],
        reduction: Reduction::Item,
    },
    Rule {
        pattern: &[Dash, Dedent],
        reduction: Reduction::EmptyItem,
    },
    Rule {
        pattern: &[List, List],
        reduction: Reduction::Merge(List),
    },
];

/// Shift-reduce tree builder.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<TreeNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift one token and reduce to a fixed point.
    pub fn push(&mut self, token: Token) {
        self.stack.push(token.into());
        while self.reduce_once() {}
    }

    /// Apply the first matching rule. Returns `false` if none matched.
    fn reduce_once(&mut self) -> bool {
        let Some(rule) = RULES.iter().find(|rule| self.matches(rule.pattern)) else {
            return false;
        };

        let base = self.stack.len() - rule.pattern.len();
        let mut matched = self.stack.drain(base..);
        let (Some(first), Some(last)) = (matched.next(), matched.next_back()) else {
            unreachable!("every pattern spans at least two nodes");
        };
        drop(matched);

        tracing::trace!(rule = ?rule.pattern, reduction = ?rule.reduction, "reduce");
        self.stack.push(rule.reduction.apply(first, last));
        true
    }

    fn matches(&self, pattern: &[NodeKind]) -> bool {
        self.stack.len() >= pattern.len()
            && self.stack[self.stack.len() - pattern.len()..]
                .iter()
                .zip(pattern)
                .all(|(node, kind)| node.kind == *kind)
    }

    /// Finish parsing and return the document root.
    ///
    /// An empty stack yields a `None` root. More than one remaining node
    /// means the input had no single consistent structure.
    pub fn finish(mut self, source: &str, ctx: &ParseContext) -> Result<TreeNode> {
        if self.stack.len() > 1 {
            let location = ctx.offset_suffix(source, self.stack[1].start);
            return Err(ParseError::Structural {
                nodes: self.stack.len(),
                location,
            });
        }
        Ok(self.stack.pop().unwrap_or_default().unwrap_obj())
    }
}

/// Build the syntax tree for a token stream.
pub fn build_tree(source: &str, tokens: &[Token], ctx: &ParseContext) -> Result<TreeNode> {
    let mut builder = TreeBuilder::new();
    for &token in tokens {
        builder.push(token);
    }
    builder.finish(source, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::scanner::scan;

    fn build(source: &str) -> Result<TreeNode> {
        let tokens = tokenize(source, &scan(source));
        build_tree(source, &tokens, &ParseContext::new(None))
    }

    fn child_kinds(node: &TreeNode) -> Vec<NodeKind> {
        node.children.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_scalar_root_is_unwrapped() {
        let root = build("test\n").unwrap();
        assert_eq!(root.kind, Scalar);
        assert_eq!((root.start, root.end), (0, 4));
    }

    #[test]
    fn test_map_entries_merge() {
        let root = build("foo: bar\napple: 420\norange: 69\n").unwrap();
        assert_eq!(root.kind, Map);
        assert_eq!(root.children.len(), 6);
        assert!(root.children.iter().all(|c| c.kind == Scalar));
    }

    #[test]
    fn test_list_items_merge() {
        let root = build("- foo\n- bar\n- 50\n").unwrap();
        assert_eq!(root.kind, List);
        assert_eq!(child_kinds(&root), vec![Scalar, Scalar, Scalar]);
    }

    #[test]
    fn test_nested_values_are_unwrapped() {
        let root = build("a:\n  x: 99\n  y:\n  - 4\n  - 5\nb: 2\n").unwrap();
        assert_eq!(root.kind, Map);
        assert_eq!(child_kinds(&root), vec![Scalar, Map, Scalar, Scalar]);
        let inner = &root.children[1];
        assert_eq!(child_kinds(inner), vec![Scalar, Scalar, Scalar, List]);
        assert_eq!(child_kinds(&inner.children[3]), vec![Scalar, Scalar]);
    }

    #[test]
    fn test_empty_values() {
        let root = build("key:\n").unwrap();
        assert_eq!(child_kinds(&root), vec![Scalar, NodeKind::None]);

        let root = build("- \n").unwrap();
        assert_eq!(root.kind, List);
        assert_eq!(child_kinds(&root), vec![NodeKind::None]);
    }

    #[test]
    fn test_rule_order_prefers_wrap() {
        // "b" followed by a dedent wraps before the entry rule sees the stack.
        let mut builder = TreeBuilder::new();
        let source = "a: b";
        builder.push(Token {
            start: 0,
            end: 1,
            kind: TokenKind::Scalar,
        });
        builder.push(Token {
            start: 1,
            end: 2,
            kind: TokenKind::Colon,
        });
        builder.push(Token {
            start: 3,
            end: 4,
            kind: TokenKind::Scalar,
        });
        assert_eq!(builder.stack.len(), 3);
        builder.push(Token {
            start: 4,
            end: 4,
            kind: TokenKind::Dedent,
        });
        assert_eq!(builder.stack.len(), 1);
        let root = builder.finish(source, &ParseContext::new(None)).unwrap();
        assert_eq!(root.kind, Map);
        assert_eq!((root.start, root.end), (0, 4));
    }

    #[test]
    fn test_two_roots_is_structural_error() {
        let err = build("foo\nbar\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                nodes: 2,
                location: String::new()
            }
        );
    }

    #[test]
    fn test_structural_error_location() {
        let source = "foo\nbar\n";
        let tokens = tokenize(source, &scan(source));
        let err = build_tree(source, &tokens, &ParseContext::new(Some("two.yaml"))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid document structure: 2 top-level nodes remain at 2:1 of <two.yaml>"
        );
    }

    #[test]
    fn test_empty_document() {
        let root = build("").unwrap();
        assert_eq!(root, TreeNode::default());
    }
}
