//! Parser configuration.

use crate::error::ParseContext;

/// Default upper bound on the number of nodes in a flattened document.
pub const DEFAULT_MAX_NODES: usize = 1024;

/// Options controlling a single parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name reported in error locations.
    pub filename: Option<String>,
    /// Hard limit on flattened nodes; exceeding it is a capacity error.
    pub max_nodes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filename: None,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl ParseOptions {
    /// Options without a node limit.
    pub fn unbounded() -> Self {
        Self {
            max_nodes: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub(crate) fn context(&self) -> ParseContext {
        ParseContext::new(self.filename.as_deref())
    }
}
