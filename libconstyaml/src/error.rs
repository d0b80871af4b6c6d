//! Error types for parsing and for looking up values in a parsed document.

use thiserror::Error;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    ///
    /// Locations are only rendered when a filename is known; `line` and `col`
    /// are zero-based.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => String::new(),
        }
    }

    /// Location suffix for a byte offset into `source`.
    pub fn offset_suffix(&self, source: &str, offset: usize) -> String {
        let (line, col) = line_col(source, offset);
        self.loc_suffix(line, col)
    }
}

/// Zero-based line and column (in characters) of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count();
    (line, col)
}

/// Fatal parse failure. There is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tree builder finished with more than one top-level node.
    #[error("Invalid document structure: {nodes} top-level nodes remain{location}")]
    Structural { nodes: usize, location: String },

    /// The flattened document needs more nodes than the configured maximum.
    #[error("Document exceeds node capacity of {limit}{location}")]
    Capacity { limit: usize, location: String },
}

/// Failure to find a value inside a parsed document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No entry with this key.
    #[error("Key not found: {0:?}")]
    NotFound(String),

    /// The value is not the kind of container the operation needs.
    #[error("Expected {expected}, found {found}")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },

    /// List index past the end.
    #[error("Index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_suffix_without_filename() {
        let ctx = ParseContext::new(None);
        assert_eq!(ctx.loc_suffix(3, 4), "");
    }

    #[test]
    fn test_offset_suffix() {
        let ctx = ParseContext::new(Some("doc.yaml"));
        let source = "a: 1\nbb: 2\n";
        assert_eq!(ctx.offset_suffix(source, 0), " at 1:1 of <doc.yaml>");
        assert_eq!(ctx.offset_suffix(source, 6), " at 2:2 of <doc.yaml>");
        assert_eq!(ctx.offset_suffix(source, 100), " at 3:1 of <doc.yaml>");
    }

    #[test]
    fn test_messages() {
        let err = ParseError::Capacity {
            limit: 4,
            location: String::new(),
        };
        assert_eq!(err.to_string(), "Document exceeds node capacity of 4");

        let err = LookupError::OutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "Index 3 out of range for list of length 2"
        );
    }
}
