//! Parser for a small, indentation-based subset of YAML.
//!
//! Documents are block maps (`key: value`), block lists (`- item`) and
//! scalars, nested by indentation. Every scalar is kept as text; there are no
//! flow collections, anchors, tags, comments or block scalars.
//!
//! # Parsing Pipeline
//!
//! The parser operates in five phases, each consuming the previous one:
//!
//! 1. **Scanner**: Splits source text into lines and measures indentation,
//!    treating quoted spans as opaque.
//!
//! 2. **Lexer**: Converts lines into a token stream with explicit indent and
//!    dedent markers derived from an indentation stack.
//!
//! 3. **Tree Builder**: Shift-reduce parser that applies a fixed,
//!    priority-ordered rule table to build a syntax tree.
//!
//! 4. **Flattener**: Lays the tree out breadth-first in a flat array, bounded
//!    by [`ParseOptions::max_nodes`].
//!
//! 5. **Unfolder**: Decodes the flat array into a [`Value`].

mod error;
mod flatten;
mod lexer;
mod options;
mod parser;
mod scanner;
mod unfold;
mod value;

pub use error::{LookupError, ParseError, Result};
pub use flatten::{FlatDocument, FlatNode};
pub use options::{ParseOptions, DEFAULT_MAX_NODES};
pub use parser::NodeKind;
pub use value::Value;

/// Parse a document from a string.
///
/// # Example
///
/// ```
/// use libconstyaml::parse;
///
/// let value = parse("apple: 420\n").unwrap();
/// assert_eq!(value.lookup("apple").unwrap().as_str(), Some("420"));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Value> {
    let options = ParseOptions {
        filename: filename.map(String::from),
        ..ParseOptions::default()
    };
    parse_with_options(input, &options)
}

/// Parse a document with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    Ok(parse_flat(input, options)?.unfold(input))
}

/// Parse a document into its flat encoding without decoding it.
///
/// # Example
///
/// ```
/// use libconstyaml::{parse_flat, NodeKind, ParseOptions};
///
/// let doc = parse_flat("- a\n- b\n", &ParseOptions::default()).unwrap();
/// assert_eq!(doc.root().kind, NodeKind::List);
/// assert_eq!((doc.root().lo, doc.root().hi), (1, 3));
/// ```
pub fn parse_flat(input: &str, options: &ParseOptions) -> Result<FlatDocument> {
    let ctx = options.context();

    // Phase 1: Scan source into lines
    let lines = scanner::scan(input);

    // Phase 2: Convert lines to token stream
    let tokens = lexer::tokenize(input, &lines);

    // Phase 3: Reduce tokens to a single tree
    let tree = parser::build_tree(input, &tokens, &ctx)?;

    // Phase 4: Lay the tree out breadth-first
    flatten::flatten(&tree, options.max_nodes, input, &ctx)
}
