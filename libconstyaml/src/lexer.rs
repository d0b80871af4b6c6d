//! Phase 2: Lexer
//!
//! The lexer converts scanned lines into a token stream. It tracks
//! indentation columns using a stack and emits:
//! - `Indent`: when a line opens one deeper scope
//! - `Dedent`: once per scope a line closes (a line may close several)
//! - `Scalar`, `Dash`, `Colon`: line content
//!
//! After the last line every open scope is closed, so the grammar always
//! sees a balanced stream.

use crate::scanner::{is_quote, Line, QuoteState};

/// Token type in the lexer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Entry into a nested block.
    Indent,
    /// Exit from a nested block.
    Dedent,
    /// Unquoted word run or quoted string contents.
    Scalar,
    /// List marker.
    Dash,
    /// Key separator.
    Colon,
}

/// A single token, addressing its text by byte offsets into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { start, end, kind }
    }

    /// Zero-width structural token at `at`.
    fn marker(kind: TokenKind, at: usize) -> Self {
        Self::new(kind, at, at)
    }
}

/// Space, newline, or end of line.
fn is_break(b: Option<&u8>) -> bool {
    matches!(b, None | Some(b' ') | Some(b'\n') | Some(b'\r'))
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r')
}

/// Position of the quote closing the span opened at `open`, if any.
fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let mut state = QuoteState::default();
    state.open(bytes[open]);
    bytes
        .iter()
        .enumerate()
        .skip(open + 1)
        .find_map(|(k, &b)| state.feed(b).then_some(k))
}

/// Convert lines to a token stream with indentation markers.
pub fn tokenize(source: &str, lines: &[Line]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for line in lines {
        match stack.last() {
            Some(&top) if top >= line.column => {
                while stack.last().is_some_and(|&top| top >= line.column) {
                    stack.pop();
                    tokens.push(Token::marker(TokenKind::Dedent, line.start));
                }
            }
            Some(_) => tokens.push(Token::marker(TokenKind::Indent, line.start)),
            None => {}
        }
        stack.push(line.column);

        lex_line(source, line, &mut tokens);
    }

    let end = source.len();
    tokens.extend(stack.iter().map(|_| Token::marker(TokenKind::Dedent, end)));

    tracing::debug!(tokens = tokens.len(), "lexed tokens");
    tokens
}

/// Emit the content tokens of one line.
fn lex_line(source: &str, line: &Line, tokens: &mut Vec<Token>) {
    let bytes = &source.as_bytes()[line.start..line.end];
    let base = line.start;
    let mut j = 0;

    while j < bytes.len() {
        let b = bytes[j];
        let next = bytes.get(j + 1);

        if b == b':' && is_break(next) {
            tokens.push(Token::new(TokenKind::Colon, base + j, base + j + 1));
            j += 2;
        } else if b == b'-' && is_break(next) {
            tokens.push(Token::new(TokenKind::Dash, base + j, base + j + 1));
            j += 2;
        } else if is_quote(b) {
            let close = closing_quote(bytes, j).unwrap_or(bytes.len());
            tokens.push(Token::new(TokenKind::Scalar, base + j + 1, base + close));
            j = close + 1;
        } else if is_blank(b) {
            j += 1;
        } else {
            match tokens.last_mut() {
                Some(last) if last.kind == TokenKind::Scalar => last.end = base + j + 1,
                _ => tokens.push(Token::new(TokenKind::Scalar, base + j, base + j + 1)),
            }
            j += 1;
        }
    }
}
