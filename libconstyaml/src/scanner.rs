//! Phase 1: Scanner
//!
//! The scanner splits source text into logical lines and measures the
//! indentation column of each. It:
//! - Counts leading spaces, plus one column for a leading list dash
//! - Drops blank and whitespace-only lines
//! - Treats quoted spans as opaque, so a newline inside quotes does not end
//!   the line

/// A single non-blank line after the scanning phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Byte offset where the line begins (including its indentation).
    pub start: usize,
    /// Byte offset of the terminating newline, or the end of the source.
    pub end: usize,
    /// Indentation column. A leading "-" counts as one extra column.
    pub column: usize,
}

/// Whether a byte is an opening or closing quote.
pub(crate) fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// Blank characters that never start a line's content.
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\r'
}

/// Tracks an open quoted span and the escape state inside it.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteState {
    open: Option<u8>,
    escaped: bool,
}

impl QuoteState {
    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub(crate) fn open(&mut self, quote: u8) {
        self.open = Some(quote);
        self.escaped = false;
    }

    /// Feed one byte of quoted content. Returns `true` if it closed the span.
    pub(crate) fn feed(&mut self, b: u8) -> bool {
        if self.escaped {
            self.escaped = false;
        } else if b == b'\\' {
            self.escaped = true;
        } else if Some(b) == self.open {
            self.open = None;
            return true;
        }
        false
    }
}

/// Scan source text into lines.
pub fn scan(source: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut quote = QuoteState::default();
    let mut start = 0;
    let mut column = 0;
    let mut seen_content = false;

    for (i, &b) in source.as_bytes().iter().enumerate() {
        if quote.is_open() {
            quote.feed(b);
            continue;
        }

        if b == b'\n' {
            if seen_content {
                lines.push(Line {
                    start,
                    end: i,
                    column,
                });
            }
            start = i + 1;
            column = 0;
            seen_content = false;
        } else if is_blank(b) {
            if !seen_content && b == b' ' {
                column += 1;
            }
        } else {
            if !seen_content && b == b'-' {
                column += 1;
            }
            seen_content = true;
            if is_quote(b) {
                quote.open(b);
            }
        }
    }

    if seen_content {
        lines.push(Line {
            start,
            end: source.len(),
            column,
        });
    }

    tracing::debug!(lines = lines.len(), "scanned lines");
    lines
}
