//! Lexical include extraction.
//!
//! Finds the literal `#include` directives of a source file without running a
//! preprocessor. Comments are honored, macros and conditional compilation are
//! not: every `#include` outside a comment is reported.
//!
//! The scanner is a small finite state machine fed one character at a time:
//!
//! ```text
//!   Code ──'#'──▶ Directive(n) ──"include"──▶ AwaitDelimiter ──'<' or '"'──▶ Token
//!    ▲  ╲                                                                      │
//!    │   ╲──"//"──▶ LineComment ──newline──▶ Code                              │
//!    │    ╲─"/*"──▶ BlockComment ──"*/"────▶ Code                              │
//!    └─────────────────────────── closing delimiter ◀──────────────────────────┘
//! ```
//!
//! Block comments do not nest, the first `*/` closes them.

use std::collections::BTreeSet;

const DIRECTIVE: &[u8] = b"include";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    LineComment,
    BlockComment,
    /// Number of characters of `include` matched so far
    Directive(usize),
    AwaitDelimiter,
    Token { close: char },
}

/// Character driven include scanner.
#[derive(Debug)]
struct IncludeScanner {
    state: ScanState,
    prev: Option<char>,
    token: String,
    includes: BTreeSet<String>,
}

impl IncludeScanner {
    fn new() -> Self {
        Self {
            state: ScanState::Code,
            prev: None,
            token: String::with_capacity(64),
            includes: BTreeSet::new(),
        }
    }

    fn feed(&mut self, c: char) {
        let prev = self.prev.replace(c);

        match self.state {
            ScanState::LineComment => {
                if c == '\n' || c == '\r' {
                    self.state = ScanState::Code;
                }
            }
            ScanState::BlockComment => {
                if prev == Some('*') && c == '/' {
                    self.state = ScanState::Code;
                    self.prev = None;
                }
            }
            ScanState::Token { close } => self.feed_token(c, close),
            _ => {
                if prev == Some('/') && c == '/' {
                    self.state = ScanState::LineComment;
                } else if prev == Some('/') && c == '*' {
                    self.state = ScanState::BlockComment;
                    // The '*' opening the comment must not close it again ("/*/")
                    self.prev = None;
                } else {
                    self.feed_directive(c);
                }
            }
        }
    }

    fn feed_directive(&mut self, c: char) {
        if c == '#' {
            self.state = ScanState::Directive(0);
            return;
        }

        self.state = match self.state {
            ScanState::Directive(matched) if DIRECTIVE.get(matched).is_some_and(|&b| b as char == c) => {
                if matched + 1 == DIRECTIVE.len() {
                    ScanState::AwaitDelimiter
                } else {
                    ScanState::Directive(matched + 1)
                }
            }
            ScanState::AwaitDelimiter if c == ' ' || c == '\t' => ScanState::AwaitDelimiter,
            ScanState::AwaitDelimiter if c == '"' || c == '<' => {
                self.token.clear();
                self.token.push(c);
                ScanState::Token {
                    close: if c == '<' { '>' } else { '"' },
                }
            }
            _ => ScanState::Code,
        };
    }

    fn feed_token(&mut self, c: char, close: char) {
        if c == '\n' || c == '\r' {
            // Unterminated include, not something a compiler would accept
            self.state = ScanState::Code;
            return;
        }

        self.token.push(c);
        if c == close {
            // Only the two delimiters means there is no path
            if self.token.len() > 2 {
                self.includes.insert(std::mem::take(&mut self.token));
            }
            self.state = ScanState::Code;
        }
    }

    fn finish(self) -> BTreeSet<String> {
        self.includes
    }
}

/// Extracts the targets of all include statements in `content` which are not
/// commented out.
///
/// The returned tokens keep their delimiters, e.g. `<vector>` or `"foo/bar.h"`.
pub fn extract_includes(content: &str) -> BTreeSet<String> {
    let mut scanner = IncludeScanner::new();
    for c in content.chars() {
        scanner.feed(c);
    }
    scanner.finish()
}
