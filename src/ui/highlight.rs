//! SQL syntax highlighting
//!
//! Line-by-line tokenizer for the editor. Keywords come from
//! `data/sql_keywords.txt`, embedded at compile time. Block comments span
//! lines, so tokenization threads an `in_comment` flag from one line to
//! the next.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

/// Token classification for syntax highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    String,
    Number,
    Comment,
    Normal,
}

/// A classified byte range within one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// SQL keywords, embedded at compile time.
static SQL_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("../../data/sql_keywords.txt")
        .lines()
        .filter(|l| !l.is_empty())
        .collect()
});

/// Expose the embedded keyword set.
pub fn sql_keywords() -> &'static HashSet<&'static str> {
    &SQL_KEYWORDS
}

/// Tokenize one line.
///
/// `in_comment` says whether the line starts inside a `/* ... */` comment;
/// the returned flag says whether the next line does.
pub fn tokenize(line: &str, in_comment: bool) -> (Vec<Token>, bool) {
    let mut tokens = Vec::new();
    let mut scanner = Scanner {
        bytes: line.as_bytes(),
        pos: 0,
    };
    let mut in_comment = in_comment;

    while !scanner.done() {
        if in_comment {
            let start = scanner.pos;
            in_comment = !scanner.skip_to_comment_close();
            tokens.push(Token {
                kind: TokenKind::Comment,
                span: start..scanner.pos,
            });
            continue;
        }

        let start = scanner.pos;
        let kind = match scanner.peek() {
            b'-' if scanner.peek_next() == Some(b'-') => {
                // Line comment runs to end of line.
                scanner.pos = scanner.bytes.len();
                TokenKind::Comment
            }
            b'/' if scanner.peek_next() == Some(b'*') => {
                scanner.pos += 2;
                in_comment = !scanner.skip_to_comment_close();
                TokenKind::Comment
            }
            b'\'' => {
                scanner.skip_string_literal();
                TokenKind::String
            }
            b => {
                if is_number_start(b, scanner.peek_next()) {
                    scanner.skip_number();
                    TokenKind::Number
                } else if b.is_ascii_alphabetic() || b == b'_' {
                    scanner.skip_word();
                    let word = &line[start..scanner.pos];
                    if SQL_KEYWORDS.contains(word.to_ascii_uppercase().as_str()) {
                        TokenKind::Keyword
                    } else {
                        TokenKind::Normal
                    }
                } else {
                    scanner.pos += utf8_len(b);
                    TokenKind::Normal
                }
            }
        };
        tokens.push(Token {
            kind,
            span: start..scanner.pos,
        });
    }

    (tokens, in_comment)
}

/// Thread the block-comment flag through a line without building tokens.
/// Used to pre-scan lines above the visible viewport.
pub fn carry_comment_state(line: &str, in_comment: bool) -> bool {
    let mut scanner = Scanner {
        bytes: line.as_bytes(),
        pos: 0,
    };
    let mut in_comment = in_comment;
    while !scanner.done() {
        if in_comment {
            in_comment = !scanner.skip_to_comment_close();
        } else {
            match scanner.peek() {
                b'-' if scanner.peek_next() == Some(b'-') => return in_comment,
                b'/' if scanner.peek_next() == Some(b'*') => {
                    scanner.pos += 2;
                    in_comment = !scanner.skip_to_comment_close();
                }
                // Skip strings so `/*` inside a literal is not a comment.
                b'\'' => scanner.skip_string_literal(),
                b => scanner.pos += utf8_len(b),
            }
        }
    }
    in_comment
}

fn is_number_start(b: u8, next: Option<u8>) -> bool {
    b.is_ascii_digit() || (b == b'.' && next.is_some_and(|n| n.is_ascii_digit()))
}

fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b < 0xE0 => 2,
        b if b < 0xF0 => 3,
        _ => 4,
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        self.bytes[self.pos]
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    /// Advance past the closing `*/`. Returns true if it was found.
    fn skip_to_comment_close(&mut self) -> bool {
        while self.pos < self.bytes.len() {
            if self.peek() == b'*' && self.peek_next() == Some(b'/') {
                self.pos += 2;
                return true;
            }
            self.pos += 1;
        }
        false
    }

    /// Advance past a `'...'` literal with `''` escapes. An unterminated
    /// literal runs to end of line.
    fn skip_string_literal(&mut self) {
        self.pos += 1;
        while self.pos < self.bytes.len() {
            if self.peek() == b'\'' {
                self.pos += 1;
                if self.pos < self.bytes.len() && self.peek() == b'\'' {
                    self.pos += 1;
                    continue;
                }
                return;
            }
            self.pos += 1;
        }
    }

    /// Advance past digits with at most one decimal point.
    fn skip_number(&mut self) {
        let mut seen_dot = false;
        while self.pos < self.bytes.len() {
            let b = self.peek();
            if b.is_ascii_digit() {
                self.pos += 1;
            } else if b == b'.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        // A trailing dot belongs to what follows (e.g. `1.foo`), not to
        // the number.
        if seen_dot && self.pos > 0 && self.bytes[self.pos - 1] == b'.' {
            let followed_by_digit = self
                .bytes
                .get(self.pos)
                .is_some_and(|b| b.is_ascii_digit());
            if !followed_by_digit {
                self.pos -= 1;
            }
        }
    }

    /// Advance past an identifier/keyword word.
    fn skip_word(&mut self) {
        while self.pos < self.bytes.len() {
            let b = self.peek();
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}
