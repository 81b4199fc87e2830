// WHY: explicit single-pass boundary scan using character-class predicates
// Replaces placeholder substitution so no input text can be mistaken for a protected decimal point

use super::normalization::is_space;
use super::BoundaryRules;

/// Token classification produced by the boundary scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Sentence text up to (not including) the next boundary
    Content,
    /// Marker run or line break, plus any whitespace that follows it
    Separator,
}

/// A contiguous slice of the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of `text` within the scanned input
    pub offset: usize,
}

impl Token<'_> {
    pub fn is_separator(&self) -> bool {
        self.kind == TokenKind::Separator
    }
}

/// Iterator over alternating content and separator tokens
///
/// Tokens are maximal and cover the input exactly: concatenating every
/// `text` in order reproduces the original string. Two separators can be
/// adjacent (a line break followed by a marker run), two content tokens
/// never are.
pub struct Tokenizer<'a, 'r> {
    text: &'a str,
    pos: usize,
    rules: &'r BoundaryRules,
}

impl<'a, 'r> Tokenizer<'a, 'r> {
    pub fn new(text: &'a str, rules: &'r BoundaryRules) -> Self {
        Self { text, pos: 0, rules }
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text[pos..].chars().next()
    }

    /// Boundary marker test including the decimal-point exception
    fn is_marker_at(&self, pos: usize, ch: char) -> bool {
        self.rules.is_marker(ch) && !(ch == '.' && is_decimal_point(self.text, pos))
    }

    fn is_boundary_at(&self, pos: usize, ch: char) -> bool {
        is_line_break(ch) || self.is_marker_at(pos, ch)
    }

    fn skip_markers(&self, mut pos: usize) -> usize {
        while let Some(ch) = self.char_at(pos) {
            if !self.is_marker_at(pos, ch) {
                break;
            }
            pos += ch.len_utf8();
        }
        pos
    }

    fn skip_whitespace(&self, mut pos: usize) -> usize {
        while let Some(ch) = self.char_at(pos) {
            if !is_space(ch) {
                break;
            }
            pos += ch.len_utf8();
        }
        pos
    }

    fn skip_content(&self, mut pos: usize) -> usize {
        while let Some(ch) = self.char_at(pos) {
            if self.is_boundary_at(pos, ch) {
                break;
            }
            pos += ch.len_utf8();
        }
        pos
    }
}

impl<'a> Iterator for Tokenizer<'a, '_> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let ch = self.char_at(start)?;

        let (kind, end) = if self.is_marker_at(start, ch) {
            let after_markers = self.skip_markers(start);
            (TokenKind::Separator, self.skip_whitespace(after_markers))
        } else if is_line_break(ch) {
            (TokenKind::Separator, self.skip_whitespace(start + ch.len_utf8()))
        } else {
            (TokenKind::Content, self.skip_content(start))
        };

        self.pos = end;
        Some(Token {
            kind,
            text: &self.text[start..end],
            offset: start,
        })
    }
}

/// `\r` counts as a break too so unnormalized input still splits per line
pub fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// True when the byte at `pos` is a `.` with an ASCII digit on both sides
///
/// Neighbours are read from the original text, so every period in a chain
/// such as `1.2.3` is protected independently.
pub fn is_decimal_point(text: &str, pos: usize) -> bool {
    if text.as_bytes().get(pos) != Some(&b'.') {
        return false;
    }
    let before = text[..pos].chars().next_back();
    let after = text[pos + 1..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
}
