//! Link reference definitions at the start of a paragraph.

use crate::nodes::ResolvedReference;
use crate::strings::{self, is_space_or_tab};

const MAX_LABEL_LENGTH: usize = 999;

/// A definition parsed from the front of some paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub label: String,
    pub reference: ResolvedReference,
}

/// Parse as many definitions as possible from the start of `content`,
/// returning them with the text that follows.
pub fn parse_definitions(content: &str) -> (Vec<Definition>, &str) {
    let mut defs = Vec::new();
    let mut rest = content;
    while let Some((def, used)) = parse_definition(rest) {
        defs.push(def);
        rest = &rest[used..];
    }
    (defs, rest)
}

/// The text of `content` after any leading definitions.
pub fn strip_definitions(content: &str) -> &str {
    parse_definitions(content).1
}

struct Scanner<'s> {
    s: &'s str,
    pos: usize,
}

impl<'s> Scanner<'s> {
    fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.pos).copied()
    }

    fn skip_spaces(&mut self) -> usize {
        let start = self.pos;
        while self.peek().map_or(false, is_space_or_tab) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip spaces and tabs with at most one line ending among them.
    /// Returns whether any whitespace was skipped and whether a newline was.
    fn skip_spaces_and_newline(&mut self) -> (bool, bool) {
        let start = self.pos;
        self.skip_spaces();
        let mut newline = false;
        if self.peek() == Some(b'\n') {
            newline = true;
            self.pos += 1;
            self.skip_spaces();
        }
        (self.pos > start, newline)
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\n'))
    }

    fn label(&mut self) -> Option<&'s str> {
        if self.peek() != Some(b'[') {
            return None;
        }
        self.pos += 1;
        let start = self.pos;
        loop {
            match self.peek()? {
                b'\\' => {
                    self.pos += 1;
                    if self.peek().map_or(false, strings::is_ascii_punctuation) {
                        self.pos += 1;
                    }
                }
                b'[' => return None,
                b']' => break,
                _ => self.pos += 1,
            }
            if self.pos - start > MAX_LABEL_LENGTH {
                return None;
            }
        }
        let label = &self.s[start..self.pos];
        self.pos += 1;
        if strings::is_blank(label) {
            return None;
        }
        Some(label)
    }

    fn destination(&mut self) -> Option<&'s str> {
        if self.peek() == Some(b'<') {
            self.pos += 1;
            let start = self.pos;
            loop {
                match self.peek()? {
                    b'>' => break,
                    b'<' | b'\n' => return None,
                    b'\\' => {
                        self.pos += 1;
                        if self.peek().map_or(false, strings::is_ascii_punctuation) {
                            self.pos += 1;
                        }
                    }
                    _ => self.pos += 1,
                }
            }
            let dest = &self.s[start..self.pos];
            self.pos += 1;
            return Some(dest);
        }

        let start = self.pos;
        let mut parens = 0usize;
        while let Some(c) = self.peek() {
            match c {
                b'\\' => {
                    self.pos += 1;
                    if self.peek().map_or(false, strings::is_ascii_punctuation) {
                        self.pos += 1;
                    }
                    continue;
                }
                b'(' => parens += 1,
                b')' if parens == 0 => break,
                b')' => parens -= 1,
                c if c <= b' ' || c == 0x7f => break,
                _ => {}
            }
            self.pos += 1;
        }
        if self.pos == start || parens != 0 {
            return None;
        }
        Some(&self.s[start..self.pos])
    }

    fn title(&mut self) -> Option<&'s str> {
        let close = match self.peek()? {
            b'"' => b'"',
            b'\'' => b'\'',
            b'(' => b')',
            _ => return None,
        };
        self.pos += 1;
        let start = self.pos;
        loop {
            match self.peek()? {
                b'\\' => {
                    self.pos += 1;
                    if self.peek().map_or(false, strings::is_ascii_punctuation) {
                        self.pos += 1;
                    }
                }
                c if c == close => break,
                b'(' if close == b')' => return None,
                b'\n' => {
                    self.pos += 1;
                    let line_start = self.pos;
                    self.skip_spaces();
                    if self.at_line_end() {
                        return None;
                    }
                    self.pos = line_start;
                }
                _ => self.pos += 1,
            }
        }
        let title = &self.s[start..self.pos];
        self.pos += 1;
        Some(title)
    }

    /// Consume the rest of the line if it is blank.
    fn finish_line(&mut self) -> bool {
        self.skip_spaces();
        match self.peek() {
            None => true,
            Some(b'\n') => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }
}

/// Parse one definition from the start of `s`, returning it and the number of
/// bytes it spans including its final line ending.
fn parse_definition(s: &str) -> Option<(Definition, usize)> {
    let mut sc = Scanner { s, pos: 0 };
    if sc.skip_spaces() > 3 {
        return None;
    }
    let label = sc.label()?;
    if sc.peek() != Some(b':') {
        return None;
    }
    sc.pos += 1;
    sc.skip_spaces_and_newline();
    let dest = sc.destination()?;

    let after_dest = sc.pos;
    let (spaced, newline) = sc.skip_spaces_and_newline();
    let title = if spaced { sc.title() } else { None };

    let title = match title {
        Some(t) if sc.finish_line() => t,
        _ => {
            // The title (if any) is not part of the definition; it must then
            // end with the destination's line.
            sc.pos = after_dest;
            if !sc.finish_line() {
                return None;
            }
            if newline || title.is_none() {
                ""
            } else {
                return None;
            }
        }
    };

    let def = Definition {
        label: strings::normalize_label(label),
        reference: ResolvedReference {
            url: strings::unescape(dest),
            title: strings::unescape(title),
        },
    };
    Some((def, sc.pos))
}
