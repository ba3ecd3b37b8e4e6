//! A positional view over one line of input.

use std::borrow::Cow;
use std::cmp::min;

use crate::strings;

pub(crate) const TAB_STOP: usize = 4;
pub(crate) const CODE_INDENT: usize = 4;

/// A read position within a single line.
///
/// The cursor tracks both a byte offset and a column; tabs expand to the next
/// multiple of [`TAB_STOP`] columns.  When a tab is only partly consumed (a
/// list item whose content starts in the middle of a tab, say) the offset
/// stays on the tab and [`Cursor::remainder`] yields the unconsumed columns as
/// spaces.
///
/// The offset never leaves `0..=line.len()`; advancing past the end stops at
/// the end.
#[derive(Debug, Clone)]
pub struct Cursor<'l> {
    line: &'l str,
    offset: usize,
    column: usize,
    partially_consumed_tab: bool,
}

/// A saved cursor position, see [`Cursor::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    offset: usize,
    column: usize,
    partially_consumed_tab: bool,
}

impl<'l> Cursor<'l> {
    /// Create a cursor at the start of `line`, which must not include its terminator.
    pub fn new(line: &'l str) -> Self {
        Cursor {
            line,
            offset: 0,
            column: 0,
            partially_consumed_tab: false,
        }
    }

    /// The whole line.
    pub fn line(&self) -> &'l str {
        self.line
    }

    /// The current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The current 0-based column, with tabs expanded.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn partially_consumed_tab(&self) -> bool {
        self.partially_consumed_tab
    }

    /// The character at the current offset.
    pub fn peek(&self) -> Option<char> {
        self.line[self.offset..].chars().next()
    }

    /// The character `n` characters past the current offset.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.line[self.offset..].chars().nth(n)
    }

    /// Byte offset and column of the next character that is neither space nor tab.
    fn scan_nonspace(&self) -> (usize, usize) {
        let bytes = self.line.as_bytes();
        let mut chars_to_tab = TAB_STOP - (self.column % TAB_STOP);
        let mut first_nonspace = self.offset;
        let mut first_nonspace_column = self.column;

        loop {
            match bytes.get(first_nonspace) {
                Some(b' ') => {
                    first_nonspace += 1;
                    first_nonspace_column += 1;
                    chars_to_tab -= 1;
                    if chars_to_tab == 0 {
                        chars_to_tab = TAB_STOP;
                    }
                }
                Some(b'\t') => {
                    first_nonspace += 1;
                    first_nonspace_column += chars_to_tab;
                    chars_to_tab = TAB_STOP;
                }
                _ => break,
            }
        }

        (first_nonspace, first_nonspace_column)
    }

    /// Byte offset of the next non-space character, or the line length.
    pub fn next_nonspace(&self) -> usize {
        self.scan_nonspace().0
    }

    /// Column of the next non-space character.
    pub fn next_nonspace_column(&self) -> usize {
        self.scan_nonspace().1
    }

    /// The next non-space character, if any.
    pub fn next_nonspace_char(&self) -> Option<char> {
        self.line[self.next_nonspace()..].chars().next()
    }

    /// Columns of whitespace between the cursor and the next non-space character.
    pub fn indent(&self) -> usize {
        self.next_nonspace_column() - self.column
    }

    /// Whether the indentation is deep enough for indented code.
    pub fn is_indented(&self) -> bool {
        self.indent() >= CODE_INDENT
    }

    /// Whether only spaces and tabs remain.
    pub fn is_blank(&self) -> bool {
        self.next_nonspace() == self.line.len()
    }

    /// Whether the cursor is at the end of the line.
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.line.len()
    }

    /// Consume `count` characters, or `count` columns when `columns` is set.
    /// Consuming by columns may leave a tab partially consumed.
    pub fn advance_by(&mut self, mut count: usize, columns: bool) {
        let bytes = self.line.as_bytes();
        while count > 0 && self.offset < bytes.len() {
            match bytes[self.offset] {
                b'\t' => {
                    let chars_to_tab = TAB_STOP - (self.column % TAB_STOP);
                    if columns {
                        self.partially_consumed_tab = chars_to_tab > count;
                        let chars_to_advance = min(count, chars_to_tab);
                        self.column += chars_to_advance;
                        if !self.partially_consumed_tab {
                            self.offset += 1;
                        }
                        count -= chars_to_advance;
                    } else {
                        self.partially_consumed_tab = false;
                        self.column += chars_to_tab;
                        self.offset += 1;
                        count -= 1;
                    }
                }
                _ => {
                    let width = self.line[self.offset..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    self.partially_consumed_tab = false;
                    self.offset += width;
                    self.column += 1;
                    count -= 1;
                }
            }
        }
    }

    /// Consume one character.
    pub fn advance(&mut self) {
        self.advance_by(1, false);
    }

    /// Consume a single space or tab column if one is next.
    pub fn advance_by_space_or_tab(&mut self) -> bool {
        match self.line.as_bytes().get(self.offset) {
            Some(&c) if strings::is_space_or_tab(c) => {
                self.advance_by(1, true);
                true
            }
            _ => false,
        }
    }

    /// Skip spaces and tabs, returning the number of columns skipped.
    pub fn advance_to_next_nonspace(&mut self) -> usize {
        let (first_nonspace, first_nonspace_column) = self.scan_nonspace();
        let skipped = first_nonspace_column - self.column;
        self.offset = first_nonspace;
        self.column = first_nonspace_column;
        self.partially_consumed_tab = false;
        skipped
    }

    /// Consume the rest of the line.
    pub fn advance_to_end(&mut self) {
        // Every character is at least one byte.
        self.advance_by(self.line.len() - self.offset, false);
    }

    /// The unconsumed text.  The unconsumed columns of a partially consumed tab
    /// are rendered as spaces.
    pub fn remainder(&self) -> Cow<'l, str> {
        if self.partially_consumed_tab {
            let chars_to_tab = TAB_STOP - (self.column % TAB_STOP);
            let mut s = " ".repeat(chars_to_tab);
            s.push_str(&self.line[self.offset + 1..]);
            Cow::Owned(s)
        } else {
            Cow::Borrowed(&self.line[self.offset..])
        }
    }

    /// Save the position for [`Cursor::restore`].
    pub fn state(&self) -> CursorState {
        CursorState {
            offset: self.offset,
            column: self.column,
            partially_consumed_tab: self.partially_consumed_tab,
        }
    }

    /// Return to a position saved earlier on this line.
    pub fn restore(&mut self, state: CursorState) {
        self.offset = min(state.offset, self.line.len());
        self.column = state.column;
        self.partially_consumed_tab = state.partially_consumed_tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_expands_tabs() {
        let c = Cursor::new("  \tfoo");
        assert_eq!(c.indent(), 4);
        assert_eq!(c.next_nonspace(), 3);
        assert!(c.is_indented());
        assert_eq!(c.next_nonspace_char(), Some('f'));
    }

    #[test]
    fn advance_clamps_at_end() {
        let mut c = Cursor::new("ab");
        c.advance_by(10, false);
        assert_eq!(c.offset(), 2);
        assert!(c.is_at_end());
        assert_eq!(c.peek(), None);
        assert_eq!(c.remainder(), "");
    }

    #[test]
    fn partial_tab() {
        let mut c = Cursor::new("-\tfoo");
        c.advance();
        c.advance_by(1, true);
        assert!(c.partially_consumed_tab());
        assert_eq!(c.column(), 2);
        assert_eq!(c.remainder(), "  foo");
        assert_eq!(c.indent(), 2);
    }

    #[test]
    fn save_and_restore() {
        let mut c = Cursor::new("   > quote");
        let saved = c.state();
        assert_eq!(c.advance_to_next_nonspace(), 3);
        assert_eq!(c.peek(), Some('>'));
        c.advance();
        assert!(c.advance_by_space_or_tab());
        assert_eq!(c.remainder(), "quote");
        c.restore(saved);
        assert_eq!(c.offset(), 0);
        assert_eq!(c.remainder(), "   > quote");
    }

    #[test]
    fn blank_and_multibyte() {
        assert!(Cursor::new(" \t ").is_blank());
        assert!(Cursor::new("").is_blank());
        let mut c = Cursor::new("•é x");
        c.advance_by(2, false);
        assert_eq!(c.column(), 2);
        assert_eq!(c.peek(), Some(' '));
        assert_eq!(c.peek_at(1), Some('x'));
    }
}
