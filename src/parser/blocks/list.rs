//! Lists and list items.
//!
//! A list has no marker of its own: it stays open for as long as something
//! inside it does, and the start parser decides whether a new item joins the
//! list just matched or starts a new one.

use log::trace;

use crate::nodes::{ListDelimType, ListType, NodeId, NodeList, NodeValue, Tree};
use crate::parser::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, BlockStartParser, ParserState,
};
use crate::parser::cursor::Cursor;
use crate::parser::options::ConfigError;
use crate::strings;

/// Ordinals longer than this are not list markers.
const MAX_ORDERED_DIGITS: usize = 9;

#[derive(Debug)]
pub struct ListBlockParser {
    data: NodeList,
}

impl ListBlockParser {
    fn determine_list_tight(tree: &Tree, node: NodeId) -> bool {
        let mut ch = tree.first_child(node);

        while let Some(item) = ch {
            if tree[item].last_line_blank && tree.next_sibling(item).is_some() {
                return false;
            }

            let mut subch = tree.first_child(item);
            while let Some(subitem) = subch {
                if (tree.next_sibling(item).is_some() || tree.next_sibling(subitem).is_some())
                    && tree.ends_with_blank_line(subitem)
                {
                    return false;
                }
                subch = tree.next_sibling(subitem);
            }

            ch = tree.next_sibling(item);
        }

        true
    }
}

impl BlockContinueParser for ListBlockParser {
    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&self, child: &NodeValue) -> bool {
        matches!(child, NodeValue::Item(..))
    }

    fn try_continue(&mut self, _: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        Some(BlockContinue::Matched)
    }

    fn close_block(&mut self, tree: &mut Tree, node: NodeId) {
        self.data.tight = Self::determine_list_tight(tree, node);

        let items: Vec<_> = tree.children(node).collect();
        for item in items {
            if let NodeValue::Item(ref mut nl) = tree[item].value {
                nl.tight = self.data.tight;
            }
        }
        if let NodeValue::List(ref mut nl) = tree[node].value {
            nl.tight = self.data.tight;
        }
    }
}

#[derive(Debug)]
pub struct ListItemParser {
    data: NodeList,
}

impl BlockContinueParser for ListItemParser {
    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&self, child: &NodeValue) -> bool {
        child.block() && !matches!(child, NodeValue::Item(..))
    }

    fn try_continue(&mut self, cursor: &mut Cursor<'_>, ctx: &BlockContext<'_>) -> Option<BlockContinue> {
        let required = self.data.marker_offset + self.data.padding;
        if cursor.indent() >= required {
            cursor.advance_by(required, true);
            Some(BlockContinue::Matched)
        } else if cursor.is_blank() && ctx.tree.first_child(ctx.node).is_some() {
            // An item may begin with at most one blank line.
            cursor.advance_to_next_nonspace();
            Some(BlockContinue::Matched)
        } else {
            None
        }
    }
}

/// Opens lists and list items.
///
/// Bullet markers come from configuration (`-`, `*` and `+` by default);
/// ordered markers are one to nine digits followed by `.` or `)`.
#[derive(Debug, Clone)]
pub struct ListBlockStartParser {
    bullet_markers: Vec<char>,
}

impl Default for ListBlockStartParser {
    fn default() -> Self {
        ListBlockStartParser {
            bullet_markers: vec!['-', '*', '+'],
        }
    }
}

impl ListBlockStartParser {
    /// Build a start parser for the given bullet markers.  Each must be a
    /// single character other than a digit, space, or tab.
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Result<Self, ConfigError> {
        if markers.is_empty() {
            return Err(ConfigError::invalid(
                "unordered_list_markers",
                "a non-empty array of strings",
            ));
        }

        let mut bullet_markers = Vec::with_capacity(markers.len());
        for marker in markers {
            let mut chars = marker.as_ref().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_ascii_digit() && c != ' ' && c != '\t' => {
                    bullet_markers.push(c)
                }
                _ => {
                    return Err(ConfigError::invalid(
                        "unordered_list_markers",
                        "an array of single-character strings",
                    ))
                }
            }
        }

        Ok(ListBlockStartParser { bullet_markers })
    }

    pub fn bullet_markers(&self) -> &[char] {
        &self.bullet_markers
    }

    /// Parse a list marker at the cursor, which must be on the marker's first
    /// character.  Returns the marker's width in columns.
    fn parse_list_marker(
        &self,
        cursor: &Cursor<'_>,
        interrupts_paragraph: bool,
    ) -> Option<(usize, NodeList)> {
        let rest = &cursor.line()[cursor.offset()..];
        let c = rest.chars().next()?;

        if self.bullet_markers.contains(&c) {
            let after = &rest[c.len_utf8()..];
            if !ends_marker(after) {
                return None;
            }
            if interrupts_paragraph && strings::is_blank(after) {
                return None;
            }
            return Some((
                1,
                NodeList {
                    list_type: ListType::Bullet,
                    bullet_char: Some(c),
                    ..NodeList::default()
                },
            ));
        }

        if c.is_ascii_digit() {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits > MAX_ORDERED_DIGITS {
                return None;
            }
            let start: usize = rest[..digits].parse().ok()?;
            if interrupts_paragraph && start != 1 {
                return None;
            }
            let delimiter = match rest.as_bytes().get(digits) {
                Some(b'.') => ListDelimType::Period,
                Some(b')') => ListDelimType::Paren,
                _ => return None,
            };
            let after = &rest[digits + 1..];
            if !ends_marker(after) {
                return None;
            }
            if interrupts_paragraph && strings::is_blank(after) {
                return None;
            }
            return Some((
                digits + 1,
                NodeList {
                    list_type: ListType::Ordered,
                    start,
                    delimiter: Some(delimiter),
                    ..NodeList::default()
                },
            ));
        }

        None
    }
}

fn ends_marker(after: &str) -> bool {
    matches!(after.bytes().next(), None | Some(b' ' | b'\t'))
}

impl BlockStartParser for ListBlockStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, state: &ParserState<'_>) -> Option<BlockStart> {
        if cursor.is_indented() {
            return None;
        }

        let marker_offset = cursor.indent();
        cursor.advance_to_next_nonspace();
        let interrupts_paragraph = state.paragraph_content().is_some();
        let (matched, mut nl) = self.parse_list_marker(cursor, interrupts_paragraph)?;
        cursor.advance_by(matched, false);

        // Measure the whitespace after the marker, up to five columns.
        let saved = cursor.state();
        let save_column = cursor.column();
        while cursor.column() - save_column <= 5 && matches!(cursor.peek(), Some(' ' | '\t')) {
            cursor.advance_by(1, true);
        }
        let i = cursor.column() - save_column;

        if !(1..5).contains(&i) || cursor.is_at_end() {
            // Content starting five or more columns out is indented code
            // inside the item; an empty item needs one column.
            nl.padding = matched + 1;
            cursor.restore(saved);
            if i > 0 {
                cursor.advance_by(1, true);
            }
        } else {
            nl.padding = matched + i;
        }
        nl.marker_offset = marker_offset;

        trace!(
            "list marker {:?} at column {}, padding {}",
            nl.list_type,
            marker_offset,
            nl.padding
        );

        let item = (NodeValue::Item(nl), Box::new(ListItemParser { data: nl }));
        match state.tree()[state.last_matched_block()].value {
            NodeValue::List(ref open) if open.matches(&nl) => Some(BlockStart::of(item.0, item.1)),
            _ => Some(
                BlockStart::of(NodeValue::List(nl), Box::new(ListBlockParser { data: nl }))
                    .then(item.0, item.1),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::document::DocumentParser;

    fn start_with(parser: &ListBlockStartParser, line: &str) -> Option<Vec<NodeValue>> {
        let tree = Tree::new();
        let doc: &dyn BlockContinueParser = &DocumentParser;
        let state = ParserState {
            tree: &tree,
            active: (tree.root(), doc),
            last_matched: (tree.root(), doc),
        };
        let mut cursor = Cursor::new(line);
        parser
            .try_start(&mut cursor, &state)
            .map(|start| start.blocks.into_iter().map(|b| b.value).collect())
    }

    fn list_of(values: &[NodeValue]) -> NodeList {
        assert_eq!(values.len(), 2);
        assert!(matches!(values[1], NodeValue::Item(..)));
        match values[0] {
            NodeValue::List(nl) => nl,
            ref other => panic!("expected a list, got {:?}", other),
        }
    }

    #[test]
    fn ordered_list_starting_at_one() {
        let values = start_with(&ListBlockStartParser::default(), "1. Foo").unwrap();
        let nl = list_of(&values);
        assert_eq!(nl.list_type, ListType::Ordered);
        assert_eq!(nl.start, 1);
        assert_eq!(nl.delimiter, Some(ListDelimType::Period));
        assert_eq!(nl.padding, 3);
    }

    #[test]
    fn ordered_list_starting_at_two() {
        let values = start_with(&ListBlockStartParser::default(), "2. Foo").unwrap();
        let nl = list_of(&values);
        assert_eq!(nl.list_type, ListType::Ordered);
        assert_eq!(nl.start, 2);
    }

    #[test]
    fn too_many_digits() {
        let parser = ListBlockStartParser::default();
        assert!(start_with(&parser, "123456789. Foo").is_some());
        assert!(start_with(&parser, "1234567890. Foo").is_none());
    }

    #[test]
    fn default_bullets() {
        for c in ['-', '*', '+'] {
            let values =
                start_with(&ListBlockStartParser::default(), &format!("{} Foo", c)).unwrap();
            let nl = list_of(&values);
            assert_eq!(nl.list_type, ListType::Bullet);
            assert_eq!(nl.bullet_char, Some(c));
        }
    }

    #[test]
    fn custom_bullet() {
        let parser = ListBlockStartParser::new(&["^"]).unwrap();
        let nl = list_of(&start_with(&parser, "^ Foo").unwrap());
        assert_eq!(nl.bullet_char, Some('^'));
        assert!(start_with(&parser, "- Foo").is_none());
        assert!(start_with(&parser, "* Foo").is_none());
    }

    #[test]
    fn disabled_bullet() {
        let parser = ListBlockStartParser::new(&["-", "*"]).unwrap();
        assert!(start_with(&parser, "+ Foo").is_none());
        assert!(start_with(&parser, "- Foo").is_some());
    }

    #[test]
    fn invalid_markers() {
        let err = ListBlockStartParser::new(&["--"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration option \"unordered_list_markers\": value must be an array of single-character strings"
        );
        assert!(ListBlockStartParser::new::<&str>(&[]).is_err());
        assert!(ListBlockStartParser::new(&["1"]).is_err());
        assert!(ListBlockStartParser::new(&[" "]).is_err());
    }

    #[test]
    fn marker_needs_following_space() {
        let parser = ListBlockStartParser::default();
        assert!(start_with(&parser, "-foo").is_none());
        assert!(start_with(&parser, "1.foo").is_none());
        assert!(start_with(&parser, "-").is_some());
        assert!(start_with(&parser, "    - foo").is_none());
    }

    #[test]
    fn padding() {
        let parser = ListBlockStartParser::default();
        let pad = |line: &str| list_of(&start_with(&parser, line).unwrap()).padding;
        assert_eq!(pad("- a"), 2);
        assert_eq!(pad("-    a"), 5);
        assert_eq!(pad("-     a"), 2);
        assert_eq!(pad("-"), 2);
        assert_eq!(pad("-   "), 2);
        assert_eq!(pad("10) a"), 4);
        assert_eq!(list_of(&start_with(&parser, "  * a").unwrap()).marker_offset, 2);
    }
}
