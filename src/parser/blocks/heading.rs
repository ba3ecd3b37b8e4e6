use crate::nodes::{NodeHeading, NodeId, NodeValue, Tree};
use crate::parser::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, BlockStartParser, ParserState,
};
use crate::parser::cursor::Cursor;
use crate::parser::inlines::InlineParserEngine;
use crate::parser::reference;
use crate::scanners::{self, SetextChar};
use crate::strings;

/// A heading holds a single logical line of inline text and never continues.
#[derive(Debug)]
pub struct HeadingParser {
    content: String,
    atx: bool,
}

impl HeadingParser {
    fn atx() -> Self {
        HeadingParser {
            content: String::new(),
            atx: true,
        }
    }

    fn setext(content: &str) -> Self {
        HeadingParser {
            content: content.to_string(),
            atx: false,
        }
    }
}

impl BlockContinueParser for HeadingParser {
    fn try_continue(&mut self, _: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        None
    }

    fn add_line(&mut self, line: &str) {
        self.content.push_str(line);
    }

    fn close_block(&mut self, _: &mut Tree, _: NodeId) {
        let content = if self.atx {
            strings::chop_trailing_hashes(&self.content)
        } else {
            self.content.trim_end_matches([' ', '\t', '\n'])
        };
        self.content = strings::trim_space_or_tab(content).to_string();
    }

    fn parse_inlines(&mut self, tree: &mut Tree, node: NodeId, engine: &mut dyn InlineParserEngine) {
        engine.parse(&self.content, node, tree);
    }
}

#[derive(Debug, Default)]
pub struct AtxHeadingStartParser;

impl BlockStartParser for AtxHeadingStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, _: &ParserState<'_>) -> Option<BlockStart> {
        if cursor.is_indented() {
            return None;
        }
        let first_nonspace = cursor.next_nonspace();
        let rest = &cursor.line()[first_nonspace..];
        let matched = scanners::atx_heading_start(rest)?;
        let level = rest.bytes().take_while(|&c| c == b'#').count();

        cursor.advance_to_next_nonspace();
        cursor.advance_by(matched, false);

        Some(BlockStart::of(
            NodeValue::Heading(NodeHeading {
                level: level as u8,
                setext: false,
            }),
            Box::new(HeadingParser::atx()),
        ))
    }
}

/// Turns the paragraph just matched into a heading when the line is an
/// underline of `=` or `-`.
#[derive(Debug, Default)]
pub struct SetextHeadingStartParser;

impl BlockStartParser for SetextHeadingStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, state: &ParserState<'_>) -> Option<BlockStart> {
        if cursor.is_indented() {
            return None;
        }
        let paragraph = state.paragraph_content()?;
        let level = match scanners::setext_heading_line(&cursor.line()[cursor.next_nonspace()..])? {
            SetextChar::Equals => 1,
            SetextChar::Hyphen => 2,
        };

        // Reference definitions are not heading text; a paragraph made only
        // of definitions stays a paragraph.
        let content = reference::strip_definitions(paragraph);
        if strings::is_blank(content) {
            return None;
        }

        cursor.advance_to_end();
        Some(
            BlockStart::of(
                NodeValue::Heading(NodeHeading {
                    level,
                    setext: true,
                }),
                Box::new(HeadingParser::setext(content)),
            )
            .replace_active_block(),
        )
    }
}
