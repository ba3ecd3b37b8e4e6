use crate::nodes::NodeValue;
use crate::parser::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, BlockStartParser, ParserState,
};
use crate::parser::cursor::Cursor;
use crate::scanners;

#[derive(Debug, Default)]
pub struct ThematicBreakParser;

impl BlockContinueParser for ThematicBreakParser {
    fn try_continue(&mut self, _: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        None
    }
}

#[derive(Debug, Default)]
pub struct ThematicBreakStartParser;

impl BlockStartParser for ThematicBreakStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, _: &ParserState<'_>) -> Option<BlockStart> {
        if cursor.is_indented() || !scanners::thematic_break(&cursor.line()[cursor.next_nonspace()..]) {
            return None;
        }
        cursor.advance_to_end();
        Some(BlockStart::of(
            NodeValue::ThematicBreak,
            Box::new(ThematicBreakParser),
        ))
    }
}
