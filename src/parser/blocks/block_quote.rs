use crate::nodes::NodeValue;
use crate::parser::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, BlockStartParser, ParserState,
};
use crate::parser::cursor::Cursor;

/// Consume a block quote marker: up to three columns of indentation, `>`,
/// and one optional space or tab column.
fn parse_block_quote_prefix(cursor: &mut Cursor<'_>) -> bool {
    let indent = cursor.indent();
    if indent <= 3 && cursor.next_nonspace_char() == Some('>') {
        cursor.advance_by(indent + 1, true);
        cursor.advance_by_space_or_tab();
        return true;
    }
    false
}

#[derive(Debug, Default)]
pub struct BlockQuoteParser;

impl BlockContinueParser for BlockQuoteParser {
    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&self, child: &NodeValue) -> bool {
        child.block() && !matches!(child, NodeValue::Item(..))
    }

    fn try_continue(&mut self, cursor: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        parse_block_quote_prefix(cursor).then_some(BlockContinue::Matched)
    }
}

#[derive(Debug, Default)]
pub struct BlockQuoteStartParser;

impl BlockStartParser for BlockQuoteStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, _: &ParserState<'_>) -> Option<BlockStart> {
        if !parse_block_quote_prefix(cursor) {
            return None;
        }
        Some(BlockStart::of(
            NodeValue::BlockQuote,
            Box::new(BlockQuoteParser),
        ))
    }
}
