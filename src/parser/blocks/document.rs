use crate::nodes::NodeValue;
use crate::parser::block::{BlockContext, BlockContinue, BlockContinueParser};
use crate::parser::cursor::Cursor;

/// The root block.  Always matches and holds any block but a list item.
#[derive(Debug, Default)]
pub struct DocumentParser;

impl BlockContinueParser for DocumentParser {
    fn is_container(&self) -> bool {
        true
    }

    fn can_contain(&self, child: &NodeValue) -> bool {
        child.block() && !matches!(child, NodeValue::Item(..))
    }

    fn try_continue(&mut self, _: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        Some(BlockContinue::Matched)
    }
}
