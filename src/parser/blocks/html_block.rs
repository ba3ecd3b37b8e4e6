use crate::nodes::{NodeHtmlBlock, NodeId, NodeValue, Tree};
use crate::parser::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, BlockStartParser, ParserState,
};
use crate::parser::cursor::Cursor;
use crate::scanners;

/// Raw HTML.  Types 1 to 5 run until a line containing their end marker;
/// types 6 and 7 until a blank line.
#[derive(Debug)]
pub struct HtmlBlockParser {
    block_type: u8,
    finished: bool,
    literal: String,
}

impl BlockContinueParser for HtmlBlockParser {
    fn try_continue(&mut self, cursor: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        if self.finished || (self.block_type >= 6 && cursor.is_blank()) {
            return None;
        }
        Some(BlockContinue::Leaf)
    }

    fn add_line(&mut self, line: &str) {
        self.literal.push_str(line);
        self.literal.push('\n');
        if scanners::html_block_end(self.block_type, line) {
            self.finished = true;
        }
    }

    fn close_block(&mut self, tree: &mut Tree, node: NodeId) {
        if let NodeValue::HtmlBlock(ref mut nhb) = tree[node].value {
            nhb.literal = std::mem::take(&mut self.literal);
        }
    }
}

#[derive(Debug, Default)]
pub struct HtmlBlockStartParser;

impl BlockStartParser for HtmlBlockStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, state: &ParserState<'_>) -> Option<BlockStart> {
        if cursor.is_indented() {
            return None;
        }
        let rest = &cursor.line()[cursor.next_nonspace()..];
        let block_type = scanners::html_block_start(rest).or_else(|| {
            // Type 7 cannot interrupt a paragraph.
            (state.paragraph_content().is_none() && scanners::html_block_start_7(rest)).then_some(7)
        })?;

        Some(BlockStart::of(
            NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type,
                literal: String::new(),
            }),
            Box::new(HtmlBlockParser {
                block_type,
                finished: false,
                literal: String::new(),
            }),
        ))
    }
}
