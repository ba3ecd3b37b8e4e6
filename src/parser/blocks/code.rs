use crate::nodes::{NodeCodeBlock, NodeId, NodeValue, Tree};
use crate::parser::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, BlockStartParser, ParserState,
};
use crate::parser::cursor::{Cursor, CODE_INDENT};
use crate::scanners;
use crate::strings;

fn set_code(tree: &mut Tree, node: NodeId, info: String, literal: String) {
    if let NodeValue::CodeBlock(ref mut ncb) = tree[node].value {
        ncb.info = info;
        ncb.literal = literal;
    }
}

#[derive(Debug)]
pub struct FencedCodeParser {
    fence_char: char,
    fence_length: usize,
    fence_offset: usize,
    info: Option<String>,
    literal: String,
}

impl BlockContinueParser for FencedCodeParser {
    fn try_continue(&mut self, cursor: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        let first_nonspace = cursor.next_nonspace();
        let matched = if cursor.indent() <= 3 && cursor.next_nonspace_char() == Some(self.fence_char) {
            scanners::close_code_fence(&cursor.line()[first_nonspace..]).unwrap_or(0)
        } else {
            0
        };

        if matched >= self.fence_length {
            cursor.advance_to_end();
            return Some(BlockContinue::Finished);
        }

        let mut i = self.fence_offset;
        while i > 0 && matches!(cursor.peek(), Some(' ' | '\t')) {
            cursor.advance_by(1, true);
            i -= 1;
        }
        Some(BlockContinue::Leaf)
    }

    /// The first line is the info string; the rest are content.
    fn add_line(&mut self, line: &str) {
        match self.info {
            None => self.info = Some(strings::unescape(line.trim_matches([' ', '\t']))),
            Some(_) => {
                self.literal.push_str(line);
                self.literal.push('\n');
            }
        }
    }

    fn close_block(&mut self, tree: &mut Tree, node: NodeId) {
        set_code(
            tree,
            node,
            self.info.take().unwrap_or_default(),
            std::mem::take(&mut self.literal),
        );
    }
}

#[derive(Debug, Default)]
pub struct FencedCodeStartParser;

impl BlockStartParser for FencedCodeStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, _: &ParserState<'_>) -> Option<BlockStart> {
        if cursor.is_indented() {
            return None;
        }
        let first_nonspace = cursor.next_nonspace();
        let fence_length = scanners::open_code_fence(&cursor.line()[first_nonspace..])?;
        let fence_char = cursor.next_nonspace_char()?;
        let fence_offset = cursor.advance_to_next_nonspace();
        cursor.advance_by(fence_length, false);

        let ncb = NodeCodeBlock {
            fenced: true,
            fence_char,
            fence_length,
            fence_offset,
            info: String::new(),
            literal: String::new(),
        };
        Some(BlockStart::of(
            NodeValue::CodeBlock(Box::new(ncb)),
            Box::new(FencedCodeParser {
                fence_char,
                fence_length,
                fence_offset,
                info: None,
                literal: String::new(),
            }),
        ))
    }
}

#[derive(Debug, Default)]
pub struct IndentedCodeParser {
    literal: String,
}

impl BlockContinueParser for IndentedCodeParser {
    fn try_continue(&mut self, cursor: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        if cursor.indent() >= CODE_INDENT {
            cursor.advance_by(CODE_INDENT, true);
            Some(BlockContinue::Leaf)
        } else if cursor.is_blank() {
            cursor.advance_to_next_nonspace();
            Some(BlockContinue::Leaf)
        } else {
            None
        }
    }

    fn add_line(&mut self, line: &str) {
        self.literal.push_str(line);
        self.literal.push('\n');
    }

    fn close_block(&mut self, tree: &mut Tree, node: NodeId) {
        strings::remove_trailing_blank_lines(&mut self.literal);
        set_code(tree, node, String::new(), std::mem::take(&mut self.literal));
    }
}

/// Indented code may not interrupt a paragraph, and a blank line never
/// starts one.
#[derive(Debug, Default)]
pub struct IndentedCodeStartParser;

impl BlockStartParser for IndentedCodeStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, state: &ParserState<'_>) -> Option<BlockStart> {
        if !cursor.is_indented()
            || cursor.is_blank()
            || state.tree()[state.active_block()].value == NodeValue::Paragraph
        {
            return None;
        }
        cursor.advance_by(CODE_INDENT, true);
        Some(BlockStart::of(
            NodeValue::CodeBlock(Box::default()),
            Box::new(IndentedCodeParser::default()),
        ))
    }
}
