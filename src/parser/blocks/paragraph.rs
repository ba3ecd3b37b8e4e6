use log::debug;

use crate::nodes::{NodeId, Tree};
use crate::parser::block::{BlockContext, BlockContinue, BlockContinueParser};
use crate::parser::cursor::Cursor;
use crate::parser::inlines::InlineParserEngine;
use crate::parser::reference;

/// Accumulates paragraph text.  Paragraphs are never started by a start
/// parser; the tree constructor opens one for any text nothing else claims.
#[derive(Debug, Default)]
pub struct ParagraphParser {
    content: String,
}

impl ParagraphParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockContinueParser for ParagraphParser {
    fn can_have_lazy_continuation_lines(&self) -> bool {
        true
    }

    fn try_continue(&mut self, cursor: &mut Cursor<'_>, _: &BlockContext<'_>) -> Option<BlockContinue> {
        if cursor.is_blank() {
            None
        } else {
            Some(BlockContinue::Matched)
        }
    }

    fn add_line(&mut self, line: &str) {
        self.content.push_str(line);
        self.content.push('\n');
    }

    fn close_block(&mut self, tree: &mut Tree, node: NodeId) {
        let (defs, rest) = reference::parse_definitions(&self.content);
        for def in defs {
            debug!("reference definition [{}] -> {}", def.label, def.reference.url);
            tree.references_mut()
                .entry(def.label)
                .or_insert(def.reference);
        }
        self.content = rest.trim_end_matches([' ', '\t', '\n']).to_string();

        if self.content.is_empty() {
            tree.detach(node);
        }
    }

    fn parse_inlines(&mut self, tree: &mut Tree, node: NodeId, engine: &mut dyn InlineParserEngine) {
        engine.parse(&self.content, node, tree);
    }

    fn paragraph_content(&self) -> Option<&str> {
        Some(&self.content)
    }
}
