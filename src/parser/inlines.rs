//! The seam to inline parsing.
//!
//! Block parsing only decides which text belongs to which leaf block.  Once
//! the whole document is closed, every paragraph and heading hands its text
//! to an [`InlineParserEngine`].

use crate::nodes::{NodeId, NodeValue, Tree};

/// Turns the raw text of a leaf block into inline children of that block.
pub trait InlineParserEngine {
    fn parse(&mut self, content: &str, node: NodeId, tree: &mut Tree);
}

/// The default engine: text, soft breaks, and hard breaks only.
///
/// A line ending in two or more spaces, or in a backslash, is followed by a
/// hard break; any other line ending is a soft break.  Trailing spaces are
/// dropped from every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainInlines;

impl InlineParserEngine for PlainInlines {
    fn parse(&mut self, content: &str, node: NodeId, tree: &mut Tree) {
        let start = tree[node].sourcepos.start;
        let mut lines = content.split('\n').peekable();

        while let Some(line) = lines.next() {
            let last = lines.peek().is_none();
            let (text, hard) = match line.strip_suffix('\\') {
                Some(text) if !last => (text, true),
                _ => {
                    let text = line.trim_end_matches(' ');
                    (text, !last && line.len() - text.len() >= 2)
                }
            };

            if !text.is_empty() {
                tree.append_child(node, NodeValue::Text(text.to_string()), start);
            }
            if !last {
                let brk = if hard {
                    NodeValue::LineBreak
                } else {
                    NodeValue::SoftBreak
                };
                tree.append_child(node, brk, start);
            }
        }

        for child in tree.children(node).collect::<Vec<_>>() {
            tree[child].open = false;
        }
    }
}
