//! The block tree constructor.
//!
//! Input is consumed one line at a time.  For every line the open blocks are
//! matched outermost first, then block starts are tried where the matching
//! stopped, then the line is either fed lazily to an open paragraph or the
//! unmatched blocks are closed and the rest of the line goes to the deepest
//! block that remains.  Inline parsing runs only once every block is closed.

pub mod block;
pub mod blocks;
pub mod cursor;
pub mod inlines;
pub mod options;
pub mod reference;

use std::borrow::Cow;
use std::fmt;
use std::time::Instant;

use log::{debug, trace};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::nodes::{LineColumn, NodeId, NodeValue, Tree};

use self::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, NewBlock, ParserState,
};
use self::blocks::document::DocumentParser;
use self::blocks::paragraph::ParagraphParser;
use self::blocks::BoxedBlockStartParser;
use self::cursor::Cursor;
use self::inlines::{InlineParserEngine, PlainInlines};
use self::options::{ConfigError, Limits, Options};

/// Which limit stopped a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// [`Limits::max_lines`].
    Lines,
    /// [`Limits::max_depth`].
    Depth,
    /// [`Limits::timeout`].
    Time,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LimitKind::Lines => "line count",
            LimitKind::Depth => "nesting depth",
            LimitKind::Time => "time",
        })
    }
}

/// A parse that was abandoned.  Markdown itself never fails to parse; only
/// the configured [`Limits`] can stop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("resource limit exceeded: {0}")]
    ResourceLimit(LimitKind),
}

/// A configured block parser.
///
/// Construction validates the configuration and builds the list of block
/// start parsers once; [`Parser::parse`] can then be called any number of
/// times, from any number of threads.  Each call works on its own document
/// state.
pub struct Parser {
    block_starts: Vec<BoxedBlockStartParser>,
    limits: Limits,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("block_starts", &self.block_starts.len())
            .field("limits", &self.limits)
            .finish()
    }
}

impl Parser {
    /// Build a parser with the standard block types.
    pub fn new(options: &Options) -> Result<Self, ConfigError> {
        Ok(Parser {
            block_starts: blocks::standard_block_starts(&options.parse)?,
            limits: options.limits,
        })
    }

    /// Build a parser from an explicit list of block start parsers, tried in
    /// the order given.
    pub fn with_block_starts(block_starts: Vec<BoxedBlockStartParser>, limits: Limits) -> Self {
        Parser {
            block_starts,
            limits,
        }
    }

    /// Parse a document, turning leaf block text into plain text inlines.
    pub fn parse(&self, md: &str) -> Result<Tree, ParseError> {
        self.parse_with_inlines(md, &mut PlainInlines)
    }

    /// Parse a document, handing leaf block text to `engine`.
    pub fn parse_with_inlines(
        &self,
        md: &str,
        engine: &mut dyn InlineParserEngine,
    ) -> Result<Tree, ParseError> {
        let mut session = Session::new(&self.block_starts, &self.limits);
        session.feed(md)?;
        Ok(session.finish(engine))
    }
}

struct OpenBlock {
    node: NodeId,
    parser: Box<dyn BlockContinueParser>,
}

/// The state of one document while it is being parsed.
struct Session<'p> {
    block_starts: &'p [BoxedBlockStartParser],
    limits: &'p Limits,
    started: Instant,
    tree: Tree,
    /// Open blocks from the document down; never empty until `finish`.
    open: Vec<OpenBlock>,
    closed: FxHashMap<NodeId, Box<dyn BlockContinueParser>>,
    line_number: usize,
    prev_line_end: LineColumn,
}

impl<'p> Session<'p> {
    fn new(block_starts: &'p [BoxedBlockStartParser], limits: &'p Limits) -> Self {
        let tree = Tree::new();
        let root = tree.root();
        Session {
            block_starts,
            limits,
            started: Instant::now(),
            tree,
            open: vec![OpenBlock {
                node: root,
                parser: Box::new(DocumentParser),
            }],
            closed: FxHashMap::default(),
            line_number: 0,
            prev_line_end: LineColumn { line: 0, column: 0 },
        }
    }

    fn feed(&mut self, s: &str) -> Result<(), ParseError> {
        let sb = s.as_bytes();
        let end = s.len();
        let mut ix = 0;
        let matcher = jetscii::bytes!(b'\r', b'\n');

        while ix < end {
            let eol = match matcher.find(&sb[ix..]) {
                Some(offset) => ix + offset,
                None => end,
            };

            let mut line = &s[ix..eol];
            if self.line_number == 0 {
                line = line.strip_prefix('\u{feff}').unwrap_or(line);
            }
            let line = if line.contains('\0') {
                Cow::Owned(line.replace('\0', "\u{fffd}"))
            } else {
                Cow::Borrowed(line)
            };
            self.process_line(&line)?;

            ix = eol;
            if ix < end {
                if sb[ix] == b'\r' {
                    ix += 1;
                    if ix < end && sb[ix] == b'\n' {
                        ix += 1;
                    }
                } else {
                    ix += 1;
                }
            }
        }

        Ok(())
    }

    fn abort(&self, kind: LimitKind) -> ParseError {
        debug!(
            "aborting parse at line {}: {} limit exceeded",
            self.line_number, kind
        );
        ParseError::ResourceLimit(kind)
    }

    fn check_limits(&self) -> Result<(), ParseError> {
        if let Some(max_lines) = self.limits.max_lines {
            if self.line_number > max_lines {
                return Err(self.abort(LimitKind::Lines));
            }
        }
        if let Some(timeout) = self.limits.timeout {
            if self.started.elapsed() > timeout {
                return Err(self.abort(LimitKind::Time));
            }
        }
        Ok(())
    }

    fn process_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.line_number += 1;
        self.check_limits()?;
        trace!("line {}: {:?}", self.line_number, line);

        let mut cursor = Cursor::new(line);
        let line_end = LineColumn {
            line: self.line_number,
            column: line.len(),
        };

        // The document always matches; see how far down the rest go.
        let mut matched = 1;
        let mut try_starts = true;
        while matched < self.open.len() {
            let active = self.open[self.open.len() - 1].node;
            let saved = cursor.state();
            let block = &mut self.open[matched];
            let ctx = BlockContext {
                tree: &self.tree,
                node: block.node,
                active,
            };
            match block.parser.try_continue(&mut cursor, &ctx) {
                Some(BlockContinue::Matched) => {
                    try_starts = true;
                    matched += 1;
                }
                Some(BlockContinue::Leaf) => {
                    try_starts = false;
                    matched += 1;
                    break;
                }
                Some(BlockContinue::Finished) => {
                    let count = self.open.len() - matched;
                    self.close_blocks(count, line_end);
                    self.prev_line_end = line_end;
                    return Ok(());
                }
                None => {
                    cursor.restore(saved);
                    break;
                }
            }
        }

        // Unmatched blocks stay open until we know the line isn't a lazy
        // continuation of a paragraph inside them.
        let mut unmatched = self.open.len() - matched;
        let mut last_idx = matched - 1;
        let mut started_new_block = false;

        while try_starts {
            if cursor.is_blank() {
                cursor.advance_to_next_nonspace();
                break;
            }

            let (start, column) = match self.find_block_start(&mut cursor, last_idx) {
                Some(found) => found,
                None => {
                    cursor.advance_to_next_nonspace();
                    break;
                }
            };
            started_new_block = true;

            if unmatched > 0 {
                self.close_blocks(unmatched, self.prev_line_end);
                unmatched = 0;
            }

            let mut start_pos = LineColumn {
                line: self.line_number,
                column,
            };
            if start.replace_active {
                start_pos = self.replace_active_block();
            }

            for new in start.blocks {
                try_starts = new.parser.is_container();
                self.add_child(new, start_pos)?;
            }
            last_idx = self.open.len() - 1;
        }

        let blank = cursor.is_blank();
        self.mark_blank_line(self.open[last_idx].node, blank);

        let active_idx = self.open.len() - 1;
        if !started_new_block
            && !blank
            && self.open[active_idx].parser.can_have_lazy_continuation_lines()
        {
            if unmatched > 0 {
                trace!("lazy continuation line {}", self.line_number);
            }
            self.add_line(active_idx, &cursor.remainder());
        } else {
            if unmatched > 0 {
                self.close_blocks(unmatched, self.prev_line_end);
            }

            let last = self.open.len() - 1;
            if !self.open[last].parser.is_container() {
                self.add_line(last, &cursor.remainder());
            } else if !blank {
                let start = LineColumn {
                    line: self.line_number,
                    column: cursor.offset() + 1,
                };
                self.add_child(
                    NewBlock {
                        value: NodeValue::Paragraph,
                        parser: Box::new(ParagraphParser::new()),
                    },
                    start,
                )?;
                self.add_line(self.open.len() - 1, &cursor.remainder());
            }
        }

        self.prev_line_end = line_end;
        Ok(())
    }

    /// Try every block start parser in order at the cursor.  A start is only
    /// taken if some open block, at or above the one it would be added to,
    /// can contain it.
    fn find_block_start(
        &self,
        cursor: &mut Cursor<'_>,
        last_idx: usize,
    ) -> Option<(BlockStart, usize)> {
        let active = &self.open[self.open.len() - 1];
        let last = &self.open[last_idx];
        let state = ParserState {
            tree: &self.tree,
            active: (active.node, &*active.parser),
            last_matched: (last.node, &*last.parser),
        };
        let column = cursor.next_nonspace() + 1;

        for block_start in self.block_starts {
            let saved = cursor.state();
            if let Some(start) = block_start.try_start(cursor, &state) {
                let from = if start.replace_active {
                    last_idx.checked_sub(1)
                } else {
                    Some(last_idx)
                };
                let adopted = from.map_or(false, |from| {
                    self.open[..=from]
                        .iter()
                        .any(|b| b.parser.can_contain(start.first_value()))
                });
                if adopted {
                    return Some((start, column));
                }
                trace!(
                    "no open block can contain a {}",
                    start.first_value().node_name()
                );
            }
            cursor.restore(saved);
        }

        None
    }

    /// Append a new open block under the deepest open block able to hold
    /// it, closing any below that.
    fn add_child(&mut self, new: NewBlock, start: LineColumn) -> Result<(), ParseError> {
        while self.open.len() > 1 && !self.open[self.open.len() - 1].parser.can_contain(&new.value)
        {
            self.close_blocks(1, self.prev_line_end);
        }

        let parent = &self.open[self.open.len() - 1];
        assert!(
            parent.parser.can_contain(&new.value),
            "no open block can contain a {}",
            new.value.node_name()
        );
        if new.parser.is_container() && self.open.len() > self.limits.max_depth {
            return Err(self.abort(LimitKind::Depth));
        }

        let node = self.tree.append_child(parent.node, new.value, start);
        debug!(
            "opened {} at {}:{}",
            self.tree[node].value.node_name(),
            start.line,
            start.column
        );
        self.open.push(OpenBlock {
            node,
            parser: new.parser,
        });
        Ok(())
    }

    fn add_line(&mut self, idx: usize, text: &str) {
        let block = &mut self.open[idx];
        assert!(
            self.tree[block.node].open,
            "line added to closed {}",
            self.tree[block.node].value.node_name()
        );
        block.parser.add_line(text);
    }

    /// Close the `count` deepest open blocks, deepest first.
    fn close_blocks(&mut self, count: usize, end: LineColumn) {
        for _ in 0..count {
            let OpenBlock { node, mut parser } = match self.open.pop() {
                Some(block) => block,
                None => return,
            };

            let ast = &mut self.tree[node];
            ast.open = false;
            ast.sourcepos.end = end;
            parser.close_block(&mut self.tree, node);
            debug!(
                "closed {} at {}",
                self.tree[node].value.node_name(),
                self.tree[node].sourcepos
            );
            self.closed.insert(node, parser);
        }
    }

    /// Close the active block and take it out of the tree, returning where
    /// it started.  Anything it registered on closing (reference
    /// definitions) is kept.
    fn replace_active_block(&mut self) -> LineColumn {
        let idx = self.open.len() - 1;
        assert!(idx > 0, "the document cannot be replaced");
        let node = self.open[idx].node;
        let start = self.tree[node].sourcepos.start;

        self.close_blocks(1, self.prev_line_end);
        self.tree.detach(node);
        self.closed.remove(&node);
        debug!(
            "replaced {} at {}:{}",
            self.tree[node].value.node_name(),
            start.line,
            start.column
        );
        start
    }

    fn mark_blank_line(&mut self, container: NodeId, blank: bool) {
        if blank {
            if let Some(last_child) = self.tree.last_child(container) {
                self.tree[last_child].last_line_blank = true;
            }
        }

        let last_line_blank = blank
            && match self.tree[container].value {
                NodeValue::BlockQuote | NodeValue::Heading(..) | NodeValue::ThematicBreak => false,
                NodeValue::CodeBlock(ref ncb) => !ncb.fenced,
                NodeValue::Item(..) => {
                    self.tree.first_child(container).is_some()
                        || self.tree[container].sourcepos.start.line != self.line_number
                }
                _ => true,
            };
        self.tree[container].last_line_blank = last_line_blank;

        let mut tmp = container;
        while let Some(parent) = self.tree.parent(tmp) {
            self.tree[parent].last_line_blank = false;
            tmp = parent;
        }
    }

    fn finish(mut self, engine: &mut dyn InlineParserEngine) -> Tree {
        let count = self.open.len();
        self.close_blocks(count, self.prev_line_end);

        let nodes: Vec<NodeId> = self.tree.descendants(self.tree.root()).collect();
        for node in nodes {
            if let Some(parser) = self.closed.get_mut(&node) {
                parser.parse_inlines(&mut self.tree, node, engine);
            }
        }

        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
