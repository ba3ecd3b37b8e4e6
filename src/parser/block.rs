//! The protocol between the tree constructor and individual block parsers.
//!
//! Every open block is paired with one [`BlockContinueParser`], which decides
//! line by line whether the block goes on.  New blocks are opened by
//! [`BlockStartParser`]s, tried in registration order.

use smallvec::SmallVec;

use crate::nodes::{NodeId, NodeValue, Tree};
use crate::parser::cursor::Cursor;
use crate::parser::inlines::InlineParserEngine;

/// How a line continues an open block.  "No match" is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContinue {
    /// The line continues the block; the cursor has been moved past its
    /// marker.  Matching carries on with the block's children, and new
    /// blocks may start at the cursor.
    Matched,
    /// The line continues the block and the rest of it is the block's own
    /// content.  No deeper block is examined and no block start is tried.
    Leaf,
    /// The line completes the block (a closing code fence) and is consumed by
    /// it.  The block is closed immediately.
    Finished,
}

/// What a continuation parser can see while matching a line.
pub struct BlockContext<'t> {
    /// The document built so far.
    pub tree: &'t Tree,
    /// The block this parser is bound to.
    pub node: NodeId,
    /// The deepest open block at the time of the call.
    pub active: NodeId,
}

/// The parser paired with one open block.
///
/// The pairing is fixed for the life of the block: the tree constructor
/// hands the same `node` to every call.
pub trait BlockContinueParser {
    /// Whether child blocks may be appended.
    fn is_container(&self) -> bool {
        false
    }

    /// Whether a line lacking the markers of enclosing containers may still
    /// be added to this block.
    fn can_have_lazy_continuation_lines(&self) -> bool {
        false
    }

    /// Whether a block with value `child` may be appended to this block.
    fn can_contain(&self, _child: &NodeValue) -> bool {
        false
    }

    /// Match the current line against this block's continuation rule.
    fn try_continue(
        &mut self,
        cursor: &mut Cursor<'_>,
        ctx: &BlockContext<'_>,
    ) -> Option<BlockContinue>;

    /// Append the unconsumed text of a line this block keeps.
    fn add_line(&mut self, _line: &str) {}

    /// Finalize the block.  Called exactly once; no line is added afterwards.
    fn close_block(&mut self, _tree: &mut Tree, _node: NodeId) {}

    /// Hand the block's raw text to the inline engine.  Only called once the
    /// whole document has been closed, and only for blocks still in the tree.
    fn parse_inlines(
        &mut self,
        _tree: &mut Tree,
        _node: NodeId,
        _engine: &mut dyn InlineParserEngine,
    ) {
    }

    /// The text accumulated so far, for paragraphs.
    fn paragraph_content(&self) -> Option<&str> {
        None
    }
}

/// A block to open, with its initial value and the parser it is paired with.
pub struct NewBlock {
    pub value: NodeValue,
    pub parser: Box<dyn BlockContinueParser>,
}

/// A successful block start: one or more blocks to open, each nested in the
/// one before.
pub struct BlockStart {
    pub(crate) blocks: SmallVec<[NewBlock; 2]>,
    pub(crate) replace_active: bool,
}

impl BlockStart {
    /// Open a single block.
    pub fn of(value: NodeValue, parser: Box<dyn BlockContinueParser>) -> Self {
        let mut blocks = SmallVec::new();
        blocks.push(NewBlock { value, parser });
        BlockStart {
            blocks,
            replace_active: false,
        }
    }

    /// Also open `value`, nested inside the previously listed block.
    pub fn then(mut self, value: NodeValue, parser: Box<dyn BlockContinueParser>) -> Self {
        self.blocks.push(NewBlock { value, parser });
        self
    }

    /// Close and remove the active block (a paragraph becoming a setext
    /// heading) before opening the new ones.
    pub fn replace_active_block(mut self) -> Self {
        self.replace_active = true;
        self
    }

    /// The value of the outermost block this start opens.
    pub fn first_value(&self) -> &NodeValue {
        &self.blocks[0].value
    }
}

/// A view of the open blocks, given to block start parsers.
pub struct ParserState<'p> {
    pub(crate) tree: &'p Tree,
    pub(crate) active: (NodeId, &'p dyn BlockContinueParser),
    pub(crate) last_matched: (NodeId, &'p dyn BlockContinueParser),
}

impl<'p> ParserState<'p> {
    pub fn tree(&self) -> &'p Tree {
        self.tree
    }

    /// The deepest open block.
    pub fn active_block(&self) -> NodeId {
        self.active.0
    }

    pub fn active_parser(&self) -> &'p dyn BlockContinueParser {
        self.active.1
    }

    /// The deepest block the current line has matched, or the block most
    /// recently opened on this line.
    pub fn last_matched_block(&self) -> NodeId {
        self.last_matched.0
    }

    pub fn last_matched_parser(&self) -> &'p dyn BlockContinueParser {
        self.last_matched.1
    }

    /// If the last matched block is a paragraph with content, that content.
    pub fn paragraph_content(&self) -> Option<&'p str> {
        self.last_matched
            .1
            .paragraph_content()
            .filter(|content| !content.is_empty())
    }
}

/// A strategy for opening new blocks at the cursor.
///
/// On `None` the tree constructor rewinds the cursor and tries the next
/// strategy.
pub trait BlockStartParser {
    fn try_start(&self, cursor: &mut Cursor<'_>, state: &ParserState<'_>) -> Option<BlockStart>;
}
