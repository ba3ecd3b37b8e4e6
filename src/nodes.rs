//! The block tree.

use std::fmt;
use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;

use crate::arena_tree::{self, Arena, Id};

/// The core node enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// The root of every CommonMark document.  Contains **blocks**.
    Document,

    /// **Block**. A [block quote](https://spec.commonmark.org/0.31.2/#block-quotes).  Contains
    /// other **blocks**.
    ///
    /// ``` md
    /// > A block quote.
    /// ```
    BlockQuote,

    /// **Block**.  A [list](https://spec.commonmark.org/0.31.2/#lists).  Contains
    /// [list items](https://spec.commonmark.org/0.31.2/#list-items).
    ///
    /// ``` md
    /// * An unordered list
    /// * Another item
    ///
    /// 1. An ordered list
    /// 2. Another item
    /// ```
    List(NodeList),

    /// **Block**.  A [list item](https://spec.commonmark.org/0.31.2/#list-items).  Contains
    /// other **blocks**.
    Item(NodeList),

    /// **Block**. A code block; may be
    /// [fenced](https://spec.commonmark.org/0.31.2/#fenced-code-blocks) or
    /// [indented](https://spec.commonmark.org/0.31.2/#indented-code-blocks).  Contains raw text
    /// which is not parsed as Markdown.
    CodeBlock(Box<NodeCodeBlock>),

    /// **Block**. A [HTML block](https://spec.commonmark.org/0.31.2/#html-blocks).  Contains raw
    /// text which is neither parsed as Markdown nor HTML escaped.
    HtmlBlock(NodeHtmlBlock),

    /// **Block**. A [paragraph](https://spec.commonmark.org/0.31.2/#paragraphs).  Contains
    /// **inlines**.
    Paragraph,

    /// **Block**. A heading; may be an [ATX heading](https://spec.commonmark.org/0.31.2/#atx-headings)
    /// or a [setext heading](https://spec.commonmark.org/0.31.2/#setext-headings). Contains
    /// **inlines**.
    Heading(NodeHeading),

    /// **Block**. A [thematic break](https://spec.commonmark.org/0.31.2/#thematic-breaks).  Has
    /// no children.
    ThematicBreak,

    /// **Inline**.  Textual content.
    Text(String),

    /// **Inline**.  A [soft line break](https://spec.commonmark.org/0.31.2/#soft-line-breaks).
    SoftBreak,

    /// **Inline**.  A [hard line break](https://spec.commonmark.org/0.31.2/#hard-line-breaks).
    LineBreak,
}

/// The metadata of a list; the kind of list, the delimiter used and so on.
///
/// Items carry a copy of the same data so that continuation decisions can be
/// made locally.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeList {
    /// The kind of list (bullet (unordered) or ordered).
    pub list_type: ListType,

    /// Number of columns before the list marker.
    pub marker_offset: usize,

    /// Number of columns between the start of the list marker and the item text (including
    /// the list marker).
    pub padding: usize,

    /// For ordered lists, the ordinal the list starts at.
    pub start: usize,

    /// For ordered lists, the delimiter after each number.
    pub delimiter: Option<ListDelimType>,

    /// For bullet lists, the character used for each bullet.
    pub bullet_char: Option<char>,

    /// Whether the list is [tight](https://spec.commonmark.org/0.31.2/#tight), i.e. whether
    /// its paragraphs are rendered without wrapping.  Decided when the list closes.
    pub tight: bool,
}

impl NodeList {
    /// Whether an item described by `other` continues the list described by `self`.
    pub fn matches(&self, other: &NodeList) -> bool {
        self.list_type == other.list_type
            && self.delimiter == other.delimiter
            && self.bullet_char == other.bullet_char
    }
}

/// The type of list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    /// A bullet list, i.e. an unordered list.
    #[default]
    Bullet,

    /// An ordered list.
    Ordered,
}

/// The delimiter for ordered lists, i.e. the character which appears after each number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDelimType {
    /// A period character `.`.
    Period,

    /// A paren character `)`.
    Paren,
}

impl ListDelimType {
    /// The delimiter as it appears in source.
    pub fn as_char(self) -> char {
        match self {
            ListDelimType::Period => '.',
            ListDelimType::Paren => ')',
        }
    }
}

/// The metadata and data of a code block (fenced or indented).
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NodeCodeBlock {
    /// Whether the code block is fenced.
    pub fenced: bool,

    /// For fenced code blocks, the fence character itself (`` ` `` or `~`).
    pub fence_char: char,

    /// For fenced code blocks, the length of the fence.
    pub fence_length: usize,

    /// For fenced code blocks, the indentation level of the code within the block.
    pub fence_offset: usize,

    /// For fenced code blocks, the [info string](https://spec.commonmark.org/0.31.2/#info-string)
    /// after the opening fence, if any.
    pub info: String,

    /// The literal contents of the code block.
    pub literal: String,
}

/// The metadata of a heading.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeading {
    /// The level of the header; from 1 to 6 for ATX headings, 1 or 2 for setext headings.
    pub level: u8,

    /// Whether the heading is setext (if not, ATX).
    pub setext: bool,
}

/// The metadata of an included HTML block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeHtmlBlock {
    /// The HTML block's type, 1 to 7, per the start conditions in the CommonMark spec.
    pub block_type: u8,

    /// The literal contents of the HTML block.
    pub literal: String,
}

impl NodeValue {
    /// Indicates whether this node is a block node or inline node.
    pub fn block(&self) -> bool {
        !matches!(
            *self,
            NodeValue::Text(..) | NodeValue::SoftBreak | NodeValue::LineBreak
        )
    }

    /// A short lower-case name for the node type.
    pub fn node_name(&self) -> &'static str {
        match *self {
            NodeValue::Document => "document",
            NodeValue::BlockQuote => "block_quote",
            NodeValue::List(..) => "list",
            NodeValue::Item(..) => "item",
            NodeValue::CodeBlock(..) => "code_block",
            NodeValue::HtmlBlock(..) => "html_block",
            NodeValue::Paragraph => "paragraph",
            NodeValue::Heading(..) => "heading",
            NodeValue::ThematicBreak => "thematic_break",
            NodeValue::Text(..) => "text",
            NodeValue::SoftBreak => "softbreak",
            NodeValue::LineBreak => "linebreak",
        }
    }
}

/// A single node in the tree.
///
/// The struct contains metadata about the node's position in the original document, and the
/// core enum, `NodeValue`.
#[derive(Debug, Clone)]
pub struct Ast {
    /// The node value itself.
    pub value: NodeValue,

    /// The positions in the source document this node comes from.
    pub sourcepos: Sourcepos,

    pub(crate) open: bool,
    pub(crate) last_line_blank: bool,
}

impl Ast {
    /// Create a new, open node with the given value.
    pub fn new(value: NodeValue, start: LineColumn) -> Self {
        Ast {
            value,
            sourcepos: (start.line, start.column, start.line, 0).into(),
            open: true,
            last_line_blank: false,
        }
    }

    /// Whether the node is still accepting lines.  Every node of a tree returned by
    /// [`parse_document`](crate::parse_document) is closed.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Represents the position in the source Markdown this node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sourcepos {
    /// The line and column of the first character of this node.
    pub start: LineColumn,
    /// The line and column of the last character of this node.
    pub end: LineColumn,
}

impl fmt::Display for Sourcepos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column,
        )
    }
}

impl From<(usize, usize, usize, usize)> for Sourcepos {
    fn from(sp: (usize, usize, usize, usize)) -> Sourcepos {
        Sourcepos {
            start: LineColumn {
                line: sp.0,
                column: sp.1,
            },
            end: LineColumn {
                line: sp.2,
                column: sp.3,
            },
        }
    }
}

/// Represents the 1-based line and column positions of a given character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    /// The 1-based line number of the character.
    pub line: usize,
    /// The 1-based column number of the character.
    pub column: usize,
}

impl From<(usize, usize)> for LineColumn {
    fn from(lc: (usize, usize)) -> LineColumn {
        LineColumn {
            line: lc.0,
            column: lc.1,
        }
    }
}

/// A handle to a node of a [`Tree`].
pub type NodeId = Id<Ast>;

/// A resolved [link reference definition](https://spec.commonmark.org/0.31.2/#link-reference-definitions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedReference {
    /// The destination URL of the reference link.
    pub url: String,

    /// The title of the link.
    pub title: String,
}

/// A parsed document: an arena of [`Ast`] nodes rooted at a `Document`.
///
/// Nodes are addressed with [`NodeId`]s; `tree[id]` borrows a node's data.
pub struct Tree {
    arena: Arena<Ast>,
    root: NodeId,
    references: FxHashMap<String, ResolvedReference>,
}

impl Tree {
    pub(crate) fn new() -> Self {
        let mut arena = Arena::new();
        let root = Id::alloc(
            &mut arena,
            Ast::new(NodeValue::Document, LineColumn { line: 1, column: 1 }),
        );
        Tree {
            arena,
            root,
            references: FxHashMap::default(),
        }
    }

    /// The `Document` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The number of nodes ever allocated, including detached ones.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the arena holds no nodes.  Never true for a parsed document.
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Link reference definitions collected from the document, keyed by normalized label.
    pub fn references(&self) -> &FxHashMap<String, ResolvedReference> {
        &self.references
    }

    /// Look up a link reference definition by label.
    pub fn reference(&self, label: &str) -> Option<&ResolvedReference> {
        self.references
            .get(&crate::strings::normalize_label(label))
    }

    pub(crate) fn references_mut(&mut self) -> &mut FxHashMap<String, ResolvedReference> {
        &mut self.references
    }

    /// Allocate `value` as a new node and append it to `parent`.
    pub fn append_child(&mut self, parent: NodeId, value: NodeValue, start: LineColumn) -> NodeId {
        let node = Id::alloc(&mut self.arena, Ast::new(value, start));
        parent.append(&self.arena, node);
        node
    }

    /// Detach `node` (and its subtree) from the tree.  The node stays allocated.
    pub fn detach(&mut self, node: NodeId) {
        node.detach(&self.arena);
    }

    /// Return the parent of `node`, unless it is the root or detached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        node.parent(&self.arena)
    }

    /// Return the first child of `node`.
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        node.first_child(&self.arena)
    }

    /// Return the last child of `node`.
    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        node.last_child(&self.arena)
    }

    /// Return the next sibling of `node`.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        node.next_sibling(&self.arena)
    }

    /// Return the previous sibling of `node`.
    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        node.previous_sibling(&self.arena)
    }

    /// Iterate over the children of `node`.
    pub fn children(&self, node: NodeId) -> arena_tree::Children<'_, Ast> {
        node.children(&self.arena)
    }

    /// Iterate over the children of `node`, last first.
    pub fn reverse_children(&self, node: NodeId) -> arena_tree::ReverseChildren<'_, Ast> {
        node.reverse_children(&self.arena)
    }

    /// Iterate over `node` and its ancestors.
    pub fn ancestors(&self, node: NodeId) -> arena_tree::Ancestors<'_, Ast> {
        node.ancestors(&self.arena)
    }

    /// Iterate over `node` and its descendants in tree order.
    pub fn descendants(&self, node: NodeId) -> arena_tree::Descendants<'_, Ast> {
        node.descendants(&self.arena)
    }

    /// Iterate over start and end edges of `node` and its descendants.
    pub fn traverse(&self, node: NodeId) -> arena_tree::Traverse<'_, Ast> {
        node.traverse(&self.arena)
    }

    /// Whether the last child of `node` ended with a blank line, looking through the last
    /// items of nested lists.
    pub(crate) fn ends_with_blank_line(&self, node: NodeId) -> bool {
        let mut it = Some(node);
        while let Some(cur) = it {
            if self[cur].last_line_blank {
                return true;
            }
            it = match self[cur].value {
                NodeValue::List(..) | NodeValue::Item(..) => self.last_child(cur),
                _ => None,
            };
        }
        false
    }
}

impl Index<NodeId> for Tree {
    type Output = Ast;

    fn index(&self, node: NodeId) -> &Ast {
        node.data(&self.arena)
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, node: NodeId) -> &mut Ast {
        node.data_mut(&mut self.arena)
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        crate::sexpr::format_sexpr(self, &mut s)?;
        f.write_str(&s)
    }
}
