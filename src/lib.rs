//! A [CommonMark](https://commonmark.org/) block structure parser.
//!
//! Markdown is read line by line into a tree of block nodes (block quotes,
//! lists, paragraphs, code blocks, and so on).  Every open block is paired
//! with a parser that decides whether the next line continues it; new
//! blocks are opened by an ordered list of block start parsers.  The text
//! of paragraphs and headings is handed to an inline engine only once the
//! block structure is final.
//!
//! ```rust
//! use blockmark::{parse_document, format_sexpr, Options};
//!
//! let tree = parse_document("- Hello\n- World\n", &Options::default()).unwrap();
//! let mut dump = String::new();
//! format_sexpr(&tree, &mut dump).unwrap();
//! assert_eq!(
//!     dump,
//!     "(document\n    (list bullet '-' tight\n        (item\n            (paragraph \"Hello\"))\n        (item\n            (paragraph \"World\"))))\n"
//! );
//! ```
//!
//! Bullet list markers are configurable:
//!
//! ```rust
//! use blockmark::{parse_document, NodeValue, Options};
//!
//! let options = Options::from_toml_str("[parse]\nunordered_list_markers = [\"^\"]\n").unwrap();
//! let tree = parse_document("^ Foo\n", &options).unwrap();
//! let list = tree.first_child(tree.root()).unwrap();
//! match tree[list].value {
//!     NodeValue::List(nl) => assert_eq!(nl.bullet_char, Some('^')),
//!     _ => unreachable!(),
//! }
//! ```

pub mod arena_tree;
pub mod nodes;
pub mod parser;
mod scanners;
mod sexpr;
mod strings;

use thiserror::Error;

pub use nodes::{
    Ast, LineColumn, ListDelimType, ListType, NodeCodeBlock, NodeHeading, NodeHtmlBlock, NodeId,
    NodeList, NodeValue, ResolvedReference, Sourcepos, Tree,
};
pub use parser::block::{
    BlockContext, BlockContinue, BlockContinueParser, BlockStart, BlockStartParser, ParserState,
};
pub use parser::cursor::{Cursor, CursorState};
pub use parser::inlines::{InlineParserEngine, PlainInlines};
pub use parser::options::{ConfigError, Limits, Options, ParseOptions};
pub use parser::{LimitKind, ParseError, Parser};
pub use sexpr::format_sexpr;

/// Any failure of [`parse_document`].
#[derive(Debug, Error)]
pub enum Error {
    /// The options were rejected before parsing began.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The parse was abandoned on reaching a limit.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parse a Markdown document into a tree of blocks with plain text inlines.
///
/// The options are validated before any input is examined.
pub fn parse_document(md: &str, options: &Options) -> Result<Tree, Error> {
    Ok(Parser::new(options)?.parse(md)?)
}

/// Like [`parse_document`], handing the text of paragraphs and headings to
/// `engine`.
pub fn parse_document_with_inlines(
    md: &str,
    options: &Options,
    engine: &mut dyn InlineParserEngine,
) -> Result<Tree, Error> {
    Ok(Parser::new(options)?.parse_with_inlines(md, engine)?)
}
