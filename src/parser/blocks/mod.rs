//! The standard CommonMark block types.

pub mod block_quote;
pub mod code;
pub mod document;
pub mod heading;
pub mod html_block;
pub mod list;
pub mod paragraph;
pub mod thematic_break;

use crate::parser::block::BlockStartParser;
use crate::parser::options::{ConfigError, ParseOptions};

/// A registered block start strategy.
pub type BoxedBlockStartParser = Box<dyn BlockStartParser + Send + Sync>;

/// The standard start parsers, in priority order.
pub fn standard_block_starts(options: &ParseOptions) -> Result<Vec<BoxedBlockStartParser>, ConfigError> {
    let list = list::ListBlockStartParser::new(&options.unordered_list_markers)?;

    Ok(vec![
        Box::new(block_quote::BlockQuoteStartParser),
        Box::new(heading::AtxHeadingStartParser),
        Box::new(code::FencedCodeStartParser),
        Box::new(html_block::HtmlBlockStartParser),
        Box::new(heading::SetextHeadingStartParser),
        Box::new(thematic_break::ThematicBreakStartParser),
        Box::new(list),
        Box::new(code::IndentedCodeStartParser),
    ])
}
