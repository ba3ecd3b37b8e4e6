//! A debugging dump of a tree as S-expressions.
//!
//! ```rust
//! # use blockmark::{format_sexpr, parse_document, Options};
//! let tree = parse_document("> Hello\n", &Options::default()).unwrap();
//! let mut out = String::new();
//! format_sexpr(&tree, &mut out).unwrap();
//! assert_eq!(out, "(document\n    (block_quote\n        (paragraph \"Hello\")))\n");
//! ```

use std::fmt::{self, Write};

use crate::nodes::{ListType, NodeId, NodeValue, Tree};

/// Spaces to indent nested nodes.
const INDENT: usize = 4;

/// Write `tree` as an S-expression.  Block children go on their own lines;
/// inline children follow their parent on one line.
pub fn format_sexpr<W: Write>(tree: &Tree, w: &mut W) -> fmt::Result {
    write_node(tree, tree.root(), w, 0)?;
    w.write_char('\n')
}

fn write_node<W: Write>(tree: &Tree, node: NodeId, w: &mut W, indent: usize) -> fmt::Result {
    let value = &tree[node].value;
    match value {
        NodeValue::Text(t) => return write!(w, "{:?}", t),
        NodeValue::SoftBreak | NodeValue::LineBreak => return w.write_str(value.node_name()),
        _ => {}
    }

    write!(w, "({}", value.node_name())?;
    write_attributes(value, w)?;

    let has_blocks = tree.children(node).any(|c| tree[c].value.block());
    for child in tree.children(node) {
        if has_blocks {
            write!(w, "\n{:1$}", "", indent + INDENT)?;
        } else {
            w.write_char(' ')?;
        }
        write_node(tree, child, w, indent + INDENT)?;
    }

    w.write_char(')')
}

fn write_attributes<W: Write>(value: &NodeValue, w: &mut W) -> fmt::Result {
    match value {
        NodeValue::List(nl) => {
            match nl.list_type {
                ListType::Bullet => write!(w, " bullet {:?}", nl.bullet_char.unwrap_or('-'))?,
                ListType::Ordered => write!(
                    w,
                    " ordered {} {:?}",
                    nl.start,
                    nl.delimiter.map_or('.', |d| d.as_char())
                )?,
            }
            w.write_str(if nl.tight { " tight" } else { " loose" })
        }
        NodeValue::Heading(h) => {
            write!(w, " {}", h.level)?;
            if h.setext {
                w.write_str(" setext")?;
            }
            Ok(())
        }
        NodeValue::CodeBlock(ncb) if ncb.fenced => {
            write!(w, " fenced {:?} {:?}", ncb.info, ncb.literal)
        }
        NodeValue::CodeBlock(ncb) => write!(w, " indented {:?}", ncb.literal),
        NodeValue::HtmlBlock(nhb) => write!(w, " {} {:?}", nhb.block_type, nhb.literal),
        _ => Ok(()),
    }
}
