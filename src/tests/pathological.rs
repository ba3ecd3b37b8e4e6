use super::*;
use pretty_assertions::assert_eq;
use ntest::timeout;

fn unlimited() -> Options {
    let mut options = Options::default();
    options.limits.max_depth = usize::MAX;
    options
}

// input: python3 -c 'n = 50000; print("> " * n + "a")'
#[test]
#[timeout(4000)]
fn pathological_block_quote_nesting() {
    let n = 50_000;
    let input = format!("{}a\n", "> ".repeat(n));
    let tree = parse_document(&input, &unlimited()).unwrap();

    let mut depth = 0;
    let mut node = tree.root();
    while let Some(child) = tree.first_child(node) {
        if tree[child].value == NodeValue::BlockQuote {
            depth += 1;
        }
        node = child;
    }
    assert_eq!(depth, n);
}

#[test]
#[timeout(4000)]
fn pathological_nesting_stops_at_depth_limit() {
    let input = format!("{}a\n", "- ".repeat(1_000_000));
    assert!(matches!(
        parse_document(&input, &Options::default()),
        Err(Error::Parse(ParseError::ResourceLimit(LimitKind::Depth)))
    ));
}

// input: python3 -c 'n = 100000; print("- a\n" * n)'
#[test]
#[timeout(4000)]
fn pathological_list_items() {
    let n = 100_000;
    let input = "- a\n".repeat(n);
    let tree = parse_document(&input, &Options::default()).unwrap();
    let list = tree.first_child(tree.root()).unwrap();
    assert_eq!(tree.children(list).count(), n);
}

#[test]
#[timeout(4000)]
fn pathological_lazy_lines() {
    let n = 100_000;
    let input = format!("> > > a\n{}", "b\n".repeat(n));
    let tree = parse_document(&input, &Options::default()).unwrap();
    let paragraph = tree
        .descendants(tree.root())
        .find(|&d| tree[d].value == NodeValue::Paragraph)
        .unwrap();
    assert_eq!(tree[paragraph].sourcepos.end.line, n + 1);
}

#[test]
#[timeout(4000)]
fn pathological_definitions_before_underline() {
    let n = 20_000;
    let input = format!("{}text\n===\n", "[a]: b\n".repeat(n));
    let tree = parse_document(&input, &Options::default()).unwrap();
    let heading = tree.first_child(tree.root()).unwrap();
    assert!(matches!(
        tree[heading].value,
        NodeValue::Heading(NodeHeading { setext: true, .. })
    ));
}

#[test]
#[timeout(4000)]
fn pathological_tabs() {
    let n = 100_000;
    let input = format!("-{}a\n", "\t".repeat(n));
    parse_document(&input, &Options::default()).unwrap();
}
