use super::*;
use pretty_assertions::assert_eq;

#[test]
fn definition_is_removed_from_tree() {
    let input = "[foo]: /url \"title\"\n\n[Foo]\n";
    sexpr(input, "(document\n    (paragraph \"[Foo]\"))\n");

    let tree = parse_document(input, &Options::default()).unwrap();
    let reference = tree.reference("FOO").unwrap();
    assert_eq!(reference.url, "/url");
    assert_eq!(reference.title, "title");
    assert_eq!(tree.references().len(), 1);
}

#[test]
fn first_definition_wins() {
    let tree = parse_document("[foo]: /first\n[foo]: /second\n", &Options::default()).unwrap();
    assert_eq!(tree.reference("foo").unwrap().url, "/first");
    assert_eq!(tree.first_child(tree.root()), None);
}

#[test]
fn definitions_before_text() {
    sexpr(
        "[a]: /a\n[b]: </b c>\nText\n",
        "(document\n    (paragraph \"Text\"))\n",
    );
    let tree = parse_document("[a]: /a\n[b]: </b c>\nText\n", &Options::default()).unwrap();
    assert_eq!(tree.reference("b").unwrap().url, "/b c");
}

#[test]
fn definition_cannot_interrupt_paragraph() {
    let tree = parse_document("Foo\n[bar]: /baz\n", &Options::default()).unwrap();
    assert!(tree.reference("bar").is_none());
    assert_eq!(
        dump(&tree),
        "(document\n    (paragraph \"Foo\" softbreak \"[bar]: /baz\"))\n"
    );
}

#[test]
fn definition_in_block_quote() {
    let tree = parse_document("> [foo]: /url\n\n[foo]\n", &Options::default()).unwrap();
    assert_eq!(tree.reference("foo").unwrap().url, "/url");
    assert_eq!(
        dump(&tree),
        "(document\n    (block_quote)\n    (paragraph \"[foo]\"))\n"
    );
}

#[test]
fn labels_are_case_folded() {
    let tree = parse_document("[ÄÖ   Ü]: /umlaut\n", &Options::default()).unwrap();
    assert!(tree.reference("äö ü").is_some());
}
