use super::*;
use pretty_assertions::assert_eq;

#[test]
fn atx_levels() {
    sexpr(
        "# one\n###### six\n####### seven\n",
        concat!(
            "(document\n",
            "    (heading 1 \"one\")\n",
            "    (heading 6 \"six\")\n",
            "    (paragraph \"####### seven\"))\n"
        ),
    );
}

#[test]
fn atx_requires_space() {
    sexpr(
        "#5 bolt\n#\n",
        concat!(
            "(document\n",
            "    (paragraph \"#5 bolt\")\n",
            "    (heading 1))\n"
        ),
    );
}

#[test]
fn atx_closing_sequence() {
    sexpr(
        "## foo ##\n# foo #####   \n### foo ### b\n# foo#\n### ###\n",
        concat!(
            "(document\n",
            "    (heading 2 \"foo\")\n",
            "    (heading 1 \"foo\")\n",
            "    (heading 3 \"foo ### b\")\n",
            "    (heading 1 \"foo#\")\n",
            "    (heading 3))\n"
        ),
    );
}

#[test]
fn atx_indentation() {
    sexpr(
        "   # foo\n    # bar\n",
        concat!(
            "(document\n",
            "    (heading 1 \"foo\")\n",
            "    (code_block indented \"# bar\\n\"))\n"
        ),
    );
}

#[test]
fn setext() {
    sexpr(
        "Foo\n===\n\nBar\n  ---  \n",
        concat!(
            "(document\n",
            "    (heading 1 setext \"Foo\")\n",
            "    (heading 2 setext \"Bar\"))\n"
        ),
    );
}

#[test]
fn setext_multiline() {
    sexpr(
        "Foo\nbar\n---\n",
        "(document\n    (heading 2 setext \"Foo\" softbreak \"bar\"))\n",
    );
}

#[test]
fn setext_needs_paragraph() {
    sexpr(
        "\n===\n",
        "(document\n    (paragraph \"===\"))\n",
    );
    sexpr(
        "---\n",
        "(document\n    (thematic_break))\n",
    );
}

#[test]
fn setext_after_lazy_line_is_not_heading() {
    sexpr(
        "> foo\nbar\n===\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (paragraph \"foo\" softbreak \"bar\" softbreak \"===\")))\n"
        ),
    );
}

#[test]
fn setext_inside_block_quote() {
    sexpr(
        "> Foo\n> ---\n",
        "(document\n    (block_quote\n        (heading 2 setext \"Foo\")))\n",
    );
}

#[test]
fn setext_after_definitions() {
    sexpr(
        "[foo]: /url\nBar\n===\n",
        "(document\n    (heading 1 setext \"Bar\"))\n",
    );

    let tree = parse_document("[foo]: /url\nBar\n===\n", &Options::default()).unwrap();
    assert_eq!(tree.reference("foo").map(|r| r.url.as_str()), Some("/url"));
}

#[test]
fn definitions_only_stay_paragraph() {
    // Nothing is left to be heading text, so the underline is a thematic break.
    sexpr("[foo]: /url\n---\n", "(document\n    (thematic_break))\n");
}
