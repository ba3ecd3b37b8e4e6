use super::*;

#[test]
fn lazy_block_quote_paragraph() {
    sexpr(
        "> bar\nbaz\n> foo\n",
        "(document\n    (block_quote\n        (paragraph \"bar\" softbreak \"baz\" softbreak \"foo\")))\n",
    );
}

#[test]
fn lazy_through_nested_containers() {
    sexpr(
        "> > > foo\nbar\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (block_quote\n",
            "            (block_quote\n",
            "                (paragraph \"foo\" softbreak \"bar\")))))\n"
        ),
    );
}

#[test]
fn lazy_line_cannot_start_a_block() {
    sexpr(
        "> foo\n---\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (paragraph \"foo\"))\n",
            "    (thematic_break))\n"
        ),
    );
    sexpr(
        "> - foo\n- bar\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (list bullet '-' tight\n",
            "            (item\n",
            "                (paragraph \"foo\"))))\n",
            "    (list bullet '-' tight\n",
            "        (item\n",
            "            (paragraph \"bar\"))))\n"
        ),
    );
}

#[test]
fn no_laziness_for_code() {
    sexpr(
        ">     foo\n    bar\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (code_block indented \"foo\\n\"))\n",
            "    (code_block indented \"bar\\n\"))\n"
        ),
    );
    sexpr(
        "> ```\nfoo\n```\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (code_block fenced \"\" \"\"))\n",
            "    (paragraph \"foo\")\n",
            "    (code_block fenced \"\" \"\"))\n"
        ),
    );
}

#[test]
fn blank_line_ends_laziness() {
    sexpr(
        "> foo\n\nbar\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (paragraph \"foo\"))\n",
            "    (paragraph \"bar\"))\n"
        ),
    );
}

#[test]
fn indented_lazy_line() {
    sexpr(
        "> foo\n    - bar\n",
        "(document\n    (block_quote\n        (paragraph \"foo\" softbreak \"- bar\")))\n",
    );
}
