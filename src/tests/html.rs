use super::*;

#[test]
fn html_block_1() {
    sexpr(
        concat!(
            "<script\n",
            "*ok* </script> *ok*\n",
            "\n",
            "*ok*\n",
            "\n",
            "<pre x>\n",
            "*ok*\n",
            "</style>\n",
            "*ok*\n",
            "<style>\n",
            "*ok*\n",
            "</style>\n",
            "\n",
            "*ok*\n"
        ),
        concat!(
            "(document\n",
            "    (html_block 1 \"<script\\n*ok* </script> *ok*\\n\")\n",
            "    (paragraph \"*ok*\")\n",
            "    (html_block 1 \"<pre x>\\n*ok*\\n</style>\\n\")\n",
            "    (paragraph \"*ok*\")\n",
            "    (html_block 1 \"<style>\\n*ok*\\n</style>\\n\")\n",
            "    (paragraph \"*ok*\"))\n"
        ),
    );
}

#[test]
fn html_block_2() {
    sexpr(
        "   <!-- abc\n\nok --> *hi*\n*hi*\n",
        concat!(
            "(document\n",
            "    (html_block 2 \"   <!-- abc\\n\\nok --> *hi*\\n\")\n",
            "    (paragraph \"*hi*\"))\n"
        ),
    );
}

#[test]
fn html_block_3() {
    sexpr(
        " <? o\nk ?> *a*\n*a*\n",
        concat!(
            "(document\n",
            "    (html_block 3 \" <? o\\nk ?> *a*\\n\")\n",
            "    (paragraph \"*a*\"))\n"
        ),
    );
}

#[test]
fn html_block_4() {
    sexpr(
        "<!X >\nok\n<!X\num > h\nok\n",
        concat!(
            "(document\n",
            "    (html_block 4 \"<!X >\\n\")\n",
            "    (paragraph \"ok\")\n",
            "    (html_block 4 \"<!X\\num > h\\n\")\n",
            "    (paragraph \"ok\"))\n"
        ),
    );
}

#[test]
fn html_block_5() {
    sexpr(
        "<![CDATA[\n\nhm >\n*ok*\n]]> *ok*\n*ok*\n",
        concat!(
            "(document\n",
            "    (html_block 5 \"<![CDATA[\\n\\nhm >\\n*ok*\\n]]> *ok*\\n\")\n",
            "    (paragraph \"*ok*\"))\n"
        ),
    );
}

#[test]
fn html_block_6() {
    sexpr(
        " </table>\n*x*\n\nok\n\n<li\n*x*\n",
        concat!(
            "(document\n",
            "    (html_block 6 \" </table>\\n*x*\\n\")\n",
            "    (paragraph \"ok\")\n",
            "    (html_block 6 \"<li\\n*x*\\n\"))\n"
        ),
    );
}

#[test]
fn html_block_7() {
    sexpr(
        "<a b c=x d='y' z=\"f\" >\nok\n\nok\n",
        concat!(
            "(document\n",
            "    (html_block 7 \"<a b c=x d='y' z=\\\"f\\\" >\\nok\\n\")\n",
            "    (paragraph \"ok\"))\n"
        ),
    );
}

#[test]
fn html_block_7_cannot_interrupt_paragraph() {
    sexpr(
        "Foo\n<a href=\"bar\">\nbaz\n",
        "(document\n    (paragraph \"Foo\" softbreak \"<a href=\\\"bar\\\">\" softbreak \"baz\"))\n",
    );
}

#[test]
fn html_block_6_interrupts_paragraph() {
    sexpr(
        "Foo\n<div>\nbar\n",
        concat!(
            "(document\n",
            "    (paragraph \"Foo\")\n",
            "    (html_block 6 \"<div>\\nbar\\n\"))\n"
        ),
    );
}

#[test]
fn html_block_ends_with_container() {
    sexpr(
        "> <div>\n> foo\n\nbar\n",
        concat!(
            "(document\n",
            "    (block_quote\n",
            "        (html_block 6 \"<div>\\nfoo\\n\"))\n",
            "    (paragraph \"bar\"))\n"
        ),
    );
}
