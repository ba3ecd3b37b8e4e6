use blockmark::{Options, Parser};
use divan::Bencher;

fn main() {
    divan::main();
}

/// A document exercising every block type, repeated `n` times.
fn corpus(n: usize) -> String {
    let section = concat!(
        "# Chapter\n",
        "\n",
        "Some paragraph text that runs\n",
        "over two lines.\n",
        "\n",
        "> A quotation\n",
        "lazily continued.\n",
        ">\n",
        "> - with a list\n",
        ">   1. and a nested one\n",
        ">   2. with two items\n",
        "\n",
        "```rust\n",
        "fn main() {}\n",
        "```\n",
        "\n",
        "    indented code\n",
        "\n",
        "<div>\n",
        "html\n",
        "</div>\n",
        "\n",
        "Setext\n",
        "------\n",
        "\n",
        "[ref]: /url \"title\"\n",
        "\n",
        "* * *\n",
        "\n",
    );
    section.repeat(n)
}

#[divan::bench(args = [10, 1_000])]
fn bench_parse(b: Bencher, n: usize) {
    let s = corpus(n);
    let parser = Parser::new(&Options::default()).unwrap();

    b.bench(|| parser.parse(&s).unwrap());
}

#[divan::bench]
fn bench_nested_block_quotes(b: Bencher) {
    let mut options = Options::default();
    options.limits.max_depth = usize::MAX;
    let s = format!("{}a\n", "> ".repeat(10_000));
    let parser = Parser::new(&options).unwrap();

    b.bench(|| parser.parse(&s).unwrap());
}
