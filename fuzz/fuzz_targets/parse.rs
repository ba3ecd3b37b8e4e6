#![no_main]
use blockmark::{format_sexpr, parse_document, Options};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    options: Options,
    markdown: &'a str,
}

fuzz_target!(|input: Input| {
    let mut options = input.options;
    // Keep the dump's recursion shallow.
    options.limits.max_depth = options.limits.max_depth.min(1000);

    if let Ok(tree) = parse_document(input.markdown, &options) {
        let mut out = String::new();
        format_sexpr(&tree, &mut out).unwrap();
    }
});
