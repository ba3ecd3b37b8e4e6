use super::*;
use pretty_assertions::assert_eq;

#[test]
fn custom_marker() {
    sexpr_opts!(
        [parse.unordered_list_markers = vec!["^".to_string()]],
        "^ Foo\n^ Bar\n- Baz\n",
        concat!(
            "(document\n",
            "    (list bullet '^' tight\n",
            "        (item\n",
            "            (paragraph \"Foo\"))\n",
            "        (item\n",
            "            (paragraph \"Bar\" softbreak \"- Baz\"))))\n"
        ),
    );
}

#[test]
fn disabled_default_marker() {
    sexpr_opts!(
        [parse.unordered_list_markers = vec!["-".to_string(), "*".to_string()]],
        "+ Foo\n",
        "(document\n    (paragraph \"+ Foo\"))\n",
    );
}

#[test]
fn multibyte_marker() {
    sexpr_opts!(
        [parse.unordered_list_markers = vec!["•".to_string()]],
        "• one\n• two\n",
        concat!(
            "(document\n",
            "    (list bullet '•' tight\n",
            "        (item\n",
            "            (paragraph \"one\"))\n",
            "        (item\n",
            "            (paragraph \"two\"))))\n"
        ),
    );
}

#[test]
fn ordered_markers_are_unaffected() {
    sexpr_opts!(
        [parse.unordered_list_markers = vec!["^".to_string()]],
        "1. a\n",
        concat!(
            "(document\n",
            "    (list ordered 1 '.' tight\n",
            "        (item\n",
            "            (paragraph \"a\"))))\n"
        ),
    );
}

#[test]
fn thematic_break_wins_over_marker() {
    sexpr_opts!(
        [parse.unordered_list_markers = vec!["_".to_string()]],
        "_ _ _\n_ a\n",
        concat!(
            "(document\n",
            "    (thematic_break)\n",
            "    (list bullet '_' tight\n",
            "        (item\n",
            "            (paragraph \"a\"))))\n"
        ),
    );
}

#[track_caller]
fn rejected(markers: &[&str], expected: &str) {
    let mut options = Options::default();
    options.parse.unordered_list_markers = markers.iter().map(|m| m.to_string()).collect();

    let err = Parser::new(&options).unwrap_err();
    assert_eq!(err.to_string(), expected);
    assert!(matches!(
        parse_document("- a\n", &options),
        Err(Error::Config(ConfigError::InvalidOption { .. }))
    ));
}

#[test]
fn invalid_markers() {
    let single = "Invalid configuration option \"unordered_list_markers\": value must be an array of single-character strings";
    rejected(&["--"], single);
    rejected(&[""], single);
    rejected(&["-", "7"], single);
    rejected(&["\t"], single);
    rejected(
        &[],
        "Invalid configuration option \"unordered_list_markers\": value must be a non-empty array of strings",
    );
}

#[test]
fn from_toml() {
    let options =
        Options::from_toml_str("[parse]\nunordered_list_markers = [\"^\", \"-\"]\n").unwrap();
    assert_eq!(options.parse.unordered_list_markers, ["^", "-"]);
    assert_eq!(options.limits, Limits::default());
}

#[test]
fn from_toml_wrong_shape() {
    let expected =
        "Invalid configuration option \"unordered_list_markers\": value must be an array of strings";
    for toml in [
        "[parse]\nunordered_list_markers = \"-\"\n",
        "[parse]\nunordered_list_markers = [1, 2]\n",
        "[parse]\nunordered_list_markers = [\"-\", true]\n",
    ] {
        let err = Options::from_toml_str(toml).unwrap_err();
        assert_eq!(err.to_string(), expected, "{}", toml);
    }
}

#[test]
fn from_toml_unknown_option() {
    assert!(matches!(
        Options::from_toml_str("[parse]\nsmart = true\n"),
        Err(ConfigError::Toml(..))
    ));
}

#[cfg(feature = "bon")]
#[test]
fn builder_defaults() {
    let parse = ParseOptions::builder().build();
    assert_eq!(parse.unordered_list_markers, ["-", "*", "+"]);

    let limits = Limits::builder().max_lines(10).build();
    assert_eq!(limits.max_lines, Some(10));
    assert_eq!(limits.max_depth, 100);
    assert_eq!(limits.timeout, None);
}
