//! Line scanners for block starts and ends.
//!
//! Every scanner is anchored at the start of the text it is given, which is
//! the remainder of a line beginning at its first non-space character. Lines
//! never carry their terminator.

use std::sync::OnceLock;

use regex::Regex;

macro_rules! regex {
    ($re:expr $(,)?) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($re).expect("invalid scanner regex"))
    }};
}

fn search(re: &Regex, line: &str) -> Option<usize> {
    re.find(line).map(|m| m.end() - m.start())
}

fn group_len(re: &Regex, line: &str, group: usize) -> Option<usize> {
    re.captures(line)
        .and_then(|c| c.get(group))
        .map(|m| m.end() - m.start())
}

/// The opening `#` sequence of an ATX heading plus the whitespace after it.
pub fn atx_heading_start(line: &str) -> Option<usize> {
    search(regex!(r"\A#{1,6}(?:[ \t]+|\z)"), line)
}

/// The length of an opening fence.  Backtick fences may not be followed by
/// an info string containing backticks.
pub fn open_code_fence(line: &str) -> Option<usize> {
    group_len(regex!(r"\A(`{3,})[^`]*\z"), line, 1)
        .or_else(|| group_len(regex!(r"\A(~{3,})"), line, 1))
}

/// The length of a closing fence, which may only be followed by spaces and tabs.
pub fn close_code_fence(line: &str) -> Option<usize> {
    group_len(regex!(r"\A(`{3,}|~{3,})[ \t]*\z"), line, 1)
}

pub enum SetextChar {
    Equals,
    Hyphen,
}

pub fn setext_heading_line(line: &str) -> Option<SetextChar> {
    if !regex!(r"\A(?:=+|-+)[ \t]*\z").is_match(line) {
        return None;
    }
    if line.starts_with('=') {
        Some(SetextChar::Equals)
    } else {
        Some(SetextChar::Hyphen)
    }
}

pub fn thematic_break(line: &str) -> bool {
    regex!(r"\A(?:(?:\*[ \t]*){3,}|(?:_[ \t]*){3,}|(?:-[ \t]*){3,})\z").is_match(line)
}

const BLOCK_TAG_NAMES: &str = "address|article|aside|base|basefont|blockquote|body|caption|\
center|col|colgroup|dd|details|dialog|dir|div|dl|dt|fieldset|figcaption|figure|footer|form|\
frame|frameset|h1|h2|h3|h4|h5|h6|head|header|hr|html|iframe|legend|li|link|main|menu|\
menuitem|nav|noframes|ol|optgroup|option|p|param|search|section|summary|table|tbody|td|\
tfoot|th|thead|title|tr|track|ul";

/// Which of the HTML block start conditions 1 to 6 the line meets, if any.
pub fn html_block_start(line: &str) -> Option<u8> {
    static TYPE_6: OnceLock<Regex> = OnceLock::new();

    if !line.starts_with('<') {
        return None;
    }

    if regex!(r"(?i)\A<(?:script|pre|style|textarea)(?:[ \t>]|\z)").is_match(line) {
        Some(1)
    } else if line.starts_with("<!--") {
        Some(2)
    } else if line.starts_with("<?") {
        Some(3)
    } else if regex!(r"\A<![A-Za-z]").is_match(line) {
        Some(4)
    } else if line.starts_with("<![CDATA[") {
        Some(5)
    } else if TYPE_6
        .get_or_init(|| {
            Regex::new(&format!(r"(?i)\A</?(?:{})(?:[ \t]|/?>|\z)", BLOCK_TAG_NAMES))
                .expect("invalid scanner regex")
        })
        .is_match(line)
    {
        Some(6)
    } else {
        None
    }
}

/// Whether the line is a lone complete open or closing tag, HTML block start
/// condition 7.
pub fn html_block_start_7(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let tag_name = r"[A-Za-z][A-Za-z0-9-]*";
        let attribute_name = r"[a-zA-Z_:][a-zA-Z0-9:._-]*";
        let attribute_value = r#"(?:[^"'=<>`\x00 \t]+|'[^']*'|"[^"]*")"#;
        let attribute = format!(
            r"(?:[ \t]+{}(?:[ \t]*=[ \t]*{})?)",
            attribute_name, attribute_value
        );
        let open_tag = format!(r"<{}{}*[ \t]*/?>", tag_name, attribute);
        let close_tag = format!(r"</{}[ \t]*>", tag_name);
        Regex::new(&format!(r"\A(?:{}|{})[ \t]*\z", open_tag, close_tag))
            .expect("invalid scanner regex")
    })
    .is_match(line)
}

/// Whether `line` contains the end condition of an HTML block of `block_type`.
/// Types 6 and 7 end on a blank line instead.
pub fn html_block_end(block_type: u8, line: &str) -> bool {
    match block_type {
        1 => regex!(r"(?i)</(?:script|pre|style|textarea)>").is_match(line),
        2 => line.contains("-->"),
        3 => line.contains("?>"),
        4 => line.contains('>'),
        5 => line.contains("]]>"),
        _ => false,
    }
}
