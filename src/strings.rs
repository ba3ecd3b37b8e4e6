pub fn is_ascii_punctuation(ch: u8) -> bool {
    ch.is_ascii_punctuation()
}

pub fn is_line_end_char(ch: u8) -> bool {
    matches!(ch, 10 | 13)
}

pub fn is_space_or_tab(ch: u8) -> bool {
    matches!(ch, 9 | 32)
}

pub fn is_blank(s: &str) -> bool {
    s.bytes()
        .all(|c| is_space_or_tab(c) || is_line_end_char(c))
}

/// Remove backslash escapes before ASCII punctuation.
pub fn unescape(v: &str) -> String {
    let bytes = v.as_bytes();
    let mut r = String::with_capacity(v.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() && is_ascii_punctuation(bytes[i + 1]) {
            r.push_str(&v[start..i]);
            start = i + 1;
            i += 2;
        } else {
            i += 1;
        }
    }

    r.push_str(&v[start..]);
    r
}

/// Drop every trailing line that consists only of spaces and tabs, keeping the
/// final line terminator of the last non-blank line.
pub fn remove_trailing_blank_lines(line: &mut String) {
    let line_bytes = line.as_bytes();
    let mut i = match line.len().checked_sub(1) {
        Some(i) => i,
        None => return,
    };
    loop {
        let c = line_bytes[i];

        if c != b' ' && c != b'\t' && !is_line_end_char(c) {
            break;
        }

        if i == 0 {
            line.clear();
            return;
        }

        i -= 1;
    }

    if let Some(nl) = line_bytes[i..].iter().position(|&c| is_line_end_char(c)) {
        line.truncate(i + nl + 1);
    }
}

/// Strip an ATX heading's optional closing sequence of `#`s.
pub fn chop_trailing_hashes(line: &str) -> &str {
    let line = line.trim_end_matches([' ', '\t']);
    let without = line.trim_end_matches('#');

    if without.is_empty() {
        return without;
    }
    if without.len() == line.len() {
        return line;
    }
    match without.as_bytes()[without.len() - 1] {
        b' ' | b'\t' => without.trim_end_matches([' ', '\t']),
        _ => line,
    }
}

pub fn trim_space_or_tab(s: &str) -> &str {
    s.trim_matches([' ', '\t'])
}

/// Normalize a link label for matching: trim, collapse internal whitespace,
/// and apply Unicode case folding.
pub fn normalize_label(i: &str) -> String {
    let collapsed = i.split_whitespace().collect::<Vec<_>>().join(" ");
    caseless::default_case_fold_str(&collapsed)
}
