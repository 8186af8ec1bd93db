pub fn escape_char(ch: char) -> String {
    match ch {
        '\\' => String::from("'\\\\'"),
        '\t' => String::from("'\\t'"),
        '\n' => String::from("'\\n'"),
        '\r' => String::from("'\\r'"),
        '\'' => String::from("'\\''"),
        ch => format!("'{}'", ch),
    }
}

pub fn escape_string(str: &str) -> String {
    let mut res = String::new();

    for ch in str.chars() {
        match ch {
            '\\' => res.push_str("\\\\"),
            '\t' => res.push_str("\\t"),
            '\n' => res.push_str("\\n"),
            '\r' => res.push_str("\\r"),
            '"' => res.push_str("\\\""),
            ch => res.push(ch),
        }
    }

    res
}

/// Byte length of the longest common prefix of `a` and `b`, which is always
/// on a character boundary of both.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}
