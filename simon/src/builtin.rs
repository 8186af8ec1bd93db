use unicode_xid::UnicodeXID;

use super::ast::Expression;
use super::builder::{capture, char_class, not_lookahead, sequence, zero_or_more};
use super::utils::{escape_char, escape_string};

/// Any single character (`.`)
pub fn any_char() -> Expression {
    char_class("any character", |_| true)
}

/// Succeeds only at the end of the input
pub fn end_of_input() -> Expression {
    not_lookahead(any_char())
}

/// Zero or more whitespace characters, captured as text
pub fn whitespace() -> Expression {
    capture(zero_or_more(char_class("whitespace", char::is_whitespace)))
}

/// A unicode identifier: an XID start character or `_`, followed by XID
/// continue characters. Captured as text.
pub fn xid_identifier() -> Expression {
    capture(sequence([
        char_class("identifier", |ch| ch.is_xid_start() || ch == '_'),
        zero_or_more(char_class("identifier", |ch| ch.is_xid_continue())),
    ]))
}

pub fn digit() -> Expression {
    char_class("digit", |ch| ch.is_ascii_digit())
}

/// A character in the inclusive range `lo..=hi`
pub fn char_range(lo: char, hi: char) -> Expression {
    char_class(
        format!("{}..={}", escape_char(lo), escape_char(hi)),
        move |ch| (lo..=hi).contains(&ch),
    )
}

/// Any one of the characters in `chars`
pub fn one_of(chars: &str) -> Expression {
    let set: Vec<char> = chars.chars().collect();

    char_class(format!("[{}]", escape_string(chars)), move |ch| {
        set.contains(&ch)
    })
}
