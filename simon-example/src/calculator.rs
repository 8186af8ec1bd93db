use simon::builder::*;
use simon::builtin::{digit, end_of_input, one_of, whitespace};
use simon::{Expression, Grammar};

fn token(expr: Expression) -> Expression {
    action(sequence([expr, whitespace()]), |value| {
        value.into_children().swap_remove(0)
    })
}

// calculator <- WHITESPACE expr EOI
// expr <- term (("+" / "-") term)*
// term <- factor (("*" / "/" / "%") factor)*
// factor <- "(" expr ")" / num
// num <- [0-9]+
pub fn grammar() -> simon::Result<Grammar> {
    let mut grammar = Grammar::new();

    grammar.define(
        "calculator",
        action(
            sequence([whitespace(), reference("expr"), end_of_input()]),
            |value| value.into_children().swap_remove(1),
        ),
    )?;

    grammar.define(
        "expr",
        node(
            "expr",
            reference("term") + zero_or_more(token(one_of("+-")) + reference("term")),
        ),
    )?;

    grammar.define(
        "term",
        node(
            "term",
            reference("factor") + zero_or_more(token(one_of("*/%")) + reference("factor")),
        ),
    )?;

    grammar.define(
        "factor",
        node(
            "paren",
            token(literal("(")) + reference("expr") + token(literal(")")),
        ) | reference("num"),
    )?;

    grammar.define("num", token(node("num", capture(one_or_more(digit())))))?;

    grammar.freeze()?;

    Ok(grammar)
}
