use simon::builder::*;
use simon::Grammar;

// expr <- expr "+" num / num
pub fn grammar() -> Grammar {
    let mut grammar = Grammar::new();

    grammar
        .define(
            "expr",
            choice([
                sequence([reference("expr"), literal("+"), reference("num")]),
                reference("num"),
            ]),
        )
        .unwrap();

    grammar.define("num", literal("1")).unwrap();

    grammar
}

// expr <- num ("+" num)*
pub fn rewritten() -> Grammar {
    let mut grammar = Grammar::new();

    grammar
        .define(
            "expr",
            reference("num") + zero_or_more(literal("+") + reference("num")),
        )
        .unwrap();

    grammar.define("num", literal("1")).unwrap();

    grammar
}
