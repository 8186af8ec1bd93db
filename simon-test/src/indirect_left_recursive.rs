use simon::builder::*;
use simon::Grammar;

// sub <- expr "-" num
// expr <- sub / num
pub fn grammar() -> Grammar {
    let mut grammar = Grammar::new();

    grammar
        .define("expr", reference("sub") | reference("num"))
        .unwrap();

    grammar
        .define(
            "sub",
            reference("expr") + literal("-") + reference("num"),
        )
        .unwrap();

    grammar.define("num", literal("1")).unwrap();

    grammar
}
