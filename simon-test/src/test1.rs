use simon::builder::*;
use simon::Grammar;

pub fn grammar() -> Grammar {
    let mut grammar = Grammar::new();

    grammar
        .define("foo", node("foo", literal("barf")))
        .unwrap();

    grammar
}
