use simon::builder::*;
use simon::builtin::any_char;
use simon::Grammar;

pub fn grammar() -> Grammar {
    let mut grammar = Grammar::new();

    grammar
        .define(
            "foo",
            node(
                "foo",
                choice([
                    sequence([literal("barf"), literal(" "), literal("darf")]),
                    reference("carf"),
                ]),
            ),
        )
        .unwrap();

    grammar
        .define(
            "carf",
            node(
                "carf",
                sequence([literal("carf"), any_char(), reference("erf")]),
            ),
        )
        .unwrap();

    grammar
        .define("erf", node("erf", literal("erf")))
        .unwrap();

    grammar
}
