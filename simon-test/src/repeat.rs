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
                    sequence([literal("a"), optional(literal("b")), literal("c")]),
                    sequence([literal("x"), zero_or_more(literal("y")), literal("z")]),
                    sequence([literal("d"), one_or_more(literal("e")), literal("f")]),
                    sequence([literal("k"), lookahead(literal("x")), any_char()]),
                    sequence([literal("q"), not_lookahead(literal("s")), any_char()]),
                ]),
            ),
        )
        .unwrap();

    grammar
}
