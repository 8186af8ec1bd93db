use simon::builder::*;
use simon::builtin::{any_char, char_range, digit, end_of_input, one_of, whitespace};
use simon::{Expression, Grammar, Value};

fn token(text: &str) -> Expression {
    sequence([literal(text), whitespace()])
}

// value (("," value)*)? => [value, ...]
fn separated(item: Expression) -> Expression {
    action(
        optional(sequence([
            item.clone(),
            zero_or_more(sequence([token(","), item])),
        ])),
        |value| {
            let mut children = value.into_children().into_iter();
            let mut list = Vec::new();

            if let Some(first) = children.next() {
                list.push(first);
            }

            for pair in children.flat_map(Value::into_children) {
                list.extend(pair.into_children().into_iter().nth(1));
            }

            Value::List(list)
        },
    )
}

fn second(value: Value) -> Value {
    value.into_children().swap_remove(1)
}

pub fn grammar() -> Grammar {
    let mut grammar = Grammar::new();

    grammar
        .define(
            "json",
            action(
                sequence([whitespace(), reference("value"), end_of_input()]),
                second,
            ),
        )
        .unwrap();

    grammar
        .define(
            "value",
            action(
                sequence([
                    choice([
                        reference("object"),
                        reference("array"),
                        reference("string"),
                        reference("number"),
                        action(literal("true"), |_| Value::from("true")),
                        action(literal("false"), |_| Value::from("false")),
                        action(literal("null"), |_| Value::Absent),
                    ]),
                    whitespace(),
                ]),
                |value| value.into_children().swap_remove(0),
            ),
        )
        .unwrap();

    grammar
        .define(
            "object",
            node(
                "object",
                action(
                    sequence([token("{"), separated(reference("member")), literal("}")]),
                    second,
                ),
            ),
        )
        .unwrap();

    grammar
        .define(
            "member",
            node(
                "member",
                action(
                    sequence([reference("string"), whitespace(), token(":"), reference("value")]),
                    |value| {
                        let mut children = value.into_children();
                        let value = children.swap_remove(3);
                        let key = children.swap_remove(0);

                        Value::List(vec![key, value])
                    },
                ),
            ),
        )
        .unwrap();

    grammar
        .define(
            "array",
            node(
                "array",
                action(
                    sequence([token("["), separated(reference("value")), literal("]")]),
                    second,
                ),
            ),
        )
        .unwrap();

    grammar
        .define(
            "string",
            action(
                sequence([
                    literal("\""),
                    capture(zero_or_more(choice([
                        sequence([literal("\\"), one_of("\"\\/bfnrt")]),
                        sequence([not_lookahead(one_of("\"\\")), any_char()]),
                    ]))),
                    literal("\""),
                ]),
                second,
            ),
        )
        .unwrap();

    grammar
        .define(
            "number",
            action(
                capture(sequence([
                    optional(literal("-")),
                    choice([
                        literal("0"),
                        sequence([char_range('1', '9'), zero_or_more(digit())]),
                    ]),
                    optional(sequence([literal("."), one_or_more(digit())])),
                ])),
                |value| {
                    value
                        .as_str()
                        .and_then(|s| s.parse().ok())
                        .map_or(Value::Absent, Value::Float)
                },
            ),
        )
        .unwrap();

    grammar
}
