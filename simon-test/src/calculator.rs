use simon::builder::*;
use simon::builtin::{digit, end_of_input, one_of, whitespace};
use simon::{Expression, Grammar, Value};

// skip trailing whitespace, keeping the value of expr
fn token(expr: Expression) -> Expression {
    action(sequence([expr, whitespace()]), |value| {
        value.into_children().swap_remove(0)
    })
}

// [first, [[op, operand], ...]] => integer
fn fold(value: Value) -> Option<i64> {
    let mut children = value.into_children().into_iter();

    let first = children.next().and_then(|value| value.as_integer());
    let rest = children.next().map(Value::into_children).unwrap_or_default();

    rest.into_iter()
        .try_fold(first?, |acc, pair| {
            let pair = pair.into_children();
            let op = pair.first()?.as_str()?;
            let operand = pair.get(1)?.as_integer()?;

            match op {
                "+" => acc.checked_add(operand),
                "-" => acc.checked_sub(operand),
                "*" => acc.checked_mul(operand),
                "/" => acc.checked_div(operand),
                "%" => acc.checked_rem(operand),
                _ => None,
            }
        })
}

// overflow, division by zero or an operand which was already invalid
fn fold_or_absent(value: Value) -> Value {
    fold(value).map_or(Value::Absent, Value::Integer)
}

// calculator <- WHITESPACE expr EOI
// expr <- term (("+" / "-") term)*
// term <- factor (("*" / "/" / "%") factor)*
// factor <- "(" expr ")" / num
// num <- [0-9]+
pub fn grammar() -> Grammar {
    let mut grammar = Grammar::new();

    grammar
        .define(
            "calculator",
            action(
                sequence([whitespace(), reference("expr"), end_of_input()]),
                |value| value.into_children().swap_remove(1),
            ),
        )
        .unwrap();

    grammar
        .define(
            "expr",
            action(
                sequence([
                    reference("term"),
                    zero_or_more(sequence([token(one_of("+-")), reference("term")])),
                ]),
                fold_or_absent,
            ),
        )
        .unwrap();

    grammar
        .define(
            "term",
            action(
                sequence([
                    reference("factor"),
                    zero_or_more(sequence([token(one_of("*/%")), reference("factor")])),
                ]),
                fold_or_absent,
            ),
        )
        .unwrap();

    grammar
        .define(
            "factor",
            choice([
                action(
                    sequence([token(literal("(")), reference("expr"), token(literal(")"))]),
                    |value| value.into_children().swap_remove(1),
                ),
                reference("num"),
            ]),
        )
        .unwrap();

    grammar
        .define(
            "num",
            token(action(capture(one_or_more(digit())), |value| {
                value
                    .as_str()
                    .and_then(|s| s.parse().ok())
                    .map_or(Value::Absent, Value::Integer)
            })),
        )
        .unwrap();

    grammar
}
