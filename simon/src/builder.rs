//! Combinators for building [`Expression`]s.
//!
//! These only construct expressions; nothing is checked until the grammar is
//! frozen by the first parse.

use std::ops::{Add, BitOr};
use std::sync::Arc;

use super::ast::{CharClass, Expression, Pattern, Polarity};
use super::error::Result;
use super::outcome::Value;

pub fn literal(text: impl Into<String>) -> Expression {
    Expression::Literal(text.into())
}

/// Match a single character for which `predicate` holds. `name` describes
/// the class in failure messages.
pub fn char_class(
    name: impl Into<String>,
    predicate: impl Fn(char) -> bool + Send + Sync + 'static,
) -> Expression {
    Expression::CharClass(CharClass::new(name, predicate))
}

/// Match a regular expression at the current position. The pattern is
/// anchored; it never skips input.
pub fn regex(pattern: &str) -> Result<Expression> {
    Ok(Expression::Regex(Pattern::new(pattern)?))
}

pub fn sequence(list: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Sequence(list.into_iter().collect())
}

/// Ordered choice: the first alternative which matches wins.
pub fn choice(alternatives: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::Choice(alternatives.into_iter().collect())
}

pub fn zero_or_more(expr: Expression) -> Expression {
    Expression::ZeroOrMore(Box::new(expr))
}

pub fn one_or_more(expr: Expression) -> Expression {
    Expression::OneOrMore(Box::new(expr))
}

pub fn optional(expr: Expression) -> Expression {
    Expression::Optional(Box::new(expr))
}

/// `&expr`: succeeds if `expr` matches, without consuming anything
pub fn lookahead(expr: Expression) -> Expression {
    Expression::Predicate(Box::new(expr), Polarity::Positive)
}

/// `!expr`: succeeds if `expr` does not match, without consuming anything
pub fn not_lookahead(expr: Expression) -> Expression {
    Expression::Predicate(Box::new(expr), Polarity::Negative)
}

/// Refer to a rule by name. The rule need not be defined yet.
pub fn reference(name: impl Into<String>) -> Expression {
    Expression::Reference(name.into())
}

pub fn action(
    expr: Expression,
    transform: impl Fn(Value) -> Value + Send + Sync + 'static,
) -> Expression {
    Expression::Action(Box::new(expr), Arc::new(transform))
}

pub fn capture(expr: Expression) -> Expression {
    Expression::Capture(Box::new(expr))
}

pub fn node(tag: impl Into<String>, expr: Expression) -> Expression {
    Expression::Node(tag.into(), Box::new(expr))
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        literal(text)
    }
}

/// `a + b` is the sequence `a b`. Sequences on either side are spliced
/// in, so `a + b + c` has three children.
impl Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        let mut list = match self {
            Expression::Sequence(list) => list,
            expr => vec![expr],
        };

        match rhs {
            Expression::Sequence(rhs) => list.extend(rhs),
            expr => list.push(expr),
        }

        Expression::Sequence(list)
    }
}

/// `a | b` is the ordered choice `a / b`.
impl BitOr for Expression {
    type Output = Expression;

    fn bitor(self, rhs: Expression) -> Expression {
        let mut list = match self {
            Expression::Choice(list) => list,
            expr => vec![expr],
        };

        match rhs {
            Expression::Choice(rhs) => list.extend(rhs),
            expr => list.push(expr),
        }

        Expression::Choice(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn operators() {
        let expr = literal("a") + reference("b") + (literal("c") | literal("d") | literal("e"));

        match &expr {
            Expression::Sequence(list) => {
                assert_eq!(list.len(), 3);
                assert!(matches!(&list[2], Expression::Choice(alts) if alts.len() == 3));
            }
            _ => panic!("expected sequence"),
        }

        assert_eq!(expr.to_string(), "\"a\" b (\"c\" / \"d\" / \"e\")");

        let expr = Expression::from("x") + sequence([literal("y"), literal("z")]);

        assert_eq!(expr.to_string(), "\"x\" \"y\" \"z\"");
    }

    #[test]
    fn bad_regex() {
        assert!(matches!(regex("[a-"), Err(Error::InvalidRegex(_))));
    }
}
