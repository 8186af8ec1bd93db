use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::outcome::Value;
use super::utils::escape_string;

/// Function applied by [`Expression::Action`] to the value of its child.
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// A named predicate over a single character.
///
/// The name is what shows up in the expected set when the class fails to
/// match, so it should read well in an error message ("digit", "'a'..='z'").
#[derive(Clone)]
pub struct CharClass {
    name: String,
    predicate: Arc<dyn Fn(char) -> bool + Send + Sync>,
}

impl CharClass {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(char) -> bool + Send + Sync + 'static,
    ) -> Self {
        CharClass {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, ch: char) -> bool {
        (self.predicate)(ch)
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CharClass({})", self.name)
    }
}

/// A regular expression which only matches at the current position.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})", source))?;

        Ok(Pattern {
            source: source.to_owned(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length of the match at the start of `input`, if any
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end())
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// A parsing expression.
///
/// The set of variants is closed; the engine matches on it exhaustively.
/// `Reference` only holds the rule name, the body is looked up in the
/// [`Grammar`](crate::Grammar) when the reference is evaluated, so rules can
/// refer to each other (or themselves) before they are defined.
#[derive(Clone)]
pub enum Expression {
    Literal(String),
    CharClass(CharClass),
    Regex(Pattern),
    Sequence(Vec<Expression>),
    Choice(Vec<Expression>),
    ZeroOrMore(Box<Expression>),
    OneOrMore(Box<Expression>),
    Optional(Box<Expression>),
    Predicate(Box<Expression>, Polarity),
    Reference(String),
    Action(Box<Expression>, Transform),
    /// Replaces the child's value with the input text it consumed
    Capture(Box<Expression>),
    /// Wraps the child's value in a tagged [`Node`](crate::Node)
    Node(String, Box<Expression>),
}

impl Expression {
    /// Call `f` for every rule name referenced from this expression
    pub fn visit_references<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Expression::Reference(name) => f(name),
            Expression::Sequence(list) | Expression::Choice(list) => {
                for expr in list {
                    expr.visit_references(f);
                }
            }
            Expression::ZeroOrMore(expr)
            | Expression::OneOrMore(expr)
            | Expression::Optional(expr)
            | Expression::Predicate(expr, _)
            | Expression::Action(expr, _)
            | Expression::Capture(expr)
            | Expression::Node(_, expr) => expr.visit_references(f),
            Expression::Literal(_) | Expression::CharClass(_) | Expression::Regex(_) => (),
        }
    }

    fn is_compound(&self) -> bool {
        match self {
            Expression::Sequence(list) | Expression::Choice(list) => list.len() > 1,
            Expression::Action(expr, _) | Expression::Capture(expr) | Expression::Node(_, expr) => {
                expr.is_compound()
            }
            _ => false,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_compound() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Renders the expression in PEG notation. This is also the text used in
/// expected sets, e.g. `"ab"` for a literal or `not "ab"` for a negative
/// lookahead.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Literal(s) => write!(f, "\"{}\"", escape_string(s)),
            Expression::CharClass(class) => write!(f, "{}", class.name()),
            Expression::Regex(pattern) => write!(f, "/{}/", pattern.source()),
            Expression::Sequence(list) => {
                for (i, expr) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    expr.fmt_operand(f)?;
                }
                Ok(())
            }
            Expression::Choice(list) => {
                for (i, expr) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, " / ")?;
                    }
                    expr.fmt_operand(f)?;
                }
                Ok(())
            }
            Expression::ZeroOrMore(expr) => {
                expr.fmt_operand(f)?;
                write!(f, "*")
            }
            Expression::OneOrMore(expr) => {
                expr.fmt_operand(f)?;
                write!(f, "+")
            }
            Expression::Optional(expr) => {
                expr.fmt_operand(f)?;
                write!(f, "?")
            }
            Expression::Predicate(expr, Polarity::Positive) => {
                write!(f, "&")?;
                expr.fmt_operand(f)
            }
            Expression::Predicate(expr, Polarity::Negative) => {
                write!(f, "!")?;
                expr.fmt_operand(f)
            }
            Expression::Reference(name) => write!(f, "{}", name),
            Expression::Action(expr, _) | Expression::Capture(expr) | Expression::Node(_, expr) => {
                write!(f, "{}", expr)
            }
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Expression({})", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::*;
    use crate::builtin::digit;

    #[test]
    fn display() {
        let expr = sequence([
            literal("("),
            reference("expr"),
            choice([literal("+"), literal("-")]),
            zero_or_more(digit()),
            literal(")"),
        ]);

        assert_eq!(expr.to_string(), "\"(\" expr (\"+\" / \"-\") digit* \")\"");

        assert_eq!(not_lookahead(literal("a\n")).to_string(), "!\"a\\n\"");
        assert_eq!(
            optional(sequence([literal("a"), literal("b")])).to_string(),
            "(\"a\" \"b\")?"
        );
        assert_eq!(regex("[a-z]+").unwrap().to_string(), "/[a-z]+/");
    }

    #[test]
    fn references() {
        let expr = choice([
            sequence([reference("a"), lookahead(reference("b"))]),
            capture(one_or_more(reference("c"))),
            literal("d"),
        ]);

        let mut names = Vec::new();
        expr.visit_references(&mut |name| names.push(name));

        assert_eq!(names, ["a", "b", "c"]);
    }
}
