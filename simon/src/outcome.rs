use std::collections::BTreeSet;
use std::fmt;

use super::utils::escape_string;

/// The value produced by a successful match.
///
/// Terminals produce the text they matched, sequences and repetitions a list
/// of their children's values, and `optional` or a lookahead produce
/// `Absent`. Actions are free to build anything else out of these.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
    List(Vec<Value>),
    Node(Node),
}

/// A tagged parse tree node, see [`node`](crate::builder::node).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub tag: String,
    pub start: usize,
    pub end: usize,
    pub children: Vec<Value>,
}

impl Node {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_str<'s>(&self, input: &'s str) -> &'s str {
        &input[self.start..self.end]
    }
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Children of a node built from this value: a list is spread out, an
    /// absent value has none.
    pub fn into_children(self) -> Vec<Value> {
        match self {
            Value::List(list) => list,
            Value::Absent => Vec::new(),
            value => vec![value],
        }
    }

    /// All text in this value concatenated, depth first
    pub fn concat(&self) -> String {
        let mut res = String::new();

        fn walk(value: &Value, res: &mut String) {
            match value {
                Value::Text(s) => res.push_str(s),
                Value::List(list) => list.iter().for_each(|value| walk(value, res)),
                Value::Node(node) => node.children.iter().for_each(|value| walk(value, res)),
                Value::Absent | Value::Integer(_) | Value::Float(_) => (),
            }
        }

        walk(self, &mut res);

        res
    }

    pub fn print_to_string(&self, input: &str) -> String {
        match self {
            Value::Absent => String::from("None"),
            Value::Text(s) => format!("\"{}\"", escape_string(s)),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::List(list) => format!(
                "[{}]",
                list.iter()
                    .map(|value| value.print_to_string(input))
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            Value::Node(node) => {
                let children = if node.children.is_empty() {
                    String::new()
                } else {
                    format!(
                        ", {}",
                        node.children
                            .iter()
                            .map(|value| value.print_to_string(input))
                            .collect::<Vec<String>>()
                            .join(", ")
                    )
                };

                format!(
                    "({}, \"{}\"{})",
                    node.tag,
                    escape_string(node.as_str(input)),
                    children
                )
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(list: Vec<Value>) -> Self {
        Value::List(list)
    }
}

/// Where a match failed and what would have been accepted there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub position: usize,
    pub expected: BTreeSet<String>,
}

impl Failure {
    pub fn new(position: usize, expected: impl Into<String>) -> Self {
        Failure {
            position,
            expected: BTreeSet::from([expected.into()]),
        }
    }

    pub fn empty(position: usize) -> Self {
        Failure {
            position,
            expected: BTreeSet::new(),
        }
    }

    /// Keep whichever failure got further; on a tie, expect either.
    pub fn furthest(mut self, other: Failure) -> Failure {
        if other.position > self.position {
            other
        } else {
            if other.position == self.position {
                self.expected.extend(other.expected);
            }
            self
        }
    }

    /// "expected A, B or C"
    fn expected_list(&self) -> String {
        let list: Vec<&str> = self.expected.iter().map(String::as_str).collect();

        match list.split_last() {
            None => String::from("nothing"),
            Some((last, [])) => last.to_string(),
            Some((last, init)) => format!("{} or {}", init.join(", "), last),
        }
    }

    /// Render the failure against the text that was parsed
    pub fn describe(&self, input: &str) -> String {
        let (line, column) = line_col(input, self.position);

        format!(
            "expected {} at line {}, column {}",
            self.expected_list(),
            line,
            column
        )
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "expected {} at offset {}",
            self.expected_list(),
            self.position
        )
    }
}

/// One-based line and column of the byte offset `pos` in `input`
pub fn line_col(input: &str, pos: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (off, ch) in input.char_indices() {
        if off >= pos {
            break;
        }

        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}

/// The result of evaluating an expression.
///
/// A failure to match is an ordinary value, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success { value: Value, end: usize },
    Failure(Failure),
}

impl Outcome {
    pub(crate) fn fail(position: usize, expected: impl Into<String>) -> Self {
        Outcome::Failure(Failure::new(position, expected))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn end_position(&self) -> Option<usize> {
        match self {
            Outcome::Success { end, .. } => Some(*end),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn failure_position(&self) -> Option<usize> {
        self.failure().map(|failure| failure.position)
    }

    pub fn expected(&self) -> Option<&BTreeSet<String>> {
        self.failure().map(|failure| &failure.expected)
    }
}
