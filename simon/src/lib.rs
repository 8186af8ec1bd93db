//! A packrat parser for parsing expression grammars.
//!
//! Grammars are built in code from the combinators in [`builder`] and
//! [`builtin`], registered by name in a [`Grammar`], and run with [`parse`].
//! Results of named rules are memoized per input position, so a grammar runs
//! in linear time however much it backtracks. Left recursive rules are not
//! supported; they are reported as [`Error::LeftRecursion`].
//!
//! Recursion depth grows with the nesting of the grammar and the length of
//! the input. Very large untrusted inputs may exhaust the stack.

pub mod ast;
pub mod builder;
pub mod builtin;
mod check;
pub mod engine;
pub mod error;
pub mod grammar;
mod memo;
pub mod outcome;
mod utils;

pub use ast::{CharClass, Expression, Polarity};
pub use engine::{parse, ParseStats, Parser};
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use outcome::{line_col, Failure, Node, Outcome, Value};
