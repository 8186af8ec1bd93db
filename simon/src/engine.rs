use log::{debug, trace};

use super::ast::{Expression, Polarity};
use super::error::{Error, Result};
use super::grammar::Grammar;
use super::memo::{Entry, Memo};
use super::outcome::{Failure, Node, Outcome, Value};
use super::utils::common_prefix_len;

/// Counters from the last parse run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Rule bodies actually evaluated (memo misses)
    pub rule_evaluations: usize,
    /// Rule references answered from the memo
    pub memo_hits: usize,
}

/// Runs a grammar against input text.
///
/// The memo lives as long as a single call to [`Parser::parse`] or
/// [`Parser::evaluate`]; it is cleared at the start of every run. The
/// grammar is only read, so any number of parsers may share it.
pub struct Parser<'g> {
    grammar: &'g Grammar,
    memo: Memo,
    stats: ParseStats,
    require_end_of_input: bool,
    // furthest failure of the rule currently being evaluated
    furthest: Option<Failure>,
    // negative lookaheads open in that rule; failures there are what we
    // hope for
    silent: usize,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Parser {
            grammar,
            memo: Memo::default(),
            stats: ParseStats::default(),
            require_end_of_input: false,
            furthest: None,
            silent: 0,
        }
    }

    /// Treat a match which does not reach the end of the input as a failure
    pub fn require_end_of_input(mut self, require: bool) -> Self {
        self.require_end_of_input = require;
        self
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Parse `input` starting from the rule `start`. This freezes the
    /// grammar.
    pub fn parse(&mut self, start: &str, input: &str) -> Result<Outcome> {
        self.grammar.freeze()?;

        let rule_no = self.grammar.rule_no(start)?;

        self.reset();

        debug!("parsing {} bytes from rule {}", input.len(), start);

        let res = self.rule(rule_no, 0, input);

        debug!(
            "parse done: {} rule evaluations, {} memo hits, {} memo entries",
            self.stats.rule_evaluations,
            self.stats.memo_hits,
            self.memo.len()
        );

        // the memo is only valid for this input
        self.memo.clear();

        let failure = match res? {
            Outcome::Success { end, .. } if self.require_end_of_input && end < input.len() => {
                Failure::new(end, "end of input")
            }
            Outcome::Failure(failure) => failure,
            success => return Ok(success),
        };

        // report the furthest any terminal got, not just where the start rule
        // gave up
        let failure = match self.furthest.take() {
            Some(furthest) => furthest.furthest(failure),
            None => failure,
        };

        Ok(Outcome::Failure(failure))
    }

    /// Evaluate `expr` at byte offset `pos` of `input`. This freezes the
    /// grammar.
    ///
    /// Each call starts from an empty memo. The outcome is the expression's
    /// own: a failure is where `expr` itself gave up, not the furthest
    /// failure [`Parser::parse`] would report.
    pub fn evaluate(&mut self, expr: &Expression, pos: usize, input: &str) -> Result<Outcome> {
        self.grammar.freeze()?;

        if !input.is_char_boundary(pos) {
            return Err(Error::InvalidPosition {
                position: pos,
                len: input.len(),
            });
        }

        self.reset();

        let res = self.eval(expr, pos, input);

        self.memo.clear();

        res
    }

    fn reset(&mut self) {
        self.memo.clear();
        self.stats = ParseStats::default();
        self.furthest = None;
        self.silent = 0;
    }

    /// Merge a failure into the furthest seen so far, unless inside a
    /// negative lookahead
    fn record(&mut self, failure: Option<Failure>) {
        if self.silent > 0 {
            return;
        }

        if let Some(failure) = failure {
            self.furthest = Some(match self.furthest.take() {
                Some(furthest) => furthest.furthest(failure),
                None => failure,
            });
        }
    }

    fn fail(&mut self, pos: usize, expected: String) -> Outcome {
        self.record(Some(Failure::new(pos, expected.clone())));

        Outcome::fail(pos, expected)
    }

    fn rule(&mut self, rule_no: usize, pos: usize, input: &str) -> Result<Outcome> {
        let grammar = self.grammar;
        let def = grammar.definition(rule_no);

        if let Some(entry) = self.memo.get(pos, rule_no).cloned() {
            trace!("memo hit for {} at {}", def.name, pos);
            self.stats.memo_hits += 1;
            self.record(entry.furthest);
            return Ok(entry.outcome);
        }

        if !self.memo.enter(pos, rule_no) {
            debug!("left recursion in rule {} at {}", def.name, pos);

            return Err(Error::LeftRecursion {
                rule: def.name.clone(),
                position: pos,
            });
        }

        trace!("evaluating {} at {}", def.name, pos);
        self.stats.rule_evaluations += 1;

        // track the rule's failures on their own, whether or not the caller
        // is inside a negative lookahead, so that a memo hit can replay them
        let outer = self.furthest.take();
        let silent = std::mem::replace(&mut self.silent, 0);

        let res = self.eval(&def.expression, pos, input);

        self.memo.leave(pos, rule_no);
        self.silent = silent;

        let furthest = std::mem::replace(&mut self.furthest, outer);
        let outcome = res?;

        // Note that failure to match is also cached
        self.memo.insert(
            pos,
            rule_no,
            Entry {
                outcome: outcome.clone(),
                furthest: furthest.clone(),
            },
        );

        self.record(furthest);

        Ok(outcome)
    }

    fn eval(&mut self, expr: &Expression, pos: usize, input: &str) -> Result<Outcome> {
        match expr {
            Expression::Literal(s) => {
                let rest = &input[pos..];

                if rest.starts_with(s.as_str()) {
                    Ok(Outcome::Success {
                        value: Value::Text(s.clone()),
                        end: pos + s.len(),
                    })
                } else {
                    // fail where the input stops agreeing with the literal
                    Ok(self.fail(pos + common_prefix_len(rest, s), expr.to_string()))
                }
            }
            Expression::CharClass(class) => match input[pos..].chars().next() {
                Some(ch) if class.matches(ch) => Ok(Outcome::Success {
                    value: Value::Text(ch.to_string()),
                    end: pos + ch.len_utf8(),
                }),
                _ => Ok(self.fail(pos, class.name().to_owned())),
            },
            Expression::Regex(pattern) => match pattern.match_len(&input[pos..]) {
                Some(len) => Ok(Outcome::Success {
                    value: Value::Text(input[pos..pos + len].to_owned()),
                    end: pos + len,
                }),
                None => Ok(self.fail(pos, expr.to_string())),
            },
            Expression::Sequence(list) => {
                let mut values = Vec::with_capacity(list.len());
                let mut next_pos = pos;

                for expr in list {
                    match self.eval(expr, next_pos, input)? {
                        Outcome::Success { value, end } => {
                            values.push(value);
                            next_pos = end;
                        }
                        failure => return Ok(failure),
                    }
                }

                Ok(Outcome::Success {
                    value: Value::List(values),
                    end: next_pos,
                })
            }
            Expression::Choice(list) => {
                let mut furthest: Option<Failure> = None;

                for expr in list {
                    match self.eval(expr, pos, input)? {
                        Outcome::Failure(failure) => {
                            furthest = Some(match furthest {
                                Some(prev) => prev.furthest(failure),
                                None => failure,
                            });
                        }
                        success => return Ok(success),
                    }
                }

                Ok(Outcome::Failure(
                    furthest.unwrap_or_else(|| Failure::empty(pos)),
                ))
            }
            Expression::ZeroOrMore(expr) => self.repeat(expr, pos, Vec::new(), input),
            Expression::OneOrMore(expr) => match self.eval(expr, pos, input)? {
                Outcome::Success { value, end } if end == pos => Ok(Outcome::Success {
                    value: Value::List(vec![value]),
                    end,
                }),
                Outcome::Success { value, end } => self.repeat(expr, end, vec![value], input),
                failure => Ok(failure),
            },
            Expression::Optional(expr) => match self.eval(expr, pos, input)? {
                Outcome::Failure(_) => Ok(Outcome::Success {
                    value: Value::Absent,
                    end: pos,
                }),
                success => Ok(success),
            },
            Expression::Predicate(child, polarity) => {
                let res = if *polarity == Polarity::Negative {
                    self.silent += 1;
                    let res = self.eval(child, pos, input);
                    self.silent -= 1;
                    res?
                } else {
                    self.eval(child, pos, input)?
                };

                match (*polarity, res) {
                    (Polarity::Positive, Outcome::Failure(failure)) => Ok(Outcome::Failure(failure)),
                    (Polarity::Negative, Outcome::Success { .. }) => {
                        Ok(self.fail(pos, format!("not {}", child)))
                    }
                    _ => Ok(Outcome::Success {
                        value: Value::Absent,
                        end: pos,
                    }),
                }
            }
            Expression::Reference(name) => {
                let rule_no = self.grammar.rule_no(name)?;

                self.rule(rule_no, pos, input)
            }
            Expression::Action(expr, transform) => match self.eval(expr, pos, input)? {
                Outcome::Success { value, end } => Ok(Outcome::Success {
                    value: transform(value),
                    end,
                }),
                failure => Ok(failure),
            },
            Expression::Capture(expr) => match self.eval(expr, pos, input)? {
                Outcome::Success { end, .. } => Ok(Outcome::Success {
                    value: Value::Text(input[pos..end].to_owned()),
                    end,
                }),
                failure => Ok(failure),
            },
            Expression::Node(tag, expr) => match self.eval(expr, pos, input)? {
                Outcome::Success { value, end } => Ok(Outcome::Success {
                    value: Value::Node(Node {
                        tag: tag.clone(),
                        start: pos,
                        end,
                        children: value.into_children(),
                    }),
                    end,
                }),
                failure => Ok(failure),
            },
        }
    }

    /// Match `expr` as often as possible from `pos`, appending to `list`.
    /// The failure which ends the loop is dropped.
    fn repeat(
        &mut self,
        expr: &Expression,
        mut pos: usize,
        mut list: Vec<Value>,
        input: &str,
    ) -> Result<Outcome> {
        while let Outcome::Success { value, end } = self.eval(expr, pos, input)? {
            list.push(value);

            if end == pos {
                // must be making progress
                break;
            }

            pos = end;
        }

        Ok(Outcome::Success {
            value: Value::List(list),
            end: pos,
        })
    }
}

/// Parse `text` with `grammar`, starting from the rule `start`.
///
/// Returns `Ok` whether or not the text matched; an `Err` means the grammar
/// itself is broken (an undefined or left recursive rule).
pub fn parse(grammar: &Grammar, start: &str, text: &str) -> Result<Outcome> {
    Parser::new(grammar).parse(start, text)
}
