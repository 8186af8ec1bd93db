use log::debug;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::ast::Expression;
use super::check;
use super::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Definition {
    pub name: String,
    pub expression: Expression,
}

/// The rule registry.
///
/// Rules are stored in definition order and looked up by name; references
/// between rules go through the name, so a rule may be referenced before it
/// is defined. The first [`parse`](crate::parse) freezes the grammar, after
/// which no more rules can be added.
#[derive(Debug, Default)]
pub struct Grammar {
    lookup: BTreeMap<String, usize>,
    definitions: Vec<Definition>,
    frozen: AtomicBool,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    /// Add a rule. Returns a reference to the new rule for use in other
    /// expressions.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        expression: Expression,
    ) -> Result<Expression> {
        let name = name.into();

        if self.is_frozen() {
            return Err(Error::RegistryFrozen(name));
        }

        if self.lookup.contains_key(&name) {
            return Err(Error::DuplicateRule(name));
        }

        self.lookup.insert(name.clone(), self.definitions.len());

        self.definitions.push(Definition {
            name: name.clone(),
            expression,
        });

        Ok(Expression::Reference(name))
    }

    pub fn resolve(&self, name: &str) -> Result<&Expression> {
        self.rule_no(name)
            .map(|no| &self.definitions[no].expression)
    }

    pub(crate) fn rule_no(&self, name: &str) -> Result<usize> {
        self.lookup(name)
            .ok_or_else(|| Error::UndefinedRule(name.to_owned()))
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// `no` must come from [`Grammar::rule_no`]
    pub(crate) fn definition(&self, no: usize) -> &Definition {
        &self.definitions[no]
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Check that all references resolve and stop accepting new rules. A
    /// grammar with an undefined reference is left unfrozen.
    pub fn freeze(&self) -> Result<()> {
        if self.is_frozen() {
            return Ok(());
        }

        check::check_grammar(self)?;

        if !self.frozen.swap(true, Ordering::AcqRel) {
            debug!("grammar frozen with {} rules", self.definitions.len());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;

    #[test]
    fn define_and_resolve() {
        let mut grammar = Grammar::new();

        let a = grammar.define("a", literal("x")).unwrap();

        assert_eq!(a.to_string(), "a");
        assert!(grammar.contains("a"));
        assert_eq!(grammar.len(), 1);
        assert_eq!(grammar.resolve("a").unwrap().to_string(), "\"x\"");
        assert!(matches!(
            grammar.resolve("b"),
            Err(Error::UndefinedRule(name)) if name == "b"
        ));
    }

    #[test]
    fn duplicate() {
        let mut grammar = Grammar::new();

        grammar.define("a", literal("x")).unwrap();

        assert!(matches!(
            grammar.define("a", literal("y")),
            Err(Error::DuplicateRule(name)) if name == "a"
        ));
        assert_eq!(grammar.resolve("a").unwrap().to_string(), "\"x\"");
    }

    #[test]
    fn forward_reference() {
        let mut grammar = Grammar::new();

        grammar
            .define("list", sequence([reference("item"), zero_or_more(reference("item"))]))
            .unwrap();
        grammar.define("item", literal("x")).unwrap();

        assert!(grammar.freeze().is_ok());
        assert!(grammar.is_frozen());
    }

    #[test]
    fn frozen() {
        let mut grammar = Grammar::new();

        grammar.define("a", literal("x")).unwrap();
        grammar.freeze().unwrap();

        assert!(matches!(
            grammar.define("b", literal("y")),
            Err(Error::RegistryFrozen(name)) if name == "b"
        ));
    }

    #[test]
    fn undefined_reference_keeps_grammar_open() {
        let mut grammar = Grammar::new();

        grammar.define("a", reference("b")).unwrap();

        assert!(matches!(grammar.freeze(), Err(Error::UndefinedRule(_))));
        assert!(!grammar.is_frozen());

        grammar.define("b", literal("y")).unwrap();

        assert!(grammar.freeze().is_ok());
    }
}
