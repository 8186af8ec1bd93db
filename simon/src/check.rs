use log::warn;
use std::collections::HashSet;

use super::error::{Error, Result};
use super::grammar::Grammar;

/// Make sure every referenced rule exists, and complain about rules which are
/// not used anywhere. The first rule defined is taken to be the start rule.
pub fn check_grammar(grammar: &Grammar) -> Result<()> {
    let mut used = HashSet::new();
    let mut undefined = None;

    for def in grammar.definitions() {
        def.expression.visit_references(&mut |name| {
            if let Some(no) = grammar.lookup(name) {
                used.insert(no);
            } else if undefined.is_none() {
                undefined = Some(name.to_owned());
            }
        });
    }

    if let Some(name) = undefined {
        return Err(Error::UndefinedRule(name));
    }

    for (no, def) in grammar.definitions().iter().enumerate() {
        if no != 0 && !used.contains(&no) {
            warn!("rule {} is not used anywhere", def.name);
        }
    }

    Ok(())
}
