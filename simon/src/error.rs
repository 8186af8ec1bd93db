use thiserror::Error;

/// Misuse of a grammar. Failing to match the input is not an error, see
/// [`Outcome::Failure`](crate::Outcome::Failure).
#[derive(Debug, Error)]
pub enum Error {
    #[error("rule `{0}` is already defined")]
    DuplicateRule(String),
    #[error("rule `{0}` is referenced but never defined")]
    UndefinedRule(String),
    #[error("cannot define rule `{0}`: grammar is frozen")]
    RegistryFrozen(String),
    #[error("rule `{rule}` is left recursive at offset {position}")]
    LeftRecursion { rule: String, position: usize },
    #[error("offset {position} is not a character boundary of the {len} byte input")]
    InvalidPosition { position: usize, len: usize },
    #[error(transparent)]
    InvalidRegex(#[from] regex::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
