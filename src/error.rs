// ### Errors ###
// Everything that can go wrong when building, parsing or evaluating a formula.
// Running out of assignments during a search is a result, not an error.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    // A character the lexer has no token class for.
    UnexpectedChar(char),
    // The token stream ended where a formula was expected.
    UnexpectedEnd,
    UnexpectedToken(String),
    UnclosedBracket,
    // A token in atom position that is not a legal proposition name.
    InvalidAtomName(String),
    // A complete formula was parsed but tokens remain.
    TrailingInput(Vec<String>),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedChar(c) => write!(f, "unrecognized character {c:?}"),
            ParseError::UnexpectedEnd => write!(f, "unexpected end of input, formula expected"),
            ParseError::UnexpectedToken(token) => write!(f, "unexpected token {token:?}"),
            ParseError::UnclosedBracket => write!(f, "closing bracket expected"),
            ParseError::InvalidAtomName(name) => write!(f, "{name:?} is not a valid atom name"),
            ParseError::TrailingInput(rest) => write!(f, "unparsed input {rest:?}"),
        }
    }
}

impl Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    // `eval` met an atom the valuation does not bind.
    UnboundAtom(String),
    // The premises handed to an entailment check were malformed.
    InvalidPremise { index: usize, reason: String },
    Parse(ParseError),
}

impl Display for LogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogicError::UnboundAtom(name) => {
                write!(f, "valuation does not assign a truth value to atom {name:?}")
            }
            LogicError::InvalidPremise { index, reason } => {
                write!(f, "invalid premise at position {index}: {reason}")
            }
            LogicError::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl Error for LogicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LogicError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for LogicError {
    fn from(e: ParseError) -> Self {
        LogicError::Parse(e)
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_parse_error_converts_and_chains() {
        let err: LogicError = ParseError::UnclosedBracket.into();
        assert_eq!(err, LogicError::Parse(ParseError::UnclosedBracket));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "parse error: closing bracket expected");
    }

    #[test]
    fn test_unbound_atom_message() {
        let err = LogicError::UnboundAtom("p".to_string());
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "valuation does not assign a truth value to atom \"p\""
        );
    }
}
