// Parsing of propositional formulas from text.
//
// The general combinators below parse a piece off the front of a token
// slice and hand back the parsed piece together with the remaining tokens.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::error::ParseError;
use crate::formula::Formula;
use crate::token::lex;

pub type PartialParseResult<'a, AST> = Result<(AST, &'a [String]), ParseError>;

pub type Subparser<'c, 'a, AST> = &'c dyn Fn(&'a [String]) -> PartialParseResult<'a, AST>;

// ### Abstract parser builders

pub fn parse_right_infix<'a, AST>(
    op_symbol: &str,
    op_constructor: fn(&AST, &AST) -> AST,
    subparser: Subparser<'_, 'a, AST>,
    input: &'a [String],
) -> PartialParseResult<'a, AST> {
    // Parses `a op b op c` as `a op (b op c)`.
    let (ast1, rest1) = subparser(input)?;
    match rest1 {
        [head, rest2 @ ..] if head == op_symbol => {
            let (ast2, rest3) = parse_right_infix(op_symbol, op_constructor, subparser, rest2)?;
            Ok((op_constructor(&ast1, &ast2), rest3))
        }
        _ => Ok((ast1, rest1)),
    }
}

pub fn parse_bracketed<'a, AST>(
    subparser: Subparser<'_, 'a, AST>,
    input: &'a [String],
) -> PartialParseResult<'a, AST> {
    // To be called after an opening bracket has been read.
    // The `subparser` has to get all the way to the closing bracket.
    debug!("parse_bracketed called on input {input:?}");
    let (ast, rest) = subparser(input)?;

    match rest {
        [head, tail @ ..] if head == ")" => Ok((ast, tail)),
        _ => Err(ParseError::UnclosedBracket),
    }
}

pub fn generic_parser<AST>(
    inner: for<'a> fn(&'a [String]) -> PartialParseResult<'a, AST>,
    input: &str,
) -> Result<AST, ParseError> {
    // Tokenize, parse, and insist that every token was consumed.
    let lexed = lex(input)?;
    let (expr, rest) = inner(&lexed[..])?;
    if !rest.is_empty() {
        return Err(ParseError::TrailingInput(rest.to_vec()));
    }
    Ok(expr)
}

// ### Propositional formulas
//
// Loosest to tightest: `==>`, `\/`, `/\`, `~`.  Binary connectives
// associate to the right.

fn atom_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("atom name pattern is a valid regex")
    })
}

fn parse_atom(name: &str) -> Result<Formula, ParseError> {
    if atom_name_pattern().is_match(name) {
        Ok(Formula::atom(name))
    } else if name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Err(ParseError::InvalidAtomName(name.to_string()))
    } else {
        Err(ParseError::UnexpectedToken(name.to_string()))
    }
}

fn parse_unary(input: &[String]) -> PartialParseResult<'_, Formula> {
    match input {
        [] => Err(ParseError::UnexpectedEnd),
        [head, rest @ ..] if head == "~" => {
            let (inner, rest) = parse_unary(rest)?;
            Ok((Formula::not(&inner), rest))
        }
        [head, rest @ ..] if head == "(" => parse_bracketed(&parse_imp, rest),
        [head, rest @ ..] => Ok((parse_atom(head)?, rest)),
    }
}

fn parse_conj(input: &[String]) -> PartialParseResult<'_, Formula> {
    parse_right_infix("/\\", Formula::and, &parse_unary, input)
}

fn parse_disj(input: &[String]) -> PartialParseResult<'_, Formula> {
    parse_right_infix("\\/", Formula::or, &parse_conj, input)
}

fn parse_imp(input: &[String]) -> PartialParseResult<'_, Formula> {
    debug!("parse_imp called on input {input:?}");
    parse_right_infix("==>", Formula::imp, &parse_disj, input)
}

impl Formula {
    pub fn parse(input: &str) -> Result<Formula, ParseError> {
        generic_parser(parse_imp, input)
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_parse_atom() {
        init();
        assert_eq!(Formula::parse("p").unwrap(), Formula::atom("p"));
        assert_eq!(Formula::parse("  Rain_2 ").unwrap(), Formula::atom("Rain_2"));
    }

    #[test]
    fn test_parse_precedence() {
        init();
        let result = Formula::parse("(p /\\ s) ==> (q /\\ ~r)").unwrap();
        let desired = Formula::imp(
            &Formula::and(&Formula::atom("p"), &Formula::atom("s")),
            &Formula::and(&Formula::atom("q"), &Formula::not(&Formula::atom("r"))),
        );
        assert_eq!(result, desired);
        // Same formula without the redundant brackets.
        assert_eq!(Formula::parse("p /\\ s ==> q /\\ ~r").unwrap(), desired);

        let result = Formula::parse("a \\/ b /\\ c").unwrap();
        let desired = Formula::or(
            &Formula::atom("a"),
            &Formula::and(&Formula::atom("b"), &Formula::atom("c")),
        );
        assert_eq!(result, desired);
    }

    #[test]
    fn test_parse_right_associative() {
        let result = Formula::parse("a ==> b ==> c").unwrap();
        let desired = Formula::imp(
            &Formula::atom("a"),
            &Formula::imp(&Formula::atom("b"), &Formula::atom("c")),
        );
        assert_eq!(result, desired);
    }

    #[test]
    fn test_parse_nested_negation() {
        let result = Formula::parse("~~(p \\/ ~q)").unwrap();
        let desired = Formula::not(&Formula::not(&Formula::or(
            &Formula::atom("p"),
            &Formula::not(&Formula::atom("q")),
        )));
        assert_eq!(result, desired);
    }

    #[test]
    fn test_print_then_parse() {
        let inputs = [
            "~(p /\\ ~s) ==> q /\\ ~(p /\\ s)",
            "(a \\/ ~b) /\\ (c \\/ d) \\/ (a \\/ b) /\\ (~c \\/ ~d)",
            "(a ==> b) ==> c",
        ];
        for input in inputs {
            let formula = Formula::parse(input).unwrap();
            assert_eq!(Formula::parse(&formula.to_string()).unwrap(), formula);
        }
    }

    #[test]
    fn test_parse_errors() {
        init();
        assert_eq!(Formula::parse(""), Err(ParseError::UnexpectedEnd));
        assert_eq!(Formula::parse("p /\\"), Err(ParseError::UnexpectedEnd));
        assert_eq!(Formula::parse("(p \\/ q"), Err(ParseError::UnclosedBracket));
        assert_eq!(
            Formula::parse("p q"),
            Err(ParseError::TrailingInput(vec!["q".to_string()]))
        );
        assert_eq!(
            Formula::parse("1p"),
            Err(ParseError::InvalidAtomName("1p".to_string()))
        );
        assert_eq!(
            Formula::parse("==> p"),
            Err(ParseError::UnexpectedToken("==>".to_string()))
        );
        assert_eq!(
            Formula::parse(")"),
            Err(ParseError::UnexpectedToken(")".to_string()))
        );
        assert_eq!(Formula::parse("p # q"), Err(ParseError::UnexpectedChar('#')));
    }
}
