// ### Token classes and lexing. ###

use crate::error::ParseError;

const SYMBOLIC: [char; 9] = ['/', '\\', '=', '>', '<', '-', '&', '|', '!'];
// Always single-character tokens, so `~~p` lexes as two negations.
const PUNCTUATION: [char; 3] = ['(', ')', '~'];

fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_symbolic(c: char) -> bool {
    SYMBOLIC.contains(&c)
}

fn lexwhile(class: fn(char) -> bool, input_chars: &[char]) -> usize {
    // Number of leading characters of `input_chars` in `class`.
    input_chars.iter().take_while(|c| class(**c)).count()
}

fn lex_inner(input_chars: &[char]) -> Result<Vec<String>, ParseError> {
    // Read tokens off the front of the input until it is exhausted.
    let mut tokens = Vec::new();
    let mut rest = input_chars;
    loop {
        let space_bound = lexwhile(char::is_whitespace, rest);
        rest = &rest[space_bound..];
        let head = match rest.first() {
            Some(head) => *head,
            None => return Ok(tokens),
        };
        let bound = if PUNCTUATION.contains(&head) {
            1
        } else if is_alphanumeric(head) {
            lexwhile(is_alphanumeric, rest)
        } else if is_symbolic(head) {
            lexwhile(is_symbolic, rest)
        } else {
            return Err(ParseError::UnexpectedChar(head));
        };
        tokens.push(rest[..bound].iter().collect());
        rest = &rest[bound..];
    }
}

pub fn lex(input: &str) -> Result<Vec<String>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    lex_inner(&chars)
}
