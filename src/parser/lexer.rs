use sqlparser::tokenizer::{Token, Tokenizer, Whitespace};

use super::{LambdaDialect, Location, SyntaxError};

/// A token together with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Lexeme {
    pub(crate) token: Token,
    pub(crate) location: Location,
}

/// Split source text into lexemes, dropping whitespace and comments. The result always ends with
/// `Token::EOF`.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Lexeme>, SyntaxError> {
    let dialect = LambdaDialect::default();
    let tokens = Tokenizer::new(&dialect, source).tokenize()?;

    let mut lexemes: Vec<Lexeme> = Vec::with_capacity(tokens.len() + 1);
    let mut location = Location::start();
    // whether the last pushed lexeme ends right where the current token starts
    let mut adjacent = false;
    for token in tokens {
        let text = source_text(&token);
        let start = location;
        location.advance(&text);

        if let Token::Whitespace(_) = token {
            adjacent = false;
            continue;
        }
        if adjacent {
            if let Some(last) = lexemes.last_mut() {
                if merge(&mut last.token, &token) {
                    continue;
                }
            }
        }
        adjacent = true;
        lexemes.push(Lexeme {
            token,
            location: start,
        });
    }
    lexemes.push(Lexeme {
        token: Token::EOF,
        location,
    });
    Ok(lexemes)
}

/// Glue tokens the tokenizer splits apart: `19_400_000` arrives as `19` `_400_000`, `1_000.5`
/// additionally as `.5`, and `==` may arrive as two `=`.
fn merge(last: &mut Token, next: &Token) -> bool {
    if let (Token::Eq, Token::Eq) = (&*last, next) {
        *last = Token::DoubleEq;
        return true;
    }
    match (last, next) {
        (Token::Number(number, false), Token::Word(word))
            if word.quote_style.is_none()
                && word.value.starts_with('_')
                && word.value.chars().all(|c| c == '_' || c.is_ascii_digit()) =>
        {
            number.push_str(&word.value);
            true
        }
        (Token::Number(number, false), Token::Number(fraction, false))
            if fraction.starts_with('.') && !number.contains('.') =>
        {
            number.push_str(fraction);
            true
        }
        _ => false,
    }
}

/// The text a token was read from, used to track positions.
fn source_text(token: &Token) -> String {
    match token {
        Token::SingleQuotedString(s) => format!("'{}'", s.replace('\'', "''")),
        Token::Whitespace(Whitespace::Newline) => "\n".to_string(),
        other => other.to_string(),
    }
}
