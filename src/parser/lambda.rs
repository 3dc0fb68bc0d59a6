use std::fmt;

use itertools::Itertools;
use sqlparser::tokenizer::{Token, Word};

use super::{tokenize, Lexeme, SyntaxError};
use crate::expression::{lit, ComparisonOperator, Expr};
use crate::types::ScalarValue;

/// A parsed single-argument lambda, `(tp: TennisPlayer) -> tp.victory > 19400000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    pub parameter: String,
    /// the record type named in a typed header
    pub parameter_type: Option<String>,
    pub body: Expr,
}

impl Lambda {
    /// Path heads that are not the lambda parameter, in source order.
    pub fn free_references(&self) -> Vec<&str> {
        self.body
            .parameters()
            .into_iter()
            .filter(|name| *name != self.parameter)
            .unique()
            .collect()
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter_type {
            Some(ty) => write!(f, "({}: {}) -> {}", self.parameter, ty, self.body),
            None => write!(f, "{} -> {}", self.parameter, self.body),
        }
    }
}

/// Recursive descent over the lexemes of one lambda.
pub struct LambdaParser {
    lexemes: Vec<Lexeme>,
    index: usize,
    depth: usize,
    max_nesting: usize,
}

impl LambdaParser {
    pub fn new(source: &str, max_nesting: usize) -> Result<Self, SyntaxError> {
        Ok(Self {
            lexemes: tokenize(source)?,
            index: 0,
            depth: 0,
            max_nesting,
        })
    }

    pub fn parse(mut self) -> Result<Lambda, SyntaxError> {
        let (parameter, parameter_type) = self.parse_header()?;
        if !matches!(self.peek().token, Token::Arrow | Token::RArrow) {
            return Err(self.expected("`->` after the lambda parameter"));
        }
        self.advance();
        let body = self.parse_comparison()?;
        match &self.peek().token {
            Token::EOF => {}
            token if comparison_operator(token).is_some() => {
                return Err(self.error("comparisons can not be chained"))
            }
            _ => return Err(self.expected("end of input")),
        }
        Ok(Lambda {
            parameter,
            parameter_type,
            body,
        })
    }

    /// `tp` or `(tp)` or `(tp: TennisPlayer)`
    fn parse_header(&mut self) -> Result<(String, Option<String>), SyntaxError> {
        if self.peek().token != Token::LParen {
            return Ok((self.parse_identifier("a lambda parameter")?, None));
        }
        self.advance();
        let parameter = self.parse_identifier("a lambda parameter")?;
        let parameter_type = if self.peek().token == Token::Colon {
            self.advance();
            Some(self.parse_identifier("a record type name")?)
        } else {
            None
        };
        self.expect(Token::RParen, "`)` closing the lambda parameter")?;
        Ok((parameter, parameter_type))
    }

    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.parse_operand()?;
        match comparison_operator(&self.peek().token) {
            Some(op) => {
                self.advance();
                let right = self.parse_operand()?;
                Ok(Expr::binary_comparison(op, left, right))
            }
            None => Ok(left),
        }
    }

    fn parse_operand(&mut self) -> Result<Expr, SyntaxError> {
        let lexeme = self.peek().clone();
        match lexeme.token {
            Token::Minus => {
                self.advance();
                let value = self.parse_number()?;
                value
                    .negate()
                    .map(Expr::Constant)
                    .ok_or_else(|| SyntaxError::new(lexeme.location, "number out of range"))
            }
            Token::Number(..) => Ok(Expr::Constant(self.parse_number()?)),
            Token::SingleQuotedString(value) => {
                self.advance();
                Ok(lit(value))
            }
            Token::Word(word) if word.quote_style.is_none() => {
                match word.value.to_lowercase().as_str() {
                    "true" => {
                        self.advance();
                        Ok(lit(true))
                    }
                    "false" => {
                        self.advance();
                        Ok(lit(false))
                    }
                    "null" => Err(self.error("null literals are not supported")),
                    _ => self.parse_path(),
                }
            }
            Token::LParen => {
                if self.depth >= self.max_nesting {
                    return Err(self.error(format!(
                        "expression nested deeper than {} levels",
                        self.max_nesting
                    )));
                }
                self.depth += 1;
                self.advance();
                let inner = self.parse_comparison()?;
                self.expect(Token::RParen, "`)`")?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => Err(self.expected("an operand")),
        }
    }

    fn parse_number(&mut self) -> Result<ScalarValue, SyntaxError> {
        let lexeme = self.peek().clone();
        let value = match &lexeme.token {
            Token::Number(number, false) => ScalarValue::parse_number(&number.replace('_', "")),
            Token::Number(_, true) => {
                return Err(SyntaxError::new(
                    lexeme.location,
                    "numeric suffixes are not supported",
                ))
            }
            _ => return Err(self.expected("a number")),
        };
        match value {
            Some(value) => {
                self.advance();
                Ok(value)
            }
            None => Err(SyntaxError::new(
                lexeme.location,
                format!("invalid number `{}`", lexeme.token),
            )),
        }
    }

    /// `head(.field)*`. The head becomes a parameter node; whether it really names the lambda
    /// parameter is checked once the whole body is known.
    fn parse_path(&mut self) -> Result<Expr, SyntaxError> {
        let head = self.parse_identifier("an identifier")?;
        let mut path = Expr::Parameter(head);
        while self.peek().token == Token::Period {
            self.advance();
            let field = self.parse_identifier("a field name after `.`")?;
            path = path.field(&field);
        }
        Ok(path)
    }

    fn parse_identifier(&mut self, what: &str) -> Result<String, SyntaxError> {
        match &self.peek().token {
            Token::Word(Word {
                value,
                quote_style: None,
                ..
            }) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            Token::Word(_) => Err(self.error("quoted identifiers are not supported")),
            _ => Err(self.expected(what)),
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<(), SyntaxError> {
        if self.peek().token == token {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(what))
        }
    }

    fn peek(&self) -> &Lexeme {
        // the lexeme list always ends with EOF, which is never consumed
        &self.lexemes[self.index.min(self.lexemes.len() - 1)]
    }

    fn advance(&mut self) {
        if self.index + 1 < self.lexemes.len() {
            self.index += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.peek().location, message)
    }

    fn expected(&self, what: &str) -> SyntaxError {
        self.error(format!("expected {}, found {}", what, describe(&self.peek().token)))
    }
}

fn comparison_operator(token: &Token) -> Option<ComparisonOperator> {
    match token {
        Token::Gt => Some(ComparisonOperator::GreaterThan),
        Token::Lt => Some(ComparisonOperator::LessThan),
        Token::GtEq => Some(ComparisonOperator::GreaterOrEqual),
        Token::LtEq => Some(ComparisonOperator::LessOrEqual),
        Token::Eq | Token::DoubleEq => Some(ComparisonOperator::Equal),
        Token::Neq => Some(ComparisonOperator::NotEqual),
        _ => None,
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::EOF => "end of input".to_string(),
        Token::Word(_) => format!("identifier `{}`", token),
        Token::Number(..) => format!("number `{}`", token),
        Token::SingleQuotedString(_) => format!("string {}", token),
        _ => format!("`{}`", token),
    }
}
