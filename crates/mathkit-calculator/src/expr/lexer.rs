//! Tokenizer with identifier splitting and implicit multiplication
//!
//! Letter runs are split greedily into known names so that `xsin(x)` reads as
//! `x * sin(x)` and `2pix` as `2 * pi * x`.

use crate::error::{CalcError, CalcResult};
use crate::expr::functions::FunctionRegistry;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Variable(String),
    Function(String),
    Constant(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    Comma,
}

/// Names that resolve to something other than a registered function
const ALIASES: &[(&str, &str)] = &[("ln", "log")];
const CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

pub(crate) struct Lexer<'a> {
    source: &'a str,
    variables: &'a [String],
    functions: &'a FunctionRegistry,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str, variables: &'a [String], functions: &'a FunctionRegistry) -> Self {
        Self { source, variables, functions }
    }

    /// Tokenize the (already lowercased) source and insert implicit multiplications
    pub(crate) fn tokenize(&self) -> CalcResult<Vec<Token>> {
        let chars: Vec<char> = self.source.chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());
        let mut pos = 0;

        while pos < chars.len() {
            let c = chars[pos];
            match c {
                c if c.is_whitespace() => pos += 1,
                '0'..='9' | '.' => {
                    let start = pos;
                    while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                        pos += 1;
                    }
                    let text: String = chars[start..pos].iter().collect();
                    let value = text
                        .parse::<f64>()
                        .map_err(|_| self.error(format!("malformed number '{text}'")))?;
                    tokens.push(Token::Number(value));
                }
                'a'..='z' => {
                    let start = pos;
                    while pos < chars.len() && chars[pos].is_ascii_lowercase() {
                        pos += 1;
                    }
                    let word: String = chars[start..pos].iter().collect();
                    self.split_identifier(&word, &mut tokens)?;
                }
                '*' if chars.get(pos + 1) == Some(&'*') => {
                    tokens.push(Token::Caret);
                    pos += 2;
                }
                _ => {
                    tokens.push(match c {
                        '+' => Token::Plus,
                        '-' => Token::Minus,
                        '*' => Token::Star,
                        '/' => Token::Slash,
                        '^' => Token::Caret,
                        '(' => Token::LeftParen,
                        ')' => Token::RightParen,
                        ',' => Token::Comma,
                        other => return Err(self.error(format!("invalid character '{other}'"))),
                    });
                    pos += 1;
                }
            }
        }

        Ok(insert_implicit_multiplication(tokens))
    }

    /// Split a letter run into variables, functions and constants, longest match first
    fn split_identifier(&self, word: &str, tokens: &mut Vec<Token>) -> CalcResult<()> {
        let mut rest = word;
        while !rest.is_empty() {
            let (token, len) = (1..=rest.len())
                .rev()
                .find_map(|len| self.classify(&rest[..len]).map(|t| (t, len)))
                .ok_or_else(|| self.error(format!("unknown identifier '{rest}'")))?;
            tokens.push(token);
            rest = &rest[len..];
        }
        Ok(())
    }

    fn classify(&self, name: &str) -> Option<Token> {
        if self.variables.iter().any(|v| v == name) {
            return Some(Token::Variable(name.to_string()));
        }
        if self.functions.contains(name) {
            return Some(Token::Function(name.to_string()));
        }
        if let Some((_, target)) = ALIASES.iter().find(|(alias, _)| *alias == name) {
            return Some(Token::Function((*target).to_string()));
        }
        CONSTANTS.iter().find(|(c, _)| *c == name).map(|(_, value)| Token::Constant(*value))
    }

    fn error(&self, message: String) -> CalcError {
        CalcError::parse(self.source, message)
    }
}

fn should_insert_mul(current: &Token, next: &Token) -> bool {
    let ends_operand = matches!(
        current,
        Token::Number(_) | Token::Variable(_) | Token::Constant(_) | Token::RightParen
    );
    let starts_operand = matches!(
        next,
        Token::Variable(_) | Token::Constant(_) | Token::Function(_) | Token::LeftParen
    );
    // number after a number is left for the parser to reject
    let number_follows = matches!(next, Token::Number(_)) && !matches!(current, Token::Number(_));
    ends_operand && (starts_operand || number_follows)
}

fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();
    while let Some(token) = it.next() {
        let insert = it.peek().is_some_and(|next| should_insert_mul(&token, next));
        result.push(token);
        if insert {
            result.push(Token::Star);
        }
    }
    result
}
