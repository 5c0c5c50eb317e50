//! Pratt parser turning tokens into an `Expr`

use crate::constants::{MAX_EXPRESSION_DEPTH, MAX_EXPRESSION_TOKENS};
use crate::error::{CalcError, CalcResult};
use crate::expr::ast::{BinaryOp, Expr, UNARY_PRECEDENCE};
use crate::expr::functions::FunctionRegistry;
use crate::expr::lexer::Token;

pub(crate) fn parse_tokens(tokens: &[Token], source: &str, functions: &FunctionRegistry) -> CalcResult<Expr> {
    if tokens.is_empty() {
        return Err(CalcError::parse(source, "empty expression"));
    }
    if tokens.len() > MAX_EXPRESSION_TOKENS {
        return Err(CalcError::parse(source, format!("expression too long ({} tokens)", tokens.len())));
    }

    let mut parser = Parser { tokens, pos: 0, depth: 0, source, functions };
    let expr = parser.parse_expr(0)?;

    if let Some(token) = parser.current() {
        return Err(parser.error(format!("unexpected token {token:?}")));
    }
    // Long operator chains build deep trees without deep parser recursion
    if expr.depth() > MAX_EXPRESSION_DEPTH {
        return Err(parser.error("expression nested too deeply".to_string()));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    source: &'a str,
    functions: &'a FunctionRegistry,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, message: String) -> CalcError {
        CalcError::parse(self.source, message)
    }

    fn expect(&mut self, expected: &Token) -> CalcResult<()> {
        match self.current() {
            Some(token) if token == expected => {
                self.advance();
                Ok(())
            }
            other => Err(self.error(format!("expected {expected:?}, got {other:?}"))),
        }
    }

    /// Every nested group, unary operand, call argument and right operand passes through here
    fn parse_expr(&mut self, min_precedence: u8) -> CalcResult<Expr> {
        self.depth += 1;
        if self.depth > MAX_EXPRESSION_DEPTH {
            return Err(self.error("expression nested too deeply".to_string()));
        }
        let result = self.parse_binary(min_precedence);
        self.depth -= 1;
        result
    }

    fn parse_binary(&mut self, min_precedence: u8) -> CalcResult<Expr> {
        let mut left = self.parse_prefix()?;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Caret => BinaryOp::Pow,
                _ => break,
            };

            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();

            let next_min = if op.is_right_associative() { precedence } else { precedence + 1 };
            let right = self.parse_expr(next_min)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> CalcResult<Expr> {
        let token = self.current().ok_or_else(|| self.error("unexpected end of input".to_string()))?;
        self.advance();

        match token {
            Token::Number(n) | Token::Constant(n) => Ok(Expr::Number(*n)),
            Token::Variable(name) => Ok(Expr::Variable(name.clone())),
            Token::Function(name) => self.parse_call(name),

            // -x^2 parses as -(x^2)
            Token::Minus => Ok(Expr::neg(self.parse_expr(UNARY_PRECEDENCE)?)),
            Token::Plus => self.parse_expr(UNARY_PRECEDENCE),

            Token::LeftParen => {
                let expr = self.parse_expr(0)?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            other => Err(self.error(format!("unexpected token {other:?}"))),
        }
    }

    fn parse_call(&mut self, name: &str) -> CalcResult<Expr> {
        self.expect(&Token::LeftParen)?;

        let mut args = Vec::new();
        if self.current() != Some(&Token::RightParen) {
            loop {
                args.push(self.parse_expr(0)?);
                match self.current() {
                    Some(Token::Comma) => self.advance(),
                    _ => break,
                }
            }
        }
        self.expect(&Token::RightParen)?;

        let function = self
            .functions
            .get(name)
            .ok_or_else(|| self.error(format!("unknown function '{name}'")))?;
        if function.arity() != args.len() {
            return Err(self.error(format!(
                "{name} expects {} argument(s), got {}",
                function.arity(),
                args.len()
            )));
        }

        Ok(Expr::Call { name: name.to_string(), args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::Lexer;

    fn parse(source: &str) -> CalcResult<Expr> {
        let vars = vec!["x".to_string()];
        let registry = FunctionRegistry::builtin();
        let tokens = Lexer::new(source, &vars, registry).tokenize()?;
        parse_tokens(&tokens, source, registry)
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(expr, Expr::neg(Expr::pow(Expr::var("x"), Expr::num(2.0))));
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::pow(Expr::num(2.0), Expr::pow(Expr::num(3.0), Expr::num(2.0)))
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse("x - 1 - 2").unwrap();
        assert_eq!(expr, Expr::sub(Expr::sub(Expr::var("x"), Expr::num(1.0)), Expr::num(2.0)));
    }

    #[test]
    fn implicit_product_with_call() {
        let expr = parse("2xsin(x)").unwrap();
        assert_eq!(
            expr,
            Expr::mul(
                Expr::mul(Expr::num(2.0), Expr::var("x")),
                Expr::call("sin", Expr::var("x"))
            )
        );
    }

    #[test]
    fn arity_is_checked() {
        assert!(parse("pow(x, 2)").is_ok());
        assert!(parse("pow(x)").is_err());
        assert!(parse("sin(x, 2)").is_err());
        assert!(parse("sin()").is_err());
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(parse("").is_err());
        assert!(parse("(x + 1").is_err());
        assert!(parse("x +").is_err());
        assert!(parse("2 3").is_err());
        assert!(parse("sin x").is_err());
        assert!(parse(")").is_err());
    }

    #[test]
    fn nesting_is_bounded() {
        let ok = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert!(parse(&ok).is_ok());

        for deep in [
            format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000)),
            format!("{}x", "-".repeat(1_000)),
            format!("{}x{}", "sin(".repeat(1_000), ")".repeat(1_000)),
            vec!["x"; 1_000].join("^"),
        ] {
            let err = parse(&deep).unwrap_err();
            assert_eq!(err.category(), "parse");
        }
    }

    #[test]
    fn long_flat_chains_are_bounded() {
        assert!(parse(&vec!["x"; 200].join(" + ")).is_ok());
        assert!(parse(&vec!["x"; 1_000].join(" + ")).is_err());
        assert!(parse(&vec!["x"; 10_000].join(" * ")).is_err());
    }
}
