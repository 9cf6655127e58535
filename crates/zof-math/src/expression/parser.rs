//! Tokenizer and recursive-descent parser.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary (('**' | '^') unary)?
//! primary := number | ident | ident '(' sum ')' | '(' sum ')'
//! ```
//!
//! Power is right-associative and binds tighter than unary minus.
//!
//! Input is bounded: at most [`MAX_TOKENS`] tokens and [`MAX_NESTING`] levels
//! of nesting. Every tree walk in this module is recursive, so these limits
//! also bound the depth of evaluation, differentiation and display.

use crate::error::{MathError, MathResult};
use crate::expression::ast::{Constant, Func, Node};

/// Longest accepted expression, in tokens.
pub const MAX_TOKENS: usize = 1024;

/// Deepest accepted nesting of parentheses, calls, signs and exponents.
pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    End,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {}", n),
            Self::Ident(name) => format!("'{}'", name),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'**'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::End => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn tokenize(src: &str) -> MathResult<Vec<Token>> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let kind = if c.is_ascii_digit() || c == b'.' {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'.' {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            // Exponent only when digits follow, so `2E` stays a number and a name.
            if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                let mut j = i + 1;
                if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                    j += 1;
                }
                if j < bytes.len() && bytes[j].is_ascii_digit() {
                    i = j;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text = &src[start..i];
            let value = text
                .parse::<f64>()
                .map_err(|_| MathError::parse(start, format!("invalid number '{}'", text)))?;
            TokenKind::Number(value)
        } else if c.is_ascii_alphabetic() || c == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            TokenKind::Ident(src[start..i].to_string())
        } else {
            i += 1;
            match c {
                b'+' => TokenKind::Plus,
                b'-' => TokenKind::Minus,
                b'*' if bytes.get(i) == Some(&b'*') => {
                    i += 1;
                    TokenKind::Caret
                }
                b'*' => TokenKind::Star,
                b'/' => TokenKind::Slash,
                b'^' => TokenKind::Caret,
                b'(' => TokenKind::LParen,
                b')' => TokenKind::RParen,
                _ => {
                    let ch = src[start..].chars().next().unwrap_or('?');
                    return Err(MathError::parse(
                        start,
                        format!("unexpected character '{}'", ch),
                    ));
                }
            }
        };

        if tokens.len() == MAX_TOKENS {
            return Err(MathError::parse(
                start,
                format!("expression too long (more than {} tokens)", MAX_TOKENS),
            ));
        }
        tokens.push(Token {
            kind,
            position: start,
        });
    }

    tokens.push(Token {
        kind: TokenKind::End,
        position: src.len(),
    });
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    variable: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::End {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self) -> MathError {
        let token = self.peek();
        MathError::parse(
            token.position,
            format!("unexpected {}", token.kind.describe()),
        )
    }

    fn expect(&mut self, kind: &TokenKind) -> MathResult<()> {
        if &self.peek().kind == kind {
            self.advance();
            Ok(())
        } else {
            let token = self.peek();
            Err(MathError::parse(
                token.position,
                format!(
                    "expected {}, found {}",
                    kind.describe(),
                    token.kind.describe()
                ),
            ))
        }
    }

    fn sum(&mut self) -> MathResult<Node> {
        let mut node = self.product()?;
        loop {
            match self.peek().kind {
                TokenKind::Plus => {
                    self.advance();
                    node = Node::Add(Box::new(node), Box::new(self.product()?));
                }
                TokenKind::Minus => {
                    self.advance();
                    node = Node::Sub(Box::new(node), Box::new(self.product()?));
                }
                _ => return Ok(node),
            }
        }
    }

    fn product(&mut self) -> MathResult<Node> {
        let mut node = self.unary()?;
        loop {
            match self.peek().kind {
                TokenKind::Star => {
                    self.advance();
                    node = Node::Mul(Box::new(node), Box::new(self.unary()?));
                }
                TokenKind::Slash => {
                    self.advance();
                    node = Node::Div(Box::new(node), Box::new(self.unary()?));
                }
                _ => return Ok(node),
            }
        }
    }

    // Every recursive path of the grammar passes through here.
    fn unary(&mut self) -> MathResult<Node> {
        if self.depth == MAX_NESTING {
            return Err(MathError::parse(
                self.peek().position,
                "expression nested too deeply",
            ));
        }
        self.depth += 1;
        let node = self.signed();
        self.depth -= 1;
        node
    }

    fn signed(&mut self) -> MathResult<Node> {
        match self.peek().kind {
            TokenKind::Minus => {
                self.advance();
                Ok(Node::Neg(Box::new(self.unary()?)))
            }
            TokenKind::Plus => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> MathResult<Node> {
        let base = self.primary()?;
        if self.peek().kind == TokenKind::Caret {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Node::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> MathResult<Node> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Node::Number(n))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.sum()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.peek().kind == TokenKind::LParen {
                    let func = Func::from_name(&name).ok_or_else(|| {
                        MathError::parse(token.position, format!("unknown function '{}'", name))
                    })?;
                    self.advance();
                    let arg = self.sum()?;
                    self.expect(&TokenKind::RParen)?;
                    Ok(Node::Call(func, Box::new(arg)))
                } else if name == self.variable {
                    Ok(Node::Var)
                } else if let Some(constant) = Constant::from_name(&name) {
                    Ok(Node::Const(constant))
                } else {
                    Err(MathError::parse(
                        token.position,
                        format!("unknown symbol '{}'", name),
                    ))
                }
            }
            _ => Err(self.unexpected()),
        }
    }
}

/// Parses `src` into a tree over `variable`.
pub(crate) fn parse(src: &str, variable: &str) -> MathResult<Node> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        variable,
    };

    let node = parser.sum()?;
    if parser.peek().kind != TokenKind::End {
        return Err(parser.unexpected());
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_x(src: &str) -> MathResult<Node> {
        parse(src, "x")
    }

    fn position_of(err: MathError) -> usize {
        match err {
            MathError::Parse { position, .. } => position,
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_x("2.5").unwrap(), Node::Number(2.5));
        assert_eq!(parse_x(".5").unwrap(), Node::Number(0.5));
        assert_eq!(parse_x("1e-3").unwrap(), Node::Number(1e-3));
        assert_eq!(parse_x("3E+2").unwrap(), Node::Number(300.0));
    }

    #[test]
    fn test_power_binds_tighter_than_negation() {
        let node = parse_x("-x**2").unwrap();
        assert_eq!(node.eval(3.0), -9.0);

        let node = parse_x("-x^2").unwrap();
        assert_eq!(node.eval(3.0), -9.0);
    }

    #[test]
    fn test_power_is_right_associative() {
        let node = parse_x("2**3**2").unwrap();
        assert_eq!(node.eval(0.0), 512.0);
    }

    #[test]
    fn test_negative_exponent() {
        let node = parse_x("2**-1").unwrap();
        assert_eq!(node.eval(0.0), 0.5);
    }

    #[test]
    fn test_left_associative_arithmetic() {
        assert_eq!(parse_x("10 - 4 - 3").unwrap().eval(0.0), 3.0);
        assert_eq!(parse_x("12 / 3 / 2").unwrap().eval(0.0), 2.0);
        assert_eq!(parse_x("2 + 3 * 4").unwrap().eval(0.0), 14.0);
    }

    #[test]
    fn test_functions_and_constants() {
        let node = parse_x("sin(pi/2) + log(E) + ln(1) + sqrt(x)").unwrap();
        assert!((node.eval(4.0) - 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_custom_variable() {
        let node = parse("t**2 - 1", "t").unwrap();
        assert_eq!(node.eval(3.0), 8.0);
        assert!(parse("x + 1", "t").is_err());
    }

    #[test]
    fn test_unknown_symbol() {
        let err = parse_x("x + y").unwrap_err();
        assert!(err.to_string().contains("unknown symbol 'y'"));
        assert_eq!(position_of(err), 4);
    }

    #[test]
    fn test_unknown_function() {
        let err = parse_x("foo(x)").unwrap_err();
        assert!(err.to_string().contains("unknown function 'foo'"));
    }

    #[test]
    fn test_no_implicit_multiplication() {
        let err = parse_x("2x").unwrap_err();
        assert_eq!(position_of(err), 1);
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(parse_x("(x + 1").unwrap_err().to_string().contains("expected ')'"));
        assert_eq!(position_of(parse_x("x + 1)").unwrap_err()), 5);
    }

    #[test]
    fn test_empty_and_dangling() {
        assert!(parse_x("").is_err());
        assert!(parse_x("x +").is_err());
        assert!(parse_x("* x").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let src = format!("{}x{}", "(".repeat(300), ")".repeat(300));
        let err = parse_x(&src).unwrap_err();
        assert!(err.to_string().contains("nested too deeply"));

        let src = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));
        assert!(matches!(parse_x(&src), Err(MathError::Parse { .. })));

        let err = parse_x(&format!("{}x", "-".repeat(MAX_NESTING + 1))).unwrap_err();
        assert_eq!(position_of(err), MAX_NESTING);

        let nested = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(parse_x(&nested).unwrap(), Node::Var);
    }

    #[test]
    fn test_long_chains_are_rejected() {
        let src = format!("x{}", "+x".repeat(200_000));
        let err = parse_x(&src).unwrap_err();
        assert!(err.to_string().contains("expression too long"));
        assert_eq!(position_of(err), MAX_TOKENS);

        // The longest accepted chain still evaluates and differentiates.
        let src = format!("x{}", "*x".repeat(MAX_TOKENS / 2 - 1));
        let node = parse_x(&src).unwrap();
        assert_eq!(node.eval(1.0), 1.0);
        assert_eq!(crate::expression::derivative::differentiate(&node).eval(1.0), 512.0);
    }

    #[test]
    fn test_bad_character() {
        let err = parse_x("x $ 2").unwrap_err();
        assert!(err.to_string().contains("unexpected character '$'"));
        assert_eq!(position_of(err), 2);
    }
}
