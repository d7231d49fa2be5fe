//! Expression tokenizer and parser
//!
//! A recursive descent parser for infix arithmetic with the usual operator
//! precedence. Tokenizing happens up front so the parser works over a fully
//! materialised token list.

use crate::ast::{Node, OperatorKind};
use crate::error::{FormulaError, FormulaResult};
use std::fmt;

/// Most binary operators one expression may contain.
///
/// Evaluation and drop both recurse once per tree level, and a chain of
/// left-associative operators is as deep as it is long.
pub const MAX_OPERATORS: usize = 1024;

/// Deepest parenthesis nesting one expression may contain
pub const MAX_NESTING: usize = 64;

/// Lexical token of an arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Variable name
    Identifier(String),
    /// Single-character operator or parenthesis
    Operator(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Operator(c) => write!(f, "{}", c),
        }
    }
}

/// Split an expression into tokens
///
/// # Example
/// ```rust
/// use gridcalc_formula::tokenize;
///
/// let tokens: Vec<String> = tokenize("3+7+hello")
///     .unwrap()
///     .iter()
///     .map(|t| t.to_string())
///     .collect();
/// assert_eq!(tokens, ["3", "+", "7", "+", "hello"]);
/// ```
pub fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        match c {
            '+' | '-' | '*' | '/' | '(' | ')' => {
                chars.next();
                tokens.push(Token::Operator(c));
            }
            _ if c.is_ascii_digit() || c == '.' => {
                let start = pos;
                let mut end = pos;
                let mut seen_point = false;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() {
                        end = i + 1;
                    } else if d == '.' && !seen_point {
                        seen_point = true;
                        end = i + 1;
                    } else {
                        break;
                    }
                    chars.next();
                }

                if let Some(&(i, '.')) = chars.peek() {
                    return Err(FormulaError::UnexpectedCharacter { ch: '.', pos: i });
                }

                let text = &input[start..end];
                let value: f64 = text
                    .parse()
                    .map_err(|_| FormulaError::Parse(format!("Invalid number '{}'", text)))?;
                tokens.push(Token::Number(value));
            }
            _ if c.is_alphabetic() => {
                let mut name = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if d.is_alphanumeric() {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Identifier(name));
            }
            _ => return Err(FormulaError::UnexpectedCharacter { ch: c, pos }),
        }
    }

    Ok(tokens)
}

/// Parse an expression string into a tree
pub fn parse_expression(input: &str) -> FormulaResult<Node> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(FormulaError::Parse("Empty expression".into()));
    }

    let mut parser = Parser::new(&tokens);
    let node = parser.parse_expression()?;

    // Make sure we consumed all input
    if let Some(token) = parser.current_token() {
        return Err(FormulaError::Parse(format!(
            "Unexpected token '{}' after expression",
            token
        )));
    }

    Ok(node)
}

/// Expression parser over a token slice
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    operators: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            operators: 0,
            nesting: 0,
        }
    }

    fn current_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: char) -> FormulaResult<()> {
        match self.current_token() {
            Some(Token::Operator(c)) if *c == expected => {
                self.consume();
                Ok(())
            }
            Some(token) => Err(FormulaError::Parse(format!(
                "Expected '{}', got '{}'",
                expected, token
            ))),
            None => Err(FormulaError::Parse(format!(
                "Expected '{}', got end of input",
                expected
            ))),
        }
    }

    /// Binary operator at the cursor, if it has the given precedence
    fn operator_at(&self, precedence: u8) -> Option<OperatorKind> {
        match self.current_token() {
            Some(Token::Operator(c)) => {
                OperatorKind::from_symbol(*c).filter(|op| op.precedence() == precedence)
            }
            _ => None,
        }
    }

    /// Count one more binary operator against [`MAX_OPERATORS`]
    fn add_operator(&mut self) -> FormulaResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(FormulaError::Parse(format!(
                "Expression has more than {} operators",
                MAX_OPERATORS
            )));
        }
        Ok(())
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Primary: numbers, variables, parentheses

    fn parse_expression(&mut self) -> FormulaResult<Node> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<Node> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.operator_at(1) {
            self.consume();
            self.add_operator()?;
            let right = self.parse_multiplicative()?;
            left = Node::operator(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Node> {
        let mut left = self.parse_primary()?;

        while let Some(op) = self.operator_at(2) {
            self.consume();
            self.add_operator()?;
            let right = self.parse_primary()?;
            left = Node::operator(op, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<Node> {
        match self.current_token() {
            Some(Token::Number(n)) => {
                self.consume();
                Ok(Node::Value(*n))
            }

            Some(Token::Identifier(name)) => {
                self.consume();
                Ok(Node::Variable(name.clone()))
            }

            Some(Token::Operator('(')) => {
                self.consume();
                if self.nesting == MAX_NESTING {
                    return Err(FormulaError::Parse(format!(
                        "Parentheses nested deeper than {}",
                        MAX_NESTING
                    )));
                }
                self.nesting += 1;
                let expr = self.parse_expression()?;
                self.nesting -= 1;
                self.expect(')')?;
                Ok(expr)
            }

            Some(Token::Operator(c)) => Err(FormulaError::Parse(format!(
                "Missing operand before '{}'",
                c
            ))),

            None => Err(FormulaError::Parse(
                "Missing operand at end of expression".into(),
            )),
        }
    }
}
