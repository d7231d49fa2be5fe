//! # gridcalc-formula
//!
//! Arithmetic expression engine for gridcalc.
//!
//! This crate provides:
//! - Tokenizing (text → [`Token`] list)
//! - Parsing with operator precedence (tokens → [`Node`] tree)
//! - Evaluation against a variable table ([`ExpressionTree`])
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_formula::ExpressionTree;
//!
//! let mut tree = ExpressionTree::new("(a+b)/2").unwrap();
//! tree.set_variable("a", 3.0);
//! tree.set_variable("b", 5.0);
//! assert_eq!(tree.evaluate().unwrap(), 4.0);
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod tree;

pub use ast::{Node, OperatorKind, Variables};
pub use error::{FormulaError, FormulaResult};
pub use parser::{parse_expression, tokenize, Token, MAX_NESTING, MAX_OPERATORS};
pub use tree::ExpressionTree;
