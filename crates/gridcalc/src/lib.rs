//! # gridcalc
//!
//! A reactive cell grid with an arithmetic expression engine.
//!
//! ## Features
//!
//! - Tokenize and parse infix arithmetic (`+ - * /`, parentheses) into a
//!   binary expression tree
//! - Evaluate trees against a table of named variables
//! - A fixed-size grid of named cells (`A1` .. `Z<n>`) whose `=B5`
//!   references follow the referenced cell as it changes
//! - Synchronous per-cell change notifications for display layers
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::new(10, 5).unwrap();
//! grid.set_text(0, 0, "7").unwrap();
//! grid.set_text(4, 1, "=A1").unwrap();
//! assert_eq!(grid.cell(4, 1).unwrap().value(), "7");
//!
//! let mut tree = ExpressionTree::new("x*(y+1)").unwrap();
//! tree.set_variable("x", 2.0);
//! tree.set_variable("y", 3.0);
//! assert_eq!(tree.evaluate().unwrap(), 8.0);
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::GridCalculationExt;

// Re-export core types
pub use gridcalc_core::{
    Cell,
    CellAddress,
    CellProperty,
    DependencyGraph,
    Error,
    Grid,
    GridOptions,
    Listener,
    ListenerId,
    Propagation,
    Result,
    // Constants
    DEFAULT_BACKGROUND_COLOR,
    FORMULA_MARKER,
    MAX_COLS,
};

// Re-export formula types
pub use gridcalc_formula::{
    parse_expression, tokenize, ExpressionTree, FormulaError, FormulaResult, Node, OperatorKind,
    Token, Variables, MAX_NESTING, MAX_OPERATORS,
};
