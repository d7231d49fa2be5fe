//! Expression evaluation against grid cells
//!
//! Grid formulas are limited to single references; this module lets callers
//! evaluate full arithmetic expressions whose variables are cell names.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::new(5, 5).unwrap();
//! grid.set_text(0, 0, "4").unwrap();
//! grid.set_text(0, 1, "2.5").unwrap();
//!
//! let result = grid.evaluate_expression("A1*B1+1").unwrap();
//! assert_eq!(result, 11.0);
//! ```

use crate::{CellAddress, ExpressionTree, FormulaResult, Grid};
use tracing::debug;

/// Extension trait for Grid to evaluate arithmetic expressions
pub trait GridCalculationExt {
    /// Assign every variable of the tree that names a cell holding a number.
    ///
    /// Variables naming empty, non-numeric or out-of-range cells are left
    /// unset and therefore evaluate to `0.0`. Returns the number of
    /// variables bound.
    fn bind_cells(&self, tree: &mut ExpressionTree) -> usize;

    /// Parse an expression, bind its cell variables and evaluate it
    fn evaluate_expression(&self, expression: &str) -> FormulaResult<f64>;
}

impl GridCalculationExt for Grid {
    fn bind_cells(&self, tree: &mut ExpressionTree) -> usize {
        let bindings: Vec<(String, f64)> = tree
            .variable_names()
            .into_iter()
            .filter_map(|name| {
                let addr = CellAddress::parse(name).ok()?;
                let cell = self.cell(addr.row, addr.col)?;
                let value = cell.value().trim().parse::<f64>().ok()?;
                Some((name.to_string(), value))
            })
            .collect();

        let count = bindings.len();
        for (name, value) in bindings {
            debug!(variable = %name, value, "bound cell variable");
            tree.set_variable(name, value);
        }
        count
    }

    fn evaluate_expression(&self, expression: &str) -> FormulaResult<f64> {
        let mut tree = ExpressionTree::new(expression)?;
        self.bind_cells(&mut tree);
        tree.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormulaError;

    #[test]
    fn test_bind_cells() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_text(0, 0, "2").unwrap();
        grid.set_text(1, 0, "text").unwrap();
        grid.set_text(2, 0, "=A1").unwrap();

        let mut tree = ExpressionTree::new("A1+A2+A3+Z9+rate").unwrap();
        assert_eq!(grid.bind_cells(&mut tree), 2);
        assert_eq!(tree.variable("A1"), Some(2.0));
        assert_eq!(tree.variable("A2"), None);
        assert_eq!(tree.variable("A3"), Some(2.0));
        assert_eq!(tree.evaluate().unwrap(), 4.0);
    }

    #[test]
    fn test_evaluate_expression_reports_parse_errors() {
        let grid = Grid::new(1, 1).unwrap();

        assert!(matches!(
            grid.evaluate_expression("A1+"),
            Err(FormulaError::Parse(_))
        ));
        assert!(matches!(
            grid.evaluate_expression("A1 % 2"),
            Err(FormulaError::UnexpectedCharacter { ch: '%', .. })
        ));
    }
}
