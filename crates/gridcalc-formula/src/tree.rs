//! Expression tree with its variable table

use crate::ast::{Node, Variables};
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_expression;
use std::str::FromStr;

/// A parsed arithmetic expression together with the values of its variables
///
/// The tree owns the variable table; variable nodes carry only a name and are
/// resolved against the table each time the tree is evaluated.
///
/// # Example
/// ```rust
/// use gridcalc_formula::ExpressionTree;
///
/// let mut tree = ExpressionTree::new("rate*hours+bonus").unwrap();
/// tree.set_variable("rate", 20.0);
/// tree.set_variable("hours", 8.0);
/// assert_eq!(tree.evaluate().unwrap(), 160.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpressionTree {
    root: Option<Node>,
    variables: Variables,
}

impl ExpressionTree {
    /// Build a tree from an expression, failing on any malformed input
    pub fn new(expression: &str) -> FormulaResult<Self> {
        Ok(Self {
            root: Some(parse_expression(expression)?),
            variables: Variables::new(),
        })
    }

    /// Evaluate the whole tree with the current variable values
    pub fn evaluate(&self) -> FormulaResult<f64> {
        self.root
            .as_ref()
            .map(|root| root.evaluate(&self.variables))
            .ok_or(FormulaError::NotBuilt)
    }

    /// Assign or update a variable
    pub fn set_variable<S: Into<String>>(&mut self, name: S, value: f64) {
        self.variables.insert(name.into(), value);
    }

    /// Current value of a variable, if it was ever set
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Distinct variable names used by the expression, in order of appearance
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if let Some(root) = &self.root {
            root.collect_variables(&mut names);
        }
        names
    }

    /// The root node, if the tree was built
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// The variable table
    pub fn variables(&self) -> &Variables {
        &self.variables
    }
}

impl FromStr for ExpressionTree {
    type Err = FormulaError;

    fn from_str(s: &str) -> FormulaResult<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_fails_on_dangling_operator() {
        assert!(matches!(
            ExpressionTree::new("+"),
            Err(FormulaError::Parse(_))
        ));
        assert!(matches!(
            ExpressionTree::new("2+"),
            Err(FormulaError::Parse(_))
        ));
    }

    #[test]
    fn test_evaluate_addition() {
        assert_eq!(ExpressionTree::new("3+7").unwrap().evaluate().unwrap(), 10.0);
        assert_eq!(
            ExpressionTree::new("3+7+2+1").unwrap().evaluate().unwrap(),
            13.0
        );
    }

    #[test]
    fn test_evaluate_division() {
        assert_eq!(
            ExpressionTree::new("3/7").unwrap().evaluate().unwrap(),
            3.0 / 7.0
        );
        assert_eq!(
            ExpressionTree::new("3/7/2/1").unwrap().evaluate().unwrap(),
            3.0 / 7.0 / 2.0 / 1.0
        );
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(ExpressionTree::new("1+2*3").unwrap().evaluate().unwrap(), 7.0);
        assert_eq!(ExpressionTree::new("(1+2)*3").unwrap().evaluate().unwrap(), 9.0);
        assert_eq!(ExpressionTree::new("8-2-1").unwrap().evaluate().unwrap(), 5.0);
        assert_eq!(ExpressionTree::new("2*3-4/2").unwrap().evaluate().unwrap(), 4.0);
    }

    #[test]
    fn test_unbuilt_tree() {
        let tree = ExpressionTree::default();
        assert_eq!(tree.evaluate(), Err(FormulaError::NotBuilt));
        assert!(tree.root().is_none());
        assert!(tree.variable_names().is_empty());
    }

    #[test]
    fn test_variables() {
        let mut tree: ExpressionTree = "A1+x*x-y".parse().unwrap();
        assert_eq!(tree.variable_names(), vec!["A1", "x", "y"]);

        // Unset variables read as zero
        assert_eq!(tree.evaluate().unwrap(), 0.0);

        tree.set_variable("A1", 1.0);
        tree.set_variable("x", 3.0);
        assert_eq!(tree.evaluate().unwrap(), 10.0);

        tree.set_variable("x", 4.0);
        tree.set_variable("y", 6.0);
        assert_eq!(tree.evaluate().unwrap(), 11.0);
        assert_eq!(tree.variable("x"), Some(4.0));
        assert_eq!(tree.variable("z"), None);
    }

    #[test]
    fn test_divide_by_zero_variable() {
        let mut tree = ExpressionTree::new("10/d").unwrap();
        assert_eq!(tree.evaluate().unwrap(), f64::INFINITY);

        tree.set_variable("d", 4.0);
        assert_eq!(tree.evaluate().unwrap(), 2.5);
    }
}
