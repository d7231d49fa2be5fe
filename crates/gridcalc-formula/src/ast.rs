//! Expression tree node types

use ahash::AHashMap;
use std::fmt;

/// Variable table consulted when a [`Node::Variable`] is evaluated
pub type Variables = AHashMap<String, f64>;

/// A node of a binary expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric constant
    Value(f64),
    /// Named variable, resolved against the tree's variable table
    Variable(String),
    /// Binary operation
    Operator {
        op: OperatorKind,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Create a constant node
    pub fn value(value: f64) -> Self {
        Node::Value(value)
    }

    /// Create a variable node
    pub fn variable<S: Into<String>>(name: S) -> Self {
        Node::Variable(name.into())
    }

    /// Create an operator node over two children
    pub fn operator(op: OperatorKind, left: Node, right: Node) -> Self {
        Node::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate this node against a variable table.
    ///
    /// Unset variables evaluate to `0.0`. Division follows IEEE semantics,
    /// so dividing by zero yields an infinity or NaN rather than an error.
    pub fn evaluate(&self, vars: &Variables) -> f64 {
        match self {
            Node::Value(v) => *v,
            Node::Variable(name) => vars.get(name).copied().unwrap_or(0.0),
            Node::Operator { op, left, right } => {
                op.apply(left.evaluate(vars), right.evaluate(vars))
            }
        }
    }

    /// Push every variable name below this node, in left-to-right order
    pub(crate) fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Value(_) => {}
            Node::Variable(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name.as_str());
                }
            }
            Node::Operator { left, right, .. } => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Value(v) => write!(f, "{}", v),
            Node::Variable(name) => write!(f, "{}", name),
            Node::Operator { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OperatorKind {
    /// Look up the operator for a symbol character
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(OperatorKind::Add),
            '-' => Some(OperatorKind::Subtract),
            '*' => Some(OperatorKind::Multiply),
            '/' => Some(OperatorKind::Divide),
            _ => None,
        }
    }

    /// The character this operator is written as
    pub fn symbol(self) -> char {
        match self {
            OperatorKind::Add => '+',
            OperatorKind::Subtract => '-',
            OperatorKind::Multiply => '*',
            OperatorKind::Divide => '/',
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            OperatorKind::Add | OperatorKind::Subtract => 1,
            OperatorKind::Multiply | OperatorKind::Divide => 2,
        }
    }

    /// Apply the operator to two operands
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            OperatorKind::Add => left + right,
            OperatorKind::Subtract => left - right,
            OperatorKind::Multiply => left * right,
            OperatorKind::Divide => left / right,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
