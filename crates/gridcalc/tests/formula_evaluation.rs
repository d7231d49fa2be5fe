//! Tests for expression tokenizing, parsing and evaluation

use gridcalc::prelude::*;
use gridcalc::{tokenize, Node, OperatorKind, Variables};
use pretty_assertions::assert_eq;

fn token_strings(expression: &str) -> Vec<String> {
    tokenize(expression)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn eval(expression: &str) -> f64 {
    ExpressionTree::new(expression).unwrap().evaluate().unwrap()
}

/// Test tokenizing operators and values
#[test]
fn test_tokenize() {
    assert_eq!(token_strings("3+7+1"), vec!["3", "+", "7", "+", "1"]);
    assert_eq!(
        token_strings("3+7+hello+2+b"),
        vec!["3", "+", "7", "+", "hello", "+", "2", "+", "b"]
    );
}

/// Test that malformed expressions fail to build
#[test]
fn test_construction_errors() {
    assert!(matches!(
        ExpressionTree::new("+"),
        Err(FormulaError::Parse(_))
    ));
    assert!(matches!(
        ExpressionTree::new("2+"),
        Err(FormulaError::Parse(_))
    ));
    assert!(matches!(
        ExpressionTree::new("2#"),
        Err(FormulaError::UnexpectedCharacter { ch: '#', pos: 1 })
    ));
}

/// Test evaluating chained operators
#[test]
fn test_evaluate() {
    assert_eq!(eval("3+7"), 10.0);
    assert_eq!(eval("3+7+2+1"), 13.0);
    assert_eq!(eval("3/7"), 3.0 / 7.0);
    assert_eq!(eval("3/7/2/1"), 3.0 / 7.0 / 2.0 / 1.0);
    assert_eq!(eval("10-4*2"), 2.0);
    assert_eq!(eval("(10-4)*2"), 12.0);
    assert_eq!(eval(" 1.5 * 4 "), 6.0);
}

/// Test IEEE division semantics
#[test]
fn test_divide_by_zero() {
    assert_eq!(eval("1/0"), f64::INFINITY);
    assert!(eval("0/0").is_nan());
}

/// Test variable assignment and default values
#[test]
fn test_variables() {
    let mut tree = ExpressionTree::new("price*qty-discount").unwrap();
    assert_eq!(tree.evaluate().unwrap(), 0.0);

    tree.set_variable("price", 2.5);
    tree.set_variable("qty", 4.0);
    assert_eq!(tree.evaluate().unwrap(), 10.0);

    tree.set_variable("discount", 1.0);
    assert_eq!(tree.evaluate().unwrap(), 9.0);
}

/// Test that an unbuilt tree cannot be evaluated
#[test]
fn test_unbuilt_tree() {
    assert_eq!(
        ExpressionTree::default().evaluate(),
        Err(FormulaError::NotBuilt)
    );
}

/// Test evaluating hand-built nodes
#[test]
fn test_nodes() {
    let node = Node::operator(
        OperatorKind::Subtract,
        Node::value(10.0),
        Node::operator(OperatorKind::Multiply, Node::variable("x"), Node::value(3.0)),
    );

    let mut vars = Variables::new();
    assert_eq!(node.evaluate(&vars), 10.0);

    vars.insert("x".to_string(), 2.0);
    assert_eq!(node.evaluate(&vars), 4.0);
}

/// Test that oversized expressions are rejected instead of built
#[test]
fn test_oversized_expression() {
    let long_sum = vec!["1"; 200_000].join("+");
    assert!(matches!(
        ExpressionTree::new(&long_sum),
        Err(FormulaError::Parse(_))
    ));

    let sum = vec!["1"; 500].join("+");
    assert_eq!(eval(&sum), 500.0);
}

/// Test evaluating expressions over grid cells
#[test]
fn test_grid_expression() {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set_text(0, 0, "10").unwrap();
    grid.set_text(1, 0, "=A1").unwrap();
    grid.set_text(2, 0, "not a number").unwrap();

    assert_eq!(grid.evaluate_expression("A1+A2").unwrap(), 20.0);
    assert_eq!(grid.evaluate_expression("A1*A3").unwrap(), 0.0);
    assert_eq!(grid.evaluate_expression("(A1+A2)/4").unwrap(), 5.0);
}
