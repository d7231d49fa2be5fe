//! Gridcalc CLI - expression evaluation and reactive grid tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridcalc::prelude::*;
use gridcalc::tokenize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(
    author,
    version,
    about = "Evaluate arithmetic expressions and drive reactive cell grids"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an arithmetic expression and print the result
    Eval {
        /// Expression to evaluate (e.g. "price*qty+1")
        expression: String,

        /// Variable assignment, may be repeated
        #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        vars: Vec<(String, f64)>,
    },

    /// Print the tokens of an expression, one per line
    Tokens {
        /// Expression to tokenize
        expression: String,
    },

    /// Apply a script of cell assignments to a grid and print the result
    Sheet {
        /// Script file with lines like "B5 = text" (default: stdin)
        script: Option<PathBuf>,

        /// Number of rows
        #[arg(short, long, default_value = "50")]
        rows: u32,

        /// Number of columns (at most 26)
        #[arg(short, long, default_value = "26")]
        columns: u16,

        /// Recompute only direct dependents of a changed cell
        #[arg(long)]
        single_hop: bool,

        /// Log every change notification
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { expression, vars } => eval(&expression, vars),
        Commands::Tokens { expression } => print_tokens(&expression),
        Commands::Sheet {
            script,
            rows,
            columns,
            single_hop,
            trace,
        } => {
            let propagation = if single_hop {
                Propagation::SingleHop
            } else {
                Propagation::Transitive
            };
            let options = GridOptions::new(rows, columns).with_propagation(propagation);
            run_sheet(script.as_deref(), options, trace)
        }
    }
}

/// Parse a `NAME=VALUE` argument
fn parse_assignment(arg: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{}': {e}", name.trim()))?;
    Ok((name.trim().to_string(), value))
}

fn eval(expression: &str, vars: Vec<(String, f64)>) -> Result<()> {
    let mut tree = ExpressionTree::new(expression)
        .with_context(|| format!("Failed to parse '{expression}'"))?;

    for (name, value) in vars {
        tree.set_variable(name, value);
    }

    let result = tree.evaluate().context("Failed to evaluate expression")?;
    println!("{result}");
    Ok(())
}

fn print_tokens(expression: &str) -> Result<()> {
    let tokens =
        tokenize(expression).with_context(|| format!("Failed to tokenize '{expression}'"))?;

    let mut stdout = io::stdout().lock();
    for token in tokens {
        writeln!(stdout, "{token}").context("Failed to write to stdout")?;
    }
    Ok(())
}

fn run_sheet(script: Option<&Path>, options: GridOptions, trace: bool) -> Result<()> {
    let source = match script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read from stdin")?;
            source
        }
    };

    let mut grid = Grid::with_options(options).context("Failed to create grid")?;

    if trace {
        for row in 0..grid.rows() {
            for col in 0..grid.columns() {
                grid.on_change(row, col, |cell, property| {
                    tracing::info!(
                        cell = %cell.name(),
                        %property,
                        text = cell.text(),
                        value = cell.value(),
                        "notification"
                    );
                })?;
            }
        }
    }

    for (line_no, line) in source.lines().enumerate() {
        let Some((name, text)) = parse_script_line(line) else {
            continue;
        };
        grid.set_text_by_name(name, text)
            .with_context(|| format!("line {}: cannot assign '{name}'", line_no + 1))?;
    }

    print_cells(&grid)
}

/// Split a script line into a cell name and its text.
///
/// Returns `None` for blank and `#` comment lines.
fn parse_script_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    match trimmed.split_once('=') {
        Some((name, text)) => Some((name.trim(), text.trim())),
        // A bare name clears the cell
        None => Some((trimmed, "")),
    }
}

fn print_cells(grid: &Grid) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for cell in grid.cells().filter(|cell| !cell.text().is_empty()) {
        writeln!(stdout, "{}\t{}\t{}", cell.name(), cell.text(), cell.value())
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_line() {
        assert_eq!(parse_script_line("B5 = =A1"), Some(("B5", "=A1")));
        assert_eq!(parse_script_line("A1=7"), Some(("A1", "7")));
        assert_eq!(parse_script_line("C2"), Some(("C2", "")));
        assert_eq!(parse_script_line("   "), None);
        assert_eq!(parse_script_line("# comment"), None);
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("x=2.5"), Ok(("x".to_string(), 2.5)));
        assert!(parse_assignment("x").is_err());
        assert!(parse_assignment("x=abc").is_err());
    }

    #[test]
    fn test_unknown_cell_name_is_rejected() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(grid.set_text_by_name("Z9", "x").is_err());
        assert!(grid.set_text_by_name("b1", "x").is_err());
    }
}
