//! # gridcalc-core
//!
//! Reactive cell grid for gridcalc.
//!
//! This crate provides:
//! - [`Cell`] - A grid entry with raw text, computed value and change listeners
//! - [`CellAddress`] - Cell naming (`A1` notation, columns A-Z)
//! - [`Grid`] - A fixed-size table of cells that resolves `=B5` references
//!   and pushes changes to dependent cells
//! - [`DependencyGraph`] - Precedent/dependent edges between cells
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellProperty, Grid};
//!
//! let mut grid = Grid::new(5, 5).unwrap();
//! grid.on_change(1, 0, |cell, property| {
//!     if property == CellProperty::Value {
//!         println!("{} = {}", cell.name(), cell.value());
//!     }
//! })
//! .unwrap();
//!
//! grid.set_text(0, 0, "hello").unwrap();
//! grid.set_text(1, 0, "=A1").unwrap();
//! assert_eq!(grid.cell(1, 0).unwrap().value(), "hello");
//! ```

pub mod cell;
pub mod dependency;
pub mod error;
pub mod grid;
pub mod options;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellProperty, Listener, ListenerId, DEFAULT_BACKGROUND_COLOR};
pub use dependency::DependencyGraph;
pub use error::{Error, Result};
pub use grid::{Grid, FORMULA_MARKER};
pub use options::{GridOptions, Propagation};

/// Maximum number of columns in a grid (single letters A-Z)
pub const MAX_COLS: u16 = 26;
