//! Grid construction options

use crate::MAX_COLS;

/// How far a change is pushed through dependent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Recompute every transitive dependent, in dependency order
    #[default]
    Transitive,
    /// Recompute only the cells that reference the changed cell directly
    SingleHop,
}

/// Options for building a [`Grid`](crate::Grid)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptions {
    /// Number of rows
    pub rows: u32,
    /// Number of columns (at most 26, A-Z)
    pub columns: u16,
    /// Change propagation mode (default: transitive)
    pub propagation: Propagation,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            rows: 50,
            columns: MAX_COLS,
            propagation: Propagation::Transitive,
        }
    }
}

impl GridOptions {
    /// Options for a grid of the given size
    pub fn new(rows: u32, columns: u16) -> Self {
        Self {
            rows,
            columns,
            ..Default::default()
        }
    }

    /// Set the propagation mode
    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }
}
