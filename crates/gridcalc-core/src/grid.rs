//! Grid type

use ahash::AHashSet;
use tracing::{debug, warn};

use crate::cell::{Cell, CellAddress, CellProperty, ListenerId};
use crate::dependency::DependencyGraph;
use crate::error::{Error, Result};
use crate::options::{GridOptions, Propagation};
use crate::MAX_COLS;

/// Marker that starts a formula
pub const FORMULA_MARKER: char = '=';

/// A fixed-size table of cells that recomputes values as text changes
///
/// Text starting with `=` is a formula; the only formula the grid resolves
/// is a bare single-cell reference such as `=B5`, which copies that cell's
/// value. Anything it cannot resolve is shown as the raw text. All other
/// text is its own value.
///
/// # Example
/// ```rust
/// use gridcalc_core::Grid;
///
/// let mut grid = Grid::new(5, 5).unwrap();
/// grid.set_text(0, 0, "7").unwrap();
/// grid.set_text(1, 1, "=A1").unwrap();
/// assert_eq!(grid.cell(1, 1).unwrap().value(), "7");
///
/// grid.set_text(0, 0, "8").unwrap();
/// assert_eq!(grid.cell(1, 1).unwrap().value(), "8");
/// ```
#[derive(Debug)]
pub struct Grid {
    options: GridOptions,
    /// Row-major cell storage
    cells: Vec<Cell>,
    dependencies: DependencyGraph,
}

impl Grid {
    /// Create a grid with the given dimensions and default options
    pub fn new(rows: u32, columns: u16) -> Result<Self> {
        Self::with_options(GridOptions::new(rows, columns))
    }

    /// Create a grid from options
    pub fn with_options(options: GridOptions) -> Result<Self> {
        if options.columns > MAX_COLS {
            return Err(Error::TooManyColumns(options.columns));
        }

        let mut cells = Vec::with_capacity(options.rows as usize * options.columns as usize);
        for row in 0..options.rows {
            for col in 0..options.columns {
                cells.push(Cell::new(row, col));
            }
        }

        Ok(Self {
            options,
            cells,
            dependencies: DependencyGraph::new(),
        })
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.options.rows
    }

    /// Number of columns
    pub fn columns(&self) -> u16 {
        self.options.columns
    }

    /// The options this grid was built with
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// The dependency graph between cells
    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    // === Cell Access ===

    /// Get a cell by row and column indices, or `None` when out of range
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Get a cell by name (e.g., "B5")
    pub fn cell_by_name(&self, name: &str) -> Option<&Cell> {
        let addr = CellAddress::parse(name).ok()?;
        self.cell(addr.row, addr.col)
    }

    /// Iterate over all cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate over cells changed since they were last saved
    pub fn changed_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.has_changed())
    }

    /// Clear the changed flag on every cell
    pub fn mark_all_saved(&mut self) {
        for cell in &mut self.cells {
            cell.mark_saved();
        }
    }

    // === Mutation ===

    /// Set a cell's input text and recompute everything that depends on it
    pub fn set_text<S: Into<String>>(&mut self, row: u32, col: u16, text: S) -> Result<()> {
        let addr = self.check_bounds(row, col)?;
        self.cell_at_mut(addr).set_text(text);
        self.on_cell_text_changed(addr);
        Ok(())
    }

    /// Set a cell's input text by name (e.g., "B5")
    pub fn set_text_by_name<S: Into<String>>(&mut self, name: &str, text: S) -> Result<()> {
        let addr = CellAddress::parse(name)?;
        self.set_text(addr.row, addr.col, text)
    }

    /// Set a cell's background color (packed ARGB)
    pub fn set_background_color(&mut self, row: u32, col: u16, argb: u32) -> Result<()> {
        let addr = self.check_bounds(row, col)?;
        self.cell_at_mut(addr).set_background_color(argb);
        Ok(())
    }

    /// Subscribe to a cell's change notifications
    pub fn on_change<F>(&mut self, row: u32, col: u16, listener: F) -> Result<ListenerId>
    where
        F: FnMut(&Cell, CellProperty) + 'static,
    {
        let addr = self.check_bounds(row, col)?;
        Ok(self.cell_at_mut(addr).on_change(listener))
    }

    /// Unsubscribe a listener from a cell
    pub fn remove_listener(&mut self, row: u32, col: u16, id: ListenerId) -> Result<bool> {
        let addr = self.check_bounds(row, col)?;
        Ok(self.cell_at_mut(addr).remove_listener(id))
    }

    // === Recalculation ===

    fn on_cell_text_changed(&mut self, addr: CellAddress) {
        self.bind_references(addr);

        // Cycle membership for everything this change can reach
        let cyclic = self.dependencies.cells_on_cycles(addr);
        self.recompute(addr, &cyclic);
        self.propagate(addr, &cyclic);
    }

    /// Record which cell, if any, the cell's formula reads
    fn bind_references(&mut self, addr: CellAddress) {
        self.dependencies.clear_precedents(addr);

        let target = self
            .cell_at(addr)
            .text()
            .strip_prefix(FORMULA_MARKER)
            .and_then(|reference| self.resolve_reference(reference));

        let mut names = AHashSet::new();
        if let Some(target) = target {
            self.dependencies.add_dependency(target, addr);
            names.insert(target.to_string());
        }
        self.cell_at_mut(addr).set_referenced_cell_names(names);
    }

    /// Compute the cell's value from its text and store it
    fn recompute(&mut self, addr: CellAddress, cyclic: &AHashSet<CellAddress>) {
        let value = self.evaluate(addr, cyclic);
        debug!(cell = %addr, value = %value, "recomputed");
        self.cell_at_mut(addr).set_value(value);
    }

    fn evaluate(&self, addr: CellAddress, cyclic: &AHashSet<CellAddress>) -> String {
        let text = self.cell_at(addr).text();

        let Some(reference) = text.strip_prefix(FORMULA_MARKER) else {
            return text.to_string();
        };

        match self.resolve_reference(reference) {
            Some(_) if cyclic.contains(&addr) => {
                warn!(cell = %addr, formula = text, "circular reference, showing raw text");
                text.to_string()
            }
            Some(target) => self.cell_at(target).value().to_string(),
            None => {
                debug!(cell = %addr, formula = text, "unresolved reference, showing raw text");
                text.to_string()
            }
        }
    }

    /// Push a change to the cells that read `changed`
    fn propagate(&mut self, changed: CellAddress, cyclic: &AHashSet<CellAddress>) {
        let order = match self.options.propagation {
            Propagation::Transitive => self.dependencies.get_recalc_order(changed),
            Propagation::SingleHop => {
                let mut direct = self.dependencies.get_dependents(changed);
                direct.retain(|dependent| *dependent != changed);
                direct
            }
        };

        for dependent in order {
            self.cell_at_mut(dependent).on_referenced_cell_changed();
            self.recompute(dependent, cyclic);
        }
    }

    /// Parse a reference like `B5` and check it lies inside the grid
    fn resolve_reference(&self, reference: &str) -> Option<CellAddress> {
        let addr = CellAddress::parse(reference).ok()?;
        self.index(addr.row, addr.col).map(|_| addr)
    }

    // === Helpers ===

    fn index(&self, row: u32, col: u16) -> Option<usize> {
        if row < self.options.rows && col < self.options.columns {
            Some(row as usize * self.options.columns as usize + col as usize)
        } else {
            None
        }
    }

    fn check_bounds(&self, row: u32, col: u16) -> Result<CellAddress> {
        if row >= self.options.rows {
            return Err(Error::RowOutOfBounds(
                row,
                self.options.rows.saturating_sub(1),
            ));
        }
        if col >= self.options.columns {
            return Err(Error::ColumnOutOfBounds(
                col,
                self.options.columns.saturating_sub(1),
            ));
        }
        Ok(CellAddress::new(row, col))
    }

    fn cell_at(&self, addr: CellAddress) -> &Cell {
        &self.cells[addr.row as usize * self.options.columns as usize + addr.col as usize]
    }

    fn cell_at_mut(&mut self, addr: CellAddress) -> &mut Cell {
        let columns = self.options.columns as usize;
        &mut self.cells[addr.row as usize * columns + addr.col as usize]
    }
}
