//! Dependency tracking between cells

use crate::cell::CellAddress;
use ahash::{AHashMap, AHashSet};

/// Dependency graph for formula cells
///
/// Tracks which cells depend on which other cells, so a change can be pushed
/// to everything that reads the changed cell.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Cell → Cells that depend on it (dependents)
    dependents: AHashMap<CellAddress, AHashSet<CellAddress>>,
    /// Cell → Cells it depends on (precedents)
    precedents: AHashMap<CellAddress, AHashSet<CellAddress>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency: dependent depends on precedent
    pub fn add_dependency(&mut self, precedent: CellAddress, dependent: CellAddress) {
        self.dependents
            .entry(precedent)
            .or_default()
            .insert(dependent);
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Forget every cell the given cell reads; cells reading it are kept
    pub fn clear_precedents(&mut self, cell: CellAddress) {
        if let Some(precedents) = self.precedents.remove(&cell) {
            for precedent in precedents {
                if let Some(deps) = self.dependents.get_mut(&precedent) {
                    deps.remove(&cell);
                    if deps.is_empty() {
                        self.dependents.remove(&precedent);
                    }
                }
            }
        }
    }

    /// Cells that directly depend on the given cell, in address order
    pub fn get_dependents(&self, cell: CellAddress) -> Vec<CellAddress> {
        Self::sorted(self.dependents.get(&cell))
    }

    /// Cells the given cell directly depends on, in address order
    pub fn get_precedents(&self, cell: CellAddress) -> Vec<CellAddress> {
        Self::sorted(self.precedents.get(&cell))
    }

    fn sorted(set: Option<&AHashSet<CellAddress>>) -> Vec<CellAddress> {
        let mut cells: Vec<_> = set.into_iter().flatten().copied().collect();
        cells.sort();
        cells
    }

    /// All cells that must be recomputed after `changed` changes,
    /// in an order where every cell comes after the cells it reads.
    ///
    /// `changed` itself is not included. Cells on a cycle are visited once.
    pub fn get_recalc_order(&self, changed: CellAddress) -> Vec<CellAddress> {
        let mut result = Vec::new();
        let mut visited = AHashSet::new();
        let mut in_stack = AHashSet::new();

        // Explicit DFS stack: (cell, its dependents, next dependent to visit)
        let mut stack = vec![(changed, self.get_dependents(changed), 0usize)];
        in_stack.insert(changed);

        while let Some((cell, dependents, next)) = stack.last_mut() {
            let cell = *cell;
            match dependents.get(*next).copied() {
                Some(dependent) => {
                    *next += 1;
                    if !visited.contains(&dependent) && in_stack.insert(dependent) {
                        stack.push((dependent, self.get_dependents(dependent), 0));
                    }
                }
                None => {
                    stack.pop();
                    in_stack.remove(&cell);
                    visited.insert(cell);
                    result.push(cell);
                }
            }
        }

        // Post-order puts the changed cell last
        result.pop();
        result.reverse();
        result
    }

    /// Cells reachable from `start` (including `start`) that lie on a
    /// reference cycle, found in one pass over the reachable subgraph.
    ///
    /// Every cycle through a reachable cell is itself reachable, so the
    /// result covers everything [`get_recalc_order`](Self::get_recalc_order)
    /// returns for the same cell.
    pub fn cells_on_cycles(&self, start: CellAddress) -> AHashSet<CellAddress> {
        // Iterative Tarjan: cell -> (discovery index, lowlink)
        let mut links: AHashMap<CellAddress, (usize, usize)> = AHashMap::new();
        let mut component = Vec::new();
        let mut on_component = AHashSet::new();
        let mut cyclic = AHashSet::new();

        links.insert(start, (0, 0));
        component.push(start);
        on_component.insert(start);
        let mut stack = vec![(start, self.get_dependents(start), 0usize)];

        while let Some((cell, dependents, next)) = stack.last_mut() {
            let cell = *cell;
            let dependent = dependents.get(*next).copied();
            *next += 1;

            match dependent {
                Some(dependent) => match links.get(&dependent).copied() {
                    None => {
                        let index = links.len();
                        links.insert(dependent, (index, index));
                        component.push(dependent);
                        on_component.insert(dependent);
                        stack.push((dependent, self.get_dependents(dependent), 0));
                    }
                    Some((index, _)) if on_component.contains(&dependent) => {
                        if let Some(link) = links.get_mut(&cell) {
                            link.1 = link.1.min(index);
                        }
                    }
                    Some(_) => {}
                },
                None => {
                    stack.pop();
                    let (index, low) = links.get(&cell).copied().unwrap_or_default();

                    if let Some((parent, _, _)) = stack.last() {
                        if let Some(link) = links.get_mut(parent) {
                            link.1 = link.1.min(low);
                        }
                    }

                    if index == low {
                        let mut members = Vec::new();
                        while let Some(member) = component.pop() {
                            on_component.remove(&member);
                            members.push(member);
                            if member == cell {
                                break;
                            }
                        }
                        let reads_itself = self
                            .dependents
                            .get(&cell)
                            .is_some_and(|deps| deps.contains(&cell));
                        if members.len() > 1 || reads_itself {
                            cyclic.extend(members);
                        }
                    }
                }
            }
        }

        cyclic
    }

    /// Whether the cell lies on a reference cycle (including reading itself)
    pub fn has_circular_reference(&self, cell: CellAddress) -> bool {
        self.cells_on_cycles(cell).contains(&cell)
    }
}
