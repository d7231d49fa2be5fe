//! Cell-related types
//!
//! This module contains:
//! - [`Cell`] - A grid entry with input text, computed value and listeners
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellProperty`] - The property named by a change notification

mod address;

pub use address::CellAddress;

use ahash::AHashSet;
use std::fmt;

/// Default background color (opaque white, packed ARGB)
pub const DEFAULT_BACKGROUND_COLOR: u32 = 0xFFFF_FFFF;

/// Observable properties of a [`Cell`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellProperty {
    /// Raw input text
    Text,
    /// Computed display value
    Value,
    /// Packed ARGB background color
    BackgroundColor,
}

impl CellProperty {
    /// Property name as carried by change notifications
    pub fn as_str(self) -> &'static str {
        match self {
            CellProperty::Text => "Text",
            CellProperty::Value => "Value",
            CellProperty::BackgroundColor => "BackgroundColor",
        }
    }
}

impl fmt::Display for CellProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked after a cell property changes
pub type Listener = Box<dyn FnMut(&Cell, CellProperty)>;

/// Handle returned by [`Cell::on_change`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A single grid entry
///
/// A cell never decides what its text means. Setting the text only raises a
/// [`CellProperty::Text`] notification; the owning [`Grid`](crate::Grid)
/// reacts to it, computes the value and writes it back.
pub struct Cell {
    address: CellAddress,
    text: String,
    value: String,
    background_color: u32,
    has_changed: bool,
    referenced_cell_names: AHashSet<String>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl Cell {
    pub(crate) fn new(row: u32, col: u16) -> Self {
        Self {
            address: CellAddress::new(row, col),
            text: String::new(),
            value: String::new(),
            background_color: DEFAULT_BACKGROUND_COLOR,
            has_changed: false,
            referenced_cell_names: AHashSet::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Row index (0-based)
    pub fn row(&self) -> u32 {
        self.address.row
    }

    /// Column index (0-based)
    pub fn column(&self) -> u16 {
        self.address.col
    }

    /// The cell's address
    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// Cell name: column letter followed by the 1-based row (e.g. "A1")
    pub fn name(&self) -> String {
        self.address.to_string()
    }

    /// Raw input text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Computed display value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Packed ARGB background color
    pub fn background_color(&self) -> u32 {
        self.background_color
    }

    /// Whether the text or color changed since the last save
    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    /// Names of the cells this cell currently reads
    pub fn referenced_cell_names(&self) -> &AHashSet<String> {
        &self.referenced_cell_names
    }

    /// Subscribe to property changes
    ///
    /// Listeners run synchronously, in registration order, before the
    /// mutating call returns.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Cell, CellProperty) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.has_changed = true;
        self.notify(CellProperty::Text);
    }

    /// Always notifies, even when the value is unchanged, so displays
    /// refresh on every recalculation.
    pub(crate) fn set_value(&mut self, value: String) {
        self.apply_value(value);
        self.notify(CellProperty::Value);
    }

    pub(crate) fn set_background_color(&mut self, argb: u32) {
        self.background_color = argb;
        self.has_changed = true;
        self.notify(CellProperty::BackgroundColor);
    }

    pub(crate) fn set_referenced_cell_names(&mut self, names: AHashSet<String>) {
        self.referenced_cell_names = names;
    }

    /// Re-raise the text notification after a referenced cell changed
    pub(crate) fn on_referenced_cell_changed(&mut self) {
        self.notify(CellProperty::Text);
    }

    pub(crate) fn mark_saved(&mut self) {
        self.has_changed = false;
    }

    fn apply_value(&mut self, value: String) {
        self.value = value;
    }

    fn notify(&mut self, property: CellProperty) {
        tracing::trace!(cell = %self.address, %property, "cell changed");

        if self.listeners.is_empty() {
            return;
        }

        // Listeners get a shared borrow of the cell, so they cannot touch
        // the listener list while it is detached.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(self, property);
        }
        self.listeners = listeners;
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("address", &self.address)
            .field("text", &self.text)
            .field("value", &self.value)
            .field("background_color", &format_args!("{:#010X}", self.background_color))
            .field("has_changed", &self.has_changed)
            .field("referenced_cell_names", &self.referenced_cell_names)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(cell: &mut Cell) -> Rc<RefCell<Vec<CellProperty>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        cell.on_change(move |_, property| sink.borrow_mut().push(property));
        events
    }

    #[test]
    fn test_new_cell_defaults() {
        let cell = Cell::new(0, 0);
        assert_eq!(cell.text(), "");
        assert_eq!(cell.value(), "");
        assert_eq!(cell.background_color(), 0xFFFFFFFF);
        assert!(!cell.has_changed());
        assert!(cell.referenced_cell_names().is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(Cell::new(0, 0).name(), "A1");
        assert_eq!(Cell::new(4, 1).name(), "B5");
        assert_eq!(Cell::new(49, 25).name(), "Z50");
    }

    #[test]
    fn test_set_text_notifies_and_marks_changed() {
        let mut cell = Cell::new(0, 0);
        let events = recorded(&mut cell);

        cell.set_text("hello");
        cell.set_text("hello");

        assert_eq!(cell.text(), "hello");
        assert!(cell.has_changed());
        assert_eq!(*events.borrow(), vec![CellProperty::Text, CellProperty::Text]);
    }

    #[test]
    fn test_set_value_always_notifies() {
        let mut cell = Cell::new(0, 0);
        let events = recorded(&mut cell);

        cell.set_value("7".into());
        cell.set_value("7".into());

        assert_eq!(cell.value(), "7");
        assert_eq!(*events.borrow(), vec![CellProperty::Value, CellProperty::Value]);
        // Values are computed, not entered
        assert!(!cell.has_changed());
    }

    #[test]
    fn test_background_color() {
        let mut cell = Cell::new(2, 3);
        let events = recorded(&mut cell);

        cell.set_background_color(0xFF00FF00);

        assert_eq!(cell.background_color(), 0xFF00FF00);
        assert!(cell.has_changed());
        assert_eq!(*events.borrow(), vec![CellProperty::BackgroundColor]);

        cell.mark_saved();
        assert!(!cell.has_changed());
    }

    #[test]
    fn test_listener_sees_new_state() {
        let mut cell = Cell::new(1, 2);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        cell.on_change(move |cell, property| {
            sink.borrow_mut()
                .push(format!("{} {} {}", cell.name(), property, cell.value()));
        });

        cell.set_value("42".into());

        assert_eq!(*seen.borrow(), vec!["C2 Value 42".to_string()]);
    }

    #[test]
    fn test_listeners_run_in_order_and_can_be_removed() {
        let mut cell = Cell::new(0, 0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = order.clone();
        let id = cell.on_change(move |_, _| first.borrow_mut().push(1));
        let second = order.clone();
        cell.on_change(move |_, _| second.borrow_mut().push(2));

        cell.set_text("x");
        assert!(cell.remove_listener(id));
        assert!(!cell.remove_listener(id));
        cell.set_text("y");

        assert_eq!(*order.borrow(), vec![1, 2, 2]);
    }

    #[test]
    fn test_referenced_cell_changed_reraises_text() {
        let mut cell = Cell::new(0, 1);
        let events = recorded(&mut cell);

        cell.on_referenced_cell_changed();

        assert_eq!(*events.borrow(), vec![CellProperty::Text]);
    }
}
