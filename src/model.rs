//! Table model contract and the numeric grid model behind the spectra table.

use std::ops::{Deref, DerefMut};

use crate::logger;

/// Zero-based cell address. Ordering is row-major: by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub const fn offset(self, rows: usize, columns: usize) -> Self {
        Self {
            row: self.row + rows,
            column: self.column + columns,
        }
    }
}

/// How a value reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// User-facing edit: validated and formatted by the model.
    Edit,
    /// Internal write, stored as given.
    Raw,
}

/// Notifications a model emits while its signals are not blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    RowsInserted { first: usize, last: usize },
    DataChanged { top_left: CellRef, bottom_right: CellRef },
}

pub trait TableModel {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;

    /// Insert `count` empty rows before row `at` (`at == row_count()` appends).
    fn insert_rows(&mut self, at: usize, count: usize) -> bool;

    fn data(&self, cell: CellRef) -> Option<f64>;

    /// The cell's value rendered with the model's formatting convention.
    fn display_text(&self, cell: CellRef) -> String;

    /// Returns false when the cell is out of range or the value is rejected.
    fn set_data(&mut self, cell: CellRef, value: f64, role: Role) -> bool;

    /// Returns the previous blocked state.
    fn block_signals(&mut self, block: bool) -> bool;

    fn data_changed(&mut self, top_left: CellRef, bottom_right: CellRef);
}

/// Blocks a model's signals for as long as it lives and restores the
/// previous state on drop, including on early return.
pub struct SignalBlocker<'a, M: TableModel + ?Sized> {
    model: &'a mut M,
    previous: bool,
}

impl<'a, M: TableModel + ?Sized> SignalBlocker<'a, M> {
    pub fn new(model: &'a mut M) -> Self {
        let previous = model.block_signals(true);
        Self { model, previous }
    }
}

impl<M: TableModel + ?Sized> Deref for SignalBlocker<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<M: TableModel + ?Sized> DerefMut for SignalBlocker<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<M: TableModel + ?Sized> Drop for SignalBlocker<'_, M> {
    fn drop(&mut self) {
        self.model.block_signals(self.previous);
    }
}

/// Fixed-width grid of optional numeric cells.
#[derive(Debug, Clone, Default)]
pub struct GridModel {
    headers: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
    columns: usize,
    precision: Option<usize>,
    signals_blocked: bool,
    events: Vec<ModelEvent>,
}

impl GridModel {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![vec![None; columns]; rows],
            columns,
            ..Self::default()
        }
    }

    /// Number of decimals used for display and applied on edit.
    /// `None` keeps the shortest text that parses back to the same value.
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = headers;
        self
    }

    /// Header label for `column`, falling back to its 1-based number.
    pub fn header(&self, column: usize) -> String {
        self.headers
            .get(column)
            .cloned()
            .unwrap_or_else(|| (column + 1).to_string())
    }

    pub fn format_value(&self, value: f64) -> String {
        match self.precision {
            Some(precision) => format!("{:.*}", precision, value),
            None => value.to_string(),
        }
    }

    /// Drain the notifications emitted since the last call.
    pub fn take_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: ModelEvent) {
        if !self.signals_blocked {
            self.events.push(event);
        }
    }

    fn cell_mut(&mut self, cell: CellRef) -> Option<&mut Option<f64>> {
        if cell.column >= self.columns {
            return None;
        }
        self.rows.get_mut(cell.row).map(|row| &mut row[cell.column])
    }
}

impl TableModel for GridModel {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn insert_rows(&mut self, at: usize, count: usize) -> bool {
        if at > self.rows.len() || count == 0 {
            return false;
        }
        let blank = vec![None; self.columns];
        self.rows.splice(at..at, std::iter::repeat(blank).take(count));
        self.emit(ModelEvent::RowsInserted {
            first: at,
            last: at + count - 1,
        });
        true
    }

    fn data(&self, cell: CellRef) -> Option<f64> {
        self.rows
            .get(cell.row)
            .and_then(|row| row.get(cell.column))
            .copied()
            .flatten()
    }

    fn display_text(&self, cell: CellRef) -> String {
        self.data(cell)
            .map(|value| self.format_value(value))
            .unwrap_or_default()
    }

    fn set_data(&mut self, cell: CellRef, value: f64, role: Role) -> bool {
        let value = match role {
            Role::Raw => value,
            Role::Edit => {
                if !value.is_finite() {
                    logger::log(&format!(
                        "[WARN model] Rejected non-finite value {} at ({}, {})",
                        value, cell.row, cell.column
                    ));
                    return false;
                }
                match self.precision {
                    // Round through the display text so edits show exactly what is stored
                    Some(_) => self.format_value(value).parse().unwrap_or(value),
                    None => value,
                }
            }
        };

        match self.cell_mut(cell) {
            Some(slot) => *slot = Some(value),
            None => return false,
        }
        self.emit(ModelEvent::DataChanged {
            top_left: cell,
            bottom_right: cell,
        });
        true
    }

    fn block_signals(&mut self, block: bool) -> bool {
        std::mem::replace(&mut self.signals_blocked, block)
    }

    fn data_changed(&mut self, top_left: CellRef, bottom_right: CellRef) {
        self.emit(ModelEvent::DataChanged {
            top_left,
            bottom_right,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ref_orders_row_major() {
        let mut cells = vec![
            CellRef::new(1, 0),
            CellRef::new(0, 2),
            CellRef::new(0, 1),
            CellRef::new(1, 1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                CellRef::new(0, 1),
                CellRef::new(0, 2),
                CellRef::new(1, 0),
                CellRef::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_insert_rows_appends_blank_rows() {
        let mut model = GridModel::new(1, 2);
        model.set_data(CellRef::new(0, 0), 5.0, Role::Raw);
        model.take_events();

        assert!(model.insert_rows(1, 2));
        assert_eq!(model.row_count(), 3);
        assert_eq!(model.data(CellRef::new(0, 0)), Some(5.0));
        assert_eq!(model.data(CellRef::new(2, 1)), None);
        assert_eq!(
            model.take_events(),
            vec![ModelEvent::RowsInserted { first: 1, last: 2 }]
        );
    }

    #[test]
    fn test_insert_rows_rejects_bad_position() {
        let mut model = GridModel::new(1, 2);
        assert!(!model.insert_rows(3, 1));
        assert!(!model.insert_rows(0, 0));
        assert_eq!(model.row_count(), 1);
    }

    #[test]
    fn test_set_data_out_of_range() {
        let mut model = GridModel::new(2, 2);
        assert!(!model.set_data(CellRef::new(0, 2), 1.0, Role::Edit));
        assert!(!model.set_data(CellRef::new(2, 0), 1.0, Role::Edit));
        assert!(model.take_events().is_empty());
    }

    #[test]
    fn test_edit_role_validates_and_rounds() {
        let mut model = GridModel::new(1, 2).with_precision(Some(2));
        assert!(!model.set_data(CellRef::new(0, 0), f64::NAN, Role::Edit));
        assert!(model.set_data(CellRef::new(0, 0), 0.123456, Role::Edit));
        assert_eq!(model.data(CellRef::new(0, 0)), Some(0.12));
        assert_eq!(model.display_text(CellRef::new(0, 0)), "0.12");

        assert!(model.set_data(CellRef::new(0, 1), 0.123456, Role::Raw));
        assert_eq!(model.data(CellRef::new(0, 1)), Some(0.123456));
    }

    #[test]
    fn test_display_text_shortest_round_trip() {
        let mut model = GridModel::new(1, 3);
        model.set_data(CellRef::new(0, 0), 1.0, Role::Edit);
        model.set_data(CellRef::new(0, 1), 0.1 + 0.2, Role::Edit);
        assert_eq!(model.display_text(CellRef::new(0, 0)), "1");
        let text = model.display_text(CellRef::new(0, 1));
        assert_eq!(text.parse::<f64>().unwrap(), 0.1 + 0.2);
        assert_eq!(model.display_text(CellRef::new(0, 2)), "");
    }

    #[test]
    fn test_signal_blocker_suppresses_and_restores() {
        let mut model = GridModel::new(2, 2);
        {
            let mut blocked = SignalBlocker::new(&mut model);
            blocked.set_data(CellRef::new(0, 0), 1.0, Role::Edit);
            blocked.set_data(CellRef::new(1, 1), 2.0, Role::Edit);
        }
        assert!(model.take_events().is_empty());

        model.set_data(CellRef::new(0, 1), 3.0, Role::Edit);
        assert_eq!(model.take_events().len(), 1);
    }

    #[test]
    fn test_signal_blocker_keeps_outer_block() {
        let mut model = GridModel::new(1, 1);
        model.block_signals(true);
        {
            let _blocked = SignalBlocker::new(&mut model);
        }
        assert!(model.block_signals(false));
    }

    #[test]
    fn test_header_fallback() {
        let model = GridModel::new(0, 3).with_headers(vec!["Period (s)".to_string()]);
        assert_eq!(model.header(0), "Period (s)");
        assert_eq!(model.header(2), "3");
    }
}
