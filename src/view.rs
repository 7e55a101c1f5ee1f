//! View-side capabilities the clipboard bridge relies on.

use crate::model::{CellRef, TableModel};

pub trait TableView {
    /// Selected cells in no particular order.
    fn selected_indexes(&self) -> Vec<CellRef>;

    /// The cell with keyboard focus, `None` when nothing is current.
    fn current_index(&self) -> Option<CellRef>;

    fn resize_columns_to_contents(&mut self, model: &dyn TableModel);
    fn resize_rows_to_contents(&mut self, model: &dyn TableModel);
}

const MIN_COLUMN_WIDTH: usize = 4;

/// Selection and sizing state for a grid shown on screen.
#[derive(Debug, Clone, Default)]
pub struct GridView {
    selection: Vec<CellRef>,
    current: Option<CellRef>,
    column_widths: Vec<usize>,
    row_heights: Vec<usize>,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `cell` the only selected cell and the current one.
    pub fn select(&mut self, cell: CellRef) {
        self.selection.clear();
        self.selection.push(cell);
        self.current = Some(cell);
    }

    /// Select the rectangle spanned by the current cell and `cell`.
    /// The current cell stays where it is.
    pub fn extend_selection_to(&mut self, cell: CellRef) {
        let Some(anchor) = self.current else {
            self.select(cell);
            return;
        };

        let (top, bottom) = (anchor.row.min(cell.row), anchor.row.max(cell.row));
        let (left, right) = (
            anchor.column.min(cell.column),
            anchor.column.max(cell.column),
        );

        self.selection.clear();
        // Column-major on purpose: callers must not rely on selection order
        for column in left..=right {
            for row in top..=bottom {
                self.selection.push(CellRef::new(row, column));
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.current = None;
    }

    pub fn set_current(&mut self, cell: Option<CellRef>) {
        self.current = cell;
    }

    pub fn is_selected(&self, cell: CellRef) -> bool {
        self.selection.contains(&cell)
    }

    /// Widths in characters, one per model column, after the last resize.
    pub fn column_width(&self, column: usize) -> usize {
        self.column_widths
            .get(column)
            .copied()
            .unwrap_or(MIN_COLUMN_WIDTH)
    }

    /// Heights in text lines, one per model row, after the last resize.
    pub fn row_height(&self, row: usize) -> usize {
        self.row_heights.get(row).copied().unwrap_or(1)
    }
}

impl TableView for GridView {
    fn selected_indexes(&self) -> Vec<CellRef> {
        self.selection.clone()
    }

    fn current_index(&self) -> Option<CellRef> {
        self.current
    }

    fn resize_columns_to_contents(&mut self, model: &dyn TableModel) {
        self.column_widths = (0..model.column_count())
            .map(|column| {
                (0..model.row_count())
                    .map(|row| model.display_text(CellRef::new(row, column)).chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(MIN_COLUMN_WIDTH)
            })
            .collect();
    }

    fn resize_rows_to_contents(&mut self, model: &dyn TableModel) {
        self.row_heights = (0..model.row_count())
            .map(|row| {
                (0..model.column_count())
                    .map(|column| model.display_text(CellRef::new(row, column)).lines().count())
                    .max()
                    .unwrap_or(0)
                    .max(1)
            })
            .collect();
    }
}
