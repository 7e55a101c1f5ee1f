//! Copy and paste between a numeric table and the clipboard.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::grid::{self, Grid, PasteError};
use crate::logger;
use crate::menu::{ContextMenu, MenuAction, MenuPosition};
use crate::model::{CellRef, Role, SignalBlocker, TableModel};
use crate::view::TableView;

/// What a completed paste did to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteSummary {
    pub top_left: CellRef,
    pub bottom_right: CellRef,
    pub rows: usize,
    pub rows_inserted: usize,
    pub cells_written: usize,
    /// Values that fell outside the model and were dropped.
    pub cells_skipped: usize,
}

/// Result of a menu or shortcut action, for status reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Copied { cells: usize },
    Pasted(PasteSummary),
    NothingToPaste,
    Failed(String),
}

type PastedListener = Box<dyn FnMut(&PasteSummary)>;

pub struct ClipboardTableBridge<C: Clipboard> {
    clipboard: C,
    copy_html: bool,
    menu: ContextMenu,
    pasted_listeners: Vec<PastedListener>,
}

/// Sort the selection row-major and join it with tabs within a row and
/// newlines between rows.
pub fn selection_text<M: TableModel + ?Sized>(model: &M, selection: &[CellRef]) -> String {
    let mut cells = selection.to_vec();
    cells.sort();

    let mut data = String::new();
    for (i, cell) in cells.iter().enumerate() {
        data.push_str(&model.display_text(*cell));
        if let Some(next) = cells.get(i + 1) {
            data.push(if next.row != cell.row { '\n' } else { '\t' });
        }
    }
    data
}

fn selection_rows<M: TableModel + ?Sized>(model: &M, selection: &[CellRef]) -> Vec<Vec<String>> {
    let mut cells = selection.to_vec();
    cells.sort();

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut last_row = None;
    for cell in cells {
        if last_row != Some(cell.row) {
            rows.push(Vec::new());
            last_row = Some(cell.row);
        }
        if let Some(row) = rows.last_mut() {
            row.push(model.display_text(cell));
        }
    }
    rows
}

impl<C: Clipboard> ClipboardTableBridge<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            clipboard,
            copy_html: false,
            menu: ContextMenu::default(),
            pasted_listeners: Vec::new(),
        }
    }

    /// Also publish an HTML table when copying a non-empty selection.
    /// Off by default: blank cells become empty `td`s, which do not paste.
    pub fn with_copy_html(mut self, copy_html: bool) -> Self {
        self.copy_html = copy_html;
        self
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut ContextMenu {
        &mut self.menu
    }

    /// Call `listener` after every paste that changed the model.
    pub fn connect_pasted(&mut self, listener: impl FnMut(&PasteSummary) + 'static) {
        self.pasted_listeners.push(Box::new(listener));
    }

    pub fn context_menu_event(&mut self, position: MenuPosition) {
        self.menu.popup(position);
    }

    /// Put the view's selection on the clipboard and return the plain text.
    pub fn copy<V, M>(&mut self, view: &V, model: &M) -> Result<String, ClipboardError>
    where
        V: TableView + ?Sized,
        M: TableModel + ?Sized,
    {
        let selection = view.selected_indexes();
        let data = selection_text(model, &selection);

        if self.copy_html && !selection.is_empty() {
            let html = grid::to_html(selection_rows(model, &selection));
            self.clipboard.set_html(&html, &data)?;
        } else {
            self.clipboard.set_text(&data)?;
        }

        logger::log(&format!(
            "[DEBUG copy] {} cells, {} chars",
            selection.len(),
            data.len()
        ));
        Ok(data)
    }

    /// Read the clipboard into a grid. HTML wins when it is well-formed,
    /// otherwise the plain text is used.
    fn read_grid(&mut self) -> Result<Grid, PasteError> {
        if let Some(html) = self.clipboard.get_html()? {
            match grid::parse_html(&html) {
                Ok(grid) => return Ok(grid),
                Err(PasteError::MalformedStructuredContent(reason)) => {
                    logger::log(&format!(
                        "[DEBUG paste] HTML not usable ({}), falling back to text",
                        reason
                    ));
                }
                Err(e) => return Err(e),
            }
        }
        grid::parse_plain_text(&self.clipboard.get_text()?)
    }

    /// Write the clipboard's grid into `model` at the view's current cell.
    ///
    /// Returns `Ok(None)` when the clipboard holds no rows. On a conversion
    /// error nothing in the model changes.
    pub fn paste<V, M>(&mut self, view: &mut V, model: &mut M) -> Result<Option<PasteSummary>, PasteError>
    where
        V: TableView + ?Sized,
        M: TableModel,
    {
        let grid = self.read_grid()?;
        if grid.is_empty() {
            logger::log("[DEBUG paste] Clipboard has no rows, nothing to paste");
            return Ok(None);
        }

        let (anchor, required_rows) = match view.current_index() {
            Some(current) => (current, current.row + grid.row_count()),
            None => (CellRef::new(0, 0), grid.row_count()),
        };
        let rows_inserted = required_rows.saturating_sub(model.row_count());
        if rows_inserted > 0 && !model.insert_rows(model.row_count(), rows_inserted) {
            logger::log(&format!(
                "[WARN paste] Model refused to insert {} rows",
                rows_inserted
            ));
        }

        let (mut cells_written, mut cells_skipped) = (0, 0);
        {
            let mut model = SignalBlocker::new(&mut *model);
            for (i, j, value) in grid.cells() {
                if model.set_data(anchor.offset(i, j), value, Role::Edit) {
                    cells_written += 1;
                } else {
                    cells_skipped += 1;
                }
            }
        }

        let last_column = (anchor.column + grid.width().max(1) - 1)
            .min(model.column_count().saturating_sub(1))
            .max(anchor.column);
        let bottom_right = CellRef::new(anchor.row + grid.row_count() - 1, last_column);
        model.data_changed(anchor, bottom_right);

        view.resize_columns_to_contents(&*model);
        view.resize_rows_to_contents(&*model);

        let summary = PasteSummary {
            top_left: anchor,
            bottom_right,
            rows: grid.row_count(),
            rows_inserted,
            cells_written,
            cells_skipped,
        };
        logger::log(&format!("[DEBUG paste] {:?}", summary));
        if cells_skipped > 0 {
            logger::log(&format!(
                "[WARN paste] {} values did not fit the table and were dropped",
                cells_skipped
            ));
        }

        for listener in &mut self.pasted_listeners {
            listener(&summary);
        }
        Ok(Some(summary))
    }

    /// Run a menu or shortcut action. Failures are logged and the model is
    /// left as it was.
    pub fn trigger<V, M>(&mut self, action: MenuAction, view: &mut V, model: &mut M) -> ActionOutcome
    where
        V: TableView + ?Sized,
        M: TableModel,
    {
        self.menu.dismiss();
        match action {
            MenuAction::Copy => match self.copy(&*view, &*model) {
                Ok(_) => ActionOutcome::Copied {
                    cells: view.selected_indexes().len(),
                },
                Err(e) => {
                    logger::log(&format!("[WARN copy] {}", e));
                    ActionOutcome::Failed(e.to_string())
                }
            },
            MenuAction::Paste => match self.paste(view, model) {
                Ok(Some(summary)) => ActionOutcome::Pasted(summary),
                Ok(None) => ActionOutcome::NothingToPaste,
                Err(e) => {
                    logger::log(&format!("[WARN paste] {}", e));
                    ActionOutcome::Failed(e.to_string())
                }
            },
        }
    }
}
