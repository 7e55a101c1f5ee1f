//! Numeric table with clipboard copy/paste for response-spectra workflows.
//!
//! [`bridge::ClipboardTableBridge`] copies a table selection to the clipboard
//! as tab/newline text (plus an HTML table) and pastes HTML tables or
//! whitespace-delimited text back into a [`model::TableModel`], anchored at the
//! [`view::TableView`]'s current cell.

pub mod app;
pub mod bridge;
pub mod clipboard;
pub mod grid;
pub mod logger;
pub mod menu;
pub mod model;
pub mod settings;
pub mod view;
