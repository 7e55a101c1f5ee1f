//! Parsing clipboard payloads into numeric grids.

use roxmltree::{Document, Node, ParsingOptions};
use thiserror::Error;

use crate::clipboard::ClipboardError;

#[derive(Debug, Error)]
pub enum PasteError {
    #[error("Error converting \"{text}\" to a number")]
    NumericConversion { text: String },
    #[error("malformed table markup: {0}")]
    MalformedStructuredContent(String),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Rows of parsed values. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<f64>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values paired with their (row, column) offset inside the grid.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, &value)| (i, j, value))
        })
    }
}

fn parse_number(text: &str) -> Result<f64, PasteError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| PasteError::NumericConversion {
            text: trimmed.to_string(),
        })
}

/// Newline-separated rows of whitespace-separated numbers. Empty lines are
/// skipped; any whitespace separates columns.
pub fn parse_plain_text(text: &str) -> Result<Grid, PasteError> {
    let rows = text
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().map(parse_number).collect())
        .collect::<Result<Vec<Vec<f64>>, _>>()?;
    Ok(Grid::from_rows(rows))
}

fn is_element_named(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

fn element_text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Values of one `tr`: its first `td` child and every element after it.
fn parse_table_row(row: Node) -> Result<Vec<f64>, PasteError> {
    row.children()
        .filter(Node::is_element)
        .skip_while(|cell| !is_element_named(cell, "td"))
        .map(|cell| parse_number(&element_text(cell)))
        .collect()
}

/// Table markup, one grid row per `tr` element in document order.
///
/// The markup must be well-formed; anything else is reported as
/// [`PasteError::MalformedStructuredContent`] so the caller can fall back to
/// the plain-text form. Markup without rows yields an empty grid.
pub fn parse_html(html: &str) -> Result<Grid, PasteError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(html, options)
        .map_err(|e| PasteError::MalformedStructuredContent(e.to_string()))?;

    let rows = document
        .descendants()
        .filter(|node| is_element_named(node, "tr"))
        .map(parse_table_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Grid::from_rows(rows))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render rows of already formatted cell text as a well-formed HTML table.
pub fn to_html<R, C>(rows: R) -> String
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    let mut html = String::from("<table>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(&cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}
