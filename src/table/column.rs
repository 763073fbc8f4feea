//! Column Definition
//!
//! Defines table columns with their layout properties and cell renderer.

use std::sync::Arc;

use super::row::{FieldValue, TableRow};

/// Column width specification
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ColumnWidth {
    /// Fixed width in pixels
    Fixed(f32),
    /// Share the remaining space
    #[default]
    Flex,
}

/// Horizontal cell alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual tone of a badge cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

/// Resolved content of one cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Badge { text: String, tone: Tone },
    Flag(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            text: text.into(),
            tone,
        }
    }
}

/// How a column turns a row into a [`Cell`]
pub enum CellRenderer<R> {
    /// String form of the column's field
    Plain,
    /// Text derived from the whole row
    Accessor(Arc<dyn Fn(&R) -> String + Send + Sync>),
    /// Full control: field value and row in, cell out
    Custom(Arc<dyn Fn(&FieldValue, &R) -> Cell + Send + Sync>),
}

impl<R> Clone for CellRenderer<R> {
    fn clone(&self) -> Self {
        match self {
            CellRenderer::Plain => CellRenderer::Plain,
            CellRenderer::Accessor(f) => CellRenderer::Accessor(f.clone()),
            CellRenderer::Custom(f) => CellRenderer::Custom(f.clone()),
        }
    }
}

/// Column definition for the data table
pub struct Column<R> {
    /// Row field this column reads (also used by search)
    pub key: &'static str,
    /// Column header label
    pub label: String,
    pub width: ColumnWidth,
    pub align: Align,
    /// Truncate instead of wrapping
    pub no_wrap: bool,
    renderer: CellRenderer<R>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label.clone(),
            width: self.width,
            align: self.align,
            no_wrap: self.no_wrap,
            renderer: self.renderer.clone(),
        }
    }
}

impl<R: TableRow> Column<R> {
    /// Create a plain column
    pub fn new(key: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            width: ColumnWidth::default(),
            align: Align::default(),
            no_wrap: false,
            renderer: CellRenderer::Plain,
        }
    }

    /// Show text derived from the row instead of the raw field
    pub fn accessor(mut self, f: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.renderer = CellRenderer::Accessor(Arc::new(f));
        self
    }

    /// Render the cell with a custom function
    pub fn render(mut self, f: impl Fn(&FieldValue, &R) -> Cell + Send + Sync + 'static) -> Self {
        self.renderer = CellRenderer::Custom(Arc::new(f));
        self
    }

    /// Set fixed width
    pub fn fixed_width(mut self, width: f32) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn no_wrap(mut self) -> Self {
        self.no_wrap = true;
        self
    }

    pub fn renderer(&self) -> &CellRenderer<R> {
        &self.renderer
    }

    /// Resolve the cell for `row`
    pub fn resolve(&self, row: &R) -> Cell {
        match &self.renderer {
            CellRenderer::Plain => Cell::text(row.field(self.key).to_text()),
            CellRenderer::Accessor(f) => Cell::text(f(row)),
            CellRenderer::Custom(f) => f(&row.field(self.key), row),
        }
    }
}
