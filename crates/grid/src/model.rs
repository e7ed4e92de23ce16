//! Grid model: track axes, row growth, row gap, and cell placements.

use crate::template::{TemplateParseError, parse_track_size, parse_track_template};
use crate::types::{CellRegion, TrackSize};

/// The column axis carries no gap on the public surface; the axis-generic
/// passes still take a gap so both axes run the same code.
pub(crate) const COLUMN_GAP: i32 = 0;

/// A registered cell with the region it occupies.
#[derive(Debug, Clone)]
pub struct Placement<C> {
    /// Host handle for the placed child.
    pub content: C,
    /// Grid region the child occupies.
    pub region: CellRegion,
}

/// Error raised when a placement cannot be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The column range falls outside the declared column count.
    ColumnOutOfBounds {
        /// First column of the rejected region.
        col: usize,
        /// Column span of the rejected region.
        col_span: usize,
        /// Number of declared columns.
        column_count: usize,
    },
    /// A row or column span below one.
    EmptySpan {
        /// Row span of the rejected region.
        row_span: usize,
        /// Column span of the rejected region.
        col_span: usize,
    },
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnOutOfBounds {
                col,
                col_span,
                column_count,
            } => write!(
                formatter,
                "columns {col}..{} exceed the {column_count} declared columns",
                col + col_span
            ),
            Self::EmptySpan { row_span, col_span } => write!(
                formatter,
                "spans must be at least 1 (got {row_span}x{col_span})"
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Errors surfaced by grid reconfiguration calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A track template failed to parse.
    Template(TemplateParseError),
    /// An existing placement would fall outside the new column axis.
    Placement(PlacementError),
}

impl From<TemplateParseError> for GridError {
    fn from(error: TemplateParseError) -> Self {
        Self::Template(error)
    }
}

impl From<PlacementError> for GridError {
    fn from(error: PlacementError) -> Self {
        Self::Placement(error)
    }
}

impl std::fmt::Display for GridError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template(error) => write!(formatter, "{error}"),
            Self::Placement(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Two-dimensional track-based layout model.
///
/// Columns are fixed once their template is set; rows grow on demand as
/// placements reference them, with [`TrackSize::Fit`] as the default kind,
/// and shrink back to the declared rows when placements are removed. The
/// model owns no child state: each pass re-reads content sizes and
/// visibility through [`crate::CellContent`].
#[derive(Debug, Clone)]
pub struct GridLayout<C> {
    columns: Vec<TrackSize>,
    rows: Vec<TrackSize>,
    /// Rows declared through a template or per-row sizing; the row list
    /// never shrinks below this count.
    declared_rows: usize,
    row_gap: i32,
    placements: Vec<Placement<C>>,
}

// Manual impl: a derived `Default` would needlessly require `C: Default`.
impl<C> Default for GridLayout<C> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            declared_rows: 0,
            row_gap: 0,
            placements: Vec::new(),
        }
    }
}

impl<C> GridLayout<C> {
    /// Create a grid from a column template. Rows start empty and grow as
    /// placements reference them.
    ///
    /// # Errors
    /// Returns a [`TemplateParseError`] for a malformed column template.
    pub fn new(columns: &str) -> Result<Self, TemplateParseError> {
        Ok(Self {
            columns: parse_track_template(columns)?,
            rows: Vec::new(),
            declared_rows: 0,
            row_gap: 0,
            placements: Vec::new(),
        })
    }

    /// Create a grid from explicit column and row templates.
    ///
    /// # Errors
    /// Returns a [`TemplateParseError`] for a malformed template on either
    /// axis.
    pub fn with_rows(columns: &str, rows: &str) -> Result<Self, TemplateParseError> {
        let mut grid = Self::new(columns)?;
        grid.rows = parse_track_template(rows)?;
        grid.declared_rows = grid.rows.len();
        Ok(grid)
    }

    /// Number of declared columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Current number of rows (declared plus auto-grown).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column track list.
    pub fn columns(&self) -> &[TrackSize] {
        &self.columns
    }

    /// Row track list.
    pub fn rows(&self) -> &[TrackSize] {
        &self.rows
    }

    /// Gap inserted between consecutive occupied rows.
    pub fn row_gap(&self) -> i32 {
        self.row_gap
    }

    /// Set the gap between consecutive occupied rows. Negative values clamp
    /// to zero.
    pub fn set_row_gap(&mut self, gap: i32) {
        self.row_gap = gap.max(0);
    }

    /// Registered placements.
    pub fn placements(&self) -> &[Placement<C>] {
        &self.placements
    }

    /// Replace the column axis with a new template.
    ///
    /// Every existing placement is re-validated against the new column
    /// count first; if any would overrun, the call is rejected and the
    /// model is left unchanged.
    ///
    /// # Errors
    /// Returns [`GridError::Template`] for a malformed template and
    /// [`GridError::Placement`] when an existing placement would fall
    /// outside the new axis.
    pub fn set_columns(&mut self, template: &str) -> Result<(), GridError> {
        let columns = parse_track_template(template)?;
        for placement in &self.placements {
            validate_region(placement.region, columns.len())?;
        }
        self.columns = columns;
        Ok(())
    }

    /// Override the sizing rule of one row with a single-track template,
    /// growing the row list with [`TrackSize::Fit`] defaults as needed.
    ///
    /// # Errors
    /// Returns a [`TemplateParseError`] when the template is not exactly one
    /// track token.
    pub fn set_row_sizing(&mut self, row: usize, template: &str) -> Result<(), TemplateParseError> {
        let track = parse_track_size(template)?;
        if self.rows.len() <= row {
            self.rows.resize(row + 1, TrackSize::Fit);
        }
        self.rows[row] = track;
        self.declared_rows = self.declared_rows.max(row + 1);
        Ok(())
    }

    /// Register a cell in the given region.
    ///
    /// Rows grow to cover the region; the column range must fit the
    /// declared columns. On failure nothing is registered.
    ///
    /// # Errors
    /// Returns a [`PlacementError`] for a column overrun or a span below
    /// one.
    pub fn place(&mut self, content: C, region: CellRegion) -> Result<(), PlacementError> {
        validate_region(region, self.columns.len())?;
        if self.rows.len() < region.row_end() {
            self.rows.resize(region.row_end(), TrackSize::Fit);
        }
        self.placements.push(Placement { content, region });
        Ok(())
    }
}

impl<C: PartialEq> GridLayout<C> {
    /// Remove every placement of the given cell and shrink auto-grown rows
    /// no longer referenced by any placement.
    pub fn remove(&mut self, content: &C) {
        self.placements
            .retain(|placement| placement.content != *content);
        let referenced = self
            .placements
            .iter()
            .map(|placement| placement.region.row_end())
            .max()
            .unwrap_or(0);
        self.rows.truncate(self.declared_rows.max(referenced));
    }
}

/// Validate a region against the declared column count.
fn validate_region(region: CellRegion, column_count: usize) -> Result<(), PlacementError> {
    if region.row_span < 1 || region.col_span < 1 {
        return Err(PlacementError::EmptySpan {
            row_span: region.row_span,
            col_span: region.col_span,
        });
    }
    if region.col_end() > column_count {
        return Err(PlacementError::ColumnOutOfBounds {
            col: region.col,
            col_span: region.col_span,
            column_count,
        });
    }
    Ok(())
}
