use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DEFAULT_GAP, MAX_CELL_SIZE, MIN_CELL_SIZE, consts::WIDTH_BIAS_DIVISOR};

/// Sizing rules for packing week-cells into a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridPlanner {
    /// Gap between neighbouring cells (pixels)
    pub gap:           u32,
    /// Cells never shrink below this edge length (pixels)
    pub min_cell_size: u32,
    /// Cells never grow beyond this edge length (pixels)
    pub max_cell_size: u32,
}

impl Default for GridPlanner {
    fn default() -> Self {
        Self {
            gap:           DEFAULT_GAP,
            min_cell_size: MIN_CELL_SIZE,
            max_cell_size: MAX_CELL_SIZE,
        }
    }
}

/// Columns, rows and cell size of a packed grid. Cells fill row-major.
///
/// Only [`GridPlanner::choose`] builds layouts, so `columns >= 1` and
/// `columns * rows` covers every cell. The serialized form is output only:
///
/// ```compile_fail
/// let layout: life_calendar::GridLayout =
///     serde_json::from_str(r#"{"columns":0,"rows":0,"cellSize":99,"gap":4}"#).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    columns:   usize,
    rows:      usize,
    cell_size: u32,
    gap:       u32,
}

/// Packs `total_weeks` cells using the default cell size bounds.
///
/// A width of `None` or `Some(0)` means the width is unknown and cells get the
/// maximum size.
pub fn choose_grid(total_weeks: usize, container_width: Option<u32>, gap: u32) -> GridLayout {
    GridPlanner { gap, ..GridPlanner::default() }.choose(total_weeks, container_width)
}

impl GridPlanner {
    /// Packs `total_weeks` cells into a grid slightly wider than tall, then
    /// limits the column count so cells fit `container_width` at no less than
    /// the minimum size.
    ///
    /// Zero cells yield a 1×1 grid at the maximum cell size.
    pub fn choose(&self, total_weeks: usize, container_width: Option<u32>) -> GridLayout {
        let min_cell = self.min_cell_size;
        let max_cell = self.max_cell_size.max(min_cell);
        let width = container_width.filter(|w| *w > 0);

        if total_weeks == 0 {
            return GridLayout { columns: 1, rows: 1, cell_size: max_cell, gap: self.gap };
        }

        let ideal = total_weeks.isqrt().max(1);
        let mut columns = (ideal + ideal / WIDTH_BIAS_DIVISOR).max(1);

        if let Some(width) = width {
            columns = columns.min(self.max_columns_that_fit(width));
        }
        let columns = columns.clamp(1, total_weeks);
        let rows = total_weeks.div_ceil(columns);

        let cell_size = width.map_or(max_cell, |width| {
            let gaps = (self.gap as usize).saturating_mul(columns - 1);
            let fitted = (width as usize).saturating_sub(gaps) / columns;
            u32::try_from(fitted).unwrap_or(max_cell).clamp(min_cell, max_cell)
        });

        debug!(total_weeks, ?container_width, columns, rows, cell_size, "chose grid");

        GridLayout { columns, rows, cell_size, gap: self.gap }
    }

    fn max_columns_that_fit(&self, width: u32) -> usize {
        let pitch = self.min_cell_size.saturating_add(self.gap).max(1);
        (width.saturating_add(self.gap) / pitch).max(1) as usize
    }
}

impl GridLayout {
    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Edge length of one cell (pixels)
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Gap between neighbouring cells (pixels)
    pub const fn gap(&self) -> u32 {
        self.gap
    }

    /// Number of slots in the grid, at least the number of cells
    pub const fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// `(column, row)` of the cell at `index`
    pub const fn cell_position(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }

    /// Top-left pixel of the cell at `index`, offset by `margin`.
    /// Indices past the capacity saturate instead of overflowing.
    pub const fn cell_origin(&self, index: usize, margin: u32) -> (usize, usize) {
        let (column, row) = self.cell_position(index);
        let pitch = self.pitch();
        let margin = margin as usize;
        (
            margin.saturating_add(column.saturating_mul(pitch)),
            margin.saturating_add(row.saturating_mul(pitch)),
        )
    }

    /// Pixel width of the cells and gaps, without margins
    pub const fn content_width(&self) -> usize {
        Self::extent(self.columns, self.cell_size, self.gap)
    }

    /// Pixel height of the cells and gaps, without margins
    pub const fn content_height(&self) -> usize {
        Self::extent(self.rows, self.cell_size, self.gap)
    }

    /// Pixel `(width, height)` of the whole canvas with `margin` on every side
    pub const fn canvas_size(&self, margin: u32) -> (usize, usize) {
        let margins = 2 * margin as usize;
        (margins + self.content_width(), margins + self.content_height())
    }

    const fn pitch(&self) -> usize {
        self.cell_size as usize + self.gap as usize
    }

    const fn extent(count: usize, cell_size: u32, gap: u32) -> usize {
        count * cell_size as usize + count.saturating_sub(1) * gap as usize
    }
}
