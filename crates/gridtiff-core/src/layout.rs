//! Grid geometry: canvas size and per-image paste positions.
//!
//! Every cell is `max_width x max_height` (the largest input dimensions), cells
//! are separated and bordered by `padding`, and an incomplete last row is
//! shifted right so it sits centered on the canvas. Images are anchored at the
//! top-left corner of their cell and never scaled.
//!
//! The number of columns is `images_per_row`, except when there are fewer
//! images than that: a set that fits in one partial row gets exactly as many
//! columns as it has images, so a single image yields a 1x1 grid.

use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

/// Layout parameters for one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Maximum number of cells per row. Must be at least 1.
    pub images_per_row: u32,
    /// Whitespace in pixels between cells and around the grid border.
    pub padding: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            images_per_row: 4,
            padding: 80,
        }
    }
}

impl LayoutParams {
    /// Builds validated parameters.
    pub fn new(images_per_row: u32, padding: u32) -> Result<Self, ComposeError> {
        let params = Self {
            images_per_row,
            padding,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ComposeError> {
        if self.images_per_row < 1 {
            return Err(ComposeError::InvalidArgument(format!(
                "images_per_row must be >= 1 (got {})",
                self.images_per_row
            )));
        }
        Ok(())
    }
}

/// Computed geometry for a grid of `count` images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    count: usize,
    columns: u32,
    num_rows: u32,
    max_width: u32,
    max_height: u32,
    padding: u32,
    width: u32,
    height: u32,
}

impl GridLayout {
    /// Plans a grid for images with the given `(width, height)` sizes, in order.
    ///
    /// Returns `Ok(None)` when `sizes` is empty: there is nothing to compose.
    pub fn plan(sizes: &[(u32, u32)], params: LayoutParams) -> Result<Option<Self>, ComposeError> {
        params.validate()?;
        if sizes.is_empty() {
            return Ok(None);
        }

        let max_width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
        let max_height = sizes.iter().map(|&(_, h)| h).max().unwrap_or(0);

        let count = sizes.len() as u64;
        let per_row = u64::from(params.images_per_row);
        let columns = count.min(per_row);
        let num_rows = count.div_ceil(per_row);

        let too_large = || ComposeError::CanvasTooLarge {
            columns: u32::try_from(columns).unwrap_or(u32::MAX),
            rows: u32::try_from(num_rows).unwrap_or(u32::MAX),
            cell_width: max_width,
            cell_height: max_height,
        };
        let width = span(columns, max_width, params.padding).ok_or_else(too_large)?;
        let height = span(num_rows, max_height, params.padding).ok_or_else(too_large)?;
        // columns <= images_per_row, so it always fits.
        let columns = columns as u32;
        let num_rows = u32::try_from(num_rows).map_err(|_| too_large())?;

        Ok(Some(Self {
            count: sizes.len(),
            columns,
            num_rows,
            max_width,
            max_height,
            padding: params.padding,
            width,
            height,
        }))
    }

    /// Number of images placed on the grid.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    /// Cell width: the widest input image.
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Cell height: the tallest input image.
    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of images in the last row: the remainder, or a full row when the
    /// count divides evenly.
    pub fn last_row_count(&self) -> u32 {
        let remainder = (self.count as u64 % u64::from(self.columns)) as u32;
        if remainder == 0 {
            self.columns
        } else {
            remainder
        }
    }

    /// Horizontal shift applied to every image of the last row.
    pub fn last_row_offset(&self) -> u32 {
        let used = u64::from(self.max_width) * u64::from(self.last_row_count())
            + u64::from(self.padding) * (u64::from(self.last_row_count()) + 1);
        (u64::from(self.width).saturating_sub(used) / 2) as u32
    }

    /// Top-left paste position of image `index`, or `None` past the end.
    pub fn placement(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.count {
            return None;
        }
        let index = index as u64;
        let columns = u64::from(self.columns);
        let padding = u64::from(self.padding);
        let row = index / columns;
        let col = index % columns;

        let mut x = col * u64::from(self.max_width) + padding * (col + 1);
        let y = row * u64::from(self.max_height) + padding * (row + 1);
        if row == u64::from(self.num_rows) - 1 {
            x += u64::from(self.last_row_offset());
        }
        // Both lie inside the canvas, whose dimensions fit in u32.
        Some((x as u32, y as u32))
    }

    /// Positions for all images, in input order.
    pub fn placements(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.count).filter_map(|i| self.placement(i))
    }
}

/// `cells * cell + padding * (cells + 1)`, or `None` if it does not fit in `u32`.
fn span(cells: u64, cell: u32, padding: u32) -> Option<u32> {
    let total = cells
        .checked_mul(u64::from(cell))?
        .checked_add(u64::from(padding).checked_mul(cells + 1)?)?;
    u32::try_from(total).ok()
}
