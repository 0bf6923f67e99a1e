//! Composer error type.

/// Error returned when the grid composer is called with parameters it cannot lay out.
///
/// An empty image list is not an error; `compose` returns `Ok(None)` for it.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComposeError {
    /// A layout parameter is outside its valid range (e.g. `images_per_row == 0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Canvas dimensions do not fit in `u32`.
    #[error("canvas too large: {columns} column(s) x {rows} row(s) of {cell_width}x{cell_height} cells")]
    CanvasTooLarge {
        columns: u32,
        rows: u32,
        cell_width: u32,
        cell_height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let e = ComposeError::InvalidArgument("images_per_row must be >= 1".into());
        assert_eq!(e.to_string(), "invalid argument: images_per_row must be >= 1");
    }

    #[test]
    fn display_canvas_too_large() {
        let e = ComposeError::CanvasTooLarge {
            columns: 4,
            rows: 2,
            cell_width: 10,
            cell_height: 20,
        };
        assert!(e.to_string().contains("4 column(s) x 2 row(s)"));
    }
}
