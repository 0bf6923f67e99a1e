//! Grid composer: pastes decoded images onto a white RGB canvas.
//!
//! Pure computation over in-memory images; no I/O and no state between calls.

use image::{imageops, DynamicImage, Rgb, RgbImage};

use crate::error::ComposeError;
use crate::layout::{GridLayout, LayoutParams};

/// Canvas background.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Composes `images` into a single grid image.
///
/// Returns `Ok(None)` for an empty slice; the caller should skip writing
/// anything in that case. Pixels are copied as-is (alpha is dropped), so the
/// result depends only on the inputs and `params`.
pub fn compose(
    images: &[DynamicImage],
    params: LayoutParams,
) -> Result<Option<RgbImage>, ComposeError> {
    let sizes: Vec<(u32, u32)> = images.iter().map(|img| (img.width(), img.height())).collect();
    let Some(grid) = GridLayout::plan(&sizes, params)? else {
        return Ok(None);
    };

    let (width, height) = grid.canvas_size();
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    for (image, (x, y)) in images.iter().zip(grid.placements()) {
        imageops::replace(&mut canvas, &image.to_rgb8(), i64::from(x), i64::from(y));
    }

    Ok(Some(canvas))
}
