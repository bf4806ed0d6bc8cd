//! Coordinate arithmetic and compositing for placing a sprite on a fixed canvas.

use crate::domain::model::{CanvasSize, FillColor};
use image::{imageops, DynamicImage, GenericImageView, RgbaImage};

/// Offset that centers the source horizontally and bottom-aligns it.
///
/// Both components are signed: a source larger than the canvas yields a
/// negative offset and is clipped when composited. The horizontal half is
/// floored, so a 10 pixel wide sprite on a 23 pixel canvas starts at x = 6
/// and a 25 pixel wide one at x = -1.
pub fn compute_offset(canvas: CanvasSize, source: (u32, u32)) -> (i64, i64) {
    let dx = i64::from(canvas.width) - i64::from(source.0);
    let dy = i64::from(canvas.height) - i64::from(source.1);
    (dx.div_euclid(2), dy)
}

pub fn blank_canvas(canvas: CanvasSize, fill: FillColor) -> RgbaImage {
    RgbaImage::from_pixel(canvas.width, canvas.height, fill.to_rgba())
}

/// Paste `source` onto a fresh canvas, using its own alpha as the mask.
///
/// Sources without an alpha channel are pasted as fully opaque.
pub fn recanvas(source: &DynamicImage, canvas: CanvasSize, fill: FillColor) -> RgbaImage {
    let (x, y) = compute_offset(canvas, source.dimensions());
    let mut target = blank_canvas(canvas, fill);
    let sprite = source.to_rgba8();
    imageops::overlay(&mut target, &sprite, x, y);

    // 底色不透明，混合後的 alpha 四捨五入可能落在 254
    for pixel in target.pixels_mut() {
        pixel[3] = u8::MAX;
    }
    target
}

pub fn output_file_name(prefix: &str, file_name: &str) -> String {
    format!("{}{}", prefix, file_name)
}

/// Largest width and largest height across `sizes`, taken independently.
pub fn largest_canvas<I>(sizes: I) -> Option<CanvasSize>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    sizes.into_iter().fold(None, |acc, (w, h)| {
        Some(match acc {
            None => CanvasSize::new(w, h),
            Some(c) => CanvasSize::new(c.width.max(w), c.height.max(h)),
        })
    })
}
