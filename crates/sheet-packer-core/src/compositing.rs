use crate::error::{Result, SheetPackerError};
use crate::model::SheetLayout;
use image::RgbaImage;
use tracing::instrument;

/// Copy `src` into `canvas` with its top-left corner at (dx, dy).
/// Pixels falling outside the canvas are dropped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..sh {
        let ty = dy as u64 + yy as u64;
        if ty >= ch as u64 {
            break;
        }
        for xx in 0..sw {
            let tx = dx as u64 + xx as u64;
            if tx >= cw as u64 {
                break;
            }
            canvas.put_pixel(tx as u32, ty as u32, *src.get_pixel(xx, yy));
        }
    }
}

#[instrument(skip_all, fields(frames = layout.frames.len()))]
/// Renders the sheet: a transparent canvas of the layout size with each frame's
/// source drawn at its origin.
///
/// `source` is called once per frame with the frame key and must return an image
/// of exactly the frame size.
pub fn compose_sheet<F>(layout: &SheetLayout, mut source: F) -> Result<RgbaImage>
where
    F: FnMut(&str) -> Result<RgbaImage>,
{
    let mut canvas = RgbaImage::new(layout.width, layout.height);
    for f in &layout.frames {
        let img = source(&f.key)?;
        if img.dimensions() != (f.frame.w, f.frame.h) {
            return Err(SheetPackerError::InvalidInput(format!(
                "image '{}' is {}x{} but was laid out as {}x{}",
                f.key,
                img.width(),
                img.height(),
                f.frame.w,
                f.frame.h
            )));
        }
        blit_rgba(&img, &mut canvas, f.frame.x, f.frame.y);
    }
    Ok(canvas)
}
