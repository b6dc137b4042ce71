//! SVG to PNG rasterization.
//!
//! Icons are square 24px viewBoxes, so renders use a uniform scale onto a
//! square surface of the requested size.

use std::io::Cursor;

use super::ExportError;

/// Rasterize SVG text to PNG bytes at `size` x `size` pixels.
pub fn rasterize_svg(svg_text: &str, size: u32) -> Result<Vec<u8>, ExportError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_text, &options).map_err(ExportError::Decode)?;

    let source = tree.size();
    if source.width() <= 0.0 || source.height() <= 0.0 {
        return Err(ExportError::EmptyViewport);
    }

    let mut pixmap =
        tiny_skia::Pixmap::new(size, size).ok_or(ExportError::Surface { size })?;

    let scale_x = size as f32 / source.width();
    let scale_y = size as f32 / source.height();
    let transform = tiny_skia::Transform::from_scale(scale_x, scale_y);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    encode_png(&pixmap, size)
}

/// Encode a rendered surface as PNG. tiny-skia stores premultiplied alpha,
/// which PNG does not use, so each pixel is demultiplied first.
fn encode_png(pixmap: &tiny_skia::Pixmap, size: u32) -> Result<Vec<u8>, ExportError> {
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let px = px.demultiply();
        rgba.extend_from_slice(&[px.red(), px.green(), px.blue(), px.alpha()]);
    }

    let img = image::RgbaImage::from_raw(size, size, rgba)
        .ok_or(ExportError::Surface { size })?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(ExportError::Encode)?;
    Ok(bytes)
}
