//! Rasterisation SVG -> PNG (resvg / tiny-skia)

use resvg::{tiny_skia, usvg};

use super::{RasterImage, RenderError};

/// Côté du bitmap final (pixels)
pub const RASTER_SIZE: u32 = 300;

/// Rasterise un SVG dans un bitmap 300×300 à fond blanc, mis à l'échelle
pub fn rasterize(svg: &str) -> Result<RasterImage, RenderError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;

    let mut pixmap =
        tiny_skia::Pixmap::new(RASTER_SIZE, RASTER_SIZE).ok_or(RenderError::Pixmap)?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let size = tree.size();
    let scale = (RASTER_SIZE as f32 / size.width()).min(RASTER_SIZE as f32 / size.height());
    let dx = (RASTER_SIZE as f32 - size.width() * scale) / 2.0;
    let dy = (RASTER_SIZE as f32 - size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(dx, dy);

    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // Fond opaque : RGBA prémultiplié == RGBA
    let png = encode_png(&pixmap)?;
    Ok(RasterImage::new(png, pixmap.width(), pixmap.height()))
}

fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, RenderError> {
    let mut png_bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_bytes, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }
    Ok(png_bytes)
}
