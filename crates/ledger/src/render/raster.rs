#![forbid(unsafe_code)]

use crate::render::HeadlessError;
use ledger_render::color::Rgb;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill behind the drawing; `None` keeps the SVG's own background.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    // System fonts vary; pin the family so output stays close across machines.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // Every scene carries a `0 0 w h` viewBox, so the tree size is the drawing size.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background.and_then(parse_color) {
        pixmap.fill(color);
    }

    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap)
}

fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    match text.trim().to_ascii_lowercase().as_str() {
        "transparent" => Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => Some(tiny_skia::Color::WHITE),
        "black" => Some(tiny_skia::Color::BLACK),
        other => Rgb::parse_hex(other).map(|c| tiny_skia::Color::from_rgba8(c.r, c.g, c.b, 255)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SQUARE, &RasterOptions::default()).expect("png");
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn scale_multiplies_the_pixel_size() {
        let bytes = svg_to_png(
            SQUARE,
            &RasterOptions {
                scale: 2.0,
                ..RasterOptions::default()
            },
        )
        .expect("png");
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let reader = decoder.read_info().expect("png header");
        assert_eq!((reader.info().width, reader.info().height), (20, 20));
    }

    #[test]
    fn invalid_svg_is_reported() {
        assert!(matches!(
            svg_to_png("<svg", &RasterOptions::default()),
            Err(RasterError::SvgParse)
        ));
    }

    #[test]
    fn named_and_hex_backgrounds_parse() {
        assert!(parse_color("white").is_some());
        assert!(parse_color("#10b981").is_some());
        assert!(parse_color("not-a-colour").is_none());
    }
}
