use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::{
    animation::look::Look,
    foundation::core::{Point, Rect, Rgba8, Viewport},
    foundation::error::CurtainResult,
    grid::cells::{Bit, CellGrid},
};

/// Colors used by the preview renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Surface fill.
    pub background: Rgba8,
    /// Digit `1`.
    pub primary: Rgba8,
    /// Digit `0`.
    pub secondary: Rgba8,
    /// Foreground block and caret.
    pub glow: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::hex(0x0B0E1A),
            primary: Rgba8::hex(0x4F8CFF),
            secondary: Rgba8::hex(0x6B5CFF),
            glow: Rgba8::hex(0xEDEFF6),
        }
    }
}

/// Backdrop digits never draw above this alpha.
pub const BACKDROP_MAX_ALPHA: f64 = 0.4;
/// Height of one foreground text line in CSS pixels.
pub const LINE_HEIGHT: f64 = 48.0;
/// Advance of one foreground glyph in CSS pixels.
pub const GLYPH_ADVANCE: f64 = 24.0;

/// What to draw for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Foreground payload; `None` draws only the backdrop.
    pub look: Option<&'a Look>,
    /// Whether the caret is on for this frame.
    pub cursor_visible: bool,
    /// Binary digits behind the foreground.
    pub grid: Option<&'a CellGrid>,
}

/// Block-level preview of a frame at the viewport's device resolution.
///
/// Digits become small squares and text becomes one block per line; this is a stand-in
/// drawing surface for inspecting timing, not a typesetter.
pub fn rasterize(scene: Scene<'_>, viewport: Viewport, palette: &Palette) -> RgbaImage {
    let (w, h) = viewport.device_size();
    let ratio = viewport.pixel_ratio();
    let bg = palette.background;
    let mut img = RgbaImage::from_pixel(w, h, Rgba([bg.r, bg.g, bg.b, 255]));

    let backdrop = scene.look.map_or(1.0, |l| l.backdrop);
    if let Some(grid) = scene.grid {
        let alpha = backdrop * BACKDROP_MAX_ALPHA;
        let inset = grid.cell_size() * 0.25;
        for cell in grid.cells() {
            let color = match cell.value {
                Bit::One => palette.primary,
                Bit::Zero => palette.secondary,
            };
            let r = Rect::new(
                cell.position.x + inset,
                cell.position.y + inset,
                cell.position.x + grid.cell_size() - inset,
                cell.position.y + grid.cell_size() - inset,
            );
            fill_rect(
                &mut img,
                r.scale_from_origin(ratio),
                color.with_opacity(alpha),
            );
        }
    }

    if let Some(look) = scene.look {
        draw_foreground(&mut img, look, scene.cursor_visible, viewport, palette);
    }
    img
}

fn draw_foreground(
    img: &mut RgbaImage,
    look: &Look,
    cursor_visible: bool,
    viewport: Viewport,
    palette: &Palette,
) {
    let center = viewport.center();
    let transform = look.foreground_transform(center);
    let color = palette.glow.with_opacity(look.opacity);
    let ratio = viewport.pixel_ratio();

    let lines: Vec<&str> = look.text.split('\n').collect();
    let block_h = LINE_HEIGHT * lines.len() as f64;
    let top = center.y - block_h / 2.0;

    let mut caret_at = Point::new(center.x, top);
    for (i, line) in lines.iter().enumerate() {
        let width = GLYPH_ADVANCE * line.chars().count() as f64;
        let y0 = top + LINE_HEIGHT * i as f64;
        let x0 = center.x - width / 2.0;
        if width > 0.0 {
            let r = Rect::new(x0, y0 + 8.0, x0 + width, y0 + LINE_HEIGHT - 8.0);
            fill_rect(
                img,
                transform.transform_rect_bbox(r).scale_from_origin(ratio),
                color,
            );
        }
        caret_at = Point::new(x0 + width, y0);
    }

    if cursor_visible {
        let r = Rect::new(
            caret_at.x + 2.0,
            caret_at.y + 4.0,
            caret_at.x + 4.0,
            caret_at.y + LINE_HEIGHT - 4.0,
        );
        fill_rect(
            img,
            transform.transform_rect_bbox(r).scale_from_origin(ratio),
            palette.primary.with_opacity(look.opacity),
        );
    }
}

fn fill_rect(img: &mut RgbaImage, r: Rect, color: Rgba8) {
    if color.a == 0 {
        return;
    }
    let (w, h) = img.dimensions();
    let clamp = |v: f64, max: u32| v.round().clamp(0.0, f64::from(max)) as u32;
    let (x0, x1) = (clamp(r.x0, w), clamp(r.x1, w));
    let (y0, y1) = (clamp(r.y0, h), clamp(r.y1, h));

    let a = u32::from(color.a);
    let blend =
        |src: u8, dst: u8| ((u32::from(src) * a + u32::from(dst) * (255 - a) + 127) / 255) as u8;
    for y in y0..y1 {
        for x in x0..x1 {
            let px = img.get_pixel_mut(x, y);
            let [r0, g0, b0, _] = px.0;
            *px = Rgba([
                blend(color.r, r0),
                blend(color.g, g0),
                blend(color.b, b0),
                255,
            ]);
        }
    }
}

/// Write `img` as PNG, creating parent directories.
pub fn save_png(img: &RgbaImage, path: &Path) -> CurtainResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    if let Err(e) = img.save_with_format(path, image::ImageFormat::Png) {
        let context = format!("write png '{}'", path.display());
        return Err(anyhow::Error::new(e).context(context).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
