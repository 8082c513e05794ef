//! Single-line text rasterization.
//!
//! Glyphs are laid out left to right with kerning and drawn as coverage into
//! an RGBA surface tinted with the requested color. The outlined variant
//! dilates the coverage mask to build a black outline and composites the fill
//! over it.

use std::path::Path;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage, imageops};

use super::{Color, ImageError};

/// Outline color used by [`outline_surface`].
pub const OUTLINE_COLOR: Color = Rgba([0, 0, 0, 255]);

/// Rasterize `message` with the TrueType font at `font_path`.
///
/// The font file is read on every call; callers cache the resulting texture.
pub fn rasterize(
    font_path: &Path,
    message: &str,
    size: f32,
    color: Color,
) -> Result<RgbaImage, ImageError> {
    let data = std::fs::read(font_path).map_err(|e| ImageError::FontOpen {
        path: font_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    rasterize_bytes(&data, font_path, message, size, color)
}

/// Same as [`rasterize`] over font bytes already in memory.
pub fn rasterize_bytes(
    data: &[u8],
    font_path: &Path,
    message: &str,
    size: f32,
    color: Color,
) -> Result<RgbaImage, ImageError> {
    let font = FontRef::try_from_slice(data).map_err(|e| ImageError::FontOpen {
        path: font_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if size <= 0.0 {
        return Err(ImageError::TextureCreation(format!(
            "font size {} is not positive",
            size
        )));
    }
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);

    let mut width = 0.0f32;
    let mut prev = None;
    for ch in message.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    let img_width = width.ceil().max(1.0) as u32;
    let img_height = scaled.height().ceil().max(1.0) as u32;

    let mut surface = RgbaImage::new(img_width, img_height);
    let mut cursor_x = 0.0f32;
    prev = None;
    for ch in message.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, ab_glyph::point(cursor_x, scaled.ascent()));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let px = bounds.min.x as i32 + x as i32;
                let py = bounds.min.y as i32 + y as i32;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px < img_width && py < img_height {
                    let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32) as u8;
                    let pixel = surface.get_pixel_mut(px, py);
                    let alpha = pixel[3].max(alpha);
                    *pixel = Rgba([color[0], color[1], color[2], alpha]);
                }
            });
        }
        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }
    Ok(surface)
}

/// Build an outlined version of a rasterized `fill` surface.
///
/// The result is `thickness` pixels larger on every side. The outline is the
/// fill's alpha mask dilated by `thickness`, drawn in [`OUTLINE_COLOR`]; the
/// fill is composited on top, offset by `thickness` so it sits centered.
///
/// The offset follows the thickness: 1 pixel for a 1 pixel outline, 2 for 2,
/// so the ring is equally wide on every side of the glyphs.
pub fn outline_surface(fill: &RgbaImage, thickness: u32) -> RgbaImage {
    let t = thickness as i64;
    let (w, h) = fill.dimensions();
    let out_w = w + 2 * thickness;
    let out_h = h + 2 * thickness;
    let mut out = RgbaImage::new(out_w, out_h);

    for oy in 0..out_h as i64 {
        for ox in 0..out_w as i64 {
            let mut alpha = 0u8;
            for ny in (oy - 2 * t)..=oy {
                if ny < 0 || ny >= h as i64 {
                    continue;
                }
                for nx in (ox - 2 * t)..=ox {
                    if nx < 0 || nx >= w as i64 {
                        continue;
                    }
                    alpha = alpha.max(fill.get_pixel(nx as u32, ny as u32)[3]);
                }
            }
            if alpha > 0 {
                out.put_pixel(
                    ox as u32,
                    oy as u32,
                    Rgba([OUTLINE_COLOR[0], OUTLINE_COLOR[1], OUTLINE_COLOR[2], alpha]),
                );
            }
        }
    }

    imageops::overlay(&mut out, fill, t, t);
    out
}
