//! Image Compositor — fits an uploaded bitmap into the surface as a base
//! layer.
//!
//! The surface is cleared first (existing strokes and any previous base
//! image are discarded), then the bitmap is scaled by the uniform factor
//! `min(surface_w / img_w, surface_h / img_h)` — upscaling or downscaling
//! but never distorting — and drawn centered.  This is the only way a base
//! image enters the surface; there is no layering.

use image::{RgbaImage, imageops};

use crate::surface::Surface;

/// Aspect-preserving centered fit of an `image_w × image_h` bitmap into a
/// `surface_w × surface_h` buffer: `(x, y, draw_w, draw_h)` with the draw
/// size rounded to whole pixels (at least 1×1).  `None` when either rectangle
/// is degenerate.
pub fn fitted_rect(
    surface_w: u32,
    surface_h: u32,
    image_w: u32,
    image_h: u32,
) -> Option<(i64, i64, u32, u32)> {
    if surface_w == 0 || surface_h == 0 || image_w == 0 || image_h == 0 {
        return None;
    }
    let scale = (surface_w as f32 / image_w as f32).min(surface_h as f32 / image_h as f32);
    let draw_w = ((image_w as f32 * scale).round() as u32).max(1);
    let draw_h = ((image_h as f32 * scale).round() as u32).max(1);
    let x = ((surface_w as f32 - draw_w as f32) / 2.0).round() as i64;
    let y = ((surface_h as f32 - draw_h as f32) / 2.0).round() as i64;
    Some((x, y, draw_w, draw_h))
}

/// Clear the surface and draw `base` into it, scaled and centered.  Called
/// only with an already-decoded bitmap, so a failed decode can never leave
/// the surface half-drawn.
pub fn composite_base(surface: &mut Surface, base: &RgbaImage) {
    surface.clear();
    let Some((x, y, draw_w, draw_h)) = fitted_rect(
        surface.width(),
        surface.height(),
        base.width(),
        base.height(),
    ) else {
        return;
    };
    let scaled = imageops::resize(base, draw_w, draw_h, imageops::FilterType::Triangle);
    surface.blit_base(&scaled, x, y);
}
