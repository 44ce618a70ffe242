//! Surface Manager — the single mutable pixel buffer every other component
//! draws into.
//!
//! The surface is an opaque-black RGBA buffer sized to the canvas rectangle
//! in device pixels.  Strokes are opaque white with round caps; the base
//! image composited by the [`crate::compositor`] lands underneath them only
//! in the sense that later strokes overwrite it.  Resizing reallocates the
//! buffer and discards all content.

use image::{Rgba, RgbaImage, imageops};

/// Background fill — the mask's "not selected" value.
pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Brush color — the mask's "selected" value.
pub const BRUSH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The paintable/maskable canvas.  Exclusively owned; the paint controller
/// and compositor mutate it only through the operations below.
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Allocate a buffer of the given device-pixel size, fully filled with
    /// the background color.  A zero-area surface is permitted (degenerate
    /// but not an error — see `snapshot_encoded`).
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            pixels: RgbaImage::new(width, height),
        };
        surface.clear();
        surface
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Read-only view of the buffer, for texture upload and snapshotting.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Reallocate for a new container size.  Prior painted or composited
    /// content is discarded and the buffer comes back fully black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
        self.clear();
    }

    /// Refill the entire buffer with the background color, discarding all
    /// strokes and any composited base image.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = BACKGROUND_COLOR;
        }
    }

    /// Draw one round-capped stroke segment in the brush color.
    ///
    /// Dense unit stepping along the segment, stamping a filled circle of
    /// half the brush width at each step — endpoints included, so adjoining
    /// segments meet in round joins.  Coordinates are buffer-space floats
    /// and may lie outside the buffer; writes are clamped to bounds.
    pub fn stroke_segment(&mut self, from: (f32, f32), to: (f32, f32), brush_width: u32) {
        let radius = (brush_width as f32 / 2.0).max(0.5);

        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < 0.1 {
            // Zero-length segment: a single round dab
            self.stamp_round(to.0, to.1, radius);
            return;
        }

        let steps = distance.ceil() as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp_round(from.0 + dx * t, from.1 + dy * t, radius);
        }
    }

    /// Stamp a filled circle of the brush color, clamped to buffer bounds.
    fn stamp_round(&mut self, cx: f32, cy: f32, radius: f32) {
        if self.is_empty() {
            return;
        }
        let min_x = ((cx - radius).floor() as i64).max(0);
        let max_x = ((cx + radius).ceil() as i64).min(self.width() as i64 - 1);
        let min_y = ((cy - radius).floor() as i64).max(0);
        let max_y = ((cy + radius).ceil() as i64).min(self.height() as i64 - 1);

        let r2 = radius * radius;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.pixels.put_pixel(x as u32, y as u32, BRUSH_COLOR);
                }
            }
        }
    }

    /// Blit a pre-scaled base image at the given top-left offset.  Used by
    /// the compositor after it has computed the aspect-preserving fit.
    pub fn blit_base(&mut self, base: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, base, x, y);
    }

    /// Lossless PNG encoding of the current buffer contents.  A degenerate
    /// zero-area surface yields an empty byte vector rather than an encoder
    /// error.
    pub fn snapshot_encoded(&self) -> Result<Vec<u8>, image::ImageError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        crate::io::encode_png(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_all_background(surface: &Surface) {
        assert!(
            surface.pixels().pixels().all(|p| *p == BACKGROUND_COLOR),
            "expected a fully black surface"
        );
    }

    #[test]
    fn new_surface_is_fully_black() {
        let surface = Surface::new(64, 48);
        assert_eq!(surface.width(), 64);
        assert_eq!(surface.height(), 48);
        assert_all_background(&surface);
    }

    #[test]
    fn resize_discards_prior_content() {
        // Resizing always yields a buffer fully filled with background
        let mut surface = Surface::new(100, 100);
        surface.stroke_segment((10.0, 10.0), (90.0, 90.0), 20);
        surface.resize(120, 80);
        assert_eq!(surface.width(), 120);
        assert_eq!(surface.height(), 80);
        assert_all_background(&surface);
    }

    #[test]
    fn clear_removes_strokes() {
        let mut surface = Surface::new(50, 50);
        surface.stroke_segment((0.0, 0.0), (50.0, 50.0), 10);
        surface.clear();
        assert_all_background(&surface);
    }

    #[test]
    fn horizontal_segment_paints_a_band() {
        // 800×600 buffer, segment (100,100)→(200,100),
        // brush width 10 → white band of height ~10 centered at y=100.
        let mut surface = Surface::new(800, 600);
        surface.stroke_segment((100.0, 100.0), (200.0, 100.0), 10);

        assert_eq!(*surface.pixels().get_pixel(150, 100), BRUSH_COLOR);
        assert_eq!(*surface.pixels().get_pixel(150, 96), BRUSH_COLOR);
        assert_eq!(*surface.pixels().get_pixel(150, 104), BRUSH_COLOR);
        // Just outside the band
        assert_eq!(*surface.pixels().get_pixel(150, 106), BACKGROUND_COLOR);
        assert_eq!(*surface.pixels().get_pixel(150, 94), BACKGROUND_COLOR);
        // Beyond the round caps
        assert_eq!(*surface.pixels().get_pixel(90, 100), BACKGROUND_COLOR);
        assert_eq!(*surface.pixels().get_pixel(210, 100), BACKGROUND_COLOR);
        // Far corner untouched
        assert_eq!(*surface.pixels().get_pixel(0, 0), BACKGROUND_COLOR);
    }

    #[test]
    fn strokes_are_clamped_to_bounds() {
        // Wildly out-of-range coordinates never write outside the buffer
        // (an out-of-bounds put_pixel would panic in the image crate).
        let mut surface = Surface::new(50, 50);
        surface.stroke_segment((25.0, 25.0), (500.0, -300.0), 20);
        surface.stroke_segment((-100.0, -100.0), (-50.0, -50.0), 50);
        // The in-bounds part of the first segment was painted
        assert_eq!(*surface.pixels().get_pixel(25, 25), BRUSH_COLOR);
        // The fully off-surface segment painted nothing near the origin edge
        assert_eq!(*surface.pixels().get_pixel(0, 0), BACKGROUND_COLOR);
    }

    #[test]
    fn width_one_brush_paints() {
        let mut surface = Surface::new(20, 20);
        surface.stroke_segment((5.0, 10.0), (15.0, 10.0), 1);
        assert_eq!(*surface.pixels().get_pixel(10, 10), BRUSH_COLOR);
    }

    #[test]
    fn zero_length_segment_stamps_a_dab() {
        let mut surface = Surface::new(40, 40);
        surface.stroke_segment((20.0, 20.0), (20.0, 20.0), 10);
        assert_eq!(*surface.pixels().get_pixel(20, 20), BRUSH_COLOR);
        assert_eq!(*surface.pixels().get_pixel(20, 24), BRUSH_COLOR);
        assert_eq!(*surface.pixels().get_pixel(20, 26), BACKGROUND_COLOR);
    }

    #[test]
    fn snapshot_roundtrips_through_png() {
        let mut surface = Surface::new(8, 8);
        surface.stroke_segment((2.0, 2.0), (2.0, 2.0), 1);
        let png = surface.snapshot_encoded().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(*decoded.get_pixel(2, 2), BRUSH_COLOR);
        assert_eq!(*decoded.get_pixel(0, 0), BACKGROUND_COLOR);
    }

    #[test]
    fn degenerate_surface_snapshot_is_empty_not_an_error() {
        let surface = Surface::new(0, 0);
        let png = surface.snapshot_encoded().unwrap();
        assert!(png.is_empty());
    }
}
