//! Mask Extractor — freezes the surface into an exportable artifact.
//!
//! A [`MaskArtifact`] is a value: once produced it holds its own PNG bytes
//! and pixel copy with no back-reference to the live surface, so later
//! strokes or resets never change an already-extracted mask.

use image::RgbaImage;

use crate::surface::Surface;

/// An immutable encoded snapshot of the surface at extraction time.
pub struct MaskArtifact {
    width: u32,
    height: u32,
    png: Vec<u8>,
    pixels: RgbaImage,
}

impl MaskArtifact {
    /// Snapshot the surface as it is right now.  Extracting a blank surface
    /// (or a composited image with no strokes) is valid and yields the base
    /// content as-is; a degenerate zero-area surface yields an empty
    /// artifact.
    pub fn extract(surface: &Surface) -> Result<Self, image::ImageError> {
        let png = surface.snapshot_encoded()?;
        Ok(Self {
            width: surface.width(),
            height: surface.height(),
            png,
            pixels: surface.pixels().clone(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The PNG encoding written verbatim on save.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Decoded pixel copy, used for the result-gallery thumbnail.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BACKGROUND_COLOR, BRUSH_COLOR};

    #[test]
    fn extraction_is_immutable_under_later_strokes() {
        // Strokes made after extraction do not affect the artifact
        let mut surface = Surface::new(64, 64);
        surface.stroke_segment((10.0, 10.0), (30.0, 10.0), 6);
        let first = MaskArtifact::extract(&surface).unwrap();

        surface.stroke_segment((10.0, 40.0), (50.0, 40.0), 12);
        let second = MaskArtifact::extract(&surface).unwrap();

        assert_ne!(first.png_bytes(), second.png_bytes());

        let decoded = image::load_from_memory(first.png_bytes())
            .unwrap()
            .to_rgba8();
        // The later stroke is absent from the first artifact
        assert_eq!(*decoded.get_pixel(30, 40), BACKGROUND_COLOR);
        assert_eq!(*decoded.get_pixel(20, 10), BRUSH_COLOR);
        // ...and present in the second
        assert_eq!(*second.pixels().get_pixel(30, 40), BRUSH_COLOR);
    }

    #[test]
    fn blank_extraction_is_valid_and_all_black() {
        let surface = Surface::new(16, 16);
        let artifact = MaskArtifact::extract(&surface).unwrap();
        assert_eq!((artifact.width(), artifact.height()), (16, 16));
        let decoded = image::load_from_memory(artifact.png_bytes())
            .unwrap()
            .to_rgba8();
        assert!(decoded.pixels().all(|p| *p == BACKGROUND_COLOR));
    }

    #[test]
    fn degenerate_surface_yields_empty_artifact() {
        let surface = Surface::new(0, 0);
        let artifact = MaskArtifact::extract(&surface).unwrap();
        assert_eq!((artifact.width(), artifact.height()), (0, 0));
        assert!(artifact.png_bytes().is_empty());
    }
}
