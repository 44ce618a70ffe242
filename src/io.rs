//! File handling — native dialogs, image decode, PNG encode, mask save.

use std::fmt;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ImageEncoder, ImageError, RgbaImage};
use rfd::FileDialog;

/// Default file name offered when saving the mask.
pub const MASK_FILE_NAME: &str = "mask_image.png";

/// Why an uploaded file could not be turned into a bitmap.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read at all.
    Io(String),
    /// The bytes were read but are not a supported image.
    Decode(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "could not read file: {}", msg),
            LoadError::Decode(msg) => write!(f, "unsupported image: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Show a native file dialog to pick an image to upload.  `None` when the
/// user cancels — the caller treats that as a no-op.
pub fn pick_image() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp"])
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Decode raw image bytes into an RGBA bitmap.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    match image::load_from_memory(bytes) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(ImageError::IoError(e)) => Err(LoadError::Io(e.to_string())),
        Err(e) => Err(LoadError::Decode(e.to_string())),
    }
}

/// Read and decode an image file.  Runs on a background thread so the UI
/// keeps processing pointer and resize events while the decode is pending.
pub fn load_image(path: &Path) -> Result<RgbaImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::Io(e.to_string()))?;
    decode_image(&bytes)
}

/// Show a native save dialog (default name `mask_image.png`) and write the
/// artifact's PNG bytes verbatim.  `Ok(None)` when the user cancels.
pub fn save_mask(png: &[u8]) -> Result<Option<PathBuf>, String> {
    let Some(path) = FileDialog::new()
        .set_file_name(MASK_FILE_NAME)
        .add_filter("PNG Image", &["png"])
        .save_file()
    else {
        return Ok(None);
    };
    std::fs::write(&path, png).map_err(|e| e.to_string())?;
    Ok(Some(path))
}

/// Lossless PNG encoding of an RGBA bitmap into memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn garbage_bytes_fail_with_a_decode_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn encoded_png_decodes_back() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        let png = encode_png(&img).unwrap();
        let back = decode_image(&png).unwrap();
        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(*back.get_pixel(2, 1), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn load_error_messages_name_the_cause() {
        let err = decode_image(&[0u8; 4]).unwrap_err();
        assert!(err.to_string().starts_with("unsupported image"));
    }
}
