//! Image-to-case conversion.
//!
//! Decodes an image (PNG/JPEG/BMP/GIF), resizes it to the requested size,
//! converts to grayscale and normalizes every pixel to [0, 1], producing the
//! input half of a case-file line.

use std::fmt::Write;
use std::path::Path;

use image::GenericImageView;
use log::debug;

use crate::error::{NetworkError, Result};

/// Reads the image at `path` and returns `width * height` row-major
/// intensities, each `pixel / 255.0`.
pub fn image_to_intensities<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| NetworkError::from(e).in_file(path))?;
    debug!("{}: {}x{} -> {width}x{height}", path.display(), img.width(), img.height());
    Ok(to_intensities(img, width, height))
}

/// Same as [`image_to_intensities`] for an image already in memory.
pub fn image_bytes_to_intensities(bytes: &[u8], width: u32, height: u32) -> Result<Vec<f64>> {
    let img = image::load_from_memory(bytes)?;
    Ok(to_intensities(img, width, height))
}

fn to_intensities(img: image::DynamicImage, width: u32, height: u32) -> Vec<f64> {
    let resized = if img.dimensions() == (width, height) {
        img
    } else {
        img.resize_exact(width, height, image::imageops::FilterType::Lanczos3)
    };
    let gray = resized.to_luma8();
    gray.pixels().map(|p| p.0[0] as f64 / 255.0).collect()
}

/// One case-file line: inputs then expected outputs, space-separated.
pub fn case_line(inputs: &[f64], expected: &[f64]) -> String {
    let mut line = String::new();
    for (i, v) in inputs.iter().chain(expected.iter()).enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{v}");
    }
    line
}
