use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{PixrleError, PixrleResult};

/// Reshape a flat pixel sequence into rows of `row_width` pixels.
pub fn to_raster(pixels: &[u8], row_width: u32) -> PixrleResult<image::GrayImage> {
    if row_width == 0 {
        return Err(PixrleError::validation("row width must be > 0"));
    }
    let width = row_width as usize;
    if pixels.len() % width != 0 {
        return Err(PixrleError::validation(format!(
            "{} pixels do not fill rows of width {row_width}",
            pixels.len()
        )));
    }
    let height = u32::try_from(pixels.len() / width)
        .map_err(|_| PixrleError::validation("raster height overflows u32"))?;
    image::GrayImage::from_raw(row_width, height, pixels.to_vec())
        .ok_or_else(|| PixrleError::validation("pixel buffer does not match raster size"))
}

/// Row-major pixel values of a raster.
pub fn from_raster(img: &image::GrayImage) -> Vec<u8> {
    img.as_raw().clone()
}

/// Write a flat pixel sequence as a grayscale PNG.
pub fn save_png(pixels: &[u8], row_width: u32, path: &Path) -> PixrleResult<()> {
    let img = to_raster(pixels, row_width)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        path = %path.display(),
        "wrote raster"
    );
    Ok(())
}

/// Read an image file as 8-bit luma; colour images are converted.
pub fn load_raster(path: &Path) -> PixrleResult<image::GrayImage> {
    let img = image::open(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(img.to_luma8())
}

#[cfg(test)]
#[path = "../tests/unit/raster.rs"]
mod tests;
