use std::path::Path;

use super::{luma_from_interleaved, GrayImage};
use crate::error::{Error, Result};
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageError, ImageFormat};

/// Decodes an image file into its 8-bit interleaved samples and channel count.
fn decode_interleaved(path: &Path) -> Result<(Vec<u8>, u32, u32, u8)> {
    let load_failure = |source| Error::LoadFailure { path: path.to_path_buf(), source };
    let decoded: DynamicImage = ImageReader::open(path)
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(load_failure)?;

    let (width, height) = (decoded.width(), decoded.height());
    let channels = decoded.color().channel_count();
    // Deeper images are reduced to 8 bits per sample, keeping their channels.
    let data = match channels {
        1 => decoded.into_luma8().into_raw(),
        2 => decoded.into_luma_alpha8().into_raw(),
        3 => decoded.into_rgb8().into_raw(),
        _ => decoded.into_rgba8().into_raw(),
    };
    return Ok((data, width, height, channels));
}

/// Loads an image from disk as single-channel luma.
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let (data, width, height, channels) = decode_interleaved(path)?;
    return luma_from_interleaved(&data, width, height, channels);
}

/// Writes a single-channel 8-bit PNG.
pub fn save_grayscale(image: &GrayImage, path: &Path) -> Result<()> {
    return image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::SaveFailure { path: path.to_path_buf(), source });
}
