//! Sobel gradient magnitude on 8-bit grayscale buffers.
//!
//! Gx and Gy are accumulated as integers from the 3×3 masks in
//! [`SOBEL_KERNEL_X`] and [`SOBEL_KERNEL_Y`]; only the final
//! `sqrt(gx² + gy²)` is computed in `f32`.
//!
//! The one-pixel border is never convolved and stays exactly zero.

use crate::error::{Error, Result};
use crate::image_arithmetic::{GrayImage, MagnitudeImage, SOBEL_KERNEL_X, SOBEL_KERNEL_Y};

/// Integer (Gx, Gy) at an interior pixel.
///
/// `x` and `y` must be at least one pixel away from every edge.
#[inline(always)]
pub fn gradient_at(gray: &[u8], width: usize, x: usize, y: usize) -> (i32, i32) {
    let mut gx = 0;
    let mut gy = 0;
    for ky in 0..3 {
        let row = &gray[(y + ky - 1) * width + x - 1..][..3];
        for kx in 0..3 {
            let v = row[kx] as i32;
            gx += SOBEL_KERNEL_X[ky][kx] * v;
            gy += SOBEL_KERNEL_Y[ky][kx] * v;
        }
    }
    return (gx, gy);
}

/// Fills the interior of output row `y`. Border columns are left untouched.
#[inline]
pub fn sobel_row(gray: &[u8], width: usize, y: usize, out_row: &mut [f32]) {
    for x in 1..width.saturating_sub(1) {
        let (gx, gy) = gradient_at(gray, width, x, y);
        out_row[x] = ((gx * gx + gy * gy) as f32).sqrt();
    }
}

fn check_lengths(gray: &[u8], width: usize, height: usize, out: &[f32]) -> Result<()> {
    let expected = width * height;
    if gray.len() != expected {
        return Err(Error::SizeMismatch { expected, actual: gray.len() });
    }
    if out.len() != expected {
        return Err(Error::SizeMismatch { expected, actual: out.len() });
    }
    return Ok(());
}

/// Computes the magnitude of every interior pixel of a `width`×`height` image into `out`.
///
/// `out` is zeroed first, so the border ends up exactly `0.0`.
pub fn sobel_into(gray: &[u8], width: usize, height: usize, out: &mut [f32]) -> Result<()> {
    check_lengths(gray, width, height, out)?;
    sobel_rows(gray, width, height, out);
    return Ok(());
}

/// Sequential body shared by [`sobel_into`] and [`sobel`]. Lengths must already agree.
fn sobel_rows(gray: &[u8], width: usize, height: usize, out: &mut [f32]) {
    out.fill(0.0);
    if width < 3 || height < 3 {
        return;
    }
    for (y, out_row) in out.chunks_exact_mut(width).enumerate().take(height - 1).skip(1) {
        sobel_row(gray, width, y, out_row);
    }
}

/// Row-parallel variant of [`sobel_into`]. Each output row is written by one worker.
///
/// Runs on the current rayon pool.
pub fn sobel_into_par(gray: &[u8], width: usize, height: usize, out: &mut [f32]) -> Result<()> {
    use rayon::prelude::*;

    check_lengths(gray, width, height, out)?;
    if width < 3 || height < 3 {
        out.fill(0.0);
        return Ok(());
    }
    out.par_chunks_exact_mut(width).enumerate().for_each(|(y, out_row)| {
        out_row.fill(0.0);
        if y > 0 && y < height - 1 {
            sobel_row(gray, width, y, out_row);
        }
    });
    return Ok(());
}

/// Allocating convenience wrapper around [`sobel_into`]. Both buffers share `gray`'s dimensions.
pub fn sobel(gray: &GrayImage) -> MagnitudeImage {
    let (w, h) = gray.dimensions();
    let mut magnitude = MagnitudeImage::new(w, h);
    sobel_rows(gray.as_raw(), w as usize, h as usize, &mut magnitude);
    return magnitude;
}
