use image::{ImageBuffer, Luma};

/// Single-channel 8-bit luminance, row-major with stride equal to the width.
pub type GrayImage = ImageBuffer<Luma<u8>, Vec<u8>>;

/// Per-pixel gradient magnitudes, same layout as [`GrayImage`].
pub type MagnitudeImage = ImageBuffer<Luma<f32>, Vec<f32>>;

pub type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Luma weights for red, green and blue.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];
