use super::{ArithmeticImage, GrayImage, MagnitudeImage};

/// Clamps a magnitude to the displayable range and truncates it.
pub fn quantize_value(value: f32) -> u8 {
    // NaN survives the clamp and casts to 0.
    return value.clamp(0.0, 255.0) as u8;
}

impl ArithmeticImage for MagnitudeImage {
    fn quantize(&self) -> GrayImage {
        let data = self.as_raw().iter().map(|&v| quantize_value(v)).collect();
        return GrayImage::from_raw(self.width(), self.height(), data)
            .unwrap_or_else(|| GrayImage::new(self.width(), self.height()));
    }

    fn max_abs_difference(&self, other: &Self) -> f32 {
        if self.dimensions() != other.dimensions() {
            return f32::INFINITY;
        }
        return self
            .as_raw()
            .iter()
            .zip(other.as_raw())
            .fold(0.0, |acc: f32, (a, b)| acc.max((a - b).abs()));
    }

    fn border_is_zero(&self) -> bool {
        let (w, h) = self.dimensions();
        return self
            .enumerate_pixels()
            .filter(|(x, y, _)| *x == 0 || *y == 0 || *x == w - 1 || *y == h - 1)
            .all(|(_, _, p)| p.0[0] == 0.0);
    }
}
