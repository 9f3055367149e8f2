use super::GrayImage;

pub trait ArithmeticImage: Sized {
    fn quantize(&self) -> GrayImage;
    fn max_abs_difference(&self, other: &Self) -> f32;
    fn border_is_zero(&self) -> bool;
}
