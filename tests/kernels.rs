mod common;

use common::synthetic_image::{checkerboard, noise, vertical_edge};
use sobel_bench::image_arithmetic::{ArithmeticImage, GrayImage};
use sobel_bench::sobel::sobel;
use sobel_bench::{EdgeKernel, ReferenceKernel, ThreadedKernel};

#[test]
fn random_images_agree_across_kernels() {
    let threaded = ThreadedKernel::new(4).unwrap();
    for (seed, (w, h)) in [(3, 3), (4, 4), (17, 5), (128, 96), (301, 7)].into_iter().enumerate() {
        let gray = noise(w, h, seed as u64);
        let reference = ReferenceKernel.run(&gray).unwrap();
        let accelerated = threaded.run(&gray).unwrap();
        let difference = reference.magnitude.max_abs_difference(&accelerated.magnitude);
        assert!(difference <= 1.0, "{w}x{h}: kernels differ by {difference}");
        assert!(reference.magnitude.border_is_zero());
        assert!(accelerated.magnitude.border_is_zero());
    }
}

#[test]
fn interior_magnitudes_are_non_negative_and_bounded() {
    let gray = noise(64, 64, 99);
    let magnitude = sobel(&gray);
    // |Gx|, |Gy| <= 1020, so the magnitude stays below 1020 * sqrt(2).
    let bound = 1020.0 * std::f32::consts::SQRT_2;
    assert!(magnitude.as_raw().iter().all(|&v| (0.0..=bound).contains(&v)));
}

#[test]
fn wide_vertical_edge() {
    let magnitude = sobel(&vertical_edge(40, 20));
    for y in 1..19 {
        assert_eq!(magnitude.get_pixel(19, y).0[0], 1020.0);
        assert_eq!(magnitude.get_pixel(20, y).0[0], 1020.0);
        assert_eq!(magnitude.get_pixel(10, y).0[0], 0.0);
        assert_eq!(magnitude.get_pixel(30, y).0[0], 0.0);
    }
}

#[test]
fn coarse_checkerboard_corners() {
    let gray = checkerboard(8, 8, 4);
    let magnitude = sobel(&gray);
    // Inside a 4x4 cell, away from the cell boundary, nothing changes.
    assert_eq!(magnitude.get_pixel(1, 1).0[0], 0.0);
    assert_eq!(magnitude.get_pixel(6, 6).0[0], 0.0);
    // Column 3 sits on the boundary between the first two cells.
    assert!(magnitude.get_pixel(3, 1).0[0] > 0.0);
    assert!(magnitude.border_is_zero());
}

#[test]
fn quantized_output_is_in_range() {
    let magnitude = sobel(&noise(50, 30, 7));
    let quantized: GrayImage = magnitude.quantize();
    assert_eq!(quantized.dimensions(), (50, 30));
    for (m, q) in magnitude.as_raw().iter().zip(quantized.as_raw()) {
        assert_eq!(*q, m.min(255.0) as u8);
    }
}
