use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sobel_bench::image_arithmetic::GrayImage;

/// Left half black, right half white.
pub fn vertical_edge(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| image::Luma([if x < width / 2 { 0 } else { 255 }]))
}

/// Alternating 0/255 cells of the given size.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> GrayImage {
    assert!(cell > 0, "cell size must be positive");
    GrayImage::from_fn(width, height, |x, y| {
        image::Luma([if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 }])
    })
}

pub fn noise(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut rng = SmallRng::seed_from_u64(seed);
    GrayImage::from_fn(width, height, |_, _| image::Luma([rng.gen()]))
}

/// Unique scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("sobel_bench-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
