//! Interchangeable venues for running the Sobel kernel.
//!
//! The batch driver is generic over [`EdgeKernel`], so the venue is chosen
//! once when the driver is composed and the kernel itself stays a plain
//! function in [`crate::sobel`].

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::image_arithmetic::{GrayImage, MagnitudeImage};
use crate::sobel;

/// Magnitude buffer plus the time the kernel reports for itself.
#[derive(Debug, Clone)]
pub struct KernelOutput {
    pub magnitude: MagnitudeImage,
    pub elapsed: Duration,
}

impl KernelOutput {
    pub fn elapsed_ms(&self) -> f64 {
        return self.elapsed.as_secs_f64() * 1000.0;
    }
}

pub trait EdgeKernel: Sync {
    fn name(&self) -> &'static str;

    /// Grayscale bytes and dimensions in, magnitudes and kernel time out.
    fn run(&self, gray: &GrayImage) -> Result<KernelOutput>;
}

/// Single-threaded software kernel.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceKernel;

impl EdgeKernel for ReferenceKernel {
    fn name(&self) -> &'static str {
        return "reference";
    }

    fn run(&self, gray: &GrayImage) -> Result<KernelOutput> {
        let (w, h) = gray.dimensions();
        let mut magnitude = MagnitudeImage::new(w, h);
        let start = Instant::now();
        sobel::sobel_into(gray.as_raw(), w as usize, h as usize, &mut magnitude)?;
        let elapsed = start.elapsed();
        return Ok(KernelOutput { magnitude, elapsed });
    }
}

/// Row-parallel kernel on a dedicated thread pool.
///
/// Stands in for an offloaded accelerator: it reports its own execution time,
/// excluding output allocation, and may fail per image.
pub struct ThreadedKernel {
    pool: ThreadPool,
}

impl ThreadedKernel {
    /// `threads == 0` uses one thread per core.
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("sobel-{i}"))
            .build()
            .map_err(|e| Error::KernelFailure { kernel: "threaded", reason: e.to_string() })?;
        debug!("threaded kernel running on {} threads", pool.current_num_threads());
        return Ok(Self { pool });
    }

    pub fn threads(&self) -> usize {
        return self.pool.current_num_threads();
    }

    /// Runs `work` on the pool and returns how long it took.
    ///
    /// A panic on any worker becomes [`Error::KernelFailure`].
    fn run_guarded<F>(&self, work: F) -> Result<Duration>
    where
        F: FnOnce() -> Result<()> + Send,
    {
        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.pool.install(work)));
        let elapsed = start.elapsed();
        match outcome {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::KernelFailure {
                    kernel: self.name(),
                    reason: "worker panicked".to_string(),
                })
            }
        }
        return Ok(elapsed);
    }
}

impl EdgeKernel for ThreadedKernel {
    fn name(&self) -> &'static str {
        return "threaded";
    }

    fn run(&self, gray: &GrayImage) -> Result<KernelOutput> {
        let (w, h) = gray.dimensions();
        let mut magnitude = MagnitudeImage::new(w, h);
        let elapsed = self.run_guarded(|| {
            sobel::sobel_into_par(gray.as_raw(), w as usize, h as usize, &mut magnitude)
        })?;
        return Ok(KernelOutput { magnitude, elapsed });
    }
}

/// Which implementation serves as the accelerated kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accelerator {
    #[default]
    Threaded,
    Reference,
}

impl std::str::FromStr for Accelerator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "t" | "threaded" | "rayon" => Ok(Self::Threaded),
            "r" | "reference" | "cpu" => Ok(Self::Reference),
            other => Err(Error::InvalidConfig(format!("unknown accelerator '{other}'"))),
        }
    }
}
