//! Runs both kernels over every PNG of a directory and writes their outputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, error, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::config::BatchConfig;
use crate::edge_kernels::EdgeKernel;
use crate::error::{Error, Result};
use crate::image_arithmetic::{self, ArithmeticImage};

/// Timing and parity of one processed image.
#[derive(Debug, Clone)]
pub struct ImageReport {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub cpu: Duration,
    pub accelerated: Duration,
    pub max_difference: f32,
    pub within_tolerance: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub reports: Vec<ImageReport>,
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        return self.reports.len();
    }

    pub fn parity_violations(&self) -> usize {
        return self.reports.iter().filter(|r| !r.within_tolerance).count();
    }

    pub fn total_cpu(&self) -> Duration {
        return self.reports.iter().map(|r| r.cpu).sum();
    }

    pub fn total_accelerated(&self) -> Duration {
        return self.reports.iter().map(|r| r.accelerated).sum();
    }
}

fn ms(duration: Duration) -> f64 {
    return duration.as_secs_f64() * 1000.0;
}

/// Lists the `.png` files directly inside `dir`, sorted by name.
///
/// The extension match is case-sensitive.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let input_error = |source| Error::InputDirectory { path: dir.to_path_buf(), source };
    let mut images = vec![];
    for entry in fs::read_dir(dir).map_err(input_error)? {
        let path = entry.map_err(input_error)?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "png") {
            images.push(path);
        }
    }
    images.sort();
    return Ok(images);
}

pub struct BatchDriver<C: EdgeKernel, A: EdgeKernel> {
    config: BatchConfig,
    cpu: C,
    accelerated: A,
}

impl<C: EdgeKernel, A: EdgeKernel> BatchDriver<C, A> {
    pub fn new(config: BatchConfig, cpu: C, accelerated: A) -> Self {
        return Self { config, cpu, accelerated };
    }

    pub fn config(&self) -> &BatchConfig {
        return &self.config;
    }

    /// Processes the whole input directory.
    ///
    /// Only directory problems abort the batch. Every per-image failure is
    /// logged and recorded in the summary.
    pub fn run(&self) -> Result<BatchSummary> {
        let output_dir = &self.config.output_dir;
        fs::DirBuilder::new()
            .recursive(true)
            .create(output_dir)
            .map_err(|source| Error::OutputDirectory { path: output_dir.clone(), source })?;

        let images = list_images(&self.config.input_dir)?;
        debug!("found {} images in {}", images.len(), self.config.input_dir.display());

        let outcomes = self.process_all(&images);

        let mut summary = BatchSummary::default();
        for (path, outcome) in images.iter().zip(outcomes) {
            match outcome {
                Ok(report) => summary.reports.push(report),
                Err(err) => summary.failed.push((file_name(path), err.to_string())),
            }
        }
        return Ok(summary);
    }

    fn process_all(&self, images: &[PathBuf]) -> Vec<Result<ImageReport>> {
        if self.config.jobs > 1 {
            match ThreadPoolBuilder::new().num_threads(self.config.jobs).build() {
                Ok(pool) => {
                    return pool.install(|| {
                        images.par_iter().map(|path| self.process_logged(path)).collect()
                    });
                }
                Err(e) => {
                    warn!("cannot start {} jobs, running sequentially: {e}", self.config.jobs)
                }
            }
        }
        return images.iter().map(|path| self.process_logged(path)).collect();
    }

    /// [`Self::process_image`], reporting a failure as soon as it happens.
    fn process_logged(&self, path: &Path) -> Result<ImageReport> {
        let outcome = self.process_image(path);
        if let Err(err) = &outcome {
            let name = file_name(path);
            match err {
                Error::LoadFailure { .. } | Error::InvalidChannelCount(_) => {
                    error!("Failed to load {name}: {err}")
                }
                Error::KernelFailure { kernel, .. } => {
                    error!("{kernel} Sobel failed for {name}: {err}")
                }
                _ => error!("Failed to process {name}: {err}"),
            }
        }
        return outcome;
    }

    /// Runs both kernels on one image and writes `cpu_<name>` and `gpu_<name>`.
    ///
    /// Either both files are written or neither is.
    pub fn process_image(&self, path: &Path) -> Result<ImageReport> {
        let name = file_name(path);
        let gray = image_arithmetic::load_grayscale(path)?;
        let (width, height) = gray.dimensions();
        info!("Loaded {name} ({width}x{height})");

        let cpu_output = self.cpu.run(&gray)?;
        let accelerated_output = self.accelerated.run(&gray)?;

        let max_difference =
            cpu_output.magnitude.max_abs_difference(&accelerated_output.magnitude);
        let within_tolerance = max_difference <= self.config.tolerance;
        if !within_tolerance {
            warn!(
                "{name}: {} output differs from {} by up to {max_difference} (tolerance {})",
                self.accelerated.name(),
                self.cpu.name(),
                self.config.tolerance
            );
        }

        let cpu_path = self.config.output_dir.join(format!("cpu_{name}"));
        let gpu_path = self.config.output_dir.join(format!("gpu_{name}"));
        image_arithmetic::save_grayscale(&cpu_output.magnitude.quantize(), &cpu_path)?;
        if let Err(err) =
            image_arithmetic::save_grayscale(&accelerated_output.magnitude.quantize(), &gpu_path)
        {
            // A skipped image leaves no output behind.
            if let Err(e) = fs::remove_file(&cpu_path) {
                warn!("cannot remove {}: {e}", cpu_path.display());
            }
            return Err(err);
        }

        info!(
            "{name} | CPU: {:.3} ms | GPU kernel: {:.3} ms",
            cpu_output.elapsed_ms(),
            accelerated_output.elapsed_ms()
        );

        return Ok(ImageReport {
            name,
            width,
            height,
            cpu: cpu_output.elapsed,
            accelerated: accelerated_output.elapsed,
            max_difference,
            within_tolerance,
        });
    }
}

fn file_name(path: &Path) -> String {
    return path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
}

/// Logs the end-of-batch summary.
pub fn log_summary(summary: &BatchSummary, output_dir: &Path) {
    let processed = summary.processed();
    if processed > 0 {
        info!(
            "{processed} images | CPU total: {:.3} ms | GPU kernel total: {:.3} ms",
            ms(summary.total_cpu()),
            ms(summary.total_accelerated())
        );
    }
    if !summary.failed.is_empty() {
        warn!("{} images skipped", summary.failed.len());
    }
    if summary.parity_violations() > 0 {
        warn!("{} images exceeded the parity tolerance", summary.parity_violations());
    }
    info!("All images processed! Results are in {}", output_dir.display());
}
