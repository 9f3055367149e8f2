use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::edge_kernels::Accelerator;
use crate::error::{Error, Result};

/// Where to read images from, where to write results and how to run the kernels.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub accelerator: Accelerator,
    /// Threads of the accelerated kernel, 0 for one per core.
    pub kernel_threads: usize,
    /// Images processed concurrently. 1 keeps the batch sequential.
    pub jobs: usize,
    /// Largest per-pixel difference tolerated between the two kernels.
    pub tolerance: f32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        return Self {
            input_dir: PathBuf::from("images"),
            output_dir: PathBuf::from("outputs"),
            accelerator: Accelerator::default(),
            kernel_threads: 0,
            jobs: 1,
            tolerance: 1.0,
        };
    }
}

impl BatchConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        return Ok(config);
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|source| Error::FailedToReadConfig { path: path.to_path_buf(), source })?;
        return Self::from_toml(&text);
    }

    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(Error::InvalidConfig("jobs cannot be 0".to_string()));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        return Ok(());
    }
}
