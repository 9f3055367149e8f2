//! Sobel edge detection on batches of PNG images, comparing a reference CPU
//! kernel against an accelerated one.

pub mod batch;
pub mod config;
pub mod edge_kernels;
pub mod error;
pub mod image_arithmetic;
pub mod sobel;

pub use batch::{BatchDriver, BatchSummary, ImageReport};
pub use config::BatchConfig;
pub use edge_kernels::{Accelerator, EdgeKernel, KernelOutput, ReferenceKernel, ThreadedKernel};
pub use error::{Error, Result};
