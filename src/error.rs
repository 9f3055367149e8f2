use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while detecting edges on a batch of images.
#[derive(Debug)]
pub enum Error {
    LoadFailure { path: PathBuf, source: image::ImageError },
    SaveFailure { path: PathBuf, source: image::ImageError },
    KernelFailure { kernel: &'static str, reason: String },
    InvalidChannelCount(u8),
    SizeMismatch { expected: usize, actual: usize },

    OutputDirectory { path: PathBuf, source: io::Error },
    InputDirectory { path: PathBuf, source: io::Error },

    FailedToReadConfig { path: PathBuf, source: io::Error },
    InvalidConfig(String),
}

impl Error {
    /// Whether the whole batch has to stop, as opposed to skipping one image.
    pub fn is_fatal(&self) -> bool {
        return matches!(self, Self::OutputDirectory { .. } | Self::InputDirectory { .. });
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailure { path, source } => {
                write!(f, "failed to load {}: {source}", path.display())
            }
            Self::SaveFailure { path, source } => {
                write!(f, "failed to save {}: {source}", path.display())
            }
            Self::KernelFailure { kernel, reason } => {
                write!(f, "{kernel} kernel failed: {reason}")
            }
            Self::InvalidChannelCount(channels) => {
                write!(f, "unsupported channel count {channels}, expected 1, 3 or 4")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutputDirectory { path, source } => {
                write!(f, "cannot create output directory {}: {source}", path.display())
            }
            Self::InputDirectory { path, source } => {
                write!(f, "cannot read input directory {}: {source}", path.display())
            }
            Self::FailedToReadConfig { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LoadFailure { source, .. } | Self::SaveFailure { source, .. } => Some(source),
            Self::OutputDirectory { source, .. }
            | Self::InputDirectory { source, .. }
            | Self::FailedToReadConfig { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        return Self::InvalidConfig(err.to_string());
    }
}
