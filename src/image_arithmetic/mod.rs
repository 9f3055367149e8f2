//! Utilities for working with grayscale and magnitude images.

pub mod grayscale;
pub use self::grayscale::*;
pub mod io;
pub use self::io::*;
pub mod traits;
pub use self::traits::*;
pub mod types;
pub use self::types::*;
pub mod utilities;
pub use self::utilities::*;
