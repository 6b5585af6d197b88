pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{EvalConfig, ValidationMode};
pub use error::{NurbsError, Result};
pub use tolerance::Tolerance;
