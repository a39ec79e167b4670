//! Application configuration.
//!
//! Environment-derived settings plus the fixed workshop constants
//! (code lengths, page sizes).

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
