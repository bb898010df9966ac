//! Application configuration module
//!
//! Application-wide constants and validation limits.

mod constants;

pub use constants::*;
