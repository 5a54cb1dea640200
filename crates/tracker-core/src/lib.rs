//! Tracker Core Library
//!
//! Domain errors, store traits, input validation and log filtering for the
//! exercise tracker.

// Re-export pure types from tracker-types
pub use tracker_types::*;

pub mod error;
pub mod log;
pub mod ports;
pub mod validation;

pub use error::{Result, TrackerError};
pub use log::LogFilter;
