//! Harvested answer capture files

mod capture;

pub use capture::{HarvestCapture, HarvestError};
