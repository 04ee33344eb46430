//! Application-level configuration.
//!
//! - [`Preferences`]: per-pass user preferences, passed explicitly to every
//!   use case instead of living in ambient state.

pub mod preferences;

pub use preferences::Preferences;
