//! Measurement sources: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for reporting the size of
//! the tracked window. They MUST NOT resolve breakpoints or touch element classes;
//! that belongs to ViewportTracker and the sinks.

mod dry_run;
mod sway;
mod r#trait;
mod xdotool;

pub use self::dry_run::DryRunSource;
pub use self::r#trait::{create_measurement_source, MeasurementSource};
