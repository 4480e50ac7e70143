//! ArchVision terminal UI
//!
//! Screen renderers, the drafting-table palette and the live generation
//! spinner.

pub mod render;
pub mod spinner;
pub mod style;
