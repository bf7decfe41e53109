//! Grid planning: turn source metadata into a complete, validated layout.
//!
//! Everything in this module is pure. No files are touched and no processes are spawned, so a
//! plan can be computed, inspected and serialized without `ffmpeg` being installed.

/// Source metadata and tunable grid constants.
pub mod config;
/// Grid size and canvas layout computation.
pub mod layout;
/// Per-cell motion as plain data.
pub mod motion;
/// Swappable canvas sizing strategies.
pub mod policy;
