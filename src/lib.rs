//! Condense a video into a single animated "gestalt".
//!
//! The source is cut into N² equal time windows laid out on an N×N grid. Rows alternate
//! direction (serpentine), every cell slides by one cell width while it plays, and extra
//! boundary cells peek in from neighbouring rows so the wrap from one row to the next reads
//! as one continuous path through time.
//!
//! - Describe the source with [`SourceMetadata`] (or probe it with [`VideoHandle::open`])
//! - Plan the grid with [`compute_layout`]
//! - Hand the [`LayoutPlan`] to a [`MediaEngine`] through [`render`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Media engine boundary: probing, the engine trait and its `ffmpeg` implementation.
pub mod media;
/// Pure grid planning.
pub mod plan;
/// Composite building and output paths.
pub mod render;

pub use crate::foundation::error::{GestaltError, GestaltResult};

pub use crate::media::engine::{CompositeSpec, LayerSpec, MediaEngine, RecordingEngine};
pub use crate::media::ffmpeg::{FfmpegEngine, is_ffmpeg_on_path};
pub use crate::media::probe::probe_video;
pub use crate::plan::config::{GridConfig, MIN_THUMBS_PER_SIDE, SourceMetadata};
pub use crate::plan::layout::{CellKind, CellPlan, CellSource, LayoutPlan, compute_layout};
pub use crate::plan::motion::{Direction, Motion, position_at};
pub use crate::plan::policy::{
    ClampEvent, GridSize, SizingPolicy, SizingPolicyKind, ThumbSizeFirst, WidthFirst,
};
pub use crate::render::builder::{RenderOptions, RenderResult, VideoHandle, generate, render};
pub use crate::render::output::{
    GifOptions, OutputFormat, default_output_path, resolve_output_path,
};
