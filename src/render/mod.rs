//! Composite building: map a [`LayoutPlan`](crate::plan::layout::LayoutPlan) onto a
//! [`MediaEngine`](crate::media::engine::MediaEngine).

/// Plan-to-engine translation and the end-to-end entry point.
pub mod builder;
/// Output formats and output-path policy.
pub mod output;
