//! The media engine: everything that touches decoded pixels lives behind this boundary.
//!
//! We drive the system `ffmpeg`/`ffprobe` binaries rather than linking FFmpeg, so the crate
//! builds without native headers.

/// Layer and composite requests plus the [`MediaEngine`](engine::MediaEngine) trait.
pub mod engine;
/// `ffmpeg`-backed engine.
pub mod ffmpeg;
/// `ffprobe` metadata probing.
pub mod probe;
