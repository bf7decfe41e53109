use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::foundation::error::GestaltResult;
use crate::media::engine::{CompositeSpec, LayerSpec, MediaEngine};
use crate::media::ffmpeg::FfmpegEngine;
use crate::media::probe::probe_video;
use crate::plan::config::{GridConfig, SourceMetadata};
use crate::plan::layout::{LayoutPlan, compute_layout};
use crate::render::output::{GifOptions, OutputFormat, resolve_output_path};

/// A source video file together with its probed metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoHandle {
    path: PathBuf,
    meta: SourceMetadata,
}

impl VideoHandle {
    /// Probe `path` with `ffprobe`.
    pub fn open(path: impl Into<PathBuf>) -> GestaltResult<Self> {
        let path = path.into();
        let meta = probe_video(&path)?;
        Ok(Self { path, meta })
    }

    /// Pair a path with already known metadata.
    pub fn from_parts(path: impl Into<PathBuf>, meta: SourceMetadata) -> Self {
        Self {
            path: path.into(),
            meta,
        }
    }

    /// Source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source metadata.
    pub fn metadata(&self) -> &SourceMetadata {
        &self.meta
    }
}

/// Knobs that affect encoding but not layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// GIF palette and frame rate.
    pub gif: GifOptions,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gif: GifOptions::default(),
            overwrite: true,
        }
    }
}

/// Outcome of a successful render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    /// Path actually written, after extension policy.
    pub output_path: PathBuf,
    /// Artifact kind.
    pub format: OutputFormat,
    /// Number of layers handed to the engine.
    pub layer_count: usize,
    /// Wall time spent in the engine.
    pub elapsed: Duration,
}

/// Hand every plan entry to `engine`, then ask it to encode once.
#[tracing::instrument(skip_all, fields(source = %source.path().display(), format = ?format))]
pub fn render(
    plan: &LayoutPlan,
    source: &VideoHandle,
    output_path: &Path,
    format: OutputFormat,
    engine: &mut dyn MediaEngine,
    opts: &RenderOptions,
) -> GestaltResult<RenderResult> {
    let started = Instant::now();
    let out_path = resolve_output_path(output_path, format, source.path());

    for cell in &plan.cells {
        engine.place_layer(LayerSpec {
            input: source.path().to_path_buf(),
            kind: cell.kind,
            source: cell.source,
            width: plan.thumb_width,
            height: plan.thumb_height,
            motion: cell.motion,
        })?;
    }

    let (width, height) = plan.canvas();
    engine.encode(&CompositeSpec {
        width,
        height,
        duration: plan.thumb_duration,
        frame_rate: plan.frame_rate,
        format,
        out_path: out_path.clone(),
        gif: opts.gif,
        overwrite: opts.overwrite,
    })?;

    let elapsed = started.elapsed();
    tracing::info!(
        layers = plan.cells.len(),
        "wrote {} in {:.1}s",
        out_path.display(),
        elapsed.as_secs_f64()
    );
    Ok(RenderResult {
        output_path: out_path,
        format,
        layer_count: plan.cells.len(),
        elapsed,
    })
}

/// Probe `input`, plan the grid and render it with `ffmpeg`.
pub fn generate(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    cfg: &GridConfig,
    opts: &RenderOptions,
) -> GestaltResult<RenderResult> {
    tracing::info!("generating gestalt for {}", input.display());
    let source = VideoHandle::open(input)?;
    let plan = compute_layout(source.metadata(), cfg)?;
    let mut engine = FfmpegEngine::new();
    render(&plan, &source, output, format, &mut engine, opts)
}

#[cfg(test)]
#[path = "../../tests/unit/render/builder.rs"]
mod tests;
