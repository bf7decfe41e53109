use std::path::PathBuf;

use crate::foundation::error::GestaltResult;
use crate::plan::layout::{CellKind, CellSource};
use crate::plan::motion::Motion;
use crate::render::output::{GifOptions, OutputFormat};

/// One sub-clip to extract, resize and move across the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    /// Source video file.
    pub input: PathBuf,
    /// Role of the originating plan entry.
    pub kind: CellKind,
    /// Window or held frame to extract.
    pub source: CellSource,
    /// Target width after resizing.
    pub width: u32,
    /// Target height after resizing.
    pub height: u32,
    /// Time-varying position on the canvas.
    pub motion: Motion,
}

/// Final composite and encode request.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeSpec {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Length of the composite in seconds.
    pub duration: f64,
    /// Frame rate of the composite.
    pub frame_rate: f64,
    /// Artifact kind.
    pub format: OutputFormat,
    /// Where the artifact is written.
    pub out_path: PathBuf,
    /// GIF tuning, ignored for other formats.
    pub gif: GifOptions,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
}

/// The opaque collaborator that owns decoding, resizing, compositing and encoding.
///
/// Call contract: `place_layer` once per plan entry in plan order (later layers are stacked
/// on top), then `encode` exactly once.
pub trait MediaEngine {
    /// Queue one layer.
    fn place_layer(&mut self, layer: LayerSpec) -> GestaltResult<()>;
    /// Composite every queued layer and write the artifact.
    fn encode(&mut self, composite: &CompositeSpec) -> GestaltResult<()>;
}

/// Engine that records requests without touching any media.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    layers: Vec<LayerSpec>,
    encodes: Vec<CompositeSpec>,
}

impl RecordingEngine {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers placed so far, in call order.
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Encode requests received so far.
    pub fn encodes(&self) -> &[CompositeSpec] {
        &self.encodes
    }
}

impl MediaEngine for RecordingEngine {
    fn place_layer(&mut self, layer: LayerSpec) -> GestaltResult<()> {
        self.layers.push(layer);
        Ok(())
    }

    fn encode(&mut self, composite: &CompositeSpec) -> GestaltResult<()> {
        self.encodes.push(composite.clone());
        Ok(())
    }
}
