use crate::foundation::error::{GestaltError, GestaltResult};
use crate::plan::config::{GridConfig, SourceMetadata};
use crate::plan::motion::{Motion, MotionFrame};
use crate::plan::policy::ClampEvent;

/// Role of a plan entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// One of the N² grid cells.
    Grid,
    /// Previous row's last window entering at column -1.
    LeftBoundary,
    /// Next row's first window entering at column N.
    RightBoundary,
    /// First source frame held still before row 0.
    Leading,
    /// Last source frame held still after the last row.
    Trailing,
}

/// What a plan entry shows.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellSource {
    /// Half-open source window `[start, end)` with index `index` in row-major order.
    Window {
        /// Window index `k`.
        index: u32,
        /// Start time in seconds.
        start: f64,
        /// End time in seconds (exclusive).
        end: f64,
    },
    /// A single source frame held still.
    HeldFrame {
        /// Source timestamp of the frame.
        at: f64,
        /// How long it is held, in seconds.
        hold: f64,
    },
}

impl CellSource {
    /// Playback length of the entry.
    pub fn duration(&self) -> f64 {
        match *self {
            Self::Window { start, end, .. } => end - start,
            Self::HeldFrame { hold, .. } => hold,
        }
    }
}

/// One entry of the composite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellPlan {
    /// Role of the entry.
    pub kind: CellKind,
    /// Grid row (0-based).
    pub row: u32,
    /// Grid column; -1 and N denote the off-grid columns.
    pub col: i32,
    /// Window or held frame shown by the entry.
    pub source: CellSource,
    /// Horizontal slide during playback.
    pub motion: Motion,
}

/// Complete, immutable layout for one gestalt.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutPlan {
    /// Name of the sizing policy that produced the plan.
    pub policy: String,
    /// Cells per side of the square grid.
    pub thumbs_per_side: u32,
    /// Nominal canvas width.
    pub full_width: u32,
    /// Canvas height.
    pub full_height: u32,
    /// Canvas width including one extra column for cells sliding in and out.
    pub extended_width: u32,
    /// Width of every cell.
    pub thumb_width: u32,
    /// Height of every cell.
    pub thumb_height: u32,
    /// Playback length of every cell and of the composite.
    pub thumb_duration: f64,
    /// Apparent slide speed.
    pub speed_pixels_per_frame: f64,
    /// Source frame rate, reused for the composite.
    pub frame_rate: f64,
    /// Forced adjustment of the grid size, if one happened.
    pub clamp: Option<ClampEvent>,
    /// Grid cells in row-major order, then left boundaries, right boundaries, leading and
    /// trailing.
    pub cells: Vec<CellPlan>,
}

impl LayoutPlan {
    /// Number of distinct source windows (N²).
    pub fn window_count(&self) -> u32 {
        self.thumbs_per_side.saturating_mul(self.thumbs_per_side)
    }

    /// The N² grid cells in row-major order.
    pub fn grid_cells(&self) -> &[CellPlan] {
        let len = (self.window_count() as usize).min(self.cells.len());
        &self.cells[..len]
    }

    /// Grid cell at `(row, col)`.
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellPlan> {
        if row >= self.thumbs_per_side || col >= self.thumbs_per_side {
            return None;
        }
        let index = row as usize * self.thumbs_per_side as usize + col as usize;
        self.cells.get(index)
    }

    /// Entries of a given kind, in plan order.
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = &CellPlan> {
        self.cells.iter().filter(move |c| c.kind == kind)
    }

    /// Composite canvas size `(extended_width, full_height)`.
    pub fn canvas(&self) -> (u32, u32) {
        (self.extended_width, self.full_height)
    }
}

/// `(N², N² + 2N)` when both fit the `u32` window index.
fn entry_counts(n: u32) -> Option<(u32, usize)> {
    let windows = n.checked_mul(n)?;
    let entries = windows.checked_add(n.checked_mul(2)?)?;
    Some((windows, usize::try_from(entries).ok()?))
}

fn round_px(v: f64) -> u32 {
    v.round() as u32
}

/// Compute the layout for `meta` under `cfg`.
///
/// Pure and deterministic: identical inputs give identical plans.
#[tracing::instrument(skip(cfg), fields(policy = ?cfg.policy))]
pub fn compute_layout(meta: &SourceMetadata, cfg: &GridConfig) -> GestaltResult<LayoutPlan> {
    meta.validate()?;
    cfg.validate()?;

    let policy = cfg.policy.policy();
    let size = policy.grid_size(meta, cfg);
    match size.clamp {
        Some(ClampEvent::ForcedMinimum { computed, forced }) => {
            tracing::info!(computed, "forcing at least {forced}x{forced} grid");
        }
        Some(ClampEvent::ForcedMaximum { computed, forced }) => {
            tracing::info!(computed, "forcing at most {forced}x{forced} grid");
        }
        None => {}
    }
    let n = size.thumbs_per_side;
    let (window_count, entry_count) = entry_counts(n).ok_or_else(|| {
        GestaltError::layout_constraint(format!(
            "a {n}x{n} grid has more windows than a plan can index; \
             raise min_thumb_width or lower output_width"
        ))
    })?;

    let aspect = f64::from(meta.height) / f64::from(meta.width);
    let full_width = policy.full_width(cfg, n);
    let full_height = round_px(f64::from(full_width) * aspect);
    let thumb_width = round_px(f64::from(full_width) / f64::from(n));
    let thumb_height = round_px(f64::from(thumb_width) * aspect);
    if thumb_width == 0 || thumb_height == 0 {
        return Err(GestaltError::layout_constraint(format!(
            "a {}x{} source yields {thumb_width}x{thumb_height} thumbnails on a {full_width}px canvas",
            meta.width, meta.height
        )));
    }
    let extended_width = round_px(f64::from(full_width) * f64::from(n + 1) / f64::from(n));
    tracing::info!("full size: {full_width}x{full_height}, extended to {extended_width}");

    let thumb_duration = meta.duration / f64::from(window_count);
    let speed_pixels_per_frame = (f64::from(thumb_width) / thumb_duration) / meta.frame_rate;
    tracing::info!(
        "{n}x{n} grid of {thumb_width}x{thumb_height} {thumb_duration:.3}s thumbnails, \
         moving at {speed_pixels_per_frame:.3} pixels/frame"
    );

    let frame = MotionFrame {
        thumb_width: f64::from(thumb_width),
        thumb_height: f64::from(thumb_height),
        extended_width: f64::from(extended_width),
        thumb_duration,
    };
    let window = |k: u32| {
        let end = if k + 1 == window_count {
            meta.duration
        } else {
            f64::from(k + 1) * thumb_duration
        };
        CellSource::Window {
            index: k,
            start: f64::from(k) * thumb_duration,
            end,
        }
    };
    let last_col = n as i32;

    let mut cells = Vec::new();
    cells.try_reserve_exact(entry_count).map_err(|e| {
        GestaltError::layout_constraint(format!("cannot hold {entry_count} plan entries: {e}"))
    })?;
    for j in 0..n {
        for i in 0..n {
            cells.push(CellPlan {
                kind: CellKind::Grid,
                row: j,
                col: i as i32,
                source: window(j * n + i),
                motion: frame.motion(i as i32, j),
            });
        }
    }
    for j in 1..n {
        cells.push(CellPlan {
            kind: CellKind::LeftBoundary,
            row: j,
            col: -1,
            source: window(j * n - 1),
            motion: frame.motion(-1, j),
        });
    }
    for j in 0..n - 1 {
        cells.push(CellPlan {
            kind: CellKind::RightBoundary,
            row: j,
            col: last_col,
            source: window((j + 1) * n),
            motion: frame.motion(last_col, j),
        });
    }
    cells.push(CellPlan {
        kind: CellKind::Leading,
        row: 0,
        col: -1,
        source: CellSource::HeldFrame {
            at: 0.0,
            hold: thumb_duration,
        },
        motion: frame.motion(-1, 0),
    });
    cells.push(CellPlan {
        kind: CellKind::Trailing,
        row: n - 1,
        col: last_col,
        source: CellSource::HeldFrame {
            at: meta.last_frame_time(),
            hold: thumb_duration,
        },
        motion: frame.motion(last_col, n - 1),
    });

    Ok(LayoutPlan {
        policy: policy.name().to_string(),
        thumbs_per_side: n,
        full_width,
        full_height,
        extended_width,
        thumb_width,
        thumb_height,
        thumb_duration,
        speed_pixels_per_frame,
        frame_rate: meta.frame_rate,
        clamp: size.clamp,
        cells,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/plan/layout.rs"]
mod tests;
