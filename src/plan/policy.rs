use crate::plan::config::{GridConfig, MIN_THUMBS_PER_SIDE, SourceMetadata};

/// A forced adjustment of the computed grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClampEvent {
    /// The speed formula asked for fewer than two cells per side.
    ForcedMinimum {
        /// Value produced by the speed formula.
        computed: u32,
        /// Value actually used.
        forced: u32,
    },
    /// The speed formula asked for thumbnails narrower than the minimum width.
    ForcedMaximum {
        /// Value produced by the speed formula.
        computed: u32,
        /// Value actually used.
        forced: u32,
    },
}

/// Chosen grid size plus the clamp that produced it, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    /// Cells per side of the square grid.
    pub thumbs_per_side: u32,
    /// Recorded when the computed size was forced into range.
    pub clamp: Option<ClampEvent>,
}

/// Strategy for sizing the grid and its canvas.
///
/// Implementations only decide numbers; cell geometry, timing and motion are derived from
/// them by [`compute_layout`](crate::plan::layout::compute_layout).
pub trait SizingPolicy: Send + Sync {
    /// Stable name recorded on the plan.
    fn name(&self) -> &'static str;

    /// Pick the number of cells per side.
    ///
    /// The default keeps the slide speed at or above `min_speed_pixels_per_frame`: a cell
    /// crosses `min_thumb_width` pixels in `duration / n²` seconds, which solves to
    /// `n = sqrt(speed * fps * duration / min_thumb_width)`.
    fn grid_size(&self, meta: &SourceMetadata, cfg: &GridConfig) -> GridSize {
        let sum_of_thumb_widths = cfg.min_speed_pixels_per_frame * meta.frame_rate * meta.duration;
        let computed = (sum_of_thumb_widths / f64::from(cfg.min_thumb_width))
            .sqrt()
            .round() as u32;
        clamp_thumbs_per_side(computed, cfg.max_thumbs_per_side())
    }

    /// Nominal canvas width for a grid of `thumbs_per_side` cells.
    fn full_width(&self, cfg: &GridConfig, thumbs_per_side: u32) -> u32;
}

/// Fixed nominal output width; thumbnails shrink as the grid grows.
#[derive(Clone, Copy, Debug, Default)]
pub struct WidthFirst;

impl SizingPolicy for WidthFirst {
    fn name(&self) -> &'static str {
        "width-first"
    }

    fn full_width(&self, cfg: &GridConfig, _thumbs_per_side: u32) -> u32 {
        cfg.output_width
    }
}

/// Fixed thumbnail width; the canvas grows with the grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThumbSizeFirst;

impl SizingPolicy for ThumbSizeFirst {
    fn name(&self) -> &'static str {
        "thumb-size-first"
    }

    fn full_width(&self, cfg: &GridConfig, thumbs_per_side: u32) -> u32 {
        cfg.min_thumb_width.saturating_mul(thumbs_per_side)
    }
}

/// Serializable selector for the built-in policies.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SizingPolicyKind {
    /// See [`WidthFirst`].
    #[default]
    WidthFirst,
    /// See [`ThumbSizeFirst`].
    ThumbSizeFirst,
}

impl SizingPolicyKind {
    /// Resolve to the policy implementation.
    pub fn policy(self) -> &'static dyn SizingPolicy {
        match self {
            Self::WidthFirst => &WidthFirst,
            Self::ThumbSizeFirst => &ThumbSizeFirst,
        }
    }
}

/// Force `computed` into `[MIN_THUMBS_PER_SIDE, max]`, recording which bound was hit.
///
/// `max` below the minimum is rejected earlier by [`GridConfig::validate`].
pub fn clamp_thumbs_per_side(computed: u32, max: u32) -> GridSize {
    if computed < MIN_THUMBS_PER_SIDE {
        return GridSize {
            thumbs_per_side: MIN_THUMBS_PER_SIDE,
            clamp: Some(ClampEvent::ForcedMinimum {
                computed,
                forced: MIN_THUMBS_PER_SIDE,
            }),
        };
    }
    if computed > max {
        return GridSize {
            thumbs_per_side: max,
            clamp: Some(ClampEvent::ForcedMaximum {
                computed,
                forced: max,
            }),
        };
    }
    GridSize {
        thumbs_per_side: computed,
        clamp: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/policy.rs"]
mod tests;
