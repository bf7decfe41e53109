use crate::foundation::error::{GestaltError, GestaltResult};
use crate::plan::policy::SizingPolicyKind;

/// The grid is never smaller than 2x2.
pub const MIN_THUMBS_PER_SIDE: u32 = 2;

/// Metadata read once from the source video.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceMetadata {
    /// Duration in seconds.
    pub duration: f64,
    /// Frames per second.
    pub frame_rate: f64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SourceMetadata {
    /// Create validated metadata.
    pub fn new(duration: f64, frame_rate: f64, width: u32, height: u32) -> GestaltResult<Self> {
        let meta = Self {
            duration,
            frame_rate,
            width,
            height,
        };
        meta.validate()?;
        Ok(meta)
    }

    /// Check that every field is finite and strictly positive.
    pub fn validate(&self) -> GestaltResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(GestaltError::invalid_input(format!(
                "source duration must be > 0 seconds, got {}",
                self.duration
            )));
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(GestaltError::invalid_input(format!(
                "source frame rate must be > 0, got {}",
                self.frame_rate
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GestaltError::invalid_input(format!(
                "source dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Timestamp of the last decodable frame.
    pub fn last_frame_time(&self) -> f64 {
        (self.duration - 1.0 / self.frame_rate).max(0.0)
    }
}

/// Policy constants for grid planning.
///
/// Defaults: 1000px nominal output width, 60px minimum thumbnail width and a minimum slide
/// speed of 2 pixels per rendered frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Nominal output width in pixels. Also bounds the grid size.
    pub output_width: u32,
    /// Thumbnails are never narrower than this.
    pub min_thumb_width: u32,
    /// Minimum apparent slide speed of each cell.
    pub min_speed_pixels_per_frame: f64,
    /// Strategy used to derive the canvas width.
    pub policy: SizingPolicyKind,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            output_width: 1000,
            min_thumb_width: 60,
            min_speed_pixels_per_frame: 2.0,
            policy: SizingPolicyKind::default(),
        }
    }
}

impl GridConfig {
    /// Largest grid whose thumbnails stay at least `min_thumb_width` wide.
    pub fn max_thumbs_per_side(&self) -> u32 {
        self.output_width
            .checked_div(self.min_thumb_width)
            .unwrap_or(0)
    }

    /// Reject configurations that cannot produce even a 2x2 grid.
    pub fn validate(&self) -> GestaltResult<()> {
        if self.output_width == 0 || self.min_thumb_width == 0 {
            return Err(GestaltError::layout_constraint(
                "output_width and min_thumb_width must be non-zero",
            ));
        }
        if !self.min_speed_pixels_per_frame.is_finite() || self.min_speed_pixels_per_frame <= 0.0
        {
            return Err(GestaltError::layout_constraint(format!(
                "min_speed_pixels_per_frame must be > 0, got {}",
                self.min_speed_pixels_per_frame
            )));
        }
        if self.max_thumbs_per_side() < MIN_THUMBS_PER_SIDE {
            return Err(GestaltError::layout_constraint(format!(
                "min_thumb_width {}px leaves room for fewer than {MIN_THUMBS_PER_SIDE} thumbnails \
                 across an output width of {}px",
                self.min_thumb_width, self.output_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/config.rs"]
mod tests;
