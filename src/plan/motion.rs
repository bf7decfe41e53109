use crate::plan::layout::CellPlan;

/// Horizontal travel direction of a grid row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Even rows slide left to right.
    Forward,
    /// Odd rows slide right to left.
    Reverse,
}

impl Direction {
    /// Serpentine direction for row `row`.
    pub fn for_row(row: u32) -> Self {
        if row.is_multiple_of(2) {
            Self::Forward
        } else {
            Self::Reverse
        }
    }

    /// `+1.0` for forward, `-1.0` for reverse.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

/// Linear horizontal slide of one cell, in canvas pixels.
///
/// At local time `t` the cell sits at `start_x + sign * distance * t / duration`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Motion {
    /// Travel direction.
    pub direction: Direction,
    /// X position at `t = 0`.
    pub start_x: f64,
    /// Constant Y position of the row.
    pub y: f64,
    /// Distance covered over `duration` (one thumbnail width).
    pub distance: f64,
    /// Playback length of the cell in seconds.
    pub duration: f64,
}

/// Geometry shared by every motion of a plan.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MotionFrame {
    pub(crate) thumb_width: f64,
    pub(crate) thumb_height: f64,
    pub(crate) extended_width: f64,
    pub(crate) thumb_duration: f64,
}

impl MotionFrame {
    /// Motion of column `col` in row `row`. Columns -1 and N sit just outside the grid.
    pub(crate) fn motion(&self, col: i32, row: u32) -> Motion {
        let direction = Direction::for_row(row);
        let col = f64::from(col);
        let start_x = match direction {
            Direction::Forward => self.thumb_width * col,
            Direction::Reverse => self.extended_width - self.thumb_width * (col + 1.0),
        };
        Motion {
            direction,
            start_x,
            y: f64::from(row) * self.thumb_height,
            distance: self.thumb_width,
            duration: self.thumb_duration,
        }
    }
}

impl Motion {
    /// Canvas position at local playback time `t` (seconds from the cell's start).
    pub fn position_at(&self, t: f64) -> (f64, f64) {
        let x = self.start_x + self.direction.sign() * self.distance * (t / self.duration);
        (x, self.y)
    }

    /// Horizontal velocity in pixels per second, signed by direction.
    pub fn velocity(&self) -> f64 {
        self.direction.sign() * self.distance / self.duration
    }
}

/// Canvas position of `cell` at local playback time `t`.
pub fn position_at(cell: &CellPlan, t: f64) -> (f64, f64) {
    cell.motion.position_at(t)
}

#[cfg(test)]
#[path = "../../tests/unit/plan/motion.rs"]
mod tests;
