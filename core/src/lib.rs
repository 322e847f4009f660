#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use board::*;
pub use error::*;
pub use generator::*;
pub use leaderboard::*;
pub use session::*;
pub use shape::*;
pub use types::*;

mod adjacency;
mod board;
mod error;
mod generator;
mod leaderboard;
mod session;
mod shape;
mod types;

/// Largest accepted board axis.
pub const MAX_AXIS: Coord = 35;

/// Boards where both axes fall below this are too small to play.
pub const MIN_LARGE_AXIS: Coord = 4;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub hazards: CellCount,
    pub shape: Shape,
}

impl GameConfig {
    /// Skips validation; for scripted layouts and tests.
    pub const fn new_unchecked(size: Coord2, hazards: CellCount, shape: Shape) -> Self {
        Self {
            size,
            hazards,
            shape,
        }
    }

    /// Validated configuration: each axis in `1..=MAX_AXIS`, at least
    /// one axis of 4 or more, at least one hazard, and hazards capped at
    /// a quarter of the enclosing rectangle.
    pub fn new(size: Coord2, hazards: CellCount, shape: Shape) -> Result<Self> {
        let (rows, cols) = size;
        if rows < 1 || cols < 1 || rows > MAX_AXIS || cols > MAX_AXIS {
            return Err(GameError::InvalidSize(size));
        }
        if rows < MIN_LARGE_AXIS && cols < MIN_LARGE_AXIS {
            return Err(GameError::InvalidSize(size));
        }
        let total = u32::from(mult(rows, cols));
        if hazards < 1 || u32::from(hazards) * 4 > total {
            return Err(GameError::InvalidHazardCount(hazards));
        }
        Ok(Self::new_unchecked(size, hazards, shape))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}
