use alloc::collections::BTreeSet;
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2, GameError};

/// Outline of the playable area. Every shape is carved out of the
/// enclosing `rows x cols` rectangle by masking cells away.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rectangle,
    Triangle,
    Diamond,
    Cross,
    Custom,
}

impl Shape {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
            Self::Cross => "cross",
            Self::Custom => "custom",
        }
    }

    /// Computes the set of positions that do not exist for this shape.
    ///
    /// Pure and deterministic: the same `(shape, size)` pair always
    /// produces the same mask. Band boundaries clamp to the board, so
    /// degenerate sizes shrink bands instead of indexing out of bounds.
    pub fn masked_cells(self, size: Coord2) -> BTreeSet<Coord2> {
        match self {
            Self::Rectangle | Self::Custom => BTreeSet::new(),
            Self::Triangle => triangle_mask(size),
            Self::Diamond => diamond_mask(size),
            Self::Cross => cross_mask(size),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rectangle" => Ok(Self::Rectangle),
            "triangle" => Ok(Self::Triangle),
            "diamond" => Ok(Self::Diamond),
            "cross" => Ok(Self::Cross),
            "custom" => Ok(Self::Custom),
            _ => Err(GameError::UnknownShape(s.to_string())),
        }
    }
}

/// Keeps, in row `row`, the columns `[mid - span, mid + span]` clamped to
/// the board, and masks the rest of the row.
fn mask_outside_band(masked: &mut BTreeSet<Coord2>, row: Coord, cols: Coord, span: Coord) {
    let mid = cols / 2;
    let lo = mid.saturating_sub(span);
    let hi = mid.saturating_add(span).min(cols.saturating_sub(1));
    for col in 0..cols {
        if col < lo || col > hi {
            masked.insert((row, col));
        }
    }
}

/// A single cell at the top, widening by one cell per side per row.
fn triangle_mask((rows, cols): Coord2) -> BTreeSet<Coord2> {
    let mut masked = BTreeSet::new();
    for row in 0..rows {
        mask_outside_band(&mut masked, row, cols, row);
    }
    masked
}

/// Single cells at the top and bottom, widening towards the middle row,
/// which keeps every column.
fn diamond_mask((rows, cols): Coord2) -> BTreeSet<Coord2> {
    let mid_row = rows / 2;
    let mut masked = BTreeSet::new();
    for row in 0..rows {
        if row == mid_row {
            continue;
        }
        let span = if row < mid_row { row } else { rows - 1 - row };
        mask_outside_band(&mut masked, row, cols, span);
    }
    masked
}

/// Union of a full-height vertical band over the middle half of the
/// columns and a full-width horizontal band over the middle half of the
/// rows.
fn cross_mask((rows, cols): Coord2) -> BTreeSet<Coord2> {
    let col_lo = cols / 4;
    let col_hi = (3 * u16::from(cols) / 4) as Coord;
    let row_lo = rows / 4;
    let row_hi = (3 * u16::from(rows) / 4) as Coord;
    let mut masked = BTreeSet::new();
    for row in 0..rows {
        for col in 0..cols {
            let in_vertical = col >= col_lo && col < col_hi;
            let in_horizontal = row >= row_lo && row < row_hi;
            if !in_vertical && !in_horizontal {
                masked.insert((row, col));
            }
        }
    }
    masked
}
