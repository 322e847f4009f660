use alloc::collections::BTreeSet;
use alloc::string::String;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{mult, CellCount, Coord, Coord2, GameConfig, GameError, Result, Shape, ToNdIndex};

/// What a cell holds once hazards have been placed. Assigned exactly
/// once per attempt, immutable afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Hazard,
    Count(u8),
}

impl CellContent {
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Hazard)
    }

    /// A clear cell borders no hazards and triggers the cascade.
    pub const fn is_clear(self) -> bool {
        matches!(self, Self::Count(0))
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player-visible state of a single cell.
///
/// `Masked` is assigned at construction and never changes. The other
/// states move along `Hidden -> Revealed` (terminal) and
/// `Hidden <-> Marked`; a marked cell has to be unmarked before it can
/// be revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellVisibility {
    Hidden,
    Revealed,
    Marked,
    Masked,
}

impl CellVisibility {
    /// Whether the cell exists on this board's shape at all.
    pub const fn exists(self) -> bool {
        !matches!(self, Self::Masked)
    }
}

impl Default for CellVisibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Full state of one game attempt: the two per-cell grids, the masked
/// and hazard sets, and the counters a front end persists between runs.
///
/// The board only stores state; move legality lives in
/// [`crate::Session`]. Serializing a `Board` captures everything needed
/// to resume the attempt later, except the adjacency index, which is
/// derived from the size and masked set on resume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    content: Array2<CellContent>,
    visibility: Array2<CellVisibility>,
    masked: BTreeSet<Coord2>,
    hazards: BTreeSet<Coord2>,
    revealed_count: Saturating<CellCount>,
    flags_left: CellCount,
    score: u32,
    difficulty: String,
    shape: Shape,
    initialized: bool,
}

impl Board {
    /// Fresh board for one attempt. Cells outside the shape are masked
    /// immediately; hazards arrive later, anchored on the first move.
    pub fn new(config: GameConfig, difficulty: String) -> Self {
        let size = config.size;
        let masked = config.shape.masked_cells(size);
        let mut visibility: Array2<CellVisibility> = Array2::default(size.to_nd_index());
        for &pos in &masked {
            visibility[pos.to_nd_index()] = CellVisibility::Masked;
        }
        Self {
            content: Array2::default(size.to_nd_index()),
            visibility,
            masked,
            hazards: BTreeSet::new(),
            revealed_count: Saturating(0),
            flags_left: config.hazards,
            score: 0,
            difficulty,
            shape: config.shape,
            initialized: false,
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.content.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn validate_coords(&self, pos: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if pos.0 < rows && pos.1 < cols {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords(pos))
        }
    }

    pub fn content_at(&self, pos: Coord2) -> Result<CellContent> {
        let pos = self.validate_coords(pos)?;
        Ok(self.content[pos.to_nd_index()])
    }

    pub fn visibility_at(&self, pos: Coord2) -> Result<CellVisibility> {
        let pos = self.validate_coords(pos)?;
        Ok(self.visibility[pos.to_nd_index()])
    }

    pub(crate) fn content_unchecked(&self, pos: Coord2) -> CellContent {
        self.content[pos.to_nd_index()]
    }

    pub(crate) fn visibility_unchecked(&self, pos: Coord2) -> CellVisibility {
        self.visibility[pos.to_nd_index()]
    }

    pub fn masked(&self) -> &BTreeSet<Coord2> {
        &self.masked
    }

    pub fn hazards(&self) -> &BTreeSet<Coord2> {
        &self.hazards
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    /// Cells that exist for this shape.
    pub fn playable_cells(&self) -> CellCount {
        self.total_cells() - self.masked.len() as CellCount
    }

    /// Cells that must be revealed to win.
    pub fn safe_cells(&self) -> CellCount {
        self.playable_cells() - self.hazards.len() as CellCount
    }

    pub fn hazard_count(&self) -> CellCount {
        self.hazards.len() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    /// Every safe cell revealed: `revealed + hazards + masked` covers
    /// the whole grid.
    pub(crate) fn is_cleared(&self) -> bool {
        self.revealed_count == Saturating(self.safe_cells())
    }

    pub fn flags_left(&self) -> CellCount {
        self.flags_left
    }

    pub(crate) fn marked_count(&self) -> CellCount {
        self.visibility
            .iter()
            .filter(|&&vis| vis == CellVisibility::Marked)
            .count() as CellCount
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Elapsed-time counter, fed by the front end's clock. Opaque here.
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// True once hazards and proximity counts have been placed, which
    /// happens on the first reveal.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn set_initialized(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn place_hazard(&mut self, pos: Coord2) {
        self.content[pos.to_nd_index()] = CellContent::Hazard;
        self.hazards.insert(pos);
    }

    pub(crate) fn set_count(&mut self, pos: Coord2, count: u8) {
        self.content[pos.to_nd_index()] = CellContent::Count(count);
    }

    /// `Hidden -> Revealed`. Callers check legality first.
    pub(crate) fn reveal_cell(&mut self, pos: Coord2) {
        debug_assert_eq!(self.visibility_unchecked(pos), CellVisibility::Hidden);
        self.visibility[pos.to_nd_index()] = CellVisibility::Revealed;
        self.revealed_count += 1;
    }

    /// Used when disclosing hazards after a loss: marked hazards are
    /// shown too.
    pub(crate) fn force_reveal(&mut self, pos: Coord2) {
        if self.visibility_unchecked(pos) == CellVisibility::Revealed {
            return;
        }
        self.visibility[pos.to_nd_index()] = CellVisibility::Revealed;
        self.revealed_count += 1;
    }

    /// `Hidden -> Marked`, spending one flag.
    pub(crate) fn mark(&mut self, pos: Coord2) {
        debug_assert!(self.flags_left > 0);
        self.visibility[pos.to_nd_index()] = CellVisibility::Marked;
        self.flags_left -= 1;
    }

    /// `Marked -> Hidden`, returning the flag to the budget.
    pub(crate) fn unmark(&mut self, pos: Coord2) {
        self.visibility[pos.to_nd_index()] = CellVisibility::Hidden;
        self.flags_left += 1;
    }
}
