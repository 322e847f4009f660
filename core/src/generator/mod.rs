use alloc::collections::BTreeSet;

use crate::{AdjacencyIndex, Board, CellCount, Coord2};

pub use random::*;

mod random;

/// Strategy seam for populating a fresh board with hazards.
///
/// `first` is the player's opening cell: implementations must keep it
/// and everything in its adjacency list clear, and must never pick a
/// masked cell. The returned set may be smaller than `hazards` when the
/// board cannot fit that many.
pub trait HazardPlacer {
    fn place(
        &mut self,
        board: &Board,
        adjacency: &AdjacencyIndex,
        hazards: CellCount,
        first: Coord2,
    ) -> BTreeSet<Coord2>;
}

/// Scripted layout for replays and tests.
///
/// Positions outside the board or on masked cells are dropped; the safe
/// zone around the first move is NOT enforced, since a scripted board
/// places exactly what it was given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedHazardPlacer {
    cells: BTreeSet<Coord2>,
}

impl FixedHazardPlacer {
    pub fn new(cells: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }
}

impl HazardPlacer for FixedHazardPlacer {
    fn place(
        &mut self,
        board: &Board,
        _adjacency: &AdjacencyIndex,
        _hazards: CellCount,
        _first: Coord2,
    ) -> BTreeSet<Coord2> {
        self.cells
            .iter()
            .copied()
            .filter(|&pos| board.validate_coords(pos).is_ok() && !board.masked().contains(&pos))
            .collect()
    }
}
