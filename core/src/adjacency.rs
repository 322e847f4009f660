use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::types::{Coord2, NeighborIter};

/// Precomputed neighbor lists for every cell that exists on the board.
///
/// Built once per board and rebuilt whenever the dimensions or shape
/// change. Masked positions get no entry and never appear in anyone
/// else's list, so flood fills driven by this index can never cross a
/// shape boundary. Lookup is O(1) by position.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
    map: HashMap<Coord2, Vec<Coord2>>,
}

impl AdjacencyIndex {
    pub fn build(size: Coord2, masked: &BTreeSet<Coord2>) -> Self {
        let (rows, cols) = size;
        let mut map = HashMap::with_capacity(usize::from(rows) * usize::from(cols));
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                if masked.contains(&pos) {
                    continue;
                }
                let neighbors: Vec<Coord2> = NeighborIter::new(pos, size)
                    .filter(|neighbor| !masked.contains(neighbor))
                    .collect();
                map.insert(pos, neighbors);
            }
        }
        Self { map }
    }

    /// Neighbors of `pos` in row-major reading order. Empty for masked
    /// or out-of-bounds positions.
    pub fn neighbors(&self, pos: Coord2) -> &[Coord2] {
        self.map.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `pos` exists on the board this index was built for.
    pub fn contains(&self, pos: Coord2) -> bool {
        self.map.contains_key(&pos)
    }

    /// Number of existing (non-masked) positions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &[Coord2])> {
        self.map.iter().map(|(&pos, neighbors)| (pos, neighbors.as_slice()))
    }
}
