use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::rngs::SmallRng;

use super::HazardPlacer;
use crate::{AdjacencyIndex, Board, CellCount, Coord2};

/// Uniform placement that keeps the opening move and its whole
/// neighborhood clear. Deterministic for a given seed.
///
/// Sparse boards use rejection sampling; once the requested count gets
/// close to the eligible pool, the pool is shuffled instead so
/// placement always terminates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomHazardPlacer {
    seed: u64,
}

impl RandomHazardPlacer {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl HazardPlacer for RandomHazardPlacer {
    fn place(
        &mut self,
        board: &Board,
        adjacency: &AdjacencyIndex,
        hazards: CellCount,
        first: Coord2,
    ) -> BTreeSet<Coord2> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (rows, cols) = board.size();

        let mut safe: BTreeSet<Coord2> = BTreeSet::from([first]);
        safe.extend(adjacency.neighbors(first).iter().copied());

        let eligible: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|pos| !board.masked().contains(pos) && !safe.contains(pos))
            .collect();

        let mut target = hazards;
        if usize::from(target) > eligible.len() {
            log::warn!(
                "cannot fit {} hazards into {} eligible cells, placing fewer",
                target,
                eligible.len()
            );
            target = eligible.len() as CellCount;
        }

        if usize::from(target) * 4 >= eligible.len() {
            return take_shuffled(&mut rng, eligible, target);
        }

        let mut picked = BTreeSet::new();
        let mut attempts = 0usize;
        let cap = eligible.len().saturating_mul(16).max(64);
        while picked.len() < usize::from(target) && attempts < cap {
            attempts += 1;
            let pos = (rng.random_range(0..rows), rng.random_range(0..cols));
            if board.masked().contains(&pos) || safe.contains(&pos) {
                continue;
            }
            picked.insert(pos);
        }

        if picked.len() < usize::from(target) {
            log::warn!(
                "rejection sampling stalled after {} attempts, shuffling the remainder",
                attempts
            );
            let missing = target - picked.len() as CellCount;
            let rest: Vec<Coord2> = eligible
                .into_iter()
                .filter(|pos| !picked.contains(pos))
                .collect();
            picked.extend(take_shuffled(&mut rng, rest, missing));
        }

        picked
    }
}

fn take_shuffled(rng: &mut SmallRng, mut pool: Vec<Coord2>, count: CellCount) -> BTreeSet<Coord2> {
    use rand::prelude::*;

    pool.shuffle(rng);
    pool.into_iter().take(usize::from(count)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, Shape};
    use alloc::string::String;

    fn setup(size: Coord2, hazards: CellCount, shape: Shape) -> (Board, AdjacencyIndex) {
        let board = Board::new(GameConfig::new_unchecked(size, hazards, shape), String::from("easy"));
        let adjacency = AdjacencyIndex::build(board.size(), board.masked());
        (board, adjacency)
    }

    #[test]
    fn first_move_and_its_neighborhood_stay_clear() {
        for seed in 0..32 {
            let (board, adjacency) = setup((9, 9), 10, Shape::Rectangle);
            let first = (4, 4);
            let placed = RandomHazardPlacer::new(seed).place(&board, &adjacency, 10, first);

            assert_eq!(placed.len(), 10, "seed {seed}");
            assert!(!placed.contains(&first));
            for neighbor in adjacency.neighbors(first) {
                assert!(!placed.contains(neighbor), "seed {seed}");
            }
        }
    }

    #[test]
    fn hazards_never_land_on_masked_cells() {
        for seed in 0..32 {
            let (board, adjacency) = setup((9, 9), 12, Shape::Diamond);
            let placed = RandomHazardPlacer::new(seed).place(&board, &adjacency, 12, (4, 4));

            assert_eq!(placed.len(), 12);
            for pos in &placed {
                assert!(!board.masked().contains(pos), "seed {seed}");
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_layout() {
        let (board, adjacency) = setup((10, 10), 15, Shape::Rectangle);
        let a = RandomHazardPlacer::new(7).place(&board, &adjacency, 15, (0, 0));
        let b = RandomHazardPlacer::new(7).place(&board, &adjacency, 15, (0, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn dense_boards_fall_through_to_the_shuffle_path() {
        // corner first move: 9x9 leaves 77 eligible cells, 20 hazards
        // trips the density cutoff
        let (board, adjacency) = setup((9, 9), 20, Shape::Rectangle);
        let first = (0, 0);
        let placed = RandomHazardPlacer::new(3).place(&board, &adjacency, 20, first);

        assert_eq!(placed.len(), 20);
        assert!(!placed.contains(&first));
        for neighbor in adjacency.neighbors(first) {
            assert!(!placed.contains(neighbor));
        }
    }

    #[test]
    fn oversized_requests_fill_every_eligible_cell() {
        let (board, adjacency) = setup((4, 4), 3, Shape::Rectangle);
        let first = (1, 1);
        // first move shields 9 cells, so only 7 can ever hold a hazard
        let placed = RandomHazardPlacer::new(11).place(&board, &adjacency, 40, first);

        assert_eq!(placed.len(), 7);
        assert!(!placed.contains(&first));
    }

    #[test]
    fn fixed_placer_drops_masked_and_out_of_bounds_cells() {
        use crate::FixedHazardPlacer;

        let (board, adjacency) = setup((5, 9), 3, Shape::Triangle);
        let mut placer = FixedHazardPlacer::new([(0, 0), (0, 4), (4, 8), (30, 30)]);
        let placed = placer.place(&board, &adjacency, 3, (2, 4));

        // (0, 0) is masked on the triangle, (30, 30) is off the board
        assert_eq!(placed, BTreeSet::from([(0, 4), (4, 8)]));
    }
}
