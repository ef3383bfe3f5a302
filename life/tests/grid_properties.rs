//! Property-based tests for the grid update rule and cell edits.

use life::{Fill, Grid};
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12)
        .prop_flat_map(|(rows, cols)| {
            (Just(rows), Just(cols), proptest::collection::vec(any::<bool>(), rows * cols))
        })
        .prop_map(|(rows, cols, cells)| {
            let mut grid = Grid::dead(rows, cols).unwrap();
            for (i, alive) in cells.into_iter().enumerate() {
                grid.set(i / cols, i % cols, alive).unwrap();
            }
            grid
        })
}

proptest! {
    /// No spontaneous life: a dead grid stays dead.
    #[test]
    fn prop_dead_grid_stays_dead(rows in 1usize..40, cols in 1usize..40) {
        let mut grid = Grid::dead(rows, cols).unwrap();
        grid.step();
        prop_assert!(grid.is_empty());
    }

    /// toggle is an involution.
    #[test]
    fn prop_toggle_involution(grid in grid_strategy(), r in 0usize..12, c in 0usize..12) {
        let row = r % grid.num_rows();
        let col = c % grid.num_cols();
        let mut edited = grid.clone();
        edited.toggle(row, col).unwrap();
        prop_assert_ne!(&edited, &grid);
        edited.toggle(row, col).unwrap();
        prop_assert_eq!(edited, grid);
    }

    /// reset clears any grid and keeps its dimensions.
    #[test]
    fn prop_reset_clears(mut grid in grid_strategy()) {
        let (rows, cols) = (grid.num_rows(), grid.num_cols());
        grid.reset();
        prop_assert!(grid.is_empty());
        prop_assert_eq!((grid.num_rows(), grid.num_cols()), (rows, cols));
        prop_assert_eq!(grid, Grid::dead(rows, cols).unwrap());
    }

    /// Every next state follows from the neighbour counts of the previous one.
    #[test]
    fn prop_step_matches_rule(grid in grid_strategy()) {
        let mut next = grid.clone();
        next.step();
        for (row, col, alive) in grid.cells() {
            let n = grid.live_neighbors(row, col).unwrap();
            let expected = matches!((alive, n), (true, 2) | (true, 3) | (false, 3));
            prop_assert_eq!(next.is_alive(row, col).unwrap(), expected, "cell ({}, {})", row, col);
        }
    }

    /// Out-of-range edits are rejected and leave the grid alone.
    #[test]
    fn prop_out_of_range_rejected(mut grid in grid_strategy(), extra in 0usize..5) {
        let before = grid.clone();
        let rows = grid.num_rows();
        prop_assert!(grid.toggle(rows + extra, 0).is_err());
        prop_assert!(grid.is_alive(0, grid.num_cols() + extra).is_err());
        prop_assert_eq!(grid, before);
    }

    /// Same seed, same grid.
    #[test]
    fn prop_seeded_fill_is_deterministic(seed in any::<u64>(), p in 0.0f64..=1.0) {
        let fill = Fill::Random { probability: p, seed: Some(seed) };
        prop_assert_eq!(Grid::new(8, 9, fill).unwrap(), Grid::new(8, 9, fill).unwrap());
    }
}

#[test]
fn single_cell_dies() {
    let mut grid = Grid::dead(5, 5).unwrap();
    grid.toggle(2, 2).unwrap();
    grid.step();
    assert!(grid.is_empty());
}

#[test]
fn block_is_still_life_everywhere() {
    for (top, left) in [(0, 0), (0, 4), (4, 0), (4, 4), (2, 2)] {
        let mut grid = Grid::dead(6, 6).unwrap();
        for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            grid.set(top + r, left + c, true).unwrap();
        }
        let before = grid.clone();
        grid.step();
        assert_eq!(grid, before, "block at ({top}, {left})");
    }
}
