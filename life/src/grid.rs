// grid.rs - Cell buffer and update rule for Conway's Game of Life
//
// The active area is surrounded by a one-cell border that is always dead, so
// neighbour counting never has to special-case the edges. Edges are NOT
// wrapped: anything outside the grid counts as a dead cell.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{info, trace};

use crate::patterns::Pattern;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("cell ({row}, {column}) is outside the {rows}x{cols} grid")]
    IndexOutOfRange { row: usize, column: usize, rows: usize, cols: usize },
    #[error("live probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("pattern {name} does not fit a {rows}x{cols} grid at that origin")]
    PatternTooLarge { name: &'static str, rows: usize, cols: usize },
    #[error("row {row} is invalid: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// Initial-fill policy used at construction.
#[derive(Debug, Clone, Copy)]
pub enum Fill {
    /// Every cell starts dead.
    Dead,
    /// Every cell is alive with the given probability. A `None` seed draws
    /// one from the OS.
    Random { probability: f64, seed: Option<u64> },
    /// An empty grid with the pattern stamped in the middle.
    Pattern(&'static Pattern),
}

#[derive(Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,      // (rows + 2) x (cols + 2), border included
    next_cells: Vec<bool>, // scratch generation, swapped with `cells`
}

impl Grid {
    pub fn new(rows: usize, cols: usize, fill: Fill) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        let total = (rows + 2) * (cols + 2);
        let mut grid = Self {
            rows,
            cols,
            cells: vec![false; total],
            next_cells: vec![false; total],
        };

        match fill {
            Fill::Dead => {}
            Fill::Random { probability, seed } => grid.randomize(probability, seed)?,
            Fill::Pattern(pattern) => {
                let (height, width) = (pattern.height(), pattern.width());
                if height > rows || width > cols {
                    return Err(GridError::PatternTooLarge { name: pattern.name, rows, cols });
                }
                grid.stamp(pattern, ((rows - height) / 2, (cols - width) / 2))?;
            }
        }

        info!(rows, cols, population = grid.population(), "grid created");
        Ok(grid)
    }

    /// Shorthand for an all-dead grid.
    pub fn dead(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::new(rows, cols, Fill::Dead)
    }

    /// Builds a grid from text rows; `#`, `O` and `*` are alive, `.` is dead.
    pub fn from_rows(lines: &[&str]) -> Result<Self, GridError> {
        let rows = lines.len();
        let cols = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        let mut grid = Self::dead(rows, cols)?;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(GridError::InvalidRow {
                    row,
                    reason: format!("expected {cols} cells, found {}", line.chars().count()),
                });
            }
            for (column, ch) in line.chars().enumerate() {
                let alive = match ch {
                    '#' | 'O' | '*' => true,
                    '.' => false,
                    other => {
                        return Err(GridError::InvalidRow {
                            row,
                            reason: format!("unexpected character {other:?}"),
                        });
                    }
                };
                let idx = grid.index(row, column);
                grid.cells[idx] = alive;
            }
        }
        Ok(grid)
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn is_alive(&self, row: usize, column: usize) -> Result<bool, GridError> {
        self.check(row, column)?;
        Ok(self.cells[self.index(row, column)])
    }

    pub fn set(&mut self, row: usize, column: usize, alive: bool) -> Result<(), GridError> {
        self.check(row, column)?;
        let idx = self.index(row, column);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flips a cell and returns its new state.
    pub fn toggle(&mut self, row: usize, column: usize) -> Result<bool, GridError> {
        self.check(row, column)?;
        let idx = self.index(row, column);
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    /// Advances one generation. Every next state is computed from the
    /// current buffer into the scratch buffer, then the two are swapped.
    pub fn step(&mut self) {
        let stride = self.cols + 2;
        for row in 1..=self.rows {
            for col in 1..=self.cols {
                let idx = row * stride + col;
                let count = self.count_around(idx);

                self.next_cells[idx] = match (self.cells[idx], count) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
            }
        }
        std::mem::swap(&mut self.cells, &mut self.next_cells);
        debug_assert!(self.border_is_dead(), "border cells must stay dead");
        trace!(population = self.population(), "generation computed");
    }

    pub fn live_neighbors(&self, row: usize, column: usize) -> Result<u8, GridError> {
        self.check(row, column)?;
        Ok(self.count_around(self.index(row, column)))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    /// Hash of the active area, used to notice repeating generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.rows.hash(&mut hasher);
        self.cols.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Sets every cell of `pattern` alive, with its top-left corner at `origin`.
    pub fn stamp(&mut self, pattern: &Pattern, origin: (usize, usize)) -> Result<(), GridError> {
        let (top, left) = origin;
        let fits = |start: usize, extent: usize, limit: usize| {
            start.checked_add(extent).is_some_and(|end| end <= limit)
        };
        if !fits(top, pattern.height(), self.rows) || !fits(left, pattern.width(), self.cols) {
            return Err(GridError::PatternTooLarge {
                name: pattern.name,
                rows: self.rows,
                cols: self.cols,
            });
        }
        for &(row, col) in pattern.cells {
            let idx = self.index(top + row, left + col);
            self.cells[idx] = true;
        }
        Ok(())
    }

    /// Iterates `(row, column, alive)` over the active area in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |column| (row, column, self.cells[self.index(row, column)]))
        })
    }

    fn randomize(&mut self, probability: f64, seed: Option<u64>) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(GridError::InvalidProbability(probability));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for row in 0..self.rows {
            for column in 0..self.cols {
                let idx = self.index(row, column);
                self.cells[idx] = rng.gen_bool(probability);
            }
        }
        Ok(())
    }

    fn count_around(&self, idx: usize) -> u8 {
        let stride = self.cols + 2;
        let neighbors = [
            idx - stride - 1, idx - stride, idx - stride + 1,
            idx - 1,                        idx + 1,
            idx + stride - 1, idx + stride, idx + stride + 1,
        ];
        neighbors.iter().filter(|&&n| self.cells[n]).count() as u8
    }

    fn border_is_dead(&self) -> bool {
        let stride = self.cols + 2;
        let last_row = self.rows + 1;
        (0..stride).all(|c| !self.cells[c] && !self.cells[last_row * stride + c])
            && (0..=last_row).all(|r| !self.cells[r * stride] && !self.cells[r * stride + stride - 1])
    }

    fn check(&self, row: usize, column: usize) -> Result<(), GridError> {
        if row >= self.rows || column >= self.cols {
            return Err(GridError::IndexOutOfRange {
                row,
                column,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    // Active (row, column) -> position in the bordered buffer.
    fn index(&self, row: usize, column: usize) -> usize {
        (row + 1) * (self.cols + 2) + column + 1
    }
}

// The scratch buffer holds stale data and takes no part in equality.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.cols {
                let alive = self.cells[self.index(row, column)];
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}
