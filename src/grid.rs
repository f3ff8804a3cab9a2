use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::rule_set::B3S23;

/// Chance that a cell starts out alive after [`LifeGrid::randomize`].
const LIVE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid must be at least 1x1, got {width}x{height}")]
    EmptyDimension { width: usize, height: usize },

    #[error("A {width}x{height} grid does not fit in memory")]
    TooLarge { width: usize, height: usize },
}

/// A Game of Life board whose edges wrap around, so it forms a torus.
///
/// Cells are stored row-major: cell `(x, y)` lives at `y * width + x`. A second buffer of the same
/// size holds the generation being computed by [`LifeGrid::step`], after which the two are
/// swapped.
#[derive(Clone, Debug)]
pub struct LifeGrid {
    width: usize,
    height: usize,

    /// The current generation
    cells: Vec<bool>,

    /// Write buffer for the next generation. Its contents are meaningless between steps.
    next: Vec<bool>,

    /// Steps taken since construction or the last reset
    generation: u64,
}

impl PartialEq for LifeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for LifeGrid {}

impl LifeGrid {
    /// Create a `width` by `height` grid of dead cells.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimension { width, height });
        }

        let too_large = || GridError::TooLarge { width, height };

        let n = width.checked_mul(height).ok_or_else(too_large)?;
        let cells = dead_cells(n).ok_or_else(too_large)?;
        let next = dead_cells(n).ok_or_else(too_large)?;

        Ok(Self {
            width,
            height,
            cells,
            next,
            generation: 0,
        })
    }

    /// Create a grid and fill it with random cells.
    pub fn random(width: usize, height: usize) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        grid.randomize();

        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells in the current generation.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Replace every cell with a fresh coin flip, using the thread-local RNG.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Like [`LifeGrid::randomize`], but draws from `rng`.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            *cell = rng.r#gen::<f64>() >= LIVE_THRESHOLD;
        }

        self.generation = 0;

        debug!(
            width = self.width,
            height = self.height,
            population = self.population(),
            "randomized grid"
        );
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    /// Whether cell `(x, y)` is alive.
    ///
    /// Panics if `(x, y)` is outside the grid. See [`LifeGrid::get`] for a checked version.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        let i = self.xy_from(x, y);

        self.cells[i]
    }

    /// Like [`LifeGrid::is_alive`], but `None` when `(x, y)` is out of range.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Set cell `(x, y)` of the current generation.
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.xy_from(x, y);

        self.cells[i] = alive;
    }

    /// Visit every cell in row-major order as `(x, y, alive)`.
    pub fn for_each_cell<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, bool),
    {
        for (n, &alive) in self.cells.iter().enumerate() {
            let (x, y) = self.xy_to(n);
            f(x, y, alive);
        }
    }

    /// Grayscale view of the grid, one byte per cell: `0` for dead and `255` for alive.
    pub fn to_pixels(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|&alive| if alive { u8::MAX } else { 0 })
            .collect()
    }

    /// Count the live cells among the 8 surrounding `(x, y)`, wrapping at the edges.
    ///
    /// On grids narrower or shorter than 3 cells, some neighbors are the same cell seen through
    /// different offsets, and each is counted.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        let mut n = 0;

        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let nx = wrap(x, dx, self.width);
                let ny = wrap(y, dy, self.height);

                if self.cells[ny * self.width + nx] {
                    n += 1;
                }
            }
        }

        n
    }

    /// Advance one generation.
    ///
    /// Every cell's fate is decided from the current generation alone; results are written to the
    /// back buffer and only become visible once all of them are computed.
    pub fn step(&mut self) {
        let mut population = 0;

        for y in 0..self.height {
            for x in 0..self.width {
                let i = y * self.width + x;
                let neighbors = self.count_live_neighbors(x, y);
                let alive = B3S23.next(self.cells[i], neighbors);

                self.next[i] = alive;
                population += alive as usize;
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;

        trace!(generation = self.generation, population, "stepped");
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.width, n / self.width)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        y * self.width + x
    }
}

/// `n` dead cells, or `None` if they can't be allocated.
fn dead_cells(n: usize) -> Option<Vec<bool>> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(n).ok()?;
    cells.resize(n, false);

    Some(cells)
}

/// Move `coord` by `offset` (at most one full lap) on an axis of length `dim` that wraps around.
fn wrap(coord: usize, offset: isize, dim: usize) -> usize {
    let dim = dim as isize;

    ((coord as isize + offset + dim) % dim) as usize
}

impl fmt::Display for LifeGrid {
    /// One line per row, `#` for live cells and `.` for dead ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }

            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
        }

        Ok(())
    }
}
