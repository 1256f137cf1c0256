//! A fixed-size occupancy grid using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. Grids are
//! represented as an `N×N` cell mask packed into four `u64` words, which
//! supports sides up to 16. Basic constructors, bitwise operations and the
//! 8-neighbor dilation used by the placement adjacency rule are provided.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Number of backing words; 4×64 bits caps the side at 16.
const WORDS: usize = 4;

/// Errors returned by grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Requested grid size N*N exceeds the backing capacity.
    SizeTooLarge { n: usize, capacity: usize },
    /// Row or column index is out of bounds [0..N).
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::SizeTooLarge { n, capacity } => {
                write!(f, "SizeTooLarge: N*N={} exceeds capacity={}", n * n, capacity)
            }
            GridError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A fixed-size N×N cell mask stored in packed `u64` words.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BitGrid<const N: usize> {
    words: [u64; WORDS],
}

impl<const N: usize> BitGrid<N> {
    /// Number of usable bits in the grid (`N * N`).
    const GRID_BITS: usize = N * N;

    /// Create a new empty grid (all cells cleared) without size check.
    #[inline]
    pub fn new() -> Self {
        BitGrid { words: [0; WORDS] }
    }

    /// Fallible constructor: returns `Err(SizeTooLarge)` if N*N exceeds capacity.
    pub fn try_new() -> Result<Self, GridError> {
        let capacity = WORDS * 64;
        if Self::GRID_BITS > capacity {
            Err(GridError::SizeTooLarge { n: N, capacity })
        } else {
            Ok(BitGrid { words: [0; WORDS] })
        }
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Gets the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.check_bounds(row, col)?;
        let idx = row * N + col;
        Ok((self.words[idx / 64] >> (idx % 64)) & 1 != 0)
    }

    /// Sets the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        let idx = row * N + col;
        self.words[idx / 64] |= 1u64 << (idx % 64);
        Ok(())
    }

    /// Clears the cell at (row, col).
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        let idx = row * N + col;
        self.words[idx / 64] &= !(1u64 << (idx % 64));
        Ok(())
    }

    /// Toggles the cell at (row, col).
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        let idx = row * N + col;
        self.words[idx / 64] ^= 1u64 << (idx % 64);
        Ok(())
    }

    /// Clears all cells.
    #[inline]
    pub fn clear_all(&mut self) {
        self.words = [0; WORDS];
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= N || col >= N {
            Err(GridError::IndexOutOfBounds { row, col })
        } else {
            Ok(())
        }
    }

    /// Zeroes bits above `N * N` so bitwise NOT stays inside the grid.
    #[inline]
    fn mask_tail(mut self) -> Self {
        for w in 0..WORDS {
            let lo = w * 64;
            if lo >= Self::GRID_BITS {
                self.words[w] = 0;
            } else if Self::GRID_BITS - lo < 64 {
                self.words[w] &= (1u64 << (Self::GRID_BITS - lo)) - 1;
            }
        }
        self
    }

    /// Expands the mask by one cell in all eight directions, clamped to the
    /// grid edge. The original cells stay set. This is the "no touching"
    /// placement rule: a candidate ship may not intersect the dilation of the
    /// existing fleet.
    pub fn dilated(&self) -> Self {
        let mut out = *self;
        for (r, c) in self.iter_set_cells() {
            let r0 = r.saturating_sub(1);
            let c0 = c.saturating_sub(1);
            for nr in r0..=(r + 1).min(N - 1) {
                for nc in c0..=(c + 1).min(N - 1) {
                    let idx = nr * N + nc;
                    out.words[idx / 64] |= 1u64 << (idx % 64);
                }
            }
        }
        out
    }

    /// Creates a grid from an iterator over `(row, col)` positions.
    #[inline]
    pub fn from_iter<I>(iter: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new();
        for (r, c) in iter {
            grid.set(r, c)?;
        }
        Ok(grid)
    }

    /// Iterator over the set cells of the grid, row-major.
    #[inline]
    pub fn iter_set_cells(&self) -> SetCells<'_, N> {
        SetCells { grid: self, idx: 0 }
    }
}

impl<const N: usize> Default for BitGrid<N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for BitGrid<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid<{}>:", N)?;
        for r in 0..N {
            for c in 0..N {
                let idx = r * N + c;
                let cell = if (self.words[idx / 64] >> (idx % 64)) & 1 != 0 {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a grid.
#[derive(Clone, Copy)]
pub struct SetCells<'a, const N: usize> {
    grid: &'a BitGrid<N>,
    idx: usize,
}

impl<'a, const N: usize> Iterator for SetCells<'a, N> {
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if (self.grid.words[idx / 64] >> (idx % 64)) & 1 != 0 {
                return Some((idx / N, idx % N));
            }
        }
        None
    }
}

/// Bitwise AND for intersecting two grids.
impl<const N: usize> BitAnd for BitGrid<N> {
    type Output = Self;
    fn bitand(mut self, rhs: Self) -> Self {
        for w in 0..WORDS {
            self.words[w] &= rhs.words[w];
        }
        self
    }
}

/// Bitwise OR for combining two grids.
impl<const N: usize> BitOr for BitGrid<N> {
    type Output = Self;
    fn bitor(mut self, rhs: Self) -> Self {
        for w in 0..WORDS {
            self.words[w] |= rhs.words[w];
        }
        self
    }
}

/// Bitwise XOR for differencing two grids.
impl<const N: usize> BitXor for BitGrid<N> {
    type Output = Self;
    fn bitxor(mut self, rhs: Self) -> Self {
        for w in 0..WORDS {
            self.words[w] ^= rhs.words[w];
        }
        self
    }
}

/// Bitwise NOT for inverting a grid (within grid bounds).
impl<const N: usize> Not for BitGrid<N> {
    type Output = Self;
    #[inline]
    fn not(mut self) -> Self {
        for w in 0..WORDS {
            self.words[w] = !self.words[w];
        }
        self.mask_tail()
    }
}

impl<const N: usize> BitAndAssign for BitGrid<N> {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        for w in 0..WORDS {
            self.words[w] &= rhs.words[w];
        }
    }
}

impl<const N: usize> BitOrAssign for BitGrid<N> {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        for w in 0..WORDS {
            self.words[w] |= rhs.words[w];
        }
    }
}

impl<const N: usize> BitXorAssign for BitGrid<N> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        for w in 0..WORDS {
            self.words[w] ^= rhs.words[w];
        }
    }
}
