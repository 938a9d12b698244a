//! Grid size and locality degree files.
//!
//! Both files hold plain integers, one per line. Values are parsed the way C
//! `atoi` does it: leading digits are used and anything unparseable reads as
//! zero, so a malformed grid size surfaces later as a dimension mismatch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_input, InputError};

/// Parse the leading integer of `text`, yielding 0 when there is none
///
/// # Examples
/// ```
/// use gridtopo::input::lenient_int;
///
/// assert_eq!(lenient_int("12"), 12);
/// assert_eq!(lenient_int("  -3 rows"), -3);
/// assert_eq!(lenient_int("abc"), 0);
/// ```
pub fn lenient_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Raw grid dimensions as read from the network size file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub ny: i64,
    pub nx: i64,
}

impl GridSize {
    /// `ny * nx`, or `None` on overflow
    pub fn cell_count(&self) -> Option<i64> {
        self.ny.checked_mul(self.nx)
    }

    /// Convert to a usable grid; both dimensions must be positive
    pub fn to_grid(&self) -> Option<Grid> {
        let nx = usize::try_from(self.nx).ok()?;
        let ny = usize::try_from(self.ny).ok()?;
        Grid::new(nx, ny)
    }
}

/// Validated grid shape with at least one row and one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grid {
    nx: usize,
    ny: usize,
}

/// Column/row of a node derived from its flat index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i64,
    pub y: i64,
}

impl Grid {
    pub fn new(nx: usize, ny: usize) -> Option<Self> {
        (nx > 0 && ny > 0).then_some(Self { nx, ny })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn node_count(&self) -> usize {
        self.nx * self.ny
    }

    /// `x = i mod nx`, `y = (i - x) / nx`
    pub fn position(&self, index: usize) -> GridPosition {
        let x = index % self.nx;
        let y = (index - x) / self.nx;
        GridPosition {
            x: x as i64,
            y: y as i64,
        }
    }

    /// Flat index of an in-bounds grid position
    pub fn index_of(&self, position: GridPosition) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.nx && y < self.ny).then(|| y * self.nx + x)
    }
}

/// Maximum per-axis grid distance for two nodes to count as local
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeThreshold(i64);

impl DegreeThreshold {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Degree 1 is approximated by direct adjacency in the matrix
    pub fn requires_direct_link(&self) -> bool {
        self.0 == 1
    }

    /// Chebyshev-style check: both axis distances within the threshold
    pub fn admits(&self, a: GridPosition, b: GridPosition) -> bool {
        (a.x - b.x).abs() <= self.0 && (a.y - b.y).abs() <= self.0
    }
}

/// Parse network size text: `ny` on the first line, `nx` on the second
pub fn parse_grid_size(content: &str) -> GridSize {
    let mut lines = content.lines();
    let ny = lines.next().map_or(0, lenient_int);
    let nx = lines.next().map_or(0, lenient_int);
    GridSize { ny, nx }
}

pub fn parse_degree(content: &str) -> DegreeThreshold {
    DegreeThreshold(content.lines().next().map_or(0, lenient_int))
}

/// Load the network size file
pub fn load_grid_size(path: &Path) -> Result<GridSize, InputError> {
    Ok(parse_grid_size(&read_input(path)?))
}

/// Load the locality degree file
pub fn load_degree(path: &Path) -> Result<DegreeThreshold, InputError> {
    Ok(parse_degree(&read_input(path)?))
}
