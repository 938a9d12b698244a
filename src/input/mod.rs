//! Network input loading.
//!
//! This module reads the four line-oriented input files that describe a
//! network (adjacency matrix, node coordinates, grid size and locality
//! degree) and checks that they agree with each other before anything is
//! built from them.

pub mod coordinates;
pub mod grid;
pub mod matrix;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::InputFiles;

// Re-export commonly used types
pub use coordinates::{load_coordinates, parse_coordinates, Coordinate};
pub use grid::{lenient_int, load_degree, load_grid_size, DegreeThreshold, Grid, GridPosition, GridSize};
pub use matrix::{load_matrix, parse_matrix, AdjacencyMatrix};

/// Errors raised while reading or validating network input files
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("File {} not found", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Number of elements in line {row}: {found} not equal to number of elements in line 0: {expected}")]
    RowLengthMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("The number of rows is not equal to the number of columns in the adjacency matrix: {rows} rows and {columns} columns")]
    NotSquare { rows: usize, columns: usize },

    #[error("The number of lines in coordinate file is: {coordinates} not equal to the number of nodes in adjacency matrix size {matrix} (grid {ny}x{nx})")]
    DimensionMismatch {
        matrix: usize,
        coordinates: usize,
        ny: i64,
        nx: i64,
    },

    #[error("Number of elements at line#{line} is {found} which is not equal to 2 for node coordinates file")]
    CoordinateArity { line: usize, found: usize },

    #[error("Invalid token '{token}' at line {line}")]
    InvalidToken { line: usize, token: String },
}

impl InputError {
    /// Coordinate arity violations end the process immediately instead of
    /// travelling up as an ordinary fatal report.
    pub fn is_abrupt(&self) -> bool {
        matches!(self, Self::CoordinateArity { .. })
    }
}

/// Read a whole input file, mapping an unopenable file to `MissingFile`
pub(crate) fn read_input(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => InputError::MissingFile {
            path: path.to_path_buf(),
            source,
        },
        _ => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Locations of the four input files
#[derive(Debug, Clone, PartialEq)]
pub struct InputPaths {
    pub adjacency_matrix: PathBuf,
    pub node_coordinates: PathBuf,
    pub network_size: PathBuf,
    pub n_degrees: PathBuf,
}

impl InputPaths {
    /// Resolve the configured file names against an input directory
    pub fn in_dir(dir: &Path, files: &InputFiles) -> Self {
        Self {
            adjacency_matrix: dir.join(&files.adjacency_matrix),
            node_coordinates: dir.join(&files.node_coordinates),
            network_size: dir.join(&files.network_size),
            n_degrees: dir.join(&files.n_degrees),
        }
    }
}

/// Validated, cross-consistent network description
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInputs {
    pub matrix: AdjacencyMatrix,
    pub coordinates: Vec<Coordinate>,
    pub grid: Grid,
    pub degree: DegreeThreshold,
}

impl NetworkInputs {
    /// Load every input file and validate that node counts agree
    pub fn load(paths: &InputPaths) -> Result<Self, InputError> {
        info!("Reading adjacency matrix from {}", paths.adjacency_matrix.display());
        let matrix = load_matrix(&paths.adjacency_matrix)?;
        let grid_size = load_grid_size(&paths.network_size)?;
        let degree = load_degree(&paths.n_degrees)?;

        info!("Reading node coordinates from {}", paths.node_coordinates.display());
        let coordinates = load_coordinates(&paths.node_coordinates)?;

        Self::from_parts(matrix, coordinates, grid_size, degree)
    }

    /// Assemble inputs that were loaded or built elsewhere.
    ///
    /// The matrix dimension, the coordinate count and `nx * ny` must all be
    /// equal, and the grid must have at least one row and one column.
    pub fn from_parts(
        matrix: AdjacencyMatrix,
        coordinates: Vec<Coordinate>,
        grid_size: GridSize,
        degree: DegreeThreshold,
    ) -> Result<Self, InputError> {
        let node_count = coordinates.len();
        let mismatch = || InputError::DimensionMismatch {
            matrix: matrix.size(),
            coordinates: node_count,
            ny: grid_size.ny,
            nx: grid_size.nx,
        };

        if matrix.size() != node_count || grid_size.cell_count() != Some(node_count as i64) {
            return Err(mismatch());
        }
        let grid = grid_size.to_grid().ok_or_else(mismatch)?;

        debug!(
            "Network inputs: {} nodes on a {}x{} grid, degree {}",
            node_count,
            grid.ny(),
            grid.nx(),
            degree.value()
        );

        Ok(Self {
            matrix,
            coordinates,
            grid,
            degree,
        })
    }

    /// Number of nodes in the network
    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }
}
