//! Adjacency matrix parsing.
//!
//! The matrix file holds one row per line, each a whitespace separated list
//! of `0`/`1` cells. The first row fixes the width; a blank line ends the
//! matrix early.

use std::path::Path;

use log::warn;

use super::{read_input, InputError};

/// Square boolean matrix; `get(i, j)` is true when node `i` links to node `j`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Build a matrix from rows, applying the same shape checks as the parser
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, InputError> {
        let size = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(size * size);

        for (index, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(InputError::RowLengthMismatch {
                    row: index,
                    found: row.len(),
                    expected: size,
                });
            }
            cells.extend_from_slice(row);
        }

        if rows.len() != size {
            return Err(InputError::NotSquare {
                rows: rows.len(),
                columns: size,
            });
        }

        Ok(Self { size, cells })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> bool {
        self.cells[row * self.size + column]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// Every `(i, j)` with a true cell, row-major
    pub fn true_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell)
            .map(move |(index, _)| (index / self.size, index % self.size))
    }

    /// Whether any cell below the diagonal is set
    pub fn is_upper_triangular(&self) -> bool {
        self.true_cells().all(|(i, j)| i < j)
    }
}

/// Parse a single matrix cell; integer tokens `0` and `1` are accepted
fn parse_cell(token: &str, line: usize) -> Result<bool, InputError> {
    match token.parse::<u8>() {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(InputError::InvalidToken {
            line,
            token: token.to_string(),
        }),
    }
}

/// Parse adjacency matrix text
pub fn parse_matrix(content: &str) -> Result<AdjacencyMatrix, InputError> {
    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut width = 0;
    let mut lines = content.lines().enumerate();

    while let Some((line_no, line)) = lines.next() {
        if line.trim().is_empty() {
            let ignored = lines.by_ref().filter(|(_, rest)| !rest.trim().is_empty()).count();
            if ignored > 0 {
                warn!(
                    "Ignoring blank row {} in the adjacency matrix; {} later rows were dropped",
                    rows.len(),
                    ignored
                );
            }
            break;
        }

        let row = line
            .split_whitespace()
            .map(|token| parse_cell(token, line_no))
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            width = row.len();
        }
        if row.len() != width {
            log::error!(
                "Number of elements in line {}: {} not equal to number of elements in line 0: {}",
                rows.len(),
                row.len(),
                width
            );
            return Err(InputError::RowLengthMismatch {
                row: rows.len(),
                found: row.len(),
                expected: width,
            });
        }
        rows.push(row);
    }

    if rows.len() != width {
        log::error!("There are {} rows and {} columns.", rows.len(), width);
    }
    AdjacencyMatrix::from_rows(rows)
}

/// Load an adjacency matrix file
pub fn load_matrix(path: &Path) -> Result<AdjacencyMatrix, InputError> {
    let content = read_input(path)?;
    parse_matrix(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_square_matrix() {
        let matrix = parse_matrix("0 1 1 0\n0 0 0 1\n0 0 0 1\n0 0 0 0\n").unwrap();

        assert_eq!(matrix.size(), 4);
        assert_eq!(matrix.row(0), &[false, true, true, false]);
        assert_eq!(matrix.row(3), &[false, false, false, false]);
        assert!(matrix.get(1, 3));
        assert!(!matrix.get(3, 1));
        assert!(matrix.is_upper_triangular());
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "0 1 0\n1 0 1\n0 1 0\n").unwrap();

        let first = load_matrix(temp_file.path()).unwrap();
        let second = load_matrix(temp_file.path()).unwrap();
        assert_eq!(first, second);
        assert!(!first.is_upper_triangular());
    }

    #[test]
    fn test_row_length_mismatch() {
        let err = parse_matrix("0 1 0\n1 0\n0 1 0\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::RowLengthMismatch { row: 1, found: 2, expected: 3 }
        ));
    }

    #[test]
    fn test_not_square() {
        let err = parse_matrix("0 1 0\n0 0 1\n0 0 0\n1 0 0\n").unwrap_err();
        assert!(matches!(err, InputError::NotSquare { rows: 4, columns: 3 }));
    }

    #[test]
    fn test_blank_line_truncates() {
        // The blank line cuts the matrix to two rows, which no longer matches three columns
        let err = parse_matrix("0 1 0\n0 0 1\n\n0 0 0\n").unwrap_err();
        assert!(matches!(err, InputError::NotSquare { rows: 2, columns: 3 }));

        let matrix = parse_matrix("0 1\n0 0\n\n1 1\n").unwrap();
        assert_eq!(matrix.size(), 2);
        assert!(!matrix.get(1, 0));
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        let matrix = parse_matrix("0 1 \r\n1 0 \r\n").unwrap();
        assert_eq!(matrix.size(), 2);
        assert!(matrix.get(0, 1));
        assert!(matrix.get(1, 0));
    }

    #[test]
    fn test_invalid_cell() {
        let err = parse_matrix("0 2\n0 0\n").unwrap_err();
        assert!(matches!(err, InputError::InvalidToken { line: 0, ref token } if token == "2"));
    }

    #[test]
    fn test_true_cells_row_major() {
        let matrix = AdjacencyMatrix::from_rows(vec![
            vec![false, true, true],
            vec![true, false, false],
            vec![false, false, false],
        ])
        .unwrap();
        let cells: Vec<_> = matrix.true_cells().collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = parse_matrix("").unwrap();
        assert_eq!(matrix.size(), 0);
    }
}
