//! Node coordinate parsing.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use super::{read_input, InputError};

/// Physical placement of a node, as read from the coordinate file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Parse coordinate text: one `x y` pair per line until a blank line
pub fn parse_coordinates(content: &str) -> Result<Vec<Coordinate>, InputError> {
    let mut coordinates = Vec::new();

    let mut lines = content.lines().enumerate();

    while let Some((line_no, line)) = lines.next() {
        if line.trim().is_empty() {
            let ignored = lines.by_ref().filter(|(_, rest)| !rest.trim().is_empty()).count();
            if ignored > 0 {
                warn!("Ignoring blank row {}; {} later coordinates were dropped", line_no, ignored);
            }
            break;
        }

        // Reading stops at the first token that is not a number
        let values: Vec<f64> = line
            .split_whitespace()
            .map_while(|token| token.parse::<f64>().ok())
            .collect();
        if values.len() != 2 {
            log::error!(
                "Number of elements at line#{} is {} which is not equal to 2 for node coordinates file",
                line_no,
                values.len()
            );
            return Err(InputError::CoordinateArity {
                line: line_no,
                found: values.len(),
            });
        }

        coordinates.push(Coordinate::new(values[0], values[1]));
    }

    Ok(coordinates)
}

/// Load a node coordinate file
pub fn load_coordinates(path: &Path) -> Result<Vec<Coordinate>, InputError> {
    let content = read_input(path)?;
    parse_coordinates(&content)
}
