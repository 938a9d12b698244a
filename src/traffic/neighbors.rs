//! Broadcast neighbor lookup strategies.
//!
//! For broadcast traffic each node picks the first linked node out of a 3x3
//! offset scan. Offsets are visited with `dy` in the outer loop and `dx` in
//! the inner loop, both running `-1, 0, 1`.

use serde::{Deserialize, Serialize};

use crate::input::{AdjacencyMatrix, Grid, GridPosition};

/// `(dx, dy)` pairs in scan order
const SCAN_OFFSETS: [(i64, i64); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Picks the destination of a node's broadcast flows
pub trait BroadcastScan {
    /// Short name recorded in plan metadata
    fn name(&self) -> &'static str;

    /// First linked candidate for `node`, if any
    fn find_target(&self, node: usize, matrix: &AdjacencyMatrix, grid: &Grid) -> Option<usize>;
}

/// Candidates are `dy * nx + dx`, taken as absolute flat indices.
///
/// The offsets are not applied to the node's own position, so only nodes
/// near the grid origin see their real neighbors. This reproduces the
/// long-standing plan output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatOffsetScan;

impl BroadcastScan for FlatOffsetScan {
    fn name(&self) -> &'static str {
        "flat_offset"
    }

    fn find_target(&self, node: usize, matrix: &AdjacencyMatrix, grid: &Grid) -> Option<usize> {
        let node_count = matrix.size() as i64;
        let nx = grid.nx() as i64;

        SCAN_OFFSETS
            .iter()
            .map(|&(dx, dy)| dy * nx + dx)
            .filter(|&cand| cand >= 0 && cand < node_count)
            .map(|cand| cand as usize)
            .filter(|&cand| cand != node)
            .find(|&cand| matrix.get(node, cand))
    }
}

/// Candidates are the in-bounds grid neighbors of the node itself
#[derive(Debug, Clone, Copy, Default)]
pub struct GridNeighborScan;

impl BroadcastScan for GridNeighborScan {
    fn name(&self) -> &'static str {
        "grid_neighbor"
    }

    fn find_target(&self, node: usize, matrix: &AdjacencyMatrix, grid: &Grid) -> Option<usize> {
        let origin = grid.position(node);

        SCAN_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                grid.index_of(GridPosition {
                    x: origin.x + dx,
                    y: origin.y + dy,
                })
            })
            .filter(|&cand| cand != node && cand < matrix.size())
            .find(|&cand| matrix.get(node, cand))
    }
}

/// Configurable choice of broadcast scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastStrategy {
    #[default]
    FlatOffset,
    GridNeighbor,
}

impl BroadcastStrategy {
    pub fn scanner(&self) -> Box<dyn BroadcastScan> {
        match self {
            Self::FlatOffset => Box::new(FlatOffsetScan),
            Self::GridNeighbor => Box::new(GridNeighborScan),
        }
    }
}
