//! Link construction from the adjacency matrix.
//!
//! The matrix is scanned in full, not just above the diagonal, so a
//! symmetric pair of cells produces two separate links between the same
//! nodes.

use log::{debug, info};

use super::types::{Link, Topology};
use crate::input::AdjacencyMatrix;
use crate::ip::{AddressAssigner, AddressError, InterfaceTable};

/// Ordered `(i, j)` pairs that become links, row-major
pub fn link_pairs(matrix: &AdjacencyMatrix) -> Vec<(usize, usize)> {
    matrix.true_cells().collect()
}

/// Create one link per true cell and record both endpoint addresses.
///
/// Node `i`'s address goes to `(i, j)` and node `j`'s to `(j, i)`.
pub fn build_topology<A>(matrix: &AdjacencyMatrix, assigner: &mut A) -> Result<Topology, AddressError>
where
    A: AddressAssigner + ?Sized,
{
    let node_count = matrix.size();
    let mut interfaces = InterfaceTable::new(node_count);
    let mut links = Vec::new();

    if !matrix.is_upper_triangular() {
        debug!("Adjacency matrix has cells below the diagonal; each is linked separately");
    }

    for (i, j) in link_pairs(matrix) {
        let addresses = assigner.assign_pair()?;
        debug!(
            "matrix element [{}][{}] is 1: {} <-> {}",
            i, j, addresses.first, addresses.second
        );

        interfaces.record(i, j, addresses.first);
        interfaces.record(j, i, addresses.second);
        links.push(Link {
            source: i,
            target: j,
            addresses,
        });
    }

    let link_count = links.len();
    info!("Number of links in the adjacency matrix is: {}", link_count);
    info!("Number of all nodes is: {}", node_count);

    Ok(Topology {
        links,
        interfaces,
        link_count,
    })
}
