//! Interface address table.
//!
//! Records which address each node uses on the interface facing a given
//! peer, renders it as the `N x N` text table consumed by post-processing
//! tools, and reads that table back.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::Path;

use crate::input::InputError;

/// Token written for node pairs without an interface
pub const SENTINEL: &str = "x";

/// Sparse `(node, peer) -> address` table
#[derive(Debug, Clone, Default)]
pub struct InterfaceTable {
    node_count: usize,
    entries: BTreeMap<(usize, usize), Ipv4Addr>,
    /// Reverse lookup for conflict detection
    owners: HashMap<Ipv4Addr, (usize, usize)>,
}

impl InterfaceTable {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            ..Self::default()
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Record `address` as `node`'s interface facing `peer`.
    ///
    /// A later link between the same ordered pair overwrites the earlier
    /// entry; the overwritten address is returned.
    pub fn record(&mut self, node: usize, peer: usize, address: Ipv4Addr) -> Option<Ipv4Addr> {
        if let Some(owner) = self.owners.get(&address) {
            if *owner != (node, peer) {
                log::warn!(
                    "Address {} recorded for ({}, {}) is already in use by ({}, {})",
                    address, node, peer, owner.0, owner.1
                );
            }
        }
        let previous = self.entries.insert((node, peer), address);
        if let Some(old) = previous {
            log::debug!("Interface ({}, {}) changed from {} to {}", node, peer, old, address);
            self.owners.remove(&old);
        }
        self.owners.insert(address, (node, peer));
        previous
    }

    pub fn get(&self, node: usize, peer: usize) -> Option<Ipv4Addr> {
        self.entries.get(&(node, peer)).copied()
    }

    /// Number of recorded interfaces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded interfaces in `(node, peer)` order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Ipv4Addr)> + '_ {
        self.entries.iter().map(|(key, address)| (*key, *address))
    }

    /// Render one line per node, one token per peer
    pub fn render(&self) -> String {
        let mut output = String::new();
        for node in 0..self.node_count {
            let row: Vec<String> = (0..self.node_count)
                .map(|peer| match self.get(node, peer) {
                    Some(address) => address.to_string(),
                    None => SENTINEL.to_string(),
                })
                .collect();
            output.push_str(&row.join(" "));
            output.push('\n');
        }
        output
    }

    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }

    /// Parse a rendered table.
    ///
    /// The row count fixes the node count; tokens beyond it on a row are
    /// ignored.
    pub fn parse(content: &str) -> Result<Self, InputError> {
        let rows: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();
        let mut table = Self::new(rows.len());

        for (node, (line_no, line)) in rows.iter().enumerate() {
            for (peer, token) in line.split_whitespace().enumerate().take(table.node_count) {
                if token == SENTINEL {
                    continue;
                }
                let address = token.parse::<Ipv4Addr>().map_err(|_| InputError::InvalidToken {
                    line: *line_no,
                    token: token.to_string(),
                })?;
                table.record(node, peer, address);
            }
        }

        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        Self::parse(&crate::input::read_input(path)?)
    }
}

impl PartialEq for InterfaceTable {
    fn eq(&self, other: &Self) -> bool {
        self.node_count == other.node_count && self.entries == other.entries
    }
}

impl Eq for InterfaceTable {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> InterfaceTable {
        let mut table = InterfaceTable::new(3);
        table.record(0, 1, Ipv4Addr::new(10, 0, 0, 1));
        table.record(1, 0, Ipv4Addr::new(10, 0, 0, 2));
        table.record(1, 2, Ipv4Addr::new(10, 0, 0, 5));
        table.record(2, 1, Ipv4Addr::new(10, 0, 0, 6));
        table
    }

    #[test]
    fn test_render_with_sentinels() {
        let rendered = sample().render();
        assert_eq!(
            rendered,
            "x 10.0.0.1 x\n10.0.0.2 x 10.0.0.5\nx 10.0.0.6 x\n"
        );
    }

    #[test]
    fn test_parse_rendered_table() {
        let table = sample();
        let parsed = InterfaceTable::parse(&table.render()).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed.get(0, 2), None);
        assert_eq!(parsed.get(2, 1), Some(Ipv4Addr::new(10, 0, 0, 6)));
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let parsed = InterfaceTable::parse("x 10.0.0.1 10.9.9.9 \n10.0.0.2 x \n").unwrap();
        assert_eq!(parsed.node_count(), 2);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = InterfaceTable::parse("x nonsense\nx x\n").unwrap_err();
        assert!(matches!(err, InputError::InvalidToken { line: 0, .. }));
    }

    #[test]
    fn test_record_overwrites() {
        let mut table = InterfaceTable::new(2);
        assert_eq!(table.record(0, 1, Ipv4Addr::new(10, 0, 0, 1)), None);
        assert_eq!(
            table.record(0, 1, Ipv4Addr::new(10, 0, 0, 5)),
            Some(Ipv4Addr::new(10, 0, 0, 1))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_write_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let table = sample();
        table.write_to(temp_file.path()).unwrap();

        let loaded = InterfaceTable::load(temp_file.path()).unwrap();
        assert_eq!(loaded, table);
    }
}
