//! Trace address relabeling.
//!
//! Packet traces name interfaces by the addresses the allocator handed out,
//! which say nothing about which nodes a link joins. This module rewrites
//! every known address `a.b.c.d` found in a trace into `i.j.c.d`, where `i`
//! is the owning node and `j` the peer on the other end of the link.

use std::borrow::Cow;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use log::debug;
use rayon::prelude::*;
use regex::{Captures, Regex};

use crate::ip::InterfaceTable;

static IPV4_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").expect("Invalid IPv4 regex"));

/// Maps assigned interface addresses to node-indexed labels
#[derive(Debug, Clone, Default)]
pub struct AddressRelabeler {
    labels: HashMap<Ipv4Addr, String>,
}

impl AddressRelabeler {
    pub fn from_table(table: &InterfaceTable) -> Self {
        let labels: HashMap<Ipv4Addr, String> = table
            .iter()
            .map(|((node, peer), address)| {
                let [_, _, c, d] = address.octets();
                (address, format!("{}.{}.{}.{}", node, peer, c, d))
            })
            .collect();
        debug!("Relabeling {} interface addresses", labels.len());
        Self { labels }
    }

    /// Label for an address, if it belongs to the table
    pub fn label(&self, address: Ipv4Addr) -> Option<&str> {
        self.labels.get(&address).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rewrite the known addresses of a single line.
    ///
    /// Only whole addresses are replaced, so `10.0.0.1` never matches inside
    /// `10.0.0.13`.
    pub fn relabel_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        IPV4_PATTERN.replace_all(line, |caps: &Captures| {
            let text = &caps[0];
            text.parse::<Ipv4Addr>()
                .ok()
                .and_then(|address| self.label(address))
                .unwrap_or(text)
                .to_string()
        })
    }

    /// Rewrite a whole trace. Lines are processed in parallel and keep their
    /// order and their original terminators (`\n` or `\r\n`).
    pub fn relabel(&self, trace: &str) -> String {
        let lines: Vec<Cow<'_, str>> = trace
            .par_split_inclusive('\n')
            .map(|line| self.relabel_line(line))
            .collect();
        lines.concat()
    }
}

/// Relabel `trace` against `table`
pub fn relabel_trace(trace: &str, table: &InterfaceTable) -> String {
    AddressRelabeler::from_table(table).relabel(trace)
}
