//! # GridTopo - Topology and traffic planner for grid network simulations
//!
//! This library turns a small set of line-oriented description files into
//! everything a packet-level simulator needs to run a grid-shaped
//! point-to-point network experiment.
//!
//! ## Overview
//!
//! Nodes sit on an `ny` by `nx` grid. An adjacency matrix says which node
//! pairs share a link; each link gets its own /30 subnet. Traffic is derived
//! from grid proximity: nodes close enough under the configured degree
//! exchange bursty coordination traffic, and every node broadcasts to one
//! nearby linked neighbor.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `input`: Loading and cross-validation of the matrix, coordinate, grid size and degree files
//! - `ip`: Subnet allocation and the per-node interface table
//! - `topology`: Links built from the adjacency matrix
//! - `traffic`: Flow and sink planning with start-time jitter
//! - `plan`: The serialized simulation plan
//! - `relabel`: Rewriting trace addresses into node-pair labels
//! - `config` / `config_loader`: YAML configuration and CLI overrides
//! - `orchestrator`: High-level orchestration of plan generation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use gridtopo::{config_loader, orchestrator, plan::PlanFormat};
//!
//! let config = config_loader::load_or_default(None)?;
//! let (plan, files) = orchestrator::generate(
//!     &config,
//!     Path::new("scratch/output"),
//!     Path::new("scratch/output"),
//!     PlanFormat::Yaml,
//! )?;
//!
//! println!("{} flows, interfaces in {:?}", plan.flows.len(), files.node_interfaces);
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Input Files
//!
//! ```text
//! 10_adjacency_matrix.txt   N rows of N 0/1 tokens
//! 10_node_coordinates.txt   one "x y" pair per node
//! 10_network_size.txt       ny, then nx
//! 10_n_degrees.txt          locality degree
//! ```
//!
//! ## Error Handling
//!
//! Input problems are reported as [`input::InputError`]; application-level
//! functions return `color_eyre::Result` with context attached.

pub mod config;
pub mod config_loader;
pub mod input;
pub mod ip;
pub mod orchestrator;
pub mod plan;
pub mod relabel;
pub mod topology;
pub mod traffic;
