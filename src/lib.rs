//! # octocloud
//!
//! `octocloud` is a Rust library for indexing 3D point clouds in an octree, designed to be used
//! in Rust as well as compiled to WebAssembly (WASM). It answers axis-aligned box queries
//! ("all points inside this box") without scanning every point.
//!
//! ## Features
//!
//! - **Two construction strategies**: points can be inserted one at a time, with leaves split
//!   lazily when they overflow, or bulk loaded by partitioning the whole set in place.
//! - **Pruned range queries**: subtrees outside the query box are skipped, subtrees inside it
//!   are returned wholesale. Both strategies share the same query code.
//! - **Bounded height**: a maximum depth caps the tree regardless of how clustered the points are.
//! - **Generic payloads**: every point carries caller data, returned by reference from queries.
//! - **WASM-first**: Built with `wasm-bindgen` for use from JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```
//! use octocloud::{Octree, PointCloud, PointRecord};
//!
//! let mut octree = Octree::with_depth_and_capacity([0.0; 3], [1.0; 3], 8, 16).unwrap();
//! octree.insert(PointRecord::new([0.2, 0.3, 0.4], "a")).unwrap();
//! octree.insert(PointRecord::new([0.8, 0.8, 0.8], "b")).unwrap();
//!
//! let found = octree.select([0.0; 3], [0.5; 3]);
//! assert_eq!(found.len(), 1);
//! assert_eq!(*found[0].data(), "a");
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Octree`] struct. The engines behind it, [`IncrementalOctree`]
//! and [`BulkOctree`], and the brute-force [`LinearScan`] all implement [`PointCloud`].

mod algorithm;
mod bounds;
mod config;
mod error;
mod node;
mod octree;
mod query;
mod record;
pub mod sample;
mod wasm;

pub use algorithm::PointCloud;
pub use algorithm::bulk::BulkOctree;
pub use algorithm::incremental::IncrementalOctree;
pub use algorithm::linear::LinearScan;
pub use bounds::BoundingBox;
pub use bounds::Point;
pub use bounds::OCTANTS;
pub use config::OctreeConfig;
pub use error::OctreeError;
pub use error::Result;
pub use node::LeafInfo;
pub use node::TreeStats;
pub use octree::Octree;
pub use record::PointRecord;
pub use wasm::BoundingBox3D;
pub use wasm::OctreeWASM;
