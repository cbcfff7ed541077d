//! # shift_drawing
//!
//! Straight-line grid drawings of planar triangulations with the shift method of de Fraysseix,
//! Pach and Pollack.
//!
//! The input is a plane graph whose vertices carry positions of an existing crossing-free drawing.
//! The crate derives the combinatorial embedding from those positions, validates the graph,
//! computes a canonical ordering by peeling vertices off the outer face, and replays the order to
//! place every vertex on a `(2n - 4) x (n - 2)` integer grid.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).
//!
//! ```
//! use shift_drawing::{draw, input::from_str};
//!
//! let graph = from_str("0,0,0\n1,4,0\n2,2,4\n3,2,1\n0,1\n1,2\n2,0\n0,3\n1,3\n2,3").unwrap();
//! let drawing = draw(&graph).unwrap();
//! assert_eq!(drawing.coordinates, vec![(0, 0), (4, 0), (2, 2), (2, 1)]);
//! ```

pub mod config;
pub mod debugging;
pub mod drawing;
pub mod drawing_blocks;
pub mod embedding;
mod embedding_blocks;
pub mod error;
pub mod input;
pub mod testing;
pub mod types;
pub mod validity;

pub use config::Config;
pub use drawing::{Drawing, Session, Step, draw};
pub use error::Error;
pub use types::{GridPoint, PlaneGraph, Vertex};
