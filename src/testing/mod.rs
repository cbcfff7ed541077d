//! Graph generators and geometric checks shared by the tests and demos.

pub mod crossings;
pub mod graph_enumerator;
pub mod grids;
pub mod triangulations;
