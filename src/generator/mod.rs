//! Cell value generation and CSV emission.

pub mod cell;
pub mod writer;
