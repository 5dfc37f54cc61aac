//! The tools module provides the helpers around the huffman core.
//!
//! The tools are:
//! - cli: Command line interface for huffpack.
//! - freq_count: Frequency count of a byte payload.
//!
pub mod cli;
pub mod freq_count;
