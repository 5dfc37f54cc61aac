//! Huffman code tables that decoders can walk directly.
//!
//! Builds an optimal prefix code from byte frequencies and serializes the code tree as a flat
//! table of fixed size node records with explicit child offsets. A decoder walks the table from
//! the first record, following one offset per input bit, until it reaches a leaf. It never has to
//! rebuild the tree.
//!
//! Basic usage:
//!
//! ```
//! use huffpack::{huffman_coding::build_table, tools::freq_count::freqs};
//!
//! let table = build_table(&freqs(b"AAABBCD").unwrap()).unwrap();
//! assert_eq!(table.len(), 6 * 7);
//! ```
//!
//! The command line tool writes the table for a file:
//!
//! `$> huffpack test.txt`
//!
//! This creates test.txt.hft next to the input.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{HuffError, Result};
