//! The huffman module builds a huffman tree from symbol frequencies and flattens it into a table
//! that a decoder can walk directly.
//!
//! The steps are:
//! - tree: merge the two lightest pending nodes until one root is left.
//! - serialize: write the tree as pre-order 6 byte records with explicit child offsets.
//! - codes: derive each symbol's bit code from the tree.
//! - table_reader: validate a serialized table and walk it to decode symbols.
//!
//! Everything here is a pure function of its input. The tree is only used to produce the table
//! and can be dropped as soon as the table is written.
//!

pub mod codes;
pub mod serialize;
pub mod table_reader;
pub mod tree;

pub use codes::{Code, CodeTable};
pub use serialize::serialize;
pub use table_reader::{Record, TableReader};
pub use tree::{build, Node, NodeData};

use crate::error::Result;

/// Build the tree for `freqs` and serialize it in one step.
pub fn build_table(freqs: &[u32]) -> Result<Vec<u8>> {
    Ok(serialize(&build(freqs)?))
}
