//! Flattens a huffman tree into a table a decoder can walk without rebuilding the tree.
//!
//! Each node becomes a 6 byte record of three big-endian u16 words:
//!
//! ```text
//!   [value, left, right]
//! ```
//!
//! For a leaf, value is the symbol and both offsets are 0. For an internal node value is 0 and the
//! offsets are absolute word (2 byte) indexes of the two child records. Records are written in
//! pre-order, so a node's left child always follows it directly (left == own word + 3) and the
//! right child follows the whole left subtree.
//!
//! A leaf is recognized by left == 0, never by value == 0: no internal node can point at word 0
//! (the root), so a leaf for symbol 0 ([0, 0, 0]) stays unambiguous.

use log::{debug, trace};

use super::tree::{Node, NodeData};

/// Bytes per node record
pub const RECORD_BYTES: usize = 6;
/// Words per node record
pub const RECORD_WORDS: usize = RECORD_BYTES / 2;

/// Serialize the tree below `root` into a table of node records.
///
/// The table is exactly 6 * (2n - 1) bytes for n symbols (6 bytes for a single symbol).
pub fn serialize(root: &Node) -> Vec<u8> {
    let mut table = Vec::with_capacity(root.node_count() * RECORD_BYTES);
    write_node(root, &mut table);
    debug!(
        "Serialized {} node records ({} bytes)",
        table.len() / RECORD_BYTES,
        table.len()
    );
    table
}

/// Append the record for `node` and then its subtrees, in pre-order.
fn write_node(node: &Node, table: &mut Vec<u8>) {
    let word = table.len() / 2;
    match &node.node_data {
        NodeData::Leaf(sym) => {
            trace!("word {}: leaf {}", word, sym);
            put_record(table, *sym as u16, 0, 0);
        }
        NodeData::Kids(left, right) => {
            // Reserve our record, the children land right behind it
            put_record(table, 0, 0, 0);
            let left_word = word + RECORD_WORDS;
            write_node(left, table);
            let right_word = left_word + RECORD_WORDS * left.node_count();
            debug_assert_eq!(right_word, table.len() / 2);
            write_node(right, table);
            trace!("word {}: kids at {} and {}", word, left_word, right_word);
            patch_offsets(table, word, left_word as u16, right_word as u16);
        }
    }
}

fn put_record(table: &mut Vec<u8>, value: u16, left: u16, right: u16) {
    table.extend_from_slice(&value.to_be_bytes());
    table.extend_from_slice(&left.to_be_bytes());
    table.extend_from_slice(&right.to_be_bytes());
}

/// Backfill the child offsets of the internal record at `word`.
fn patch_offsets(table: &mut [u8], word: usize, left: u16, right: u16) {
    let at = word * 2;
    table[at + 2..at + 4].copy_from_slice(&left.to_be_bytes());
    table[at + 4..at + 6].copy_from_slice(&right.to_be_bytes());
}
