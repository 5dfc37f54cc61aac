//! The compression module applies a huffman table to a payload.
//!
//! Compression:
//! - Frequency count: count every byte value in the payload.
//! - Huffman tree: build the tree and serialize it to a table.
//! - Packing: write each byte's code to the bitstream.
//!
//! Decompression walks the serialized table directly, one bit at a time, and never rebuilds the
//! tree. The symbol count travels with the packed bits because a table holding a single symbol
//! uses 0 bit codes.
//!

pub mod compress;
pub mod decompress;
