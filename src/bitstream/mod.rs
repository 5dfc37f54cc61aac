//! The bitstream module packs huffman codes into bytes and reads them back one bit at a time.
//!
//! Bits are written and read most significant bit first, so a code's root-side bit always comes
//! first on the stream. Both halves are tuned for short codes (1-24 bits) but handle any length.
//!
pub mod bitpacker;
pub mod bitreader;
