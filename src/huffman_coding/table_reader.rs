//! Reads a serialized huffman table the way a decoder does: straight from the buffer.
//!
//! The buffer is checked once when the reader is created. After that every offset is known to
//! point at a record inside the buffer, so walking it can not go out of bounds or loop.

use log::{debug, trace};

use super::codes::{Code, CodeTable};
use super::serialize::{RECORD_BYTES, RECORD_WORDS};
use crate::error::{HuffError, Result};

/// One decoded node record. Offsets are word indexes from the start of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub value: u16,
    pub left: u16,
    pub right: u16,
}

impl Record {
    /// Leaves have no left child. (An internal node can never point left to word 0.)
    pub fn is_leaf(&self) -> bool {
        self.left == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableReader<'a> {
    buf: &'a [u8],
}

impl<'a> TableReader<'a> {
    /// Validate `buf` and wrap it for reading.
    pub fn new(buf: &'a [u8]) -> Result<Self> {
        let reader = TableReader { buf };
        reader.validate()?;
        debug!("Huffman table ok: {} records", reader.record_count());
        Ok(reader)
    }

    pub fn record_count(&self) -> usize {
        self.buf.len() / RECORD_BYTES
    }

    fn word(&self, w: usize) -> u16 {
        u16::from_be_bytes([self.buf[w * 2], self.buf[w * 2 + 1]])
    }

    /// Record starting at word `w`. `w` must be a record boundary inside the buffer.
    pub fn record(&self, w: usize) -> Record {
        Record {
            value: self.word(w),
            left: self.word(w + 1),
            right: self.word(w + 2),
        }
    }

    pub fn root(&self) -> Record {
        self.record(0)
    }

    /// Check the layout: whole records, pre-order left children, right children inside the buffer,
    /// and every record reachable from the root exactly once.
    fn validate(&self) -> Result<()> {
        let malformed = |word, reason| Err(HuffError::MalformedTable { word, reason });

        if self.buf.is_empty() {
            return malformed(0, "empty table");
        }
        if self.buf.len() % RECORD_BYTES != 0 {
            return malformed(self.buf.len() / 2, "length is not a whole number of records");
        }
        let words = self.buf.len() / 2;
        let mut seen = vec![false; self.record_count()];
        let mut stack = vec![0_usize];

        while let Some(w) = stack.pop() {
            if std::mem::replace(&mut seen[w / RECORD_WORDS], true) {
                return malformed(w, "record reached twice");
            }
            let rec = self.record(w);
            if rec.is_leaf() {
                if rec.right != 0 {
                    return malformed(w, "leaf with a right child");
                }
                if rec.value > u8::MAX as u16 {
                    return malformed(w, "leaf symbol does not fit in a byte");
                }
                continue;
            }
            let (left, right) = (rec.left as usize, rec.right as usize);
            if rec.value != 0 {
                return malformed(w, "internal record with a value");
            }
            if left != w + RECORD_WORDS {
                return malformed(w, "left child does not follow its parent");
            }
            if right <= left || right >= words || right % RECORD_WORDS != 0 {
                return malformed(w, "right child is not a record after the left child");
            }
            stack.push(right);
            stack.push(left);
        }

        match seen.iter().position(|&s| !s) {
            Some(r) => malformed(r * RECORD_WORDS, "record not reachable from the root"),
            None => Ok(()),
        }
    }

    /// Decode one symbol, pulling branch bits (true = right) from `next_bit` as needed.
    /// A table with a single symbol returns it without reading any bits.
    /// Returns None when the bits run out before a leaf is reached.
    pub fn decode_symbol(&self, mut next_bit: impl FnMut() -> Option<bool>) -> Option<u8> {
        let mut rec = self.root();
        while !rec.is_leaf() {
            let w = if next_bit()? { rec.right } else { rec.left };
            rec = self.record(w as usize);
        }
        Some(rec.value as u8)
    }

    /// Recover every symbol's code from the buffer alone.
    pub fn codes(&self) -> CodeTable {
        let mut table = CodeTable::default();
        let mut stack = vec![(0_usize, Code { bits: 0, len: 0 })];
        while let Some((w, code)) = stack.pop() {
            let rec = self.record(w);
            if rec.is_leaf() {
                trace!("symbol {} has code {}", rec.value, code);
                table.insert(rec.value as u8, code);
            } else {
                stack.push((rec.right as usize, code.push(true)));
                stack.push((rec.left as usize, code.push(false)));
            }
        }
        table
    }
}
