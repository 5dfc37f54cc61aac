use log::{debug, info};

use crate::bitstream::bitpacker::BitPacker;
use crate::error::{HuffError, Result};
use crate::huffman_coding::{build, serialize, CodeTable};
use crate::tools::freq_count::freqs;

/// A payload packed with huffman codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    /// Packed codes, the last byte padded with zero bits
    pub bytes: Vec<u8>,
    /// Number of meaningful bits in `bytes`
    pub bit_len: u64,
    /// Number of symbols packed. Needed to decode tables with a single (0 bit) symbol.
    pub symbols: usize,
}

/// Pack every byte of `data` with its code from `codes`.
pub fn compress(data: &[u8], codes: &CodeTable) -> Result<Packed> {
    let mut bp = BitPacker::new(data.len() / 2 + 1);
    for &byte in data {
        let code = codes.get(byte).ok_or(HuffError::UnknownSymbol(byte))?;
        bp.out_code(code);
    }
    let bit_len = bp.bit_len();
    bp.flush();
    debug!(
        "Packed {} symbols into {} bits {}",
        data.len(),
        bit_len,
        bp.loc()
    );
    Ok(Packed {
        bytes: bp.output,
        bit_len,
        symbols: data.len(),
    })
}

/// Everything produced while huffman coding one payload.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub freqs: Vec<u32>,
    /// The serialized tree
    pub table: Vec<u8>,
    pub codes: CodeTable,
    pub packed: Packed,
}

impl Encoded {
    /// Count, build, serialize and pack `data`.
    pub fn from_data(data: &[u8]) -> Result<Self> {
        let freqs = freqs(data)?;
        let root = build(&freqs)?;
        let table = serialize(&root);
        let codes = CodeTable::from_tree(&root);
        // The tree is no longer needed once the table and codes exist
        drop(root);
        let packed = compress(data, &codes)?;
        info!(
            "{} bytes -> {} byte table + {} bytes of codes",
            data.len(),
            table.len(),
            packed.bytes.len()
        );
        Ok(Encoded {
            freqs,
            table,
            codes,
            packed,
        })
    }
}
