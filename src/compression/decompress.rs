use std::io::Read;

use log::{debug, error};

use super::compress::{Encoded, Packed};
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::TableReader;

/// Decode `packed` by walking the serialized huffman `table`.
///
/// Exactly `packed.symbols` symbols are decoded; padding bits after the last code are ignored.
pub fn decompress(table: &[u8], packed: &Packed) -> Result<Vec<u8>> {
    decompress_from(table, packed.bytes.as_slice(), packed.bit_len, packed.symbols)
}

/// Decode `symbols` symbols from the first `bit_len` bits read from `source`.
pub fn decompress_from<R: Read>(
    table: &[u8],
    source: R,
    bit_len: u64,
    symbols: usize,
) -> Result<Vec<u8>> {
    let reader = TableReader::new(table)?;
    let mut br = BitReader::new(source);
    let mut bits_left = bit_len;
    let mut out = Vec::with_capacity(symbols);

    while out.len() < symbols {
        let sym = reader.decode_symbol(|| {
            if bits_left == 0 {
                return None;
            }
            bits_left -= 1;
            br.bool_bit()
        });
        match sym {
            Some(sym) => out.push(sym),
            None => {
                if let Some(e) = br.take_error() {
                    return Err(HuffError::Io(e));
                }
                error!("Encoded stream ended at {}", br.loc());
                return Err(HuffError::UnexpectedEof { decoded: out.len() });
            }
        }
    }
    debug!("Decoded {} symbols, {} bits unused", out.len(), bits_left);
    Ok(out)
}

/// Decode `enc` through its serialized table and check that it gives back `data`.
pub fn check_round_trip(enc: &Encoded, data: &[u8]) -> Result<()> {
    let back = decompress(&enc.table, &enc.packed)?;
    if back == data {
        return Ok(());
    }
    // First differing byte, or the end of the shorter one
    let offset = back
        .iter()
        .zip(data)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| back.len().min(data.len()));
    error!("Round trip differs from the input at byte {}", offset);
    Err(HuffError::RoundTripMismatch { offset })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_test() {
        let data = b"this is a test of the huffman table walker, with some repeats: aaaaaaaabbbb";
        let enc = Encoded::from_data(data).unwrap();
        assert_eq!(decompress(&enc.table, &enc.packed).unwrap(), data.to_vec());
    }

    #[test]
    fn all_bytes_round_trip_test() {
        let data: Vec<u8> = (0..100_000_u64)
            .map(|i| ((i * i + 3 * i) % 256) as u8)
            .collect();
        let enc = Encoded::from_data(&data).unwrap();
        assert_eq!(decompress(&enc.table, &enc.packed).unwrap(), data);
    }

    #[test]
    fn zero_bytes_round_trip_test() {
        let data = [0_u8, 0, 0, 0, 1, 2, 0, 1];
        let enc = Encoded::from_data(&data).unwrap();
        assert_eq!(decompress(&enc.table, &enc.packed).unwrap(), data.to_vec());
    }

    #[test]
    fn single_symbol_round_trip_test() {
        let enc = Encoded::from_data(b"XXXXX").unwrap();
        assert_eq!(decompress(&enc.table, &enc.packed).unwrap(), b"XXXXX".to_vec());
    }

    #[test]
    fn truncated_stream_test() {
        let enc = Encoded::from_data(b"AAABBCD").unwrap();
        let mut packed = enc.packed.clone();
        // Drop the last code (D = 110)
        packed.bit_len -= 3;
        assert!(matches!(
            decompress(&enc.table, &packed),
            Err(HuffError::UnexpectedEof { decoded: 6 })
        ));
    }

    #[test]
    fn bad_table_test() {
        let enc = Encoded::from_data(b"AAABBCD").unwrap();
        assert!(matches!(
            decompress(&enc.table[..12], &enc.packed),
            Err(HuffError::MalformedTable { .. })
        ));
    }

    #[test]
    fn round_trip_check_test() {
        let enc = Encoded::from_data(b"AAABBCD").unwrap();
        assert!(check_round_trip(&enc, b"AAABBCD").is_ok());
        assert!(matches!(
            check_round_trip(&enc, b"AAABBDC"),
            Err(HuffError::RoundTripMismatch { offset: 5 })
        ));
        assert!(matches!(
            check_round_trip(&enc, b"AAABBCDD"),
            Err(HuffError::RoundTripMismatch { offset: 7 })
        ));
    }

    /// Gives out `good` bytes, then fails every read.
    struct Failing<'a> {
        good: &'a [u8],
    }

    impl Read for Failing<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.good.is_empty() {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "device lost"));
            }
            self.good.read(buf)
        }
    }

    #[test]
    fn read_error_is_not_eof_test() {
        let mut data = vec![b'a'; 3000];
        data.extend_from_slice(b"bc");
        let enc = Encoded::from_data(&data).unwrap();
        let source = Failing {
            good: &enc.packed.bytes[..100],
        };
        assert!(matches!(
            decompress_from(&enc.table, source, enc.packed.bit_len, enc.packed.symbols),
            Err(HuffError::Io(_))
        ));
    }
}
