use log::debug;
use rayon::prelude::*;

use crate::error::{HuffError, Result};
use crate::huffman_coding::tree::ALPHABET_SIZE;

/// Inputs larger than this are counted in parallel.
const PARALLEL_MIN: usize = 64_000;
/// 16k is pretty much the sweet spot for chunk size.
const CHUNK_SIZE: usize = 16_000;

type Counts = [u64; ALPHABET_SIZE];

/// Returns a frequency count of the input data, indexed by byte value. Uses parallelism when the
/// data set is over 64k.
///
/// Fails with CountOverflow when a byte occurs more than u32::MAX times.
pub fn freqs(data: &[u8]) -> Result<Vec<u32>> {
    let counts = if data.len() > PARALLEL_MIN {
        data.par_chunks(CHUNK_SIZE)
            .fold(|| [0; ALPHABET_SIZE], tally)
            .reduce(|| [0; ALPHABET_SIZE], merge)
    } else {
        tally([0; ALPHABET_SIZE], data)
    };
    narrow(&counts)
}

fn tally(mut counts: Counts, chunk: &[u8]) -> Counts {
    chunk.iter().for_each(|&b| counts[b as usize] += 1);
    counts
}

fn merge(mut a: Counts, b: Counts) -> Counts {
    a.iter_mut().zip(b.iter()).for_each(|(x, y)| *x += y);
    a
}

/// Convert 64 bit tallies into the u32 table the tree builder takes.
fn narrow(counts: &[u64]) -> Result<Vec<u32>> {
    counts
        .iter()
        .enumerate()
        .map(|(sym, &count)| {
            u32::try_from(count).map_err(|_| {
                debug!("Symbol {} seen {} times", sym, count);
                HuffError::CountOverflow {
                    symbol: sym as u8,
                    count,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_count_test() {
        let f = freqs(b"AAABBCD").unwrap();
        assert_eq!(f.len(), 256);
        assert_eq!(f[b'A' as usize], 3);
        assert_eq!(f[b'B' as usize], 2);
        assert_eq!(f[b'C' as usize], 1);
        assert_eq!(f[b'D' as usize], 1);
        assert_eq!(f.iter().sum::<u32>(), 7);
    }

    #[test]
    fn empty_count_test() {
        assert!(freqs(&[]).unwrap().iter().all(|&f| f == 0));
    }

    #[test]
    fn parallel_matches_serial_test() {
        let data: Vec<u8> = (0..200_000_u32).map(|i| ((i * 7) % 251) as u8).collect();
        let par = freqs(&data).unwrap();
        let mut serial = vec![0_u32; 256];
        data.iter().for_each(|&b| serial[b as usize] += 1);
        assert_eq!(par, serial);
    }

    #[test]
    fn count_overflow_test() {
        let mut counts = [0_u64; ALPHABET_SIZE];
        counts[b'e' as usize] = u32::MAX as u64;
        assert_eq!(narrow(&counts).unwrap()[b'e' as usize], u32::MAX);

        // One more occurrence no longer fits and must not wrap to zero
        counts[b'e' as usize] += 1;
        assert!(matches!(
            narrow(&counts),
            Err(HuffError::CountOverflow {
                symbol: b'e',
                count: 4_294_967_296
            })
        ));
    }
}
