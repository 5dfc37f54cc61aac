//! Derives the bit code of every symbol from a huffman tree.
//!
//! Going left adds a 0 bit, going right adds a 1 bit, and the bit nearest the root is the most
//! significant. A tree holding a single symbol gives that symbol a code of length 0: the encoder
//! writes nothing for it and the decoder returns the root symbol without reading any bits.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;

use super::tree::{Node, NodeData};

/// The bit code of one symbol. Only the low `len` bits of `bits` are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    /// Extend the code by one branch (false = left, true = right).
    pub fn push(self, right: bool) -> Code {
        Code {
            bits: (self.bits << 1) | right as u64,
            len: self.len + 1,
        }
    }

    /// Branch taken at each level, from the root down.
    pub fn branches(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |i| (self.bits >> i) & 1 == 1)
    }

    /// Is this code a prefix of (or equal to) `other`?
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.len == 0 {
            return write!(f, "-");
        }
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

/// Symbol to code lookup for every symbol present in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: FxHashMap<u8, Code>,
}

impl CodeTable {
    /// Walk the tree and record the code of every leaf.
    pub fn from_tree(root: &Node) -> Self {
        let mut table = CodeTable::default();
        table.collect(root, Code { bits: 0, len: 0 });
        table
    }

    fn collect(&mut self, node: &Node, code: Code) {
        match &node.node_data {
            NodeData::Kids(left, right) => {
                self.collect(left, code.push(false));
                self.collect(right, code.push(true));
            }
            NodeData::Leaf(sym) => {
                self.codes.insert(*sym, code);
            }
        }
    }

    pub(crate) fn insert(&mut self, sym: u8, code: Code) {
        self.codes.insert(sym, code);
    }

    pub fn get(&self, sym: u8) -> Option<Code> {
        self.codes.get(&sym).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        let mut syms: Vec<u8> = self.codes.keys().copied().collect();
        syms.sort_unstable();
        syms.into_iter().map(move |s| (s, self.codes[&s]))
    }

    /// Number of bits needed to code `freqs` with this table.
    pub fn encoded_bits(&self, freqs: &[u32]) -> u64 {
        self.codes
            .iter()
            .map(|(&s, c)| freqs.get(s as usize).copied().unwrap_or(0) as u64 * c.len as u64)
            .sum()
    }

    /// Kraft sum of the code lengths, as a fraction over 2^longest.
    /// Returns (numerator, denominator); a complete prefix code has numerator == denominator.
    pub fn kraft_sum(&self) -> (u128, u128) {
        let longest = self.codes.values().map(|c| c.len).max().unwrap_or(0);
        let numerator = self
            .codes
            .values()
            .map(|c| 1_u128 << (longest - c.len))
            .sum();
        (numerator, 1_u128 << longest)
    }
}

impl Display for CodeTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (sym, code) in self.iter() {
            if sym.is_ascii_graphic() {
                writeln!(f, "{:>3} '{}'  {:>2}  {}", sym, sym as char, code.len, code)?;
            } else {
                writeln!(f, "{:>3}      {:>2}  {}", sym, code.len, code)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::tree::{build, ALPHABET_SIZE};

    fn table(entries: &[(u8, u32)]) -> Vec<u32> {
        let mut freqs = vec![0_u32; ALPHABET_SIZE];
        entries.iter().for_each(|&(s, f)| freqs[s as usize] = f);
        freqs
    }

    #[test]
    fn golden_codes_test() {
        let freqs = table(&[(b'A', 3), (b'B', 2), (b'C', 1), (b'D', 1)]);
        let codes = CodeTable::from_tree(&build(&freqs).unwrap());
        let shown: Vec<(u8, String)> = codes.iter().map(|(s, c)| (s, c.to_string())).collect();
        assert_eq!(
            shown,
            vec![
                (b'A', "0".to_string()),
                (b'B', "10".to_string()),
                (b'C', "111".to_string()),
                (b'D', "110".to_string()),
            ]
        );
        assert_eq!(codes.encoded_bits(&freqs), 3 + 4 + 3 + 3);
    }

    #[test]
    fn single_symbol_code_test() {
        let codes = CodeTable::from_tree(&build(&table(&[(b'X', 5)])).unwrap());
        assert_eq!(codes.get(b'X'), Some(Code { bits: 0, len: 0 }));
        assert_eq!(codes.get(b'X').unwrap().to_string(), "-");
        assert_eq!(codes.get(b'Y'), None);
    }

    #[test]
    fn kraft_and_prefix_free_test() {
        let freqs: Vec<u32> = (0..200_u32).map(|i| (i * 13) % 41 + 1).collect();
        let codes = CodeTable::from_tree(&build(&freqs).unwrap());
        assert_eq!(codes.len(), 200);
        let (num, den) = codes.kraft_sum();
        assert_eq!(num, den);

        let all: Vec<(u8, Code)> = codes.iter().collect();
        for (a, ca) in &all {
            for (b, cb) in &all {
                if a != b {
                    assert!(!ca.is_prefix_of(cb), "{} is a prefix of {}", ca, cb);
                }
            }
        }
    }

    #[test]
    fn branches_test() {
        let code = Code { bits: 0b110, len: 3 };
        assert_eq!(code.branches().collect::<Vec<_>>(), vec![true, true, false]);
        let code = Code { bits: 0b01, len: 2 };
        assert_eq!(code.branches().collect::<Vec<_>>(), vec![false, true]);
    }
}
