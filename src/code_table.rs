//! Symbol to bit-string mapping derived from a [`HuffmanTree`].
//!
//! Codes are assigned breadth-first from the root: the left branch appends a
//! `0`, the right branch a `1`. A tree made of a single leaf gets the 1-bit
//! code `0` so that every symbol costs at least one payload bit and the
//! decoder can count repetitions.

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::frequency::{FrequencyTable, ALPHABET_SIZE};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Root-to-leaf path, first branch in the first position.
pub type Code = BitVec<u8, Msb0>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn new() -> Self {
        CodeTable {
            codes: vec![None; ALPHABET_SIZE],
        }
    }

    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();

        if let HuffNode::Leaf { byte, .. } = tree.root {
            table.insert(byte, bitvec![u8, Msb0; 0]);
            return table;
        }

        let mut queue: VecDeque<(&HuffNode, Code)> = VecDeque::new();
        queue.push_back((&tree.root, Code::new()));

        while let Some((node, code)) = queue.pop_front() {
            match node {
                HuffNode::Leaf { byte, .. } => {
                    log::trace!("code for byte {byte:#04x}: {code:b}");
                    table.insert(*byte, code);
                }
                HuffNode::Internal { left, right, .. } => {
                    let mut left_code = code.clone();
                    left_code.push(false);
                    let mut right_code = code;
                    right_code.push(true);

                    queue.push_back((left, left_code));
                    queue.push_back((right, right_code));
                }
            }
        }
        table
    }

    pub fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populated entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// First pair of symbols where one code starts with the other, if any.
    pub fn find_overlap(&self) -> Option<(u8, u8)> {
        let entries: Vec<(u8, &Code)> = self.iter().collect();
        for (i, &(a, code_a)) in entries.iter().enumerate() {
            for &(b, code_b) in &entries[i + 1..] {
                let (short, long) = if code_a.len() <= code_b.len() {
                    (code_a, code_b)
                } else {
                    (code_b, code_a)
                };
                if long.starts_with(short.as_bitslice()) {
                    return Some((a, b));
                }
            }
        }
        None
    }

    pub fn is_prefix_free(&self) -> bool {
        self.find_overlap().is_none()
    }

    /// Payload length in bits when encoding data with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| frequencies.weight(symbol) * code.len() as u64)
            .sum()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table_for(data: &[u8]) -> CodeTable {
        let freq = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&freq).unwrap().unwrap();
        CodeTable::from_tree(&tree)
    }

    fn bits(s: &str) -> Code {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn assigns_expected_codes() {
        let table = table_for(b"AAAABBBCCD");
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(b'A'), Some(&bits("0")));
        assert_eq!(table.get(b'B'), Some(&bits("10")));
        assert_eq!(table.get(b'D'), Some(&bits("110")));
        assert_eq!(table.get(b'C'), Some(&bits("111")));
        assert!(table.get(b'E').is_none());
        assert!(table.is_prefix_free());
        let freq = FrequencyTable::from_bytes(b"AAAABBBCCD");
        assert_eq!(table.encoded_bits(&freq), 19);
    }

    #[test]
    fn single_leaf_gets_one_bit() {
        let table = table_for(b"qqqqqq");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'q'), Some(&bits("0")));
    }

    #[test]
    fn iterates_in_symbol_order() {
        let table = table_for(b"zyxzyz");
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'x', b'y', b'z']);
    }

    #[test]
    fn full_alphabet_is_prefix_free() {
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|b| std::iter::repeat(b).take(b as usize % 13 + 1))
            .collect();
        let table = table_for(&data);
        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn detects_overlap() {
        let mut table = CodeTable::new();
        table.insert(1, bits("10"));
        table.insert(2, bits("0"));
        table.insert(3, bits("101"));
        assert_eq!(table.find_overlap(), Some((1, 3)));
        assert!(!table.is_prefix_free());
    }
}
