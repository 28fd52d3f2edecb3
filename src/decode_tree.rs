//! Prefix tree rebuilt from `(code, symbol)` pairs on the decode side.
//!
//! Nodes live in a flat arena and refer to their children by index. The
//! decoder never sees weights, only the codes read from the header.

use bitvec::order::Msb0;
use bitvec::slice::BitSlice;

use crate::error::{HuffmanError, Result};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct DecodeNode {
    symbol: Option<u8>,
    children: [Option<usize>; 2],
}

impl DecodeNode {
    fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }

    fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }
}

/// Outcome of feeding one bit to a [`DecodeTree`] walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A leaf was reached; the cursor is back at the root.
    Symbol(u8),
    /// Still inside a code.
    Pending,
}

#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
}

impl DecodeTree {
    pub fn new() -> Self {
        DecodeTree {
            nodes: vec![DecodeNode::default()],
        }
    }

    pub fn from_codes<'a, I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, &'a BitSlice<u8, Msb0>)>,
    {
        let mut tree = Self::new();
        for (symbol, code) in codes {
            tree.insert(symbol, code)?;
        }
        Ok(tree)
    }

    /// Walk `code` from the root, creating internal nodes on demand, and
    /// mark the end of the path as a leaf for `symbol`.
    ///
    /// Fails if the path passes through an existing leaf, or ends on a node
    /// that is already a leaf or already has children.
    pub fn insert(&mut self, symbol: u8, code: &BitSlice<u8, Msb0>) -> Result<()> {
        if code.is_empty() {
            return Err(HuffmanError::MalformedHeader(format!(
                "byte {symbol} has an empty code"
            )));
        }

        let mut at = ROOT;
        for bit in code.iter().by_vals() {
            if let Some(other) = self.nodes[at].symbol {
                return Err(HuffmanError::AmbiguousCodeSet { symbol, other });
            }
            let side = bit as usize;
            at = match self.nodes[at].children[side] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(DecodeNode::default());
                    self.nodes[at].children[side] = Some(child);
                    child
                }
            };
        }

        let node = &self.nodes[at];
        if let Some(other) = node.symbol {
            return Err(HuffmanError::AmbiguousCodeSet { symbol, other });
        }
        if node.has_children() {
            let other = self.first_symbol_below(at).unwrap_or(symbol);
            return Err(HuffmanError::AmbiguousCodeSet { symbol, other });
        }
        self.nodes[at].symbol = Some(symbol);
        Ok(())
    }

    fn first_symbol_below(&self, from: usize) -> Option<u8> {
        let mut stack = vec![from];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i];
            if node.symbol.is_some() {
                return node.symbol;
            }
            stack.extend(node.children.iter().rev().flatten());
        }
        None
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count() == 0
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            tree: self,
            at: ROOT,
        }
    }
}

impl Default for DecodeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of a bit-by-bit walk through a [`DecodeTree`].
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tree: &'a DecodeTree,
    at: usize,
}

impl Cursor<'_> {
    /// Follow one branch (`false` = left, `true` = right). Returns `None`
    /// when the branch has no node behind it.
    pub fn step(&mut self, bit: bool) -> Option<Step> {
        let next = self.tree.nodes[self.at].children[bit as usize]?;
        match self.tree.nodes[next].symbol {
            Some(symbol) => {
                self.at = ROOT;
                Some(Step::Symbol(symbol))
            }
            None => {
                self.at = next;
                Some(Step::Pending)
            }
        }
    }

    pub fn at_root(&self) -> bool {
        self.at == ROOT
    }
}
