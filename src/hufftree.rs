use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::priority_list::{ListErr, PriorityList, Weighted};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(byte: u8, weight: u64) -> Self {
        HuffNode::Leaf { weight, byte }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// `a` was popped first and becomes the left (0) branch.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }
}

impl Weighted for HuffNode {
    fn weight(&self) -> u64 {
        HuffNode::weight(self)
    }
}

/// Optimal prefix-code tree built bottom-up from byte frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Build the tree for a frequency table, or `None` when no byte occurs.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Option<Self>> {
        let list = Self::leaf_list(frequencies);
        if list.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::build_from_list(list)?))
    }

    /// Seed the list by repeatedly taking the lightest remaining byte. Equal
    /// weights therefore enter in ascending byte order.
    pub fn leaf_list(frequencies: &FrequencyTable) -> PriorityList<HuffNode> {
        let mut remaining = *frequencies.weights();
        let mut list = PriorityList::new();

        while let Some(byte) = lightest(&remaining) {
            list.insert_ordered(HuffNode::new(byte, remaining[byte as usize]));
            remaining[byte as usize] = 0;
        }
        list
    }

    /// Merge the two lightest nodes until a single root remains.
    pub fn build_from_list(
        mut list: PriorityList<HuffNode>,
    ) -> std::result::Result<Self, ListErr> {
        let n = list.len().saturating_sub(1);
        for _ in 0..n {
            let x = list.pop_min()?;
            let y = list.pop_min()?;
            list.insert_ordered(HuffNode::merge(x, y));
        }
        let root = list.pop_min()?;

        Ok(HuffmanTree { root })
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &HuffNode) -> usize {
            match node {
                HuffNode::Leaf { .. } => 1,
                HuffNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }
}

/// Byte with the smallest nonzero weight; the lowest byte wins ties.
fn lightest(weights: &[u64; 256]) -> Option<u8> {
    weights
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w > 0)
        .min_by_key(|&(byte, &w)| (w, byte))
        .map(|(byte, _)| byte as u8)
}
