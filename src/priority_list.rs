use std::collections::VecDeque;

/// Anything the priority list can order.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListErr {
    ListUnderflow,
}

/// Ascending list of nodes keyed by weight.
///
/// Insertion scans for the first element heavier than the new one, so equal
/// weights leave in the order they arrived. The alphabet tops out at 256
/// leaves, which keeps the linear scan cheap and the order easy to audit.
#[derive(Debug, Clone)]
pub struct PriorityList<T> {
    elements: VecDeque<T>,
}

impl<T> PriorityList<T> {
    pub fn new() -> Self {
        PriorityList {
            elements: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.elements.front()
    }

    pub fn peek_max(&self) -> Option<&T> {
        self.elements.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }
}

impl<T: Weighted> PriorityList<T> {
    pub fn insert_ordered(&mut self, value: T) {
        let weight = value.weight();
        // first slot whose weight is strictly greater
        let pos = self.elements.partition_point(|e| e.weight() <= weight);
        self.elements.insert(pos, value);
    }

    pub fn pop_min(&mut self) -> Result<T, ListErr> {
        self.elements.pop_front().ok_or(ListErr::ListUnderflow)
    }

    pub fn valid_order(&self) -> bool {
        self.elements
            .iter()
            .zip(self.elements.iter().skip(1))
            .all(|(a, b)| a.weight() <= b.weight())
    }
}

impl<T> Default for PriorityList<T> {
    fn default() -> Self {
        Self::new()
    }
}
