pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count of every byte value in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    weights: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            weights: [0; ALPHABET_SIZE],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        table.add(bytes);
        table
    }

    fn add(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.weights[byte as usize] += 1;
        }
    }

    pub fn weight(&self, symbol: u8) -> u64 {
        self.weights[symbol as usize]
    }

    pub fn weights(&self) -> &[u64; ALPHABET_SIZE] {
        &self.weights
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.weights.iter().filter(|&&w| w > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
