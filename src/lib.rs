//! # huffman_canon
//!
//! Canonical Huffman compression for arbitrary byte streams over the 256
//! single-byte symbols.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_canon::HuffmanCodec;
//!
//! let compressed = HuffmanCodec::compress_bytes(b"AAAABBBCCD")?;
//! let restored = HuffmanCodec::decompress_bytes(&compressed)?;
//! assert_eq!(restored, b"AAAABBBCCD");
//! # Ok::<(), huffman_canon::HuffmanError>(())
//! ```
//!
//! Files go through [`HuffmanCodec::compress_file`] and
//! [`HuffmanCodec::decompress_file`].

pub mod bit_io;
pub mod code_table;
pub mod decode_tree;
pub mod error;
pub mod frequency;
pub mod header;
pub mod huffman_codec;
pub mod hufftree;
pub mod priority_list;

// Re-export main types for convenience
pub use code_table::{Code, CodeTable};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{CompressionSummary, HuffmanCodec};
pub use hufftree::HuffmanTree;
