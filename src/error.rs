//! Error type shared by every stage of the compression pipeline.
//!
//! Each variant is fatal for the operation that raised it: nothing is
//! retried, and the caller decides what to do with partial output.

use std::io;

use thiserror::Error;

use crate::priority_list::ListErr;

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("byte source unavailable")]
    SourceUnavailable(#[source] io::Error),

    #[error("byte sink unavailable")]
    SinkUnavailable(#[source] io::Error),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("ambiguous code set: code for byte {symbol} overlaps code for byte {other}")]
    AmbiguousCodeSet { symbol: u8, other: u8 },

    #[error("payload ended mid-code after {decoded} decoded bytes")]
    TruncatedPayload { decoded: u64 },

    #[error("payload bit {bit} follows a branch with no assigned code")]
    InvalidCodePath { bit: u64 },

    #[error("byte {symbol} has no entry in the code table")]
    UncodedSymbol { symbol: u8 },

    #[error("code for byte {symbol} is {length} bits, more than a header can store")]
    CodeTooLong { symbol: u8, length: usize },

    #[error("priority list error: {0:?}")]
    List(ListErr),
}

impl From<ListErr> for HuffmanError {
    fn from(e: ListErr) -> Self {
        HuffmanError::List(e)
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;

impl HuffmanError {
    /// Reading a header or payload that stops early is a format problem, not
    /// an unavailable source.
    pub(crate) fn from_read(e: io::Error, what: &str) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            HuffmanError::MalformedHeader(format!("stream ended while reading {what}"))
        } else {
            HuffmanError::SourceUnavailable(e)
        }
    }
}
