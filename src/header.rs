//! Container header: the code table plus the meaningful-bit count of the
//! last payload byte.
//!
//! ```text
//! u16 LE   symbol_count
//! repeat symbol_count:
//!     u8   symbol
//!     u8   bit_length (1-255)
//!     [u8] bit_length bytes, each b'0' or b'1'
//! u8       meaningful bits in the last payload byte (1-8)
//! ```

use std::io::{Read, Write};

use crate::code_table::{Code, CodeTable};
use crate::error::{HuffmanError, Result};
use crate::frequency::ALPHABET_SIZE;

pub const MAX_CODE_LEN: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub table: CodeTable,
    pub meaningful_bits: u8,
}

/// Length in bytes of the header describing `table`.
pub fn header_len(table: &CodeTable) -> u64 {
    let records: u64 = table.iter().map(|(_, code)| 2 + code.len() as u64).sum();
    2 + records + 1
}

/// Write the code table followed by a placeholder for the meaningful-bit
/// count. Returns the offset of the placeholder from the start of the header.
pub fn write_header<W: Write>(writer: &mut W, table: &CodeTable) -> Result<u64> {
    let symbol_count = table.len() as u16;
    writer
        .write_all(&symbol_count.to_le_bytes())
        .map_err(HuffmanError::SinkUnavailable)?;
    let mut offset = 2u64;

    for (symbol, code) in table.iter() {
        if code.len() > MAX_CODE_LEN {
            return Err(HuffmanError::CodeTooLong {
                symbol,
                length: code.len(),
            });
        }
        let mut record = Vec::with_capacity(2 + code.len());
        record.push(symbol);
        record.push(code.len() as u8);
        record.extend(code.iter().map(|bit| if *bit { b'1' } else { b'0' }));

        writer
            .write_all(&record)
            .map_err(HuffmanError::SinkUnavailable)?;
        offset += record.len() as u64;
    }

    writer
        .write_all(&[0u8])
        .map_err(HuffmanError::SinkUnavailable)?;

    log::debug!(
        "wrote header for {} symbols, {} bytes",
        symbol_count,
        offset + 1
    );
    Ok(offset)
}

pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut count_bytes = [0u8; 2];
    reader
        .read_exact(&mut count_bytes)
        .map_err(|e| HuffmanError::from_read(e, "symbol count"))?;
    let count = u16::from_le_bytes(count_bytes) as usize;
    if count > ALPHABET_SIZE {
        return Err(HuffmanError::MalformedHeader(format!(
            "symbol count {count} exceeds alphabet size"
        )));
    }

    let mut table = CodeTable::new();
    for _ in 0..count {
        let mut record = [0u8; 2];
        reader
            .read_exact(&mut record)
            .map_err(|e| HuffmanError::from_read(e, "code record"))?;
        let [symbol, bit_length] = record;

        if bit_length == 0 {
            return Err(HuffmanError::MalformedHeader(format!(
                "byte {symbol} has an empty code"
            )));
        }
        if table.get(symbol).is_some() {
            return Err(HuffmanError::MalformedHeader(format!(
                "byte {symbol} appears twice"
            )));
        }

        let mut raw = vec![0u8; bit_length as usize];
        reader
            .read_exact(&mut raw)
            .map_err(|e| HuffmanError::from_read(e, "code bits"))?;
        table.insert(symbol, parse_code(symbol, &raw)?);
    }

    let mut meaningful = [0u8; 1];
    reader
        .read_exact(&mut meaningful)
        .map_err(|e| HuffmanError::from_read(e, "meaningful bit count"))?;
    let meaningful_bits = meaningful[0];
    if !(1..=8).contains(&meaningful_bits) {
        return Err(HuffmanError::MalformedHeader(format!(
            "meaningful bit count {meaningful_bits} outside 1..=8"
        )));
    }

    Ok(Header {
        table,
        meaningful_bits,
    })
}

fn parse_code(symbol: u8, raw: &[u8]) -> Result<Code> {
    raw.iter()
        .map(|&b| match b {
            b'0' => Ok(false),
            b'1' => Ok(true),
            other => Err(HuffmanError::MalformedHeader(format!(
                "invalid bit {other:#04x} in code for byte {symbol}"
            ))),
        })
        .collect()
}
