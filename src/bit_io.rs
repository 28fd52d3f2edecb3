use std::io::{self, Bytes, Read, Write};
use std::iter::Peekable;

use bitvec::order::Msb0;
use bitvec::slice::BitSlice;

use crate::error::{HuffmanError, Result};

/// What the packer produced once flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedPayload {
    pub bytes: u64,
    pub bits: u64,
    /// Bits of the final byte that belong to the stream (1-8). An empty or
    /// byte-aligned payload reports 8.
    pub meaningful_bits: u8,
}

/// Packs variable-length codes into bytes, most significant bit first.
#[derive(Debug)]
pub struct BitPacker<W: Write> {
    sink: W,
    accumulator: u8,
    held: u8,
    bytes: u64,
    bits: u64,
}

impl<W: Write> BitPacker<W> {
    pub fn new(sink: W) -> Self {
        BitPacker {
            sink,
            accumulator: 0,
            held: 0,
            bytes: 0,
            bits: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) -> Result<()> {
        self.accumulator = (self.accumulator << 1) | bit as u8;
        self.held += 1;
        self.bits += 1;

        if self.held == 8 {
            self.emit()?;
        }
        Ok(())
    }

    pub fn push_code(&mut self, code: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in code.iter().by_vals() {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    fn emit(&mut self) -> Result<()> {
        self.sink
            .write_all(&[self.accumulator])
            .map_err(HuffmanError::SinkUnavailable)?;
        self.bytes += 1;
        self.accumulator = 0;
        self.held = 0;
        Ok(())
    }

    /// Zero-pad and write any partial byte, returning the payload summary.
    pub fn finish(mut self) -> Result<PackedPayload> {
        let meaningful_bits = if self.held > 0 {
            let held = self.held;
            self.accumulator <<= 8 - held;
            self.emit()?;
            held
        } else {
            8
        };

        Ok(PackedPayload {
            bytes: self.bytes,
            bits: self.bits,
            meaningful_bits,
        })
    }
}

/// Reads bits back out of a payload, most significant bit first, dropping
/// the padding of the final byte.
///
/// One byte of lookahead tells the unpacker which byte is the last, so the
/// payload length does not need to be known up front.
pub struct BitUnpacker<R: Read> {
    bytes: Peekable<Bytes<R>>,
    current: u8,
    remaining: u8,
    meaningful_last: u8,
    bits_read: u64,
}

impl<R: Read> BitUnpacker<R> {
    pub fn new(source: R, meaningful_last: u8) -> Self {
        BitUnpacker {
            bytes: source.bytes().peekable(),
            current: 0,
            remaining: 0,
            meaningful_last,
            bits_read: 0,
        }
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    pub fn next_bit(&mut self) -> Result<Option<bool>> {
        while self.remaining == 0 {
            match self.bytes.next() {
                None => return Ok(None),
                Some(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Some(Err(e)) => return Err(HuffmanError::SourceUnavailable(e)),
                Some(Ok(byte)) => {
                    self.current = byte;
                    self.remaining = if self.bytes.peek().is_none() {
                        self.meaningful_last
                    } else {
                        8
                    };
                }
            }
        }

        let bit = self.current & 0x80 != 0;
        self.current <<= 1;
        self.remaining -= 1;
        self.bits_read += 1;
        Ok(Some(bit))
    }
}

impl<R: Read> Iterator for BitUnpacker<R> {
    type Item = Result<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_bit().transpose()
    }
}

#[cfg(test)]
mod test {
    use bitvec::prelude::*;

    use super::*;

    fn pack(codes: &[&str]) -> (Vec<u8>, PackedPayload) {
        let mut out = Vec::new();
        let mut packer = BitPacker::new(&mut out);
        for code in codes {
            let bits: BitVec<u8, Msb0> = code.chars().map(|c| c == '1').collect();
            packer.push_code(&bits).unwrap();
        }
        let summary = packer.finish().unwrap();
        (out, summary)
    }

    fn unpack(bytes: &[u8], meaningful: u8) -> String {
        BitUnpacker::new(bytes, meaningful)
            .map(|b| if b.unwrap() { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn packs_msb_first_with_padding() {
        let (bytes, summary) = pack(&["1", "01", "110"]);
        assert_eq!(bytes, vec![0b1011_1000]);
        assert_eq!(summary.bits, 6);
        assert_eq!(summary.bytes, 1);
        assert_eq!(summary.meaningful_bits, 6);
    }

    #[test]
    fn aligned_payload_reports_eight() {
        let (bytes, summary) = pack(&["1111", "0000", "10101010"]);
        assert_eq!(bytes, vec![0xF0, 0xAA]);
        assert_eq!(summary.meaningful_bits, 8);
    }

    #[test]
    fn empty_payload() {
        let (bytes, summary) = pack(&[]);
        assert!(bytes.is_empty());
        assert_eq!(
            summary,
            PackedPayload {
                bytes: 0,
                bits: 0,
                meaningful_bits: 8
            }
        );
        assert_eq!(unpack(&bytes, 8), "");
    }

    #[test]
    fn unpacker_ignores_padding() {
        assert_eq!(unpack(&[0b1011_1000], 6), "101110");
        assert_eq!(unpack(&[0xFF, 0b1000_0000], 1), "111111111");
        assert_eq!(unpack(&[0x0F, 0xF0], 8), "0000111111110000");
    }

    #[test]
    fn counts_bits_read() {
        let mut unpacker = BitUnpacker::new(&[0xAAu8, 0x80][..], 2);
        while unpacker.next_bit().unwrap().is_some() {}
        assert_eq!(unpacker.bits_read(), 10);
    }
}
