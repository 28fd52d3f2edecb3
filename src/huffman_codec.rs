use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::bit_io::{BitPacker, BitUnpacker, PackedPayload};
use crate::code_table::CodeTable;
use crate::decode_tree::{DecodeTree, Step};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::header::{read_header, write_header};
use crate::hufftree::HuffmanTree;

/// Figures from one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSummary {
    pub input_bytes: u64,
    pub distinct_symbols: usize,
    pub payload_bits: u64,
    pub meaningful_bits: u8,
    pub output_bytes: u64,
}

/// Entry points for the two pipelines. Every call is independent: the
/// frequency table, tree and code table live only for that call.
pub struct HuffmanCodec;

impl HuffmanCodec {
    /// Compress everything `source` yields into `sink`.
    ///
    /// The sink must be seekable: the meaningful-bit byte sits in front of
    /// the payload and is patched once the payload has been written.
    pub fn compress<R: Read, W: Write + Seek>(
        source: &mut R,
        sink: &mut W,
    ) -> Result<CompressionSummary> {
        let mut input = Vec::new();
        source
            .read_to_end(&mut input)
            .map_err(HuffmanError::SourceUnavailable)?;

        let frequencies = FrequencyTable::from_bytes(&input);
        let table = match HuffmanTree::from_frequencies(&frequencies)? {
            Some(tree) => CodeTable::from_tree(&tree),
            None => CodeTable::new(),
        };
        log::debug!(
            "{} input bytes, {} distinct, longest code {} bits, {} payload bits expected",
            input.len(),
            table.len(),
            table.max_len(),
            table.encoded_bits(&frequencies)
        );

        let start = sink
            .stream_position()
            .map_err(HuffmanError::SinkUnavailable)?;

        let mut writer = BufWriter::new(&mut *sink);
        let placeholder = write_header(&mut writer, &table)?;

        let payload = pack_payload(&input, &table, &mut writer)?;
        writer.flush().map_err(HuffmanError::SinkUnavailable)?;
        drop(writer);

        let end = sink
            .stream_position()
            .map_err(HuffmanError::SinkUnavailable)?;
        patch_byte(sink, start + placeholder, payload.meaningful_bits)?;
        sink.seek(SeekFrom::Start(end))
            .map_err(HuffmanError::SinkUnavailable)?;

        let summary = CompressionSummary {
            input_bytes: input.len() as u64,
            distinct_symbols: table.len(),
            payload_bits: payload.bits,
            meaningful_bits: payload.meaningful_bits,
            output_bytes: end - start,
        };
        log::debug!("{summary:?}");
        Ok(summary)
    }

    /// Decode a container from `source` into `sink`. Returns the number of
    /// bytes written.
    pub fn decompress<R: Read, W: Write>(source: &mut R, sink: &mut W) -> Result<u64> {
        let mut reader = BufReader::new(source);
        let header = read_header(&mut reader)?;
        let tree = DecodeTree::from_codes(
            header.table.iter().map(|(symbol, code)| (symbol, code.as_bitslice())),
        )?;
        log::debug!(
            "header: {} codes, {} meaningful bits in last byte",
            header.table.len(),
            header.meaningful_bits
        );

        let mut unpacker = BitUnpacker::new(reader, header.meaningful_bits);

        if tree.is_empty() {
            return match unpacker.next_bit()? {
                None => Ok(0),
                Some(_) => Err(HuffmanError::MalformedHeader(
                    "payload present but code table is empty".to_string(),
                )),
            };
        }

        let mut writer = BufWriter::new(sink);
        let mut cursor = tree.cursor();
        let mut written = 0u64;

        while let Some(bit) = unpacker.next_bit()? {
            match cursor.step(bit) {
                Some(Step::Symbol(byte)) => {
                    writer
                        .write_all(&[byte])
                        .map_err(HuffmanError::SinkUnavailable)?;
                    written += 1;
                }
                Some(Step::Pending) => {}
                None => {
                    return Err(HuffmanError::InvalidCodePath {
                        bit: unpacker.bits_read() - 1,
                    });
                }
            }
        }

        if !cursor.at_root() {
            return Err(HuffmanError::TruncatedPayload { decoded: written });
        }

        writer.flush().map_err(HuffmanError::SinkUnavailable)?;
        log::debug!(
            "decoded {written} bytes from {} payload bits",
            unpacker.bits_read()
        );
        Ok(written)
    }

    pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
        let mut sink = Cursor::new(Vec::new());
        Self::compress(&mut Cursor::new(data), &mut sink)?;
        Ok(sink.into_inner())
    }

    pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Self::decompress(&mut Cursor::new(data), &mut out)?;
        Ok(out)
    }

    /// Compress the file at `input` into a new file at `output`. A failed run
    /// removes whatever was written to `output`.
    ///
    /// The whole input is read before `output` is opened, so the two paths
    /// may name the same file.
    pub fn compress_file(input: &Path, output: &Path) -> Result<CompressionSummary> {
        let data = fs::read(input).map_err(HuffmanError::SourceUnavailable)?;
        let mut sink = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(output)
            .map_err(HuffmanError::SinkUnavailable)?;

        let result = Self::compress(&mut Cursor::new(data), &mut sink)
            .and_then(|summary| sync(&sink).map(|_| summary));
        drop(sink);
        discard_on_error(result, output)
    }

    /// Decompress the file at `input` into `output`, with the same cleanup
    /// and same-path guarantees as [`HuffmanCodec::compress_file`].
    pub fn decompress_file(input: &Path, output: &Path) -> Result<u64> {
        let data = fs::read(input).map_err(HuffmanError::SourceUnavailable)?;
        let mut sink = File::create(output).map_err(HuffmanError::SinkUnavailable)?;

        let result = Self::decompress(&mut Cursor::new(data), &mut sink)
            .and_then(|written| sync(&sink).map(|_| written));
        drop(sink);
        discard_on_error(result, output)
    }
}

/// Encode every input byte with its code. Each byte must have an entry,
/// which holds whenever `table` was built from the same input.
fn pack_payload<W: Write>(input: &[u8], table: &CodeTable, sink: W) -> Result<PackedPayload> {
    let mut packer = BitPacker::new(sink);
    for &byte in input {
        let code = table
            .get(byte)
            .ok_or(HuffmanError::UncodedSymbol { symbol: byte })?;
        packer.push_code(code)?;
    }
    packer.finish()
}

fn patch_byte<W: Write + Seek>(sink: &mut W, offset: u64, value: u8) -> Result<()> {
    sink.seek(SeekFrom::Start(offset))
        .map_err(HuffmanError::SinkUnavailable)?;
    sink.write_all(&[value])
        .map_err(HuffmanError::SinkUnavailable)
}

fn sync(file: &File) -> Result<()> {
    file.sync_all().map_err(HuffmanError::SinkUnavailable)
}

fn discard_on_error<T>(result: Result<T>, output: &Path) -> Result<T> {
    if result.is_err() {
        log::warn!("removing incomplete output {}", output.display());
        if let Err(e) = fs::remove_file(output) {
            log::warn!("could not remove {}: {e}", output.display());
        }
    }
    result
}
