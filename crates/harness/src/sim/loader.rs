//! Memory image loading.
//!
//! This module turns program images into word writes on a circuit's write port. It performs:
//! 1. **Word images:** Parses `ADDRESS:VALUE` lines (`.dhex`), one 32-bit word per line, value
//!    written most significant byte first. A byte written as `xx` is undefined and its lane is
//!    left out of the write strobe.
//! 2. **Intel HEX:** Converts data, end-of-file, segment, and extended linear address records
//!    into the same word image.
//! 3. **Streaming:** Writes every word through the circuit's port, one clock step per word,
//!    while reset is held.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, info};

use super::session::Session;
use crate::circuit::Circuit;
use crate::common::constants::{BYTE_LANES, FULL_STROBE, LANE_BITS};
use crate::common::error::{HarnessError, HarnessResult};
use crate::signal::Port;

/// One word of a memory image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageWord {
    /// Byte address (4-byte aligned).
    pub addr: u32,
    /// Word value; undefined lanes read as zero.
    pub value: u32,
    /// Lanes holding defined bytes (bit `i` = byte `i`).
    pub strobe: u8,
}

/// Ordered list of words to preload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryImage {
    words: Vec<ImageWord>,
}

impl MemoryImage {
    /// Creates an empty image.
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Builds an image of fully defined words laid out from `base`.
    pub fn from_program(base: u32, program: &[u32]) -> Self {
        let mut image = Self::new();
        for (idx, &word) in program.iter().enumerate() {
            image.push(base + (idx as u32) * BYTE_LANES, word, FULL_STROBE as u8);
        }
        image
    }

    /// Appends a word.
    pub fn push(&mut self, addr: u32, value: u32, strobe: u8) {
        self.words.push(ImageWord {
            addr,
            value,
            strobe,
        });
    }

    /// The words in load order.
    pub fn words(&self) -> &[ImageWord] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` when the image holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads an image file; `.hex` files are Intel HEX, anything else is a word image.
    pub fn load(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let image = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("hex")) {
            Self::from_intel_hex(&text)?
        } else {
            Self::parse_dhex(&text)?
        };
        info!("loaded {} words from {}", image.len(), path.display());
        Ok(image)
    }

    /// Parses `ADDRESS:VALUE` word lines. Blank lines are skipped.
    pub fn parse_dhex(text: &str) -> HarnessResult<Self> {
        let mut image = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (addr, value) = line
                .split_once(':')
                .ok_or_else(|| HarnessError::image(line_no, "expected ADDRESS:VALUE"))?;
            let addr = u32::from_str_radix(addr.trim(), 16)
                .map_err(|e| HarnessError::image(line_no, format!("bad address: {e}")))?;
            if addr % BYTE_LANES != 0 {
                return Err(HarnessError::image(
                    line_no,
                    format!("address {addr:#x} is not word aligned"),
                ));
            }
            let (value, strobe) = parse_word(value.trim())
                .ok_or_else(|| HarnessError::image(line_no, format!("bad value '{}'", value.trim())))?;
            image.push(addr, value, strobe);
        }
        Ok(image)
    }

    /// Converts Intel HEX records into a word image.
    ///
    /// Supports record types 00 (data), 01 (end of file), 02 (extended segment address) and
    /// 04 (extended linear address); start-address records (03, 05) are ignored. Words with
    /// no defined byte are omitted.
    pub fn from_intel_hex(text: &str) -> HarnessResult<Self> {
        let mut bytes: BTreeMap<u32, u8> = BTreeMap::new();
        let mut offset: u32 = 0;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let record = parse_record(line).map_err(|reason| HarnessError::image(line_no, reason))?;
            match record.kind {
                0x00 => {
                    for (i, &byte) in record.data.iter().enumerate() {
                        let addr = offset.wrapping_add(u32::from(record.address) + i as u32);
                        let _ = bytes.insert(addr, byte);
                    }
                }
                0x01 => break,
                0x02 => offset = be_value(&record.data) << 4,
                0x04 => offset = be_value(&record.data) << 16,
                0x03 | 0x05 => {}
                kind => {
                    return Err(HarnessError::image(
                        line_no,
                        format!("unsupported record type {kind:02x}"),
                    ));
                }
            }
        }

        let mut words: BTreeMap<u32, (u32, u8)> = BTreeMap::new();
        for (addr, byte) in bytes {
            let lane = addr % BYTE_LANES;
            let entry = words.entry(addr - lane).or_insert((0, 0));
            entry.0 |= u32::from(byte) << (lane * LANE_BITS);
            entry.1 |= 1 << lane;
        }

        let mut image = Self::new();
        for (addr, (value, strobe)) in words {
            image.push(addr, value, strobe);
        }
        Ok(image)
    }

    /// Renders the image as word lines, undefined bytes as `xx`.
    pub fn to_dhex(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            let _ = write!(out, "{:06x}:", word.addr);
            for lane in (0..BYTE_LANES).rev() {
                if word.strobe & (1 << lane) != 0 {
                    let _ = write!(out, "{:02x}", (word.value >> (lane * LANE_BITS)) & 0xff);
                } else {
                    out.push_str("xx");
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Streams `image` into the circuit's write port while reset is held.
///
/// One clock step prepares the port (write disabled, full strobe, reset asserted), then one
/// step per word, then one step with write enable dropped. Reset stays asserted afterwards.
pub fn load_into<C: Circuit>(session: &mut Session<C>, image: &MemoryImage) -> HarnessResult<()> {
    debug!(words = image.len(), "loading memory image");
    session.drive(Port::WrEn, 0);
    session.drive(Port::WrStrobe, FULL_STROBE);
    session.drive(Port::ResetN, 0);
    session.eval()?;

    for word in image.words() {
        crate::tb_assert!(
            session,
            word.addr % BYTE_LANES == 0,
            "image word at {:#x} is not aligned",
            word.addr
        );
        let addr = session.schema().word_address(word.addr);
        session.drive(Port::WrEn, 1);
        session.drive(Port::Addr, addr);
        session.drive(Port::DataIn, u64::from(word.value));
        session.drive(Port::WrStrobe, u64::from(word.strobe));
        session.eval()?;
    }

    session.drive(Port::WrEn, 0);
    session.eval()
}

/// Parses a word value.
///
/// One to eight plain hex digits give a fully defined word. The eight-digit form may also
/// mark bytes `xx` (most significant byte first), leaving those lanes undefined.
fn parse_word(text: &str) -> Option<(u32, u8)> {
    if (1..=8).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_hexdigit()) {
        let value = u32::from_str_radix(text, 16).ok()?;
        return Some((value, FULL_STROBE as u8));
    }
    if text.len() != 8 || !text.is_ascii() {
        return None;
    }
    let mut value = 0;
    let mut strobe = 0;
    for (i, pair) in text.as_bytes().chunks(2).enumerate() {
        let lane = BYTE_LANES - 1 - i as u32;
        if pair.eq_ignore_ascii_case(b"xx") {
            continue;
        }
        let byte = u8::from_str_radix(std::str::from_utf8(pair).ok()?, 16).ok()?;
        value |= u32::from(byte) << (lane * LANE_BITS);
        strobe |= 1 << lane;
    }
    Some((value, strobe))
}

struct Record {
    address: u16,
    kind: u8,
    data: Vec<u8>,
}

fn parse_record(line: &str) -> Result<Record, String> {
    let hex = line
        .strip_prefix(':')
        .ok_or_else(|| "record does not start with ':'".to_string())?;
    if hex.len() % 2 != 0 || hex.len() < 10 || !hex.is_ascii() {
        return Err("record has a malformed length".to_string());
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("bad hex digit: {e}"))?;

    let count = usize::from(bytes[0]);
    if bytes.len() != count + 5 {
        return Err(format!("byte count {count} does not match record length"));
    }
    let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if sum != 0 {
        return Err("checksum mismatch".to_string());
    }
    Ok(Record {
        address: u16::from_be_bytes([bytes[1], bytes[2]]),
        kind: bytes[3],
        data: bytes[4..4 + count].to_vec(),
    })
}

fn be_value(data: &[u8]) -> u32 {
    data.iter().fold(0, |acc, &b| (acc << 8) | u32::from(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_bytes_drop_out_of_the_strobe() {
        let image = MemoryImage::parse_dhex("000100:12xx56xx\n\n000104:deadbeef\n").unwrap();
        assert_eq!(
            image.words(),
            [
                ImageWord { addr: 0x100, value: 0x1200_5600, strobe: 0b1010 },
                ImageWord { addr: 0x104, value: 0xdead_beef, strobe: 0xf },
            ]
        );
    }

    #[test]
    fn misaligned_address_names_the_line() {
        let err = MemoryImage::parse_dhex("000000:00000013\n000006:00000013\n").unwrap_err();
        assert!(matches!(err, HarnessError::MemoryImage { line: 2, .. }));
    }

    #[test]
    fn intel_hex_builds_little_endian_words() {
        // Four bytes at 0x0002 under an extended linear address of 0x0001_0000.
        let text = ":020000040001F9\n:04000200B70000F053\n:00000001FF\n";
        let image = MemoryImage::from_intel_hex(text).unwrap();
        assert_eq!(image.to_dhex(), "010000:00b7xxxx\n010004:xxxxf000\n");
    }

    #[test]
    fn intel_hex_rejects_bad_checksum() {
        let err = MemoryImage::from_intel_hex(":0400000013000000E8\n").unwrap_err();
        assert!(matches!(err, HarnessError::MemoryImage { line: 1, .. }));
    }
}
