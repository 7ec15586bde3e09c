//! Text decoding shared by the decode and scan passes.
//!
//! `.strings` files are usually UTF-16 with a BOM, but UTF-8 files and BOM-less
//! UTF-16 files exported by older tools are common too.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, Cursor, Read},
    path::Path,
};

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::DecodeError;

/// Number of leading bytes inspected when guessing a BOM-less encoding.
const SNIFF_LEN: usize = 512;

/// Guesses UTF-16 without a BOM from the placement of NUL bytes.
///
/// Mostly-ASCII UTF-16 text has a zero in every other byte; UTF-8 text never
/// contains NUL.
fn sniff_bomless_utf16(bytes: &[u8]) -> Option<&'static Encoding> {
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];
    let units = sample.len() / 2;
    if units == 0 {
        return None;
    }

    let even_nuls = sample.iter().step_by(2).filter(|b| **b == 0).count();
    let odd_nuls = sample.iter().skip(1).step_by(2).filter(|b| **b == 0).count();

    if even_nuls == 0 && odd_nuls * 2 > units {
        Some(UTF_16LE)
    } else if odd_nuls == 0 && even_nuls * 2 > units {
        Some(UTF_16BE)
    } else {
        None
    }
}

/// Strictly decodes catalog bytes into text.
///
/// Any malformed sequence is an error; nothing is replaced.
pub fn decode_bytes(bytes: &[u8]) -> Result<String, DecodeError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (sniff_bomless_utf16(bytes).unwrap_or(UTF_8), bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or(DecodeError::InvalidEncoding {
            encoding: encoding.name(),
        })
}

/// Reads a file as text, detecting its encoding.
///
/// BOM-marked files are transcoded to UTF-8, BOM-less UTF-16 is detected from
/// the first bytes, and anything else must already be valid UTF-8.
pub fn read_text<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut file = File::open(path)?;

    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    let fallback = sniff_bomless_utf16(&head);

    // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .encoding(fallback)
        .bom_override(true)
        .build(Cursor::new(head).chain(file));

    let mut text = String::new();
    decoder.read_to_string(&mut text)?;
    Ok(text)
}
