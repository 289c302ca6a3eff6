//! Content normalization — the exact bytes the bank's verifier hashes.
//!
//! Two outputs are derived from a sealer's content:
//!
//! ```text
//! formatted  = truncate_first_line(remove_blank_rows(ensure_crlf(content)))
//! normalized = normalize_bytes(formatted)
//! ```
//!
//! The steps are order-sensitive. Line structure is positional in the
//! file format, so the signed payload drops CR and LF entirely, and any
//! byte outside printable ASCII is folded either through the fixed
//! Swedish replacement table or onto the sentinel byte 195.
//!
//! All functions work on ISO-8859-1 bytes.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::constants::RECORD_WIDTH;

/// Lowest byte passed through unchanged.
pub const NORM_LOWER_LIMIT: u8 = 32;

/// Highest byte passed through unchanged.
pub const NORM_UPPER_LIMIT: u8 = 126;

/// Replacement for out-of-range bytes missing from [`SPECIAL_REPLACEMENTS`].
pub const OUT_OF_RANGE_REPLACEMENT: u8 = 195;

const CR: u8 = b'\r';
const LF: u8 = b'\n';
const CRLF: &[u8] = b"\r\n";

/// Swedish letters folded into the punctuation slots national ASCII
/// variants reserved for them (`É`→`@`, `Ä`→`[`, ... `ü`→`~`).
pub const SPECIAL_REPLACEMENTS: [(u8, u8); 10] = [
    (201, 64),
    (196, 91),
    (214, 92),
    (197, 93),
    (220, 94),
    (233, 96),
    (228, 123),
    (246, 124),
    (229, 125),
    (252, 126),
];

// A CRLF, any run of blank-ish bytes (which may span further CRLFs),
// then a closing CRLF. Whitespace class is [\t\n\f\r ].
static BLANK_ROWS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n[\t\n\x0C\r ]*\r\n").expect("blank-row pattern is a valid regex")
});

/// Look `byte` up in [`SPECIAL_REPLACEMENTS`].
pub fn special_replacement(byte: u8) -> Option<u8> {
    SPECIAL_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == byte)
        .map(|(_, to)| *to)
}

/// Normalize a single byte. `None` means the byte is dropped (CR, LF).
pub fn normalize_byte(byte: u8) -> Option<u8> {
    match byte {
        CR | LF => None,
        NORM_LOWER_LIMIT..=NORM_UPPER_LIMIT => Some(byte),
        _ => Some(special_replacement(byte).unwrap_or(OUT_OF_RANGE_REPLACEMENT)),
    }
}

/// Normalize every byte, dropping CR and LF.
pub fn normalize_bytes(input: &[u8]) -> Vec<u8> {
    input.iter().copied().filter_map(normalize_byte).collect()
}

/// Unify line endings: CRLF and bare CR become LF, then every LF becomes CRLF.
pub fn ensure_crlf(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + input.len() / RECORD_WIDTH + 2);
    let mut bytes = input.iter().copied().peekable();
    while let Some(byte) = bytes.next() {
        match byte {
            CR => {
                bytes.next_if_eq(&LF);
                out.extend_from_slice(CRLF);
            }
            LF => out.extend_from_slice(CRLF),
            _ => out.push(byte),
        }
    }
    out
}

/// Collapse runs of blank rows into one line break and strip trailing breaks.
///
/// Expects CRLF line endings (run [`ensure_crlf`] first). Only CR and LF
/// are trimmed from the end; a trailing row of spaces survives.
pub fn remove_blank_rows(input: &[u8]) -> Vec<u8> {
    let collapsed = BLANK_ROWS.replace_all(input, CRLF);
    let keep = collapsed
        .iter()
        .rposition(|b| !matches!(*b, CR | LF))
        .map_or(0, |last| last + 1);
    collapsed[..keep].to_vec()
}

/// Cut the first row down to one record width if it is longer.
pub fn truncate_first_line(input: &[u8]) -> Vec<u8> {
    let first_end = input
        .windows(CRLF.len())
        .position(|w| w == CRLF)
        .unwrap_or(input.len());
    if first_end <= RECORD_WIDTH {
        return input.to_vec();
    }

    let mut out = Vec::with_capacity(input.len() - (first_end - RECORD_WIDTH));
    out.extend_from_slice(&input[..RECORD_WIDTH]);
    out.extend_from_slice(&input[first_end..]);
    out
}

/// Format content for sealing: CRLF endings, no blank rows, first row
/// at most one record wide.
pub fn format_content(input: &[u8]) -> Vec<u8> {
    let crlf = ensure_crlf(input);
    let compact = remove_blank_rows(&crlf);
    truncate_first_line(&compact)
}

/// Full pipeline: format, then normalize every byte. This is the HMAC input.
pub fn normalize_content(input: &[u8]) -> Vec<u8> {
    normalize_bytes(&format_content(input))
}
