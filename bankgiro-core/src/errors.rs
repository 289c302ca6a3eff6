//! Error types for bankgiro-core.
//!
//! One enum per layer, plus [`BankgiroError`] for callers that drive the
//! whole pipeline. Fatal parse errors are [`ParseError`]; row-level
//! problems that do not stop parsing are [`SectionIssue`] values stored
//! on the section itself.
//!
//! Display strings are part of the diagnostic surface and are pinned by
//! `tests/conformance/error_display.rs`.

/// Fatal structural error. Parsing stops, but the parser still hands
/// back whatever it had assembled (see [`crate::parse::PartialParse`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input could not be split into more than one row.
    #[error("could not split the file into rows: only one row present")]
    SingleRow,

    /// A section start row matched no registry entry.
    #[error("no matching section type found (line {line})")]
    NoMatchingSectionType { line: usize },

    /// A row outside any section did not start a new section.
    #[error("no section start found where there should be one (line {line})")]
    MissingSectionStart { line: usize },

    /// A second HMAC header row was found.
    #[error("multiple hmac start lines found (line {line})")]
    MultipleHmacStart { line: usize },

    /// The file has an HMAC header but does not end with an HMAC footer.
    #[error("hmac never ended")]
    HmacNeverEnded,

    /// The last section has no end row.
    #[error("section never ended")]
    SectionNeverEnded,
}

/// Non-fatal problem with a single row, recorded on its section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionIssue {
    /// Row is not exactly one record wide.
    #[error("Invalid line length: {length} - *{row}*")]
    InvalidLineLength { length: usize, row: String },

    /// Row's record code is not allowed in this section type.
    #[error("Invalid section found: {code}")]
    InvalidSubsection { code: String },
}

/// Sealing precondition or verification failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SealError {
    /// Key is not valid hex.
    #[error("invalid key provided: {0}")]
    InvalidKey(String),

    /// Key decodes to the wrong number of bytes.
    #[error("invalid key length: {actual}, expected 16")]
    InvalidKeyLength { actual: usize },

    /// No key has been set, so no KVV exists to check against.
    #[error("key verification value not set")]
    KvvNotSet,

    /// Provided KVV is neither the full digest nor the 32-char BG form.
    #[error("invalid KVV length: {actual}, expected 32 or {full}")]
    InvalidKvvLength { actual: usize, full: usize },

    /// Provided KVV does not match the one derived from the key.
    #[error("provided and calculated kvv do not match:\r\nProvided:   {provided}\r\nCalculated: {calculated}")]
    KvvMismatch {
        provided: String,
        calculated: String,
    },

    /// Nothing to seal.
    #[error("verification failed: no data present to be signed")]
    NoData,

    /// No key to seal with.
    #[error("verification failed: no key present to sign data")]
    NoKey,

    /// Seal date is not a valid `YYMMDD` date.
    #[error("invalid seal date: {0:?}, expected YYMMDD")]
    InvalidSealDate(String),

    /// Content could not be brought into the canonical encoding.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Encoding gateway failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// Input already carries U+FFFD, so the original bytes are lost.
    #[error("invalid encoding detected: input contains replacement characters")]
    ReplacementCharacter,

    /// A character has no single-byte representation.
    #[error("character {ch:?} at offset {offset} cannot be represented in ISO-8859-1")]
    Unrepresentable { ch: char, offset: usize },
}

/// Unified error type for callers driving the full pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankgiroError {
    /// Structural parse failure.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Sealing failure.
    #[error("Seal error: {0}")]
    Seal(#[from] SealError),

    /// Encoding failure.
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}
