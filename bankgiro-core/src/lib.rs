//! Bankgiro Core — Autogiro file parsing and HMAC sealing.
//!
//! This crate is the reference implementation of the two byte-exact
//! concerns of the Bankgiro file exchange: splitting inbound Autogiro
//! files into typed sections, and normalizing + sealing outbound files
//! so the bank's verifier accepts them bit-for-bit.
//!
//! # Module Map
//!
//! | Module | Concern |
//! |--------|---------|
//! | [`constants`] | Record codes and fixed widths |
//! | [`errors`] | Error types for every layer |
//! | [`encoding`] | ISO-8859-1 gateway and hex helpers |
//! | [`registry`] | Known section layouts (first-match-wins) |
//! | [`parse`] | Section state machine over file rows |
//! | [`normalize`] | Content formatting and signature normalization |
//! | [`hash`] | Keyed-hash algorithm selection |
//! | [`seal`] | Two-phase HMAC sealer (draft → sealed) |
//! | [`outgoing`] | Outgoing-file facade (format + seal) |
//! | [`vectors`] | Golden vector generator (test-only) |
//!
//! # Data flow
//!
//! ```text
//! sealing: bytes → encoding::decode → normalize → seal::HmacSealer::calculate → SealedFile
//! parsing: bytes → encoding::decode → parse::AutogiroFile::parse → sections + issues
//! ```
//!
//! No I/O, no printing. Everything is synchronous and deterministic
//! apart from the default seal date and the footer date, which read
//! the local clock.

/// Record codes and fixed widths of the file format.
pub mod constants;

/// Error types for bankgiro-core operations.
pub mod errors;

/// Encoding gateway — ISO-8859-1 in/out, hex.
pub mod encoding;

/// Registry of known section layouts.
pub mod registry;

/// Autogiro section parser.
pub mod parse;

/// Content normalization pipeline.
pub mod normalize;

/// Keyed-hash algorithms — HMAC over SHA-1/SHA-256/SHA-512.
pub mod hash;

/// HMAC sealer.
pub mod seal;

/// Outgoing file facade.
pub mod outgoing;

/// Deterministic golden vector generator (test use only).
/// Requires the `vectors` feature: `cargo test --features vectors`.
#[cfg(feature = "vectors")]
pub mod vectors;

pub use errors::{BankgiroError, EncodingError, ParseError, SealError};
pub use hash::HashAlgorithm;
pub use outgoing::OutgoingFile;
pub use parse::{AutogiroFile, AutogiroSection, PartialParse};
pub use registry::{SectionRegistry, SectionType};
pub use seal::{HmacSealer, SealedFile};
