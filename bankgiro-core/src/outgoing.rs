//! Outgoing file facade — format a payment file and seal it.
//!
//! Outgoing files are often produced by tools that write LF endings,
//! blank separator rows and trailing newlines. [`OutgoingFile`] formats
//! the content once on construction and feeds the formatted bytes to a
//! draft [`HmacSealer`], so what gets signed is what the bank will see.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::encoding;
use crate::errors::{BankgiroError, EncodingError, SealError};
use crate::hash::HashAlgorithm;
use crate::normalize::format_content;
use crate::seal::{CalculateError, HmacSealer, SealedFile};

/// An outgoing file waiting to be sealed.
#[derive(Debug, Clone)]
pub struct OutgoingFile {
    content: String,
    formatted: Vec<u8>,
    sealer: HmacSealer,
}

impl OutgoingFile {
    /// Build from text.
    ///
    /// # Errors
    /// [`EncodingError::Unrepresentable`] if the text has a char with no
    /// single-byte form.
    pub fn from_text(content: &str) -> Result<Self, EncodingError> {
        let bytes = encoding::encode(content)?;
        let formatted = format_content(&bytes);
        let mut sealer = HmacSealer::new();
        sealer.set_data_bytes(&formatted);
        debug!(
            raw_len = bytes.len(),
            formatted_len = formatted.len(),
            "outgoing file formatted"
        );
        Ok(Self {
            content: content.to_owned(),
            formatted,
            sealer,
        })
    }

    /// Build from raw file bytes, UTF-8 or ISO-8859-1.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        Self::from_text(&encoding::decode(bytes)?)
    }

    pub fn set_seal_key(&mut self, key_hex: &str) -> Result<(), SealError> {
        self.sealer.set_key(key_hex)
    }

    pub fn set_seal_key_bytes(&mut self, key_hex: &[u8]) -> Result<(), SealError> {
        self.sealer.set_key_bytes(key_hex)
    }

    pub fn check_kvv(&self, kvv: &str) -> Result<(), SealError> {
        self.sealer.check_kvv(kvv)
    }

    pub fn set_seal_date(&mut self, date: &str) -> Result<(), SealError> {
        self.sealer.set_seal_date(date)
    }

    pub fn set_hash_algorithm(&mut self, algorithm: HashAlgorithm) {
        self.sealer.set_hash_algorithm(algorithm);
    }

    /// Key set, KVV derived and content present.
    pub fn ready_to_sign(&self) -> bool {
        self.sealer.kvv_hex().is_some() && !self.formatted.is_empty() && self.sealer.validate().is_ok()
    }

    /// Seal the file. The footer is dated today.
    ///
    /// # Errors
    /// [`SealError::NoData`] or [`SealError::NoKey`] when not
    /// [`ready_to_sign`](Self::ready_to_sign).
    pub fn sign(self) -> Result<SealedFile, BankgiroError> {
        signed(self.sealer.calculate())
    }

    /// [`sign`](Self::sign) with the footer dated `footer_date`.
    pub fn sign_at(self, footer_date: NaiveDate) -> Result<SealedFile, BankgiroError> {
        signed(self.sealer.calculate_at(footer_date))
    }

    /// The text the file was built from.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// CRLF endings, no blank rows, ISO-8859-1.
    pub fn formatted_content(&self) -> &[u8] {
        &self.formatted
    }

    pub fn sealer(&self) -> &HmacSealer {
        &self.sealer
    }
}

fn signed(result: Result<SealedFile, CalculateError>) -> Result<SealedFile, BankgiroError> {
    let sealed = result.map_err(|err| err.error)?;
    info!(
        seal_date = sealed.seal_date(),
        footer_date = sealed.footer_date(),
        algorithm = %sealed.algorithm(),
        "outgoing file sealed"
    );
    Ok(sealed)
}
