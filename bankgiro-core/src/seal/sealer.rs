//! Draft phase of the sealer.

use std::fmt;

use chrono::{Local, NaiveDate};
use tracing::debug;
use zeroize::Zeroizing;

use crate::constants::{BG_HEX_WIDTH, KEY_LENGTH, KVV_INPUT, SEAL_DATE_FORMAT, SEAL_DATE_LENGTH};
use crate::encoding::{self, to_hex_upper};
use crate::errors::SealError;
use crate::hash::HashAlgorithm;
use crate::normalize::{format_content, normalize_content};

use super::{prefix_content, CalculateError, SealedFile};

/// Mutable sealer draft. Turns into a [`SealedFile`] via [`calculate`].
///
/// [`calculate`]: HmacSealer::calculate
#[derive(Clone)]
pub struct HmacSealer {
    key: Option<Zeroizing<[u8; KEY_LENGTH]>>,
    kvv: Option<Vec<u8>>,
    algorithm: HashAlgorithm,
    seal_date: String,
    original: Vec<u8>,
    prefixed: Vec<u8>,
    formatted: Vec<u8>,
    normalized: Vec<u8>,
}

impl HmacSealer {
    /// Empty draft: SHA-256, today's date, no key, no content.
    pub fn new() -> Self {
        Self {
            key: None,
            kvv: None,
            algorithm: HashAlgorithm::default(),
            seal_date: today(),
            original: Vec::new(),
            prefixed: Vec::new(),
            formatted: Vec::new(),
            normalized: Vec::new(),
        }
    }

    /// Select the hash under the HMAC. Re-derives the KVV if a key is set.
    pub fn set_hash_algorithm(&mut self, algorithm: HashAlgorithm) {
        self.algorithm = algorithm;
        if self.key.is_some() {
            self.derive_kvv();
        }
    }

    /// Set the key from 32 hex chars and derive the KVV.
    ///
    /// # Errors
    /// [`SealError::InvalidKey`] on malformed hex,
    /// [`SealError::InvalidKeyLength`] when it does not decode to 16 bytes.
    /// The previous key is kept on error.
    pub fn set_key(&mut self, key_hex: &str) -> Result<(), SealError> {
        self.set_key_bytes(key_hex.as_bytes())
    }

    /// Same as [`set_key`](Self::set_key) with the hex text given as bytes.
    pub fn set_key_bytes(&mut self, key_hex: &[u8]) -> Result<(), SealError> {
        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        hex::decode_to_slice(key_hex, key.as_mut_slice()).map_err(|err| match err {
            hex::FromHexError::InvalidStringLength => SealError::InvalidKeyLength {
                actual: key_hex.len() / 2,
            },
            other => SealError::InvalidKey(other.to_string()),
        })?;

        self.key = Some(key);
        self.derive_kvv();
        Ok(())
    }

    fn derive_kvv(&mut self) {
        if let Some(key) = &self.key {
            self.kvv = Some(self.algorithm.hmac(key.as_slice(), KVV_INPUT));
            debug!(algorithm = %self.algorithm, "kvv derived");
        }
    }

    /// Compare a KVV from the bank against the derived one.
    ///
    /// Accepts the full digest or its first 32 hex chars, in either case.
    pub fn check_kvv(&self, provided: &str) -> Result<(), SealError> {
        let kvv = self.kvv.as_deref().ok_or(SealError::KvvNotSet)?;
        let full = self.algorithm.hex_len();
        let mut calculated = to_hex_upper(kvv);
        match provided.len() {
            n if n == full => {}
            BG_HEX_WIDTH => calculated.truncate(BG_HEX_WIDTH),
            actual => return Err(SealError::InvalidKvvLength { actual, full }),
        }

        let provided = provided.to_ascii_uppercase();
        if provided == calculated {
            Ok(())
        } else {
            Err(SealError::KvvMismatch {
                provided,
                calculated,
            })
        }
    }

    /// Replace the content with `text`, encoded to ISO-8859-1.
    pub fn set_data(&mut self, text: &str) -> Result<(), SealError> {
        let bytes = encoding::encode(text)?;
        self.set_data_bytes(&bytes);
        Ok(())
    }

    /// Append `text`, encoded to ISO-8859-1.
    pub fn add_data(&mut self, text: &str) -> Result<(), SealError> {
        let bytes = encoding::encode(text)?;
        self.add_data_bytes(&bytes);
        Ok(())
    }

    /// Replace the content with bytes already in ISO-8859-1.
    pub fn set_data_bytes(&mut self, data: &[u8]) {
        self.original = data.to_vec();
        self.refresh();
    }

    /// Append bytes already in ISO-8859-1.
    pub fn add_data_bytes(&mut self, data: &[u8]) {
        self.original.extend_from_slice(data);
        self.refresh();
    }

    /// Set the seal date as `YYMMDD`.
    pub fn set_seal_date(&mut self, date: &str) -> Result<(), SealError> {
        let well_formed = date.len() == SEAL_DATE_LENGTH
            && date.bytes().all(|b| b.is_ascii_digit())
            && NaiveDate::parse_from_str(date, SEAL_DATE_FORMAT).is_ok();
        if !well_formed {
            return Err(SealError::InvalidSealDate(date.to_owned()));
        }
        self.seal_date = date.to_owned();
        self.refresh();
        Ok(())
    }

    pub fn set_seal_date_from(&mut self, date: NaiveDate) {
        self.seal_date = date.format(SEAL_DATE_FORMAT).to_string();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.prefixed = prefix_content(&self.original, &self.seal_date);
        self.formatted = format_content(&self.prefixed);
        self.normalized = normalize_content(&self.prefixed);
    }

    /// Check that there is content and a key.
    pub fn validate(&self) -> Result<(), SealError> {
        if self.original.is_empty() {
            return Err(SealError::NoData);
        }
        if self.key.is_none() {
            return Err(SealError::NoKey);
        }
        Ok(())
    }

    /// Compute the MAC and freeze the result. The footer is dated today.
    ///
    /// # Errors
    /// Whatever [`validate`](Self::validate) reports. The draft comes
    /// back inside the error so the caller can fix it and retry.
    pub fn calculate(self) -> Result<SealedFile, CalculateError> {
        self.calculate_at(Local::now().date_naive())
    }

    /// [`calculate`](Self::calculate) with the footer dated `footer_date`.
    ///
    /// The seal date only ever dates the header.
    pub fn calculate_at(self, footer_date: NaiveDate) -> Result<SealedFile, CalculateError> {
        if let Err(error) = self.validate() {
            return Err(CalculateError {
                error,
                sealer: Box::new(self),
            });
        }
        let (Some(key), Some(kvv)) = (&self.key, &self.kvv) else {
            return Err(CalculateError {
                error: SealError::NoKey,
                sealer: Box::new(self),
            });
        };

        let mac = self.algorithm.hmac(key.as_slice(), &self.normalized);
        debug!(
            algorithm = %self.algorithm,
            normalized_len = self.normalized.len(),
            "mac calculated"
        );

        Ok(SealedFile::new(
            self.algorithm,
            self.seal_date,
            footer_date.format(SEAL_DATE_FORMAT).to_string(),
            kvv.clone(),
            mac,
            self.prefixed,
            self.formatted,
            self.normalized,
        ))
    }

    /// Full KVV as uppercase hex, once a key is set.
    pub fn kvv_hex(&self) -> Option<String> {
        self.kvv.as_deref().map(to_hex_upper)
    }

    /// First 32 hex chars of the KVV, as written in the footer.
    pub fn kvv_bg_format(&self) -> Option<String> {
        self.kvv_hex().map(|mut hex| {
            hex.truncate(BG_HEX_WIDTH);
            hex
        })
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn seal_date(&self) -> &str {
        &self.seal_date
    }

    pub fn original_content(&self) -> &[u8] {
        &self.original
    }

    /// Content with the HMAC header in front.
    pub fn prefixed_content(&self) -> &[u8] {
        &self.prefixed
    }

    /// Prefixed content with CRLF endings, no blank rows and a first row
    /// of at most one record.
    pub fn formatted_content(&self) -> &[u8] {
        &self.formatted
    }

    /// The exact bytes the MAC is computed over.
    pub fn normalized_content(&self) -> &[u8] {
        &self.normalized
    }
}

impl Default for HmacSealer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HmacSealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSealer")
            .field("key", &self.key.as_ref().map(|_| "[redacted]"))
            .field("kvv", &self.kvv_hex())
            .field("algorithm", &self.algorithm)
            .field("seal_date", &self.seal_date)
            .field("original_len", &self.original.len())
            .field("normalized_len", &self.normalized.len())
            .finish()
    }
}

fn today() -> String {
    Local::now().format(SEAL_DATE_FORMAT).to_string()
}
