//! Sealed phase: the computed MAC and the signed output. Read-only.

use crate::constants::{BG_HEX_WIDTH, CRLF, HMAC_FILE_SEAL, HMAC_FOOTER_PADDING};
use crate::encoding::{decode_latin1, to_hex_upper};
use crate::hash::HashAlgorithm;

/// A sealed file. Produced only by [`super::HmacSealer::calculate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedFile {
    algorithm: HashAlgorithm,
    seal_date: String,
    footer_date: String,
    kvv: Vec<u8>,
    mac: Vec<u8>,
    prefixed: Vec<u8>,
    formatted: Vec<u8>,
    normalized: Vec<u8>,
    footer: String,
}

impl SealedFile {
    pub(super) fn new(
        algorithm: HashAlgorithm,
        seal_date: String,
        footer_date: String,
        kvv: Vec<u8>,
        mac: Vec<u8>,
        prefixed: Vec<u8>,
        formatted: Vec<u8>,
        normalized: Vec<u8>,
    ) -> Self {
        let footer = format!(
            "{HMAC_FILE_SEAL}{footer_date}{}{}{}",
            bg_format(&kvv),
            bg_format(&mac),
            " ".repeat(HMAC_FOOTER_PADDING)
        );
        Self {
            algorithm,
            seal_date,
            footer_date,
            kvv,
            mac,
            prefixed,
            formatted,
            normalized,
            footer,
        }
    }

    /// Full MAC as uppercase hex.
    pub fn mac_hex(&self) -> String {
        to_hex_upper(&self.mac)
    }

    /// First 32 hex chars of the MAC, as written in the footer.
    pub fn mac_bg_format(&self) -> String {
        bg_format(&self.mac)
    }

    pub fn mac_bytes(&self) -> &[u8] {
        &self.mac
    }

    pub fn kvv_hex(&self) -> String {
        to_hex_upper(&self.kvv)
    }

    pub fn kvv_bg_format(&self) -> String {
        bg_format(&self.kvv)
    }

    /// The 80-char `99` footer row, dated the day the MAC was calculated.
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// Prefixed content, CRLF, footer. ISO-8859-1 bytes, ready to write.
    pub fn signed_content(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(self.prefixed.len() + CRLF.len() + self.footer.len());
        out.extend_from_slice(&self.prefixed);
        out.extend_from_slice(CRLF.as_bytes());
        out.extend_from_slice(self.footer.as_bytes());
        out
    }

    /// [`signed_content`](Self::signed_content) decoded to a `String`.
    pub fn signed_text(&self) -> String {
        decode_latin1(&self.signed_content())
    }

    pub fn prefixed_content(&self) -> &[u8] {
        &self.prefixed
    }

    pub fn formatted_content(&self) -> &[u8] {
        &self.formatted
    }

    pub fn normalized_content(&self) -> &[u8] {
        &self.normalized
    }

    /// Date in the header row.
    pub fn seal_date(&self) -> &str {
        &self.seal_date
    }

    /// Date in the footer row.
    pub fn footer_date(&self) -> &str {
        &self.footer_date
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

fn bg_format(digest: &[u8]) -> String {
    let mut hex = to_hex_upper(digest);
    hex.truncate(BG_HEX_WIDTH);
    hex
}
