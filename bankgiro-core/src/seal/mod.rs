//! HMAC sealer — two-phase: a mutable draft, then an immutable seal.
//!
//! [`HmacSealer`] collects the key, the hash algorithm, the content and
//! the seal date. [`HmacSealer::calculate`] consumes the draft and
//! returns a [`SealedFile`] that only has readers, so nothing can change
//! once the MAC exists.
//!
//! ## Wire format
//! ```text
//! header  = "00" seal_date(6) "HMAC" spaces(68)         (prepended if absent)
//! footer  = "99" today(6) kvv(32 hex) mac(32 hex) spaces(8)
//! signed  = prefixed content CRLF footer
//! ```
//!
//! The header carries the seal date; the footer carries the date the MAC
//! was calculated ([`HmacSealer::calculate_at`] pins it).
//!
//! The MAC is HMAC(key, normalized content) where normalized content is
//! the prefixed content run through [`crate::normalize::normalize_content`].
//! The KVV is HMAC(key, `"00000000"`). Both are written uppercase and cut
//! to their first 32 hex chars in the footer.
//!
//! ## Key handling
//! The 16-byte key lives in a [`zeroize::Zeroizing`] buffer, is never
//! logged, and is redacted from `Debug`. The sealed phase does not keep it.

mod sealed;
mod sealer;

pub use sealed::SealedFile;
pub use sealer::HmacSealer;

use crate::constants::{CRLF, HMAC_HEADER, HMAC_HEADER_LITERAL, HMAC_HEADER_PADDING};
use crate::errors::SealError;

/// `calculate` failed; the draft is handed back unchanged.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct CalculateError {
    pub error: SealError,
    pub sealer: Box<HmacSealer>,
}

impl CalculateError {
    pub fn into_sealer(self) -> HmacSealer {
        *self.sealer
    }
}

impl From<CalculateError> for SealError {
    fn from(err: CalculateError) -> Self {
        err.error
    }
}

/// Prepend a synthetic HMAC header unless `content` is empty or already
/// starts with one.
pub fn prefix_content(content: &[u8], seal_date: &str) -> Vec<u8> {
    if content.is_empty() || content.starts_with(HMAC_HEADER.as_bytes()) {
        return content.to_vec();
    }

    let header = format!(
        "{HMAC_HEADER}{seal_date}{HMAC_HEADER_LITERAL}{}{CRLF}",
        " ".repeat(HMAC_HEADER_PADDING)
    );
    let mut out = Vec::with_capacity(header.len() + content.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(content);
    out
}
