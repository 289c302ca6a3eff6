//! File format constants.
//!
//! Every value here is fixed by the Bankgiro file format and the
//! bank's HMAC verifier. Changing one breaks interop.

/// HMAC header record (at most one, first row of a sealed file).
pub const HMAC_HEADER: &str = "00";

/// Section start record (TK01).
pub const SECTION_START: &str = "01";

/// Section-level seal record, follows its section's end record.
pub const HMAC_SECTION_SEAL: &str = "08";

/// Section end record.
pub const SECTION_END: &str = "09";

/// File-level HMAC footer record.
pub const HMAC_FILE_SEAL: &str = "99";

/// Width of a record code in characters.
pub const RECORD_CODE_WIDTH: usize = 2;

/// Fixed record width in characters.
pub const RECORD_WIDTH: usize = 80;

/// Raw HMAC key length in bytes.
pub const KEY_LENGTH: usize = 16;

/// HMAC key length as hex characters.
pub const KEY_HEX_LENGTH: usize = KEY_LENGTH * 2;

/// Literal sealed to derive the key verification value (KVV).
pub const KVV_INPUT: &[u8] = b"00000000";

/// Width of the KVV and MAC hex strings written to the file footer.
pub const BG_HEX_WIDTH: usize = 32;

/// Literal following the seal date in a synthetic HMAC header.
pub const HMAC_HEADER_LITERAL: &str = "HMAC";

/// Space padding that completes a synthetic HMAC header to 80 characters.
pub const HMAC_HEADER_PADDING: usize = 68;

/// Space padding that completes the HMAC footer to 80 characters.
pub const HMAC_FOOTER_PADDING: usize = 8;

/// `chrono` format of the seal date (`YYMMDD`).
pub const SEAL_DATE_FORMAT: &str = "%y%m%d";

/// Length of a formatted seal date.
pub const SEAL_DATE_LENGTH: usize = 6;

/// Record line terminator.
pub const CRLF: &str = "\r\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_parts_fill_one_record() {
        let width = HMAC_HEADER.len()
            + SEAL_DATE_LENGTH
            + HMAC_HEADER_LITERAL.len()
            + HMAC_HEADER_PADDING;
        assert_eq!(width, RECORD_WIDTH);
    }

    #[test]
    fn footer_parts_fill_one_record() {
        let width = HMAC_FILE_SEAL.len() + SEAL_DATE_LENGTH + 2 * BG_HEX_WIDTH + HMAC_FOOTER_PADDING;
        assert_eq!(width, RECORD_WIDTH);
    }

    #[test]
    fn record_codes_are_two_chars() {
        for code in [
            HMAC_HEADER,
            SECTION_START,
            HMAC_SECTION_SEAL,
            SECTION_END,
            HMAC_FILE_SEAL,
        ] {
            assert_eq!(code.len(), RECORD_CODE_WIDTH, "bad record code {code}");
        }
    }

    #[test]
    fn key_widths_agree() {
        assert_eq!(KEY_LENGTH, 16);
        assert_eq!(KEY_HEX_LENGTH, 32);
        assert_eq!(KVV_INPUT.len(), 8);
    }
}
