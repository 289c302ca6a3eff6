//! Conformance: Error Display Stability
//!
//! Display strings are what operators see in logs and CLI output.
//! Changing one is a visible change and must be deliberate.

use bankgiro_core::errors::{SectionIssue, SealError};
use bankgiro_core::{BankgiroError, EncodingError, ParseError};

#[test]
fn conformance_parse_error_display_stable() {
    let cases: Vec<(ParseError, &str)> = vec![
        (
            ParseError::SingleRow,
            "could not split the file into rows: only one row present",
        ),
        (
            ParseError::NoMatchingSectionType { line: 3 },
            "no matching section type found (line 3)",
        ),
        (
            ParseError::MissingSectionStart { line: 9 },
            "no section start found where there should be one (line 9)",
        ),
        (
            ParseError::MultipleHmacStart { line: 2 },
            "multiple hmac start lines found (line 2)",
        ),
        (ParseError::HmacNeverEnded, "hmac never ended"),
        (ParseError::SectionNeverEnded, "section never ended"),
    ];
    for (error, expected) in &cases {
        assert_eq!(error.to_string(), *expected, "ParseError display drift");
    }
}

#[test]
fn conformance_section_issue_display_stable() {
    let length = SectionIssue::InvalidLineLength {
        length: 79,
        row: "15 short".into(),
    };
    assert_eq!(length.to_string(), "Invalid line length: 79 - *15 short*");

    let code = SectionIssue::InvalidSubsection { code: "44".into() };
    assert_eq!(code.to_string(), "Invalid section found: 44");
}

#[test]
fn conformance_seal_error_display_stable() {
    let cases: Vec<(SealError, &str)> = vec![
        (
            SealError::InvalidKeyLength { actual: 8 },
            "invalid key length: 8, expected 16",
        ),
        (SealError::KvvNotSet, "key verification value not set"),
        (
            SealError::InvalidKvvLength { actual: 3, full: 64 },
            "invalid KVV length: 3, expected 32 or 64",
        ),
        (
            SealError::KvvMismatch {
                provided: "AA".into(),
                calculated: "BB".into(),
            },
            "provided and calculated kvv do not match:\r\nProvided:   AA\r\nCalculated: BB",
        ),
        (
            SealError::NoData,
            "verification failed: no data present to be signed",
        ),
        (
            SealError::NoKey,
            "verification failed: no key present to sign data",
        ),
    ];
    for (error, expected) in &cases {
        assert_eq!(error.to_string(), *expected, "SealError display drift");
    }
}

#[test]
fn conformance_unified_error_prefixes() {
    let parse: BankgiroError = ParseError::HmacNeverEnded.into();
    assert_eq!(parse.to_string(), "Parse error: hmac never ended");

    let seal: BankgiroError = SealError::NoKey.into();
    assert!(seal.to_string().starts_with("Seal error: "));

    let encoding: BankgiroError = EncodingError::ReplacementCharacter.into();
    assert!(encoding.to_string().starts_with("Encoding error: "));
}

#[test]
fn conformance_errors_are_std_errors() {
    fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<ParseError>();
    assert_error::<SealError>();
    assert_error::<EncodingError>();
    assert_error::<BankgiroError>();
    assert_error::<bankgiro_core::PartialParse>();
    assert_error::<bankgiro_core::seal::CalculateError>();
}
