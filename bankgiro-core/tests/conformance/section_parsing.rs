//! Conformance: Section Parsing
//!
//! Invariants under test:
//! - A clean section yields exactly one complete section with no issues
//! - Customer/account numbers are the layout's fixed windows of TK01
//! - Row-level problems are recorded, never fatal
//! - Fatal errors still hand back every section seen, open ones included
//! - The HMAC envelope is recognized, and required once a header is seen

use bankgiro_core::encoding;
use bankgiro_core::errors::SectionIssue;
use bankgiro_core::{AutogiroFile, ParseError, PartialParse};

use crate::read_fixture;

fn parse_fixture(name: &str) -> Result<AutogiroFile, PartialParse> {
    let text = encoding::decode(&read_fixture(name)).expect("fixture decodes");
    AutogiroFile::parse(&text)
}

// ── Clean files ─────────────────────────────────────────────────

#[test]
fn conformance_bevakningsreg_single_clean_section() {
    let file = parse_fixture("bevakningsreg.txt").unwrap();
    assert_eq!(file.sections().len(), 1);

    let section = &file.sections()[0];
    assert_eq!(section.section_type().map(|t| t.code), Some("bevakningsreg"));
    assert!(section.is_complete());
    assert!(section.issues().is_empty());
    assert_eq!(section.rows().len(), 5);
    assert_eq!(section.customer_number(), Some("123456"));
    assert_eq!(section.account_number(), Some("0009912346"));
    assert_eq!(section.section_seal(), None);
    assert!(!file.hmac_start_found());
}

#[test]
fn conformance_sealed_file_envelope_and_section_seal() {
    let file = parse_fixture("sealed-bevakningsreg.txt").unwrap();
    assert!(file.has_hmac_envelope());
    assert!(file.hmac_footer().unwrap().starts_with("99240429FF365893"));

    let section = &file.sections()[0];
    assert_eq!(section.rows().len(), 5, "08 row must not count as a body row");
    assert!(section.section_seal().unwrap().starts_with("08240429"));
    assert!(section.issues().is_empty());
}

#[test]
fn conformance_latin1_layout_matches_by_char() {
    let file = parse_fixture("andringslista-new.txt").unwrap();
    let section = &file.sections()[0];
    assert_eq!(section.section_type().map(|t| t.code), Some("andringslista-new"));
    assert_eq!(section.customer_number(), Some("777777"));
    assert_eq!(section.account_number(), Some("0009912346"));
    assert!(section.issues().is_empty(), "{:?}", section.issues());
    assert!(section.rows()[1].contains("Åsa Öberg"));

    // Exported bytes reproduce the file's rows.
    let original = read_fixture("andringslista-new.txt");
    let exported = section.to_latin1_bytes().unwrap();
    assert_eq!(&original[..exported.len()], exported.as_slice());
}

#[test]
fn conformance_row_issues_do_not_abort() {
    let file = parse_fixture("mixed-issues.txt").unwrap();
    assert_eq!(file.sections().len(), 2);

    let first = &file.sections()[0];
    assert_eq!(first.section_type().map(|t| t.code), Some("betalningsspec-new"));
    assert_eq!(first.customer_number(), Some("654321"));
    assert_eq!(first.rows().len(), 6);
    assert_eq!(first.issues().len(), 2);
    assert!(matches!(
        &first.issues()[0],
        SectionIssue::InvalidLineLength { length: 79, row } if row.starts_with("15")
    ));
    assert_eq!(
        first.issues()[1],
        SectionIssue::InvalidSubsection { code: "44".into() }
    );

    let second = &file.sections()[1];
    assert_eq!(second.section_type().map(|t| t.code), Some("avvisade-new"));
    assert!(second.issues().is_empty());
    assert_eq!(file.issue_count(), 2);
}

// ── Fatal errors with partial results ───────────────────────────

#[test]
fn conformance_unterminated_section_is_partial() {
    let partial = parse_fixture("unterminated.txt").unwrap_err();
    assert_eq!(partial.error, ParseError::SectionNeverEnded);
    assert_eq!(partial.file.sections().len(), 1);

    let section = &partial.file.sections()[0];
    assert!(section.start_found());
    assert!(!section.end_found());
    assert_eq!(section.rows().len(), 3);
}

#[test]
fn conformance_hmac_header_requires_footer() {
    let partial = parse_fixture("hmac-unterminated.txt").unwrap_err();
    assert_eq!(partial.error, ParseError::HmacNeverEnded);
    assert!(partial.file.hmac_start_found());
    assert!(!partial.file.hmac_end_found());
    assert_eq!(partial.file.sections().len(), 1);
}

#[test]
fn conformance_double_header_is_fatal() {
    let partial = parse_fixture("double-header.txt").unwrap_err();
    assert_eq!(partial.error, ParseError::MultipleHmacStart { line: 2 });
    assert!(partial.file.sections().is_empty());
}

#[test]
fn conformance_single_row_input() {
    let partial = AutogiroFile::parse("0120240429AUTOGIRO").unwrap_err();
    assert_eq!(partial.error, ParseError::SingleRow);
}
