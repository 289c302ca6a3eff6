//! Conformance: Content Normalization
//!
//! Invariants under test:
//! - Formatting yields CRLF endings, no blank rows, no trailing breaks
//! - Normalization drops CR/LF and folds out-of-range bytes
//! - First row of formatted output is at most one record wide
//! - Normalizing already-normalized content is stable

use bankgiro_core::constants::RECORD_WIDTH;
use bankgiro_core::normalize::{format_content, normalize_content};
use serde::Deserialize;

use crate::{unhex, vectors_dir};

// ── Vector schema ───────────────────────────────────────────────

#[derive(Deserialize)]
struct NormalizeVectors {
    #[serde(rename = "_WARNING")]
    warning: String,
    cases: Vec<NormalizeCase>,
}

#[derive(Deserialize)]
struct NormalizeCase {
    id: String,
    input_hex: String,
    expected_formatted_hex: String,
    expected_normalized_hex: String,
}

fn load() -> NormalizeVectors {
    let path = vectors_dir().join("normalize.vectors.json");
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&data).expect("normalize vectors parse failed")
}

// ── Golden vector match ─────────────────────────────────────────

#[test]
fn conformance_normalize_golden_vectors_match() {
    let vecs = load();
    assert!(!vecs.warning.is_empty());
    assert!(vecs.cases.len() >= 8, "expected at least 8 normalize cases");

    for case in &vecs.cases {
        let input = unhex(&case.input_hex);
        assert_eq!(
            format_content(&input),
            unhex(&case.expected_formatted_hex),
            "formatted mismatch for case '{}'",
            case.id
        );
        assert_eq!(
            normalize_content(&input),
            unhex(&case.expected_normalized_hex),
            "normalized mismatch for case '{}'",
            case.id
        );
    }
}

// ── Structural invariants over every vector ─────────────────────

#[test]
fn conformance_formatted_output_is_canonical() {
    for case in &load().cases {
        let formatted = format_content(&unhex(&case.input_hex));

        let first_row = formatted
            .windows(2)
            .position(|w| w == b"\r\n")
            .unwrap_or(formatted.len());
        assert!(first_row <= RECORD_WIDTH, "first row too long in '{}'", case.id);

        assert!(!formatted.ends_with(b"\n"), "trailing break in '{}'", case.id);
        for (i, byte) in formatted.iter().enumerate() {
            if *byte == b'\n' {
                assert!(i > 0 && formatted[i - 1] == b'\r', "bare LF in '{}'", case.id);
            }
            if *byte == b'\r' {
                assert_eq!(formatted.get(i + 1), Some(&b'\n'), "bare CR in '{}'", case.id);
            }
        }
    }
}

#[test]
fn conformance_normalized_output_is_printable() {
    for case in &load().cases {
        let normalized = normalize_content(&unhex(&case.input_hex));
        assert!(
            normalized.iter().all(|b| (32..=126).contains(b) || *b == 195),
            "non-printable byte survived in '{}'",
            case.id
        );
    }
}
