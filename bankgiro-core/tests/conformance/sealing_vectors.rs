//! Conformance: HMAC Sealing
//!
//! Invariants under test:
//! - KVV is HMAC(key, "00000000") for every supported algorithm
//! - MAC is HMAC(key, normalized prefixed content)
//! - Footer is exactly one record: "99" date kvv(32) mac(32) spaces(8)
//! - Header carries the seal date, footer the calculation date
//! - Signed output is prefixed content, CRLF, footer
//! - Two sealers with the same inputs agree byte for byte

use bankgiro_core::constants::RECORD_WIDTH;
use bankgiro_core::{HashAlgorithm, HmacSealer, SealedFile};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{unhex, vectors_dir};

// ── Vector schema ───────────────────────────────────────────────

#[derive(Deserialize)]
struct SealVectors {
    key_hex: String,
    kvv: KvvSet,
    cases: Vec<SealCase>,
}

#[derive(Deserialize)]
struct KvvSet {
    sha1: String,
    sha256: String,
    sha512: String,
}

#[derive(Deserialize)]
struct SealCase {
    id: String,
    algorithm: String,
    seal_date: String,
    footer_date: String,
    content_hex: String,
    expected_prefixed_hex: String,
    expected_normalized_hex: String,
    expected_kvv: String,
    expected_mac: String,
    expected_footer: String,
    expected_signed_hex: String,
}

fn load() -> SealVectors {
    let path = vectors_dir().join("seal.vectors.json");
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&data).expect("seal vectors parse failed")
}

fn seal(key_hex: &str, case: &SealCase) -> SealedFile {
    let mut sealer = HmacSealer::new();
    sealer.set_hash_algorithm(case.algorithm.parse().expect("known algorithm"));
    sealer.set_key(key_hex).expect("vector key is valid");
    sealer.set_seal_date(&case.seal_date).expect("vector date is valid");
    sealer.set_data_bytes(&unhex(&case.content_hex));
    let footer_date =
        NaiveDate::parse_from_str(&case.footer_date, "%y%m%d").expect("vector footer date");
    sealer.calculate_at(footer_date).expect("vector content seals")
}

// ── KVV ─────────────────────────────────────────────────────────

#[test]
fn conformance_kvv_per_algorithm() {
    let vecs = load();
    for (algorithm, expected) in [
        (HashAlgorithm::Sha1, &vecs.kvv.sha1),
        (HashAlgorithm::Sha256, &vecs.kvv.sha256),
        (HashAlgorithm::Sha512, &vecs.kvv.sha512),
    ] {
        let mut sealer = HmacSealer::new();
        sealer.set_hash_algorithm(algorithm);
        sealer.set_key(&vecs.key_hex).unwrap();
        assert_eq!(sealer.kvv_hex().as_ref(), Some(expected), "{algorithm}");
        sealer.check_kvv(expected).unwrap();
        sealer.check_kvv(&expected[..32].to_lowercase()).unwrap();
    }
}

// ── Golden vector match ─────────────────────────────────────────

#[test]
fn conformance_seal_golden_vectors_match() {
    let vecs = load();
    assert!(vecs.cases.len() >= 8, "expected at least 8 seal cases");

    for case in &vecs.cases {
        let sealed = seal(&vecs.key_hex, case);
        let id = &case.id;
        assert_eq!(sealed.prefixed_content(), unhex(&case.expected_prefixed_hex), "prefixed: {id}");
        assert_eq!(sealed.normalized_content(), unhex(&case.expected_normalized_hex), "normalized: {id}");
        assert_eq!(sealed.kvv_hex(), case.expected_kvv, "kvv: {id}");
        assert_eq!(sealed.mac_hex(), case.expected_mac, "mac: {id}");
        assert_eq!(sealed.footer(), case.expected_footer, "footer: {id}");
        assert_eq!(sealed.signed_content(), unhex(&case.expected_signed_hex), "signed: {id}");
    }
}

// ── Output format ───────────────────────────────────────────────

#[test]
fn conformance_footer_is_one_record() {
    let vecs = load();
    for case in &vecs.cases {
        let sealed = seal(&vecs.key_hex, case);
        let footer = sealed.footer();
        assert_eq!(footer.len(), RECORD_WIDTH, "footer width: {}", case.id);
        assert!(footer.starts_with(&format!("99{}", case.footer_date)));
        assert_ne!(case.footer_date, case.seal_date, "{}", case.id);
        if !unhex(&case.content_hex).starts_with(b"00") {
            let header = format!("00{}HMAC", case.seal_date);
            assert!(sealed.prefixed_content().starts_with(header.as_bytes()));
        }
        assert_eq!(&footer[8..40], sealed.kvv_bg_format());
        assert_eq!(&footer[40..72], sealed.mac_bg_format());
        assert_eq!(&footer[72..], "        ");
    }
}

#[test]
fn conformance_prefixed_content_always_starts_with_header() {
    let vecs = load();
    for case in &vecs.cases {
        let sealed = seal(&vecs.key_hex, case);
        assert!(sealed.prefixed_content().starts_with(b"00"), "{}", case.id);
    }
}

// ── Determinism ─────────────────────────────────────────────────

#[test]
fn conformance_independent_sealers_agree() {
    let vecs = load();
    for case in &vecs.cases {
        assert_eq!(seal(&vecs.key_hex, case), seal(&vecs.key_hex, case), "{}", case.id);
    }
}

#[test]
fn conformance_mac_depends_on_content() {
    let vecs = load();
    let macs: std::collections::HashSet<String> = vecs
        .cases
        .iter()
        .filter(|c| c.algorithm == "sha256")
        .map(|c| seal(&vecs.key_hex, c).mac_hex())
        .collect();
    let sha256_cases = vecs.cases.iter().filter(|c| c.algorithm == "sha256").count();
    assert_eq!(macs.len(), sha256_cases);
}
