//! Golden vector generator.
//!
//! Rebuilds `tests/vectors/*.vectors.json` from fixed inputs so
//! `tests/vector_equivalence.rs` can detect drift in the normalizer or
//! the sealer. Test-only surface; panics on inputs it cannot seal.

use chrono::NaiveDate;
use serde::Serialize;

use crate::encoding;
use crate::hash::HashAlgorithm;
use crate::normalize::{format_content, normalize_content};
use crate::seal::HmacSealer;

/// Bankgirot's published test key.
pub const TEST_KEY_HEX: &str = "1234567890ABCDEF1234567890ABCDEF";

/// Footer date of every seal case, one day after the usual seal date.
const FOOTER_DATE: &str = "240430";

const WARNING: &str =
    "Generated golden vectors. Do not edit by hand; regenerate with the vectors feature.";

// ── Schema ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SealVectors {
    #[serde(rename = "_WARNING")]
    warning: &'static str,
    description: &'static str,
    key_hex: &'static str,
    kvv: KvvSet,
    cases: Vec<SealCase>,
}

#[derive(Serialize)]
struct KvvSet {
    sha1: String,
    sha256: String,
    sha512: String,
}

#[derive(Serialize)]
struct SealCase {
    id: &'static str,
    algorithm: &'static str,
    seal_date: &'static str,
    footer_date: &'static str,
    content_hex: String,
    expected_prefixed_hex: String,
    expected_normalized_hex: String,
    expected_kvv: String,
    expected_mac: String,
    expected_footer: String,
    expected_signed_hex: String,
}

#[derive(Serialize)]
struct NormalizeVectors {
    #[serde(rename = "_WARNING")]
    warning: &'static str,
    description: &'static str,
    cases: Vec<NormalizeCase>,
}

#[derive(Serialize)]
struct NormalizeCase {
    id: &'static str,
    input_hex: String,
    expected_formatted_hex: String,
    expected_normalized_hex: String,
}

// ── Inputs ──────────────────────────────────────────────────────────

/// An 80-char row of spaces with each `(offset, text)` written in.
fn row(parts: &[(usize, &str)]) -> String {
    let mut chars = vec![' '; 80];
    for (pos, text) in parts {
        for (i, c) in text.chars().enumerate() {
            chars[pos + i] = c;
        }
    }
    chars.into_iter().collect()
}

fn latin1(text: &str) -> Vec<u8> {
    encoding::encode(text).expect("vector inputs are ISO-8859-1")
}

fn hmac_header() -> String {
    format!("00240429HMAC{}", " ".repeat(68))
}

fn bevakning_section() -> Vec<String> {
    vec![
        row(&[(0, "01"), (2, "20240429"), (10, "AUTOGIRO"), (22, "BEVAKNINGSREG"), (62, "123456"), (68, "0009912346")]),
        row(&[(0, "82"), (2, "20240430"), (10, "0"), (15, "0009912346"), (25, "00000000000000001234"), (45, "000000010000"), (57, "0000000000"), (67, "REF001")]),
        row(&[(0, "32"), (2, "20240430"), (10, "0"), (15, "0009912346"), (25, "00000000000000005678"), (45, "000000025050"), (57, "0000000000"), (67, "REF002")]),
        row(&[(0, "82"), (2, "20240501"), (10, "0"), (15, "0009912346"), (25, "00000000000000009012"), (45, "000000000995"), (57, "0000000000"), (67, "REF003")]),
        row(&[(0, "09"), (2, "20240429"), (10, "9900"), (14, "000000036045"), (26, "000003")]),
    ]
}

/// The raw outgoing payment file (`tests/fixtures/outgoing-basic.txt`).
pub fn outgoing_basic() -> Vec<u8> {
    let rows = [
        row(&[(0, "01"), (2, "20240429"), (10, "AUTOGIRO"), (62, "123456"), (68, "0009912346")]),
        row(&[(0, "82"), (2, "20240502"), (10, "0"), (15, "0000000000000042"), (31, "000000010000"), (43, "0009912346"), (53, "HYRA MAJ")]),
        String::new(),
        "   ".to_owned(),
        row(&[(0, "82"), (2, "20240502"), (10, "0"), (15, "0000000000000043"), (31, "000000012500"), (43, "0009912346"), (53, "Ålands Öl AB")]),
        String::new(),
    ];
    let mut text = rows.join("\n");
    text.push_str("\n\n");
    latin1(&text)
}

fn existing_header_content() -> Vec<u8> {
    let mut rows = vec![hmac_header()];
    rows.extend(bevakning_section());
    let mut text = rows.join("\n");
    text.push('\n');
    latin1(&text)
}

fn long_first_line_content() -> Vec<u8> {
    let first = format!("00240101HMAC{}0123456789", " ".repeat(68));
    let tk01 = &bevakning_section()[0];
    latin1(&format!("{first}\r\n{tk01}"))
}

fn control_bytes_content() -> Vec<u8> {
    let mut bytes = vec![0, 9, 31, 127, 128, 159, 160, 195, 255];
    bytes.extend_from_slice(b"ok");
    bytes
}

// ── Generators ──────────────────────────────────────────────────────

fn kvv_for(algorithm: HashAlgorithm) -> String {
    let mut sealer = HmacSealer::new();
    sealer.set_hash_algorithm(algorithm);
    sealer.set_key(TEST_KEY_HEX).expect("test key is valid");
    sealer.kvv_hex().expect("kvv derived with key")
}

fn seal_case(
    id: &'static str,
    content: Vec<u8>,
    seal_date: &'static str,
    algorithm: HashAlgorithm,
) -> SealCase {
    let mut sealer = HmacSealer::new();
    sealer.set_hash_algorithm(algorithm);
    sealer.set_key(TEST_KEY_HEX).expect("test key is valid");
    sealer.set_seal_date(seal_date).expect("vector seal date is valid");
    sealer.set_data_bytes(&content);
    let footer_date =
        NaiveDate::parse_from_str(FOOTER_DATE, "%y%m%d").expect("footer date is valid");
    let sealed = sealer.calculate_at(footer_date).expect("vector content seals");

    SealCase {
        id,
        algorithm: algorithm.name(),
        seal_date,
        footer_date: FOOTER_DATE,
        content_hex: hex::encode(&content),
        expected_prefixed_hex: hex::encode(sealed.prefixed_content()),
        expected_normalized_hex: hex::encode(sealed.normalized_content()),
        expected_kvv: sealed.kvv_hex(),
        expected_mac: sealed.mac_hex(),
        expected_footer: sealed.footer().to_owned(),
        expected_signed_hex: hex::encode(sealed.signed_content()),
    }
}

/// Regenerate `seal.vectors.json`.
pub fn generate_seal_json() -> String {
    let sha256 = HashAlgorithm::Sha256;
    let cases = vec![
        seal_case("plain-test", b"test".to_vec(), "240429", sha256),
        seal_case("plain-test-sha1", b"test".to_vec(), "240429", HashAlgorithm::Sha1),
        seal_case("plain-test-sha512", b"test".to_vec(), "240429", HashAlgorithm::Sha512),
        seal_case(
            "swedish-multiline",
            latin1("ÅÄÖ\r\nåäö\r\n\r\nmultiline-string__"),
            "240429",
            sha256,
        ),
        seal_case("existing-header", existing_header_content(), "240429", sha256),
        seal_case("blank-rows-lf", outgoing_basic(), "231231", sha256),
        seal_case("long-first-line", long_first_line_content(), "240429", sha256),
        seal_case("control-bytes", control_bytes_content(), "240429", sha256),
    ];

    let vectors = SealVectors {
        warning: WARNING,
        description: "HMAC seal vectors for key 1234567890ABCDEF1234567890ABCDEF",
        key_hex: TEST_KEY_HEX,
        kvv: KvvSet {
            sha1: kvv_for(HashAlgorithm::Sha1),
            sha256: kvv_for(HashAlgorithm::Sha256),
            sha512: kvv_for(HashAlgorithm::Sha512),
        },
        cases,
    };
    serde_json::to_string_pretty(&vectors).expect("vectors serialize")
}

/// Regenerate `normalize.vectors.json`.
pub fn generate_normalize_json() -> String {
    let inputs: Vec<(&'static str, Vec<u8>)> = vec![
        ("ascii-lower", b"abcdefghijklmnopqrstuvwxyz".to_vec()),
        ("ascii-upper", b"ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_vec()),
        ("digits-space", b"1234567890 0".to_vec()),
        ("swedish", latin1("åäöÅÄÖ")),
        ("swedish-multiline", latin1("åäö\r\nÅÄÖ\r\n\r\nmultiline-string__")),
        ("special-table", vec![201, 196, 214, 197, 220, 233, 228, 246, 229, 252]),
        ("cr-only-lines", b"row one\rrow two\r\r\rrow three\r".to_vec()),
        ("whitespace-rows", b"a\r\n \t \r\n\r\n  b\r\n\r\n".to_vec()),
        (
            "printable-charset",
            b" !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmno\r\npqrstuvwxyz{|}~".to_vec(),
        ),
    ];

    let cases = inputs
        .into_iter()
        .map(|(id, input)| NormalizeCase {
            id,
            input_hex: hex::encode(&input),
            expected_formatted_hex: hex::encode(format_content(&input)),
            expected_normalized_hex: hex::encode(normalize_content(&input)),
        })
        .collect();

    let vectors = NormalizeVectors {
        warning: WARNING,
        description: "Content normalization vectors",
        cases,
    };
    serde_json::to_string_pretty(&vectors).expect("vectors serialize")
}
