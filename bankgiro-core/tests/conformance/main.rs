//! Conformance harness — byte-exact behavior pinned by golden data.
//!
//! Coverage:
//! - Normalizer output for fixed inputs (`vectors/normalize.vectors.json`)
//! - KVV, MAC, footer and signed output (`vectors/seal.vectors.json`)
//! - Section parsing of real-layout Autogiro files (`fixtures/*.txt`)
//! - Display strings of every error a caller may log
//!
//! The vector files are committed; `vector_equivalence.rs` (feature
//! `vectors`) proves the crate still regenerates them unchanged.

mod error_display;
mod normalization;
mod sealing_vectors;
mod section_parsing;

use std::path::PathBuf;

pub(crate) fn vectors_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vectors")
}

pub(crate) fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub(crate) fn read_fixture(name: &str) -> Vec<u8> {
    let path = fixtures_dir().join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

pub(crate) fn unhex(hex: &str) -> Vec<u8> {
    bankgiro_core::encoding::from_hex(hex).expect("invalid hex in vector file")
}
