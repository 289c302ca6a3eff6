//! Autogiro section parser — structural state machine over file rows.
//!
//! A file is a run of 80-char records. Each section opens with a `01`
//! row (TK01) matched against the [`SectionRegistry`], carries body rows
//! whose record codes the matched layout allows, and closes with a `09`
//! row, optionally followed by an `08` section seal. A sealed file wraps
//! everything in a `00` header and a `99` footer.
//!
//! Row-level problems (wrong width, foreign record code) never stop the
//! scan; they are collected as [`SectionIssue`]s on the section. Layout
//! problems are fatal and surface as a [`PartialParse`], which still
//! carries every section assembled up to that point, including the one
//! that was open.
//!
//! [`SectionRegistry`]: crate::registry::SectionRegistry
//! [`SectionIssue`]: crate::errors::SectionIssue

pub mod file;
pub mod section;

pub use file::AutogiroFile;
pub use section::AutogiroSection;

use crate::errors::{BankgiroError, ParseError};

/// Fatal parse error plus the best-effort result assembled before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct PartialParse {
    pub error: ParseError,
    pub file: Box<AutogiroFile>,
}

impl PartialParse {
    pub(crate) fn new(error: ParseError, file: AutogiroFile) -> Self {
        Self {
            error,
            file: Box::new(file),
        }
    }

    /// Drop the partial result and keep only the error.
    pub fn into_error(self) -> ParseError {
        self.error
    }
}

impl From<PartialParse> for ParseError {
    fn from(partial: PartialParse) -> Self {
        partial.error
    }
}

impl From<PartialParse> for BankgiroError {
    fn from(partial: PartialParse) -> Self {
        BankgiroError::Parse(partial.error)
    }
}

/// Blank rows are skipped everywhere. Only spaces and tabs count.
pub(crate) fn is_blank(row: &str) -> bool {
    row.trim_matches([' ', '\t']).is_empty()
}

/// Does `row` carry record code `code`?
pub(crate) fn has_code(row: &str, code: &str) -> bool {
    row.starts_with(code)
}

/// Split on CRLF, LF or bare CR. A trailing terminator yields a final
/// empty row, which the scanner skips as blank.
pub(crate) fn split_rows(text: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find(['\r', '\n']) {
        rows.push(rest[..at].to_owned());
        let width = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[at + width..];
    }
    rows.push(rest.to_owned());
    rows
}
