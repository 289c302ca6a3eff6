//! One Autogiro section: a TK01 row, body rows and a closing `09` row.

use crate::constants::{CRLF, HMAC_SECTION_SEAL, RECORD_CODE_WIDTH, RECORD_WIDTH};
use crate::encoding;
use crate::errors::{EncodingError, SectionIssue};
use crate::registry::{SectionRegistry, SectionType, Span};

use super::has_code;

const CODE: Span = Span::new(0, RECORD_CODE_WIDTH);

/// A section as assembled by the parser.
///
/// Rows are kept exactly as read, in file order. The `08` seal row that
/// may follow the end row is stored separately and is not a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutogiroSection {
    start_found: bool,
    section_type: Option<SectionType>,
    end_found: bool,
    section_seal: Option<String>,
    rows: Vec<String>,
    issues: Vec<SectionIssue>,
}

impl AutogiroSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the layout of TK01 row `row` and record it as the first row.
    ///
    /// Returns `None`, leaving the section untouched, when no layout in
    /// `registry` matches.
    pub fn set_start(&mut self, row: &str, registry: &SectionRegistry) -> Option<SectionType> {
        let section_type = registry.match_start(row)?;
        self.start_found = true;
        self.section_type = Some(section_type);
        self.rows.push(row.to_owned());
        Some(section_type)
    }

    /// Append a body row, recording any issue with it. The row is kept
    /// whether or not it is well formed.
    pub fn add_line(&mut self, row: &str) {
        let length = row.chars().count();
        if length != RECORD_WIDTH {
            self.issues.push(SectionIssue::InvalidLineLength {
                length,
                row: row.to_owned(),
            });
        }

        let code = CODE.slice(row).unwrap_or(row);
        let allowed = self.section_type.is_some_and(|t| t.allows(code));
        if !allowed {
            self.issues.push(SectionIssue::InvalidSubsection {
                code: code.to_owned(),
            });
        }

        self.rows.push(row.to_owned());
    }

    /// Close the section with end row `row`. `lookahead` is the raw row
    /// that follows it, kept as the section seal when it is an `08` row.
    pub fn set_end(&mut self, row: &str, lookahead: Option<&str>) {
        self.end_found = true;
        self.rows.push(row.to_owned());
        if let Some(next) = lookahead.filter(|next| has_code(next, HMAC_SECTION_SEAL)) {
            self.section_seal = Some(next.to_owned());
        }
    }

    /// Customer number from the TK01 row. `None` before a start row is
    /// set or when the row is too short for the layout's window.
    pub fn customer_number(&self) -> Option<&str> {
        self.section_type?.customer_number.slice(self.rows.first()?)
    }

    /// Bankgiro account number from the TK01 row.
    pub fn account_number(&self) -> Option<&str> {
        self.section_type?.account_number.slice(self.rows.first()?)
    }

    /// All rows joined by CRLF.
    pub fn to_crlf_string(&self) -> String {
        self.rows.join(CRLF)
    }

    pub fn to_utf8_bytes(&self) -> Vec<u8> {
        self.to_crlf_string().into_bytes()
    }

    /// Rows joined by CRLF in the file's own single-byte encoding.
    pub fn to_latin1_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        encoding::encode(&self.to_crlf_string())
    }

    /// Both a start and an end row were seen.
    pub fn is_complete(&self) -> bool {
        self.start_found && self.end_found
    }

    pub fn start_found(&self) -> bool {
        self.start_found
    }

    pub fn end_found(&self) -> bool {
        self.end_found
    }

    pub fn section_type(&self) -> Option<&SectionType> {
        self.section_type.as_ref()
    }

    pub fn section_seal(&self) -> Option<&str> {
        self.section_seal.as_deref()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn issues(&self) -> &[SectionIssue] {
        &self.issues
    }
}
