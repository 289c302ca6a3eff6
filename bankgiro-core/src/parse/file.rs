//! Whole-file parse: row splitting, the section state machine and the
//! HMAC envelope check.

use tracing::{debug, trace, warn};

use crate::constants::{
    HMAC_FILE_SEAL, HMAC_HEADER, HMAC_SECTION_SEAL, SECTION_END, SECTION_START,
};
use crate::errors::ParseError;
use crate::registry::SectionRegistry;

use super::section::AutogiroSection;
use super::{has_code, is_blank, split_rows, PartialParse};

/// A parsed Autogiro file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutogiroFile {
    hmac_start_found: bool,
    hmac_end_found: bool,
    hmac_footer: Option<String>,
    content: Vec<String>,
    sections: Vec<AutogiroSection>,
}

impl AutogiroFile {
    /// Parse `text` against the built-in section layouts.
    ///
    /// # Errors
    /// Returns a [`PartialParse`] on any fatal layout error. It carries
    /// the sections assembled so far, including an unterminated one.
    pub fn parse(text: &str) -> Result<Self, PartialParse> {
        Self::parse_with(text, &SectionRegistry::standard())
    }

    /// Parse `text` against a caller-supplied registry.
    pub fn parse_with(text: &str, registry: &SectionRegistry) -> Result<Self, PartialParse> {
        let content = split_rows(text);
        if content.len() == 1 {
            let file = AutogiroFile {
                content,
                ..Default::default()
            };
            return Err(PartialParse::new(ParseError::SingleRow, file));
        }

        let mut scanner = Scanner::new(registry);
        let outcome = scanner.scan(&content);
        // A section still open here is kept in the partial result.
        scanner.close();

        let file = AutogiroFile {
            hmac_start_found: scanner.hmac_start_found,
            hmac_end_found: scanner.hmac_footer.is_some(),
            hmac_footer: scanner.hmac_footer,
            content,
            sections: scanner.sections,
        };

        match outcome {
            Ok(()) => {
                debug!(
                    rows = file.content.len(),
                    sections = file.sections.len(),
                    issues = file.issue_count(),
                    "file parsed"
                );
                Ok(file)
            }
            Err(error) => {
                warn!(%error, sections = file.sections.len(), "file parse failed");
                Err(PartialParse::new(error, file))
            }
        }
    }

    pub fn sections(&self) -> &[AutogiroSection] {
        &self.sections
    }

    /// Every raw row, in file order, blank ones included.
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// The `99` footer row of a sealed file.
    pub fn hmac_footer(&self) -> Option<&str> {
        self.hmac_footer.as_deref()
    }

    pub fn hmac_start_found(&self) -> bool {
        self.hmac_start_found
    }

    pub fn hmac_end_found(&self) -> bool {
        self.hmac_end_found
    }

    /// Header and footer both present.
    pub fn has_hmac_envelope(&self) -> bool {
        self.hmac_start_found && self.hmac_end_found
    }

    /// Non-fatal issues across all sections.
    pub fn issue_count(&self) -> usize {
        self.sections.iter().map(|s| s.issues().len()).sum()
    }
}

enum ScanState {
    Seeking,
    InSection(AutogiroSection),
}

/// Forward scan over rows with a one-row lookahead.
struct Scanner<'r> {
    registry: &'r SectionRegistry,
    state: ScanState,
    sections: Vec<AutogiroSection>,
    hmac_start_found: bool,
    hmac_footer: Option<String>,
}

impl<'r> Scanner<'r> {
    fn new(registry: &'r SectionRegistry) -> Self {
        Self {
            registry,
            state: ScanState::Seeking,
            sections: Vec::new(),
            hmac_start_found: false,
            hmac_footer: None,
        }
    }

    fn scan(&mut self, rows: &[String]) -> Result<(), ParseError> {
        let mut numbered = rows.iter().enumerate().peekable();
        while let Some((index, row)) = numbered.next() {
            let pending = numbered.peek().map(|(_, next)| next.as_str());
            self.feed(index + 1, row, pending)?;
        }
        self.reconcile(rows)
    }

    /// Process one row. `line` is 1-based; `pending` is the raw next row.
    fn feed(&mut self, line: usize, row: &str, pending: Option<&str>) -> Result<(), ParseError> {
        if is_blank(row) || has_code(row, HMAC_SECTION_SEAL) || has_code(row, HMAC_FILE_SEAL) {
            return Ok(());
        }

        if has_code(row, HMAC_HEADER) {
            if self.hmac_start_found {
                return Err(ParseError::MultipleHmacStart { line });
            }
            debug!(line, "hmac header found");
            self.hmac_start_found = true;
            return Ok(());
        }

        let ScanState::InSection(section) = &mut self.state else {
            return self.open(line, row);
        };

        if has_code(row, SECTION_END) {
            section.set_end(row, pending);
            self.close();
        } else {
            trace!(line, "body row");
            section.add_line(row);
        }
        Ok(())
    }

    fn open(&mut self, line: usize, row: &str) -> Result<(), ParseError> {
        if !has_code(row, SECTION_START) {
            return Err(ParseError::MissingSectionStart { line });
        }

        let mut section = AutogiroSection::new();
        let section_type = section
            .set_start(row, self.registry)
            .ok_or(ParseError::NoMatchingSectionType { line })?;
        debug!(line, code = section_type.code, "section opened");
        self.state = ScanState::InSection(section);
        Ok(())
    }

    /// Move the open section, if any, to the finished list.
    fn close(&mut self) {
        if let ScanState::InSection(section) = std::mem::replace(&mut self.state, ScanState::Seeking)
        {
            debug!(
                code = section.section_type().map(|t| t.code),
                rows = section.rows().len(),
                issues = section.issues().len(),
                sealed = section.section_seal().is_some(),
                "section closed"
            );
            self.sections.push(section);
        }
    }

    /// End-of-file checks. The HMAC envelope is checked before the open
    /// section, so a file missing both reports the envelope.
    fn reconcile(&mut self, rows: &[String]) -> Result<(), ParseError> {
        if self.hmac_start_found {
            match rows.iter().rev().find(|row| !is_blank(row)) {
                Some(last) if has_code(last, HMAC_FILE_SEAL) => {
                    debug!("hmac footer found");
                    self.hmac_footer = Some(last.clone());
                }
                _ => return Err(ParseError::HmacNeverEnded),
            }
        }

        if matches!(self.state, ScanState::InSection(_)) {
            return Err(ParseError::SectionNeverEnded);
        }
        Ok(())
    }
}
