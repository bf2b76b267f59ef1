//! Import result aggregation and the user-facing summary text.

use serde::Serialize;

use crate::kind::ImportKind;

/// Errors shown in the summary; the rest are counted in the overflow notice.
pub const MAX_ERRORS_SHOWN: usize = 10;

/// Warnings shown in the summary.
pub const MAX_WARNINGS_SHOWN: usize = 5;

// ---------------------------------------------------------------------------
// Running tally
// ---------------------------------------------------------------------------

/// Counters and messages accumulated while an import runs.
#[derive(Debug, Clone, Default)]
pub struct ImportTally {
    imported: usize,
    updated: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ImportTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_imported(&mut self) {
        self.imported += 1;
    }

    pub fn record_updated(&mut self) {
        self.updated += 1;
    }

    /// Undo counts for rows whose batch was rolled back.
    pub fn retract(&mut self, imported: usize, updated: usize) {
        self.imported = self.imported.saturating_sub(imported);
        self.updated = self.updated.saturating_sub(updated);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn imported(&self) -> usize {
        self.imported
    }

    pub fn updated(&self) -> usize {
        self.updated
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Freeze the tally into a display summary.
    pub fn summarize(&self, kind: ImportKind) -> ImportSummary {
        let truncated =
            self.errors.len() > MAX_ERRORS_SHOWN || self.warnings.len() > MAX_WARNINGS_SHOWN;
        ImportSummary {
            import_type: kind,
            imported_count: self.imported,
            updated_count: self.updated,
            error_count: self.errors.len(),
            warning_count: self.warnings.len(),
            errors: self.errors.iter().take(MAX_ERRORS_SHOWN).cloned().collect(),
            warnings: self.warnings.iter().take(MAX_WARNINGS_SHOWN).cloned().collect(),
            truncated,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Final result of one import run.
///
/// `errors` and `warnings` hold at most [`MAX_ERRORS_SHOWN`] and
/// [`MAX_WARNINGS_SHOWN`] entries; the full totals are in the `*_count`
/// fields.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub import_type: ImportKind,
    pub imported_count: usize,
    pub updated_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub truncated: bool,
}

impl ImportSummary {
    /// One-line tally, e.g. `"3 new equipment added, 1 warning"`.
    ///
    /// Zero-valued clauses are omitted.
    pub fn message(&self) -> String {
        let (one, many) = self.import_type.record_noun();
        let mut clauses = Vec::new();
        if self.imported_count > 0 {
            let noun = if self.imported_count == 1 { one } else { many };
            clauses.push(format!("{} new {noun} added", self.imported_count));
        }
        if self.updated_count > 0 {
            let noun = if self.updated_count == 1 { one } else { many };
            clauses.push(format!("{} existing {noun} updated", self.updated_count));
        }
        if self.warning_count > 0 {
            clauses.push(count_noun(self.warning_count, "warning", "warnings"));
        }
        if self.error_count > 0 {
            clauses.push(count_noun(self.error_count, "error", "errors"));
        }
        if clauses.is_empty() {
            "No changes were made".to_string()
        } else {
            clauses.join(", ")
        }
    }

    /// Notice for errors beyond the first [`MAX_ERRORS_SHOWN`].
    pub fn overflow_notice(&self) -> Option<String> {
        let hidden = self.error_count.saturating_sub(MAX_ERRORS_SHOWN);
        (hidden > 0).then(|| format!("...and {} not shown", count_noun(hidden, "more error", "more errors")))
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

fn count_noun(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_lists_non_zero_clauses() {
        let mut tally = ImportTally::new();
        tally.record_imported();
        tally.record_imported();
        tally.record_updated();
        tally.warning("w");
        let summary = tally.summarize(ImportKind::FullInventory);
        assert_eq!(
            summary.message(),
            "2 new equipment added, 1 existing equipment updated, 1 warning"
        );
    }

    #[test]
    fn message_for_empty_run() {
        let summary = ImportTally::new().summarize(ImportKind::Registration);
        assert_eq!(summary.message(), "No changes were made");
        assert!(!summary.has_errors());
        assert!(summary.overflow_notice().is_none());
    }

    #[test]
    fn people_use_account_noun() {
        let mut tally = ImportTally::new();
        tally.record_imported();
        tally.record_updated();
        tally.record_updated();
        let summary = tally.summarize(ImportKind::People);
        assert_eq!(
            summary.message(),
            "1 new directory account added, 2 existing directory accounts updated"
        );
    }

    #[test]
    fn fifteen_errors_show_ten_and_overflow() {
        let mut tally = ImportTally::new();
        for n in 0..15 {
            tally.error(format!("Row {}: boom", n + 2));
        }
        let summary = tally.summarize(ImportKind::FullInventory);
        assert_eq!(summary.error_count, 15);
        assert_eq!(summary.errors.len(), 10);
        assert_eq!(summary.errors[0], "Row 2: boom");
        assert_eq!(summary.errors[9], "Row 11: boom");
        assert!(summary.truncated);
        assert!(summary.message().ends_with("15 errors"));
        let notice = summary.overflow_notice().unwrap();
        assert!(notice.contains("5 more errors"), "notice: {notice}");
    }

    #[test]
    fn warnings_truncated_to_five() {
        let mut tally = ImportTally::new();
        for n in 0..7 {
            tally.warning(format!("w{n}"));
        }
        let summary = tally.summarize(ImportKind::FullInventory);
        assert_eq!(summary.warnings.len(), 5);
        assert_eq!(summary.warning_count, 7);
        assert!(summary.truncated);
        assert!(summary.overflow_notice().is_none());
    }

    #[test]
    fn retract_undoes_rolled_back_rows() {
        let mut tally = ImportTally::new();
        for _ in 0..4 {
            tally.record_imported();
        }
        tally.record_updated();
        tally.retract(3, 1);
        assert_eq!(tally.imported(), 1);
        assert_eq!(tally.updated(), 0);
    }

    #[test]
    fn exactly_ten_errors_not_truncated() {
        let mut tally = ImportTally::new();
        for _ in 0..10 {
            tally.error("e");
        }
        let summary = tally.summarize(ImportKind::Configuration);
        assert!(!summary.truncated);
        assert!(summary.overflow_notice().is_none());
    }
}
