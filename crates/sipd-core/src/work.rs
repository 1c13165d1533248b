use std::fmt;
use std::path::PathBuf;

/// Indonesian month names as the portal's month dropdown renders them.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Month name for a 1-based month number, `None` outside 1-12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = month.checked_sub(1)? as usize;
    MONTH_NAMES.get(idx).copied()
}

/// One unit of batch work.
///
/// `validate` runs before any portal interaction; a failure here becomes a
/// terminal invalid-input outcome for that item only.
pub trait WorkUnit {
    fn label(&self) -> String;
    fn validate(&self) -> std::result::Result<(), String>;
}

/// A reporting month, 1-based as operators type it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth(pub u32);

impl ReportMonth {
    pub fn name(&self) -> Option<&'static str> {
        month_name(self.0)
    }
}

impl WorkUnit for ReportMonth {
    fn label(&self) -> String {
        match self.name() {
            Some(name) => format!("{:02} {}", self.0, name),
            None => format!("month {}", self.0),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.name().is_some() {
            Ok(())
        } else {
            Err(format!("month {} is outside 1-12", self.0))
        }
    }
}

/// An SKPD name as it appears in the portal's unit dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitName(pub String);

impl WorkUnit for UnitName {
    fn label(&self) -> String {
        self.0.clone()
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.0.trim().is_empty() {
            Err("unit name is blank".to_string())
        } else {
            Ok(())
        }
    }
}

/// One journal entry row from an input spreadsheet.
///
/// Either amount may legitimately be absent; a row with neither is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRow {
    pub account_code: String,
    pub debit: Option<String>,
    pub credit: Option<String>,
}

impl WorkUnit for JournalRow {
    fn label(&self) -> String {
        self.account_code.clone()
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.account_code.trim().is_empty() {
            return Err("account code is blank".to_string());
        }
        if self.debit.is_none() && self.credit.is_none() {
            return Err(format!("{}: neither debit nor credit given", self.account_code));
        }
        Ok(())
    }
}

/// Why a batch item failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// Rejected before any portal interaction.
    InvalidInput(String),
    /// A bounded wait (element, navigation, download) expired.
    Timeout(String),
    /// The portal did something the workflow has no handling for.
    Unexpected(String),
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            FailReason::Timeout(msg) => write!(f, "timed out: {}", msg),
            FailReason::Unexpected(msg) => write!(f, "unexpected: {}", msg),
        }
    }
}

/// Terminal outcome of one batch item.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Success { artifact: Option<PathBuf> },
    Failed(FailReason),
    Skipped(String),
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success { .. })
    }
}

impl fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOutcome::Success { artifact: Some(path) } => {
                write!(f, "ok ({})", path.display())
            }
            BatchOutcome::Success { artifact: None } => write!(f, "ok"),
            BatchOutcome::Failed(reason) => write!(f, "failed: {}", reason),
            BatchOutcome::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

/// Outcome of one item, under the label it was submitted with.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub label: String,
    pub outcome: BatchOutcome,
}

/// Ordered outcomes for a whole batch: one entry per input item.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: String, outcome: BatchOutcome) {
        self.items.push(ItemReport { label, outcome });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, BatchOutcome::Failed(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, BatchOutcome::Skipped(_)))
            .count()
    }

    /// Printable per-item summary, in submission order.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            out.push_str(&format!("  {} -> {}\n", item.label, item.outcome));
        }
        out.push_str(&format!(
            "{} ok, {} failed, {} skipped ({} total)",
            self.succeeded(),
            self.failed(),
            self.skipped(),
            self.len()
        ));
        out
    }
}
