use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;

use crate::error::AllocatorError;

use super::registrant::{AssignmentKey, IdentityKey, Registrant};
use super::roster::RosterRow;
use super::window::TimeWindow;

/// Everything one allocation run needs, gathered by the form.
#[derive(Debug, Clone)]
pub struct AllocationRequest {
    pub registrations: Vec<Registrant>,
    pub history: Vec<RosterRow>,
    pub blacklist: HashSet<IdentityKey>,
    pub exits: HashSet<AssignmentKey>,
    pub capacity: NonZeroU32,
    pub incremental_only: bool,
}

impl AllocationRequest {
    pub fn new(registrations: Vec<Registrant>, capacity: NonZeroU32) -> Self {
        Self {
            registrations,
            history: Vec::new(),
            blacklist: HashSet::new(),
            exits: HashSet::new(),
            capacity,
            incremental_only: false,
        }
    }
}

/// Parse the seat count typed into the form. Must be a whole number >= 1.
pub fn parse_capacity(text: &str) -> Result<NonZeroU32, AllocatorError> {
    let trimmed = text.trim();
    trimmed
        .parse::<u32>()
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| {
            AllocatorError::InvalidCapacity(format!("'{trimmed}' is not a whole number of at least 1"))
        })
}

/// Text in a registrant's selections that did not yield a usable window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionWarning {
    /// The selections field held no window literal at all.
    NoWindows { sequence: u32, name: String },
    /// A literal matched the pattern but is not a real interval.
    MalformedWindow {
        sequence: u32,
        name: String,
        text: String,
    },
}

impl fmt::Display for ExpansionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindows { sequence, name } => {
                write!(f, "#{sequence} {name}: no time window selected")
            }
            Self::MalformedWindow {
                sequence,
                name,
                text,
            } => write!(f, "#{sequence} {name}: ignored malformed window '{text}'"),
        }
    }
}

/// Per-window accounting for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub window: TimeWindow,
    pub history_count: usize,
    pub remaining: usize,
    pub candidates: usize,
    pub admitted: usize,
    pub rejected: usize,
}

/// Result of one allocation run.
#[derive(Debug, Clone, Default)]
pub struct AllocationOutcome {
    /// Final roster in output order.
    pub roster: Vec<RosterRow>,
    pub newly_admitted: usize,
    pub carried_forward: usize,
    pub windows: Vec<WindowSummary>,
    pub warnings: Vec<ExpansionWarning>,
}

impl AllocationOutcome {
    pub fn rejected(&self) -> usize {
        self.windows.iter().map(|w| w.rejected).sum()
    }

    /// Plain-text report: one header line then one line per window.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Admitted {} rows ({} new, {} carried forward, {} rejected)",
            self.roster.len(),
            self.newly_admitted,
            self.carried_forward,
            self.rejected()
        )];
        for w in &self.windows {
            lines.push(format!(
                "{}  history {}  open {}  candidates {}  admitted {}  rejected {}",
                w.window, w.history_count, w.remaining, w.candidates, w.admitted, w.rejected
            ));
        }
        lines
    }
}
