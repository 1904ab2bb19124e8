use std::collections::HashSet;
use std::hash::Hash;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use va_core::models::{
    parse_capacity, AllocationOutcome, AllocationRequest, AllocatorConfig, AssignmentKey,
    IdentityKey, RosterRow,
};
use va_core::services::engine;
use va_core::services::registrations::RegistrationSheet;

/// The active mode determines which UI is shown and how keys are dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Form,
    BlacklistPicker,
    ExitPicker,
    ConfirmDialog {
        message: String,
        action: ConfirmAction,
    },
    HelpDialog,
    Loading(String),
    Roster,
}

/// What a confirmed dialog action should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    OverwriteOutput,
    Quit,
}

/// First round has no history; later rounds build on the previous roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Round {
    #[default]
    First,
    Subsequent,
}

impl Round {
    pub fn toggle(self) -> Self {
        match self {
            Round::First => Round::Subsequent,
            Round::Subsequent => Round::First,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::First => "First round",
            Round::Subsequent => "Subsequent round",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Registrations,
    Round,
    History,
    Incremental,
    Blacklist,
    Exits,
    Capacity,
    Output,
    Run,
}

impl FormField {
    const ORDER: [FormField; 9] = [
        FormField::Registrations,
        FormField::Round,
        FormField::History,
        FormField::Incremental,
        FormField::Blacklist,
        FormField::Exits,
        FormField::Capacity,
        FormField::Output,
        FormField::Run,
    ];

    /// Fields reachable for the given round, in display order.
    pub fn visible(round: Round) -> Vec<FormField> {
        Self::ORDER
            .into_iter()
            .filter(|f| round == Round::Subsequent || !f.is_history_only())
            .collect()
    }

    pub fn is_history_only(self) -> bool {
        matches!(self, FormField::History | FormField::Incremental)
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Registrations | FormField::History | FormField::Capacity | FormField::Output
        )
    }
}

// ─── Pickers ───────────────────────────────────────────────────────────

/// Number of picker rows shown at once.
pub const PICKER_PAGE: usize = 10;

/// Multi-select list with fuzzy filtering, used for the blacklist and the
/// exit list.
#[derive(Debug)]
pub struct Picker<K> {
    pub options: Vec<(K, String)>,
    pub chosen: HashSet<K>,
    pub query: String,
    /// Indices into `options` matching `query`, best match first.
    pub filtered: Vec<usize>,
    pub cursor: usize,
}

impl<K> Default for Picker<K> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            chosen: HashSet::new(),
            query: String::new(),
            filtered: Vec::new(),
            cursor: 0,
        }
    }
}

impl<K: Clone + Eq + Hash> Picker<K> {
    /// Replace the option list. Choices that no longer exist are dropped.
    pub fn set_options(&mut self, options: Vec<(K, String)>) {
        let available: HashSet<&K> = options.iter().map(|(k, _)| k).collect();
        self.chosen.retain(|k| available.contains(k));
        self.options = options;
        self.query.clear();
        self.apply_filter();
    }

    /// Run fuzzy matching on the option labels using `query`.
    pub fn apply_filter(&mut self) {
        let query = self.query.trim();
        if query.is_empty() {
            self.filtered = (0..self.options.len()).collect();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = self
                .options
                .iter()
                .enumerate()
                .filter_map(|(i, (_, label))| matcher.fuzzy_match(label, query).map(|s| (s, i)))
                .collect();
            // Stable sort keeps sign-up order among equal scores.
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            self.filtered = scored.into_iter().map(|(_, i)| i).collect();
        }
        self.cursor = 0;
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.apply_filter();
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.apply_filter();
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.filtered.len() {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Flip the option under the cursor. Returns false when nothing matches.
    pub fn toggle_current(&mut self) -> bool {
        let Some(&idx) = self.filtered.get(self.cursor) else {
            return false;
        };
        let key = &self.options[idx].0;
        if !self.chosen.remove(key) {
            self.chosen.insert(key.clone());
        }
        true
    }

    pub fn is_chosen(&self, idx: usize) -> bool {
        self.options
            .get(idx)
            .is_some_and(|(k, _)| self.chosen.contains(k))
    }

    /// First visible row so the cursor stays on screen.
    pub fn scroll_offset(&self) -> usize {
        (self.cursor + 1).saturating_sub(PICKER_PAGE)
    }
}

// ─── Form ──────────────────────────────────────────────────────────────

/// Text and toggles typed into the allocation form.
#[derive(Debug)]
pub struct AllocationForm {
    pub registrations_path: String,
    pub round: Round,
    pub history_path: String,
    pub incremental: bool,
    pub capacity: String,
    pub output_path: String,
    pub focus: FormField,
}

impl AllocationForm {
    pub fn new(config: &AllocatorConfig) -> Self {
        Self {
            registrations_path: String::new(),
            round: Round::First,
            history_path: String::new(),
            incremental: false,
            capacity: config.default_capacity.to_string(),
            output_path: config.output_file.clone(),
            focus: FormField::default(),
        }
    }

    pub fn focus_next(&mut self) {
        let fields = FormField::visible(self.round);
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = FormField::visible(self.round);
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    /// Text buffer behind the focused field, if it is a text field.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Registrations => Some(&mut self.registrations_path),
            FormField::History => Some(&mut self.history_path),
            FormField::Capacity => Some(&mut self.capacity),
            FormField::Output => Some(&mut self.output_path),
            _ => None,
        }
    }
}

/// Sign-up sheet currently loaded into the form.
#[derive(Debug)]
pub struct LoadedRegistrations {
    pub path: PathBuf,
    pub sheet: RegistrationSheet,
    pub candidate_count: usize,
}

/// Prior roster currently loaded into the form.
#[derive(Debug)]
pub struct LoadedHistory {
    pub path: PathBuf,
    pub rows: Vec<RosterRow>,
}

/// A finished run, kept for the summary panel and roster view.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: AllocationOutcome,
    pub output_path: PathBuf,
    pub finished_at: DateTime<Local>,
}

// ─── Main App State ────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
    pub mode: Mode,
    pub config: AllocatorConfig,
    pub form: AllocationForm,
    pub registrations: Option<LoadedRegistrations>,
    pub history: Option<LoadedHistory>,
    pub blacklist: Picker<IdentityKey>,
    pub exits: Picker<AssignmentKey>,
    pub last_run: Option<RunReport>,
    pub roster_scroll: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AllocatorConfig::default())
    }
}

impl App {
    pub fn new(config: AllocatorConfig) -> Self {
        Self {
            mode: Mode::Form,
            form: AllocationForm::new(&config),
            config,
            registrations: None,
            history: None,
            blacklist: Picker::default(),
            exits: Picker::default(),
            last_run: None,
            roster_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Install a freshly loaded sign-up sheet and rebuild both pickers.
    pub fn apply_registrations(&mut self, path: PathBuf, sheet: RegistrationSheet) {
        let people = engine::blacklist_options(&sheet.registrants);
        self.blacklist.set_options(
            people
                .into_iter()
                .map(|k| {
                    let label = k.display_label();
                    (k, label)
                })
                .collect(),
        );

        let pairs = engine::exit_options(&sheet.registrants);
        let candidate_count = pairs.len();
        self.exits.set_options(
            pairs
                .into_iter()
                .map(|k| {
                    let label = k.display_label();
                    (k, label)
                })
                .collect(),
        );

        let mut msg = format!(
            "Loaded {} registrants ({} candidate slots)",
            sheet.registrants.len(),
            candidate_count
        );
        if !sheet.skipped.is_empty() {
            msg.push_str(&format!(", skipped {} rows", sheet.skipped.len()));
        }
        self.set_status(msg);
        self.registrations = Some(LoadedRegistrations {
            path,
            sheet,
            candidate_count,
        });
        self.mode = Mode::Form;
    }

    pub fn apply_history(&mut self, path: PathBuf, rows: Vec<RosterRow>) {
        self.set_status(format!("Loaded {} history rows", rows.len()));
        self.history = Some(LoadedHistory { path, rows });
        self.mode = Mode::Form;
    }

    pub fn apply_run(&mut self, report: RunReport) {
        let outcome = &report.outcome;
        let mut msg = format!(
            "Admitted {} rows -> {}",
            outcome.roster.len(),
            report.output_path.display()
        );
        if !outcome.warnings.is_empty() {
            msg.push_str(&format!(" ({} warnings)", outcome.warnings.len()));
        }
        self.set_status(msg);
        self.roster_scroll = 0;
        self.last_run = Some(report);
        self.mode = Mode::Form;
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.form.output_path.trim())
    }

    /// Gather the form into one engine request, or say what is missing.
    pub fn build_request(&self) -> Result<AllocationRequest, String> {
        let Some(loaded) = &self.registrations else {
            return Err("Load the registration sheet first".into());
        };
        if loaded.path != PathBuf::from(self.form.registrations_path.trim()) {
            return Err("Press Enter on Sign-up sheet to load it".into());
        }
        let capacity = parse_capacity(&self.form.capacity).map_err(|e| e.to_string())?;
        if self.form.output_path.trim().is_empty() {
            return Err("Output file is required".into());
        }

        let mut request = AllocationRequest::new(loaded.sheet.registrants.clone(), capacity);
        request.blacklist = self.blacklist.chosen.clone();
        request.exits = self.exits.chosen.clone();

        if self.form.round == Round::Subsequent {
            let Some(history) = &self.history else {
                return Err("Load the history roster first".into());
            };
            if history.path != PathBuf::from(self.form.history_path.trim()) {
                return Err("Press Enter on History roster to load it".into());
            }
            request.history = history.rows.clone();
            request.incremental_only = self.form.incremental;
        }

        Ok(request)
    }
}
