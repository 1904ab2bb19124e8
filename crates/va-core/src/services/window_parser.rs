use regex::Regex;
use std::sync::LazyLock;

use crate::models::TimeWindow;

static WINDOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2} \d{4}-\d{2}-\d{2} \d{2}:\d{2}").unwrap()
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Windows found in one free-text field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WindowScan {
    pub windows: Vec<TimeWindow>,
    /// Literals that matched the pattern but failed to parse as an interval.
    pub malformed: Vec<String>,
}

impl WindowScan {
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty() && self.malformed.is_empty()
    }
}

/// Scan `text` left to right for every non-overlapping window literal.
pub fn scan(text: &str) -> WindowScan {
    let mut result = WindowScan::default();
    for m in WINDOW_RE.find_iter(text) {
        match m.as_str().parse::<TimeWindow>() {
            Ok(window) => result.windows.push(window),
            Err(_) => result.malformed.push(m.as_str().to_string()),
        }
    }
    result
}

/// First valid window in `text`, if any.
pub fn first_window(text: &str) -> Option<TimeWindow> {
    WINDOW_RE
        .find_iter(text)
        .find_map(|m| m.as_str().parse().ok())
}

/// Whether `text` contains something shaped like a `YYYY-MM-DD` date.
pub fn looks_like_date(text: &str) -> bool {
    DATE_RE.is_match(text)
}
