use std::fmt;

use super::window::TimeWindow;

/// Identifies one person across the sign-up sheet, the blacklist, the exit
/// list and the history roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub name: String,
    pub student_id: String,
    pub contact: String,
}

impl IdentityKey {
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            contact: contact.into(),
        }
    }

    /// True when every component is blank, which cannot identify anyone.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.student_id.trim().is_empty()
            && self.contact.trim().is_empty()
    }

    /// Label used in pickers: `name (student id)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.student_id)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.name, self.student_id, self.contact)
    }
}

/// One person holding (or asking for) one specific window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssignmentKey {
    pub identity: IdentityKey,
    pub window: TimeWindow,
}

impl AssignmentKey {
    pub fn new(identity: IdentityKey, window: TimeWindow) -> Self {
        Self { identity, window }
    }

    /// Label used in the exit picker: `name - window`.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.identity.name, self.window)
    }
}

/// A row of the sign-up sheet, before its free-text selections are split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub identity: IdentityKey,
    pub sex: String,
    /// Free text holding zero or more window literals.
    pub selections: String,
    /// 1-based position in the sign-up sheet. Lower signs up earlier.
    pub sequence: u32,
}

/// A registrant paired with one window they selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    pub identity: IdentityKey,
    pub sex: String,
    pub window: TimeWindow,
    pub sequence: u32,
}

impl SlotAssignment {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.identity.clone(), self.window)
    }
}
