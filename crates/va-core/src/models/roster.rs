use super::registrant::{AssignmentKey, IdentityKey, SlotAssignment};
use super::window::TimeWindow;

/// One line of a finalized roster: the six output columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub identity: IdentityKey,
    pub sex: String,
    pub window: TimeWindow,
    /// Absent for history rows whose file has no sequence column.
    pub sequence: Option<u32>,
}

impl RosterRow {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.identity.clone(), self.window)
    }
}

impl From<SlotAssignment> for RosterRow {
    fn from(assignment: SlotAssignment) -> Self {
        Self {
            identity: assignment.identity,
            sex: assignment.sex,
            window: assignment.window,
            sequence: Some(assignment.sequence),
        }
    }
}
