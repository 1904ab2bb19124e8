pub mod allocation;
pub mod config;
pub mod registrant;
pub mod roster;
pub mod window;

pub use allocation::{
    parse_capacity, AllocationOutcome, AllocationRequest, ExpansionWarning, WindowSummary,
};
pub use config::{AllocatorConfig, ColumnNames};
pub use registrant::{AssignmentKey, IdentityKey, Registrant, SlotAssignment};
pub use roster::RosterRow;
pub use window::TimeWindow;
