//! Domain model for the task audit history.

mod entry;
mod ids;

pub use entry::{HistoryEntry, PersistedHistoryData};
pub use ids::HistoryEntryId;
