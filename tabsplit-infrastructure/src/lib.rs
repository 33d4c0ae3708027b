#![warn(clippy::uninlined_format_args)]

pub mod classifier;
pub mod snapshot;

pub use classifier::KeywordExpenseClassifier;
pub use snapshot::{SnapshotError, export_settlement, load_snapshot};
