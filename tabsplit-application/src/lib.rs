#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger_service;
pub mod model;
pub mod ports;

pub use error::{ClassificationError, LedgerError};
pub use ledger_service::{LedgerConfig, LedgerService};
pub use model::{
    CategorySuggestion, ExpenseDraft, Group, GroupExpense, GroupSettlement, LedgerSnapshot,
    MemberSummary, PersonBalance,
};
pub use ports::{ExpenseClassifier, MemberDirectory};
