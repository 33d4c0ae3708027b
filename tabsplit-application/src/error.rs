use tabsplit_domain::{ExpenseValidationError, Money};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Group '{0}' does not exist")]
    UnknownGroup(String),
    #[error("Please enter a valid positive number for the amount (found {0})")]
    InvalidAmount(Money),
    #[error(transparent)]
    Validation(#[from] ExpenseValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("Nothing to classify: title and description are empty")]
    EmptyInput,
    #[error("Category suggestion is unavailable: {0}")]
    Unavailable(String),
}
