pub mod balance_calculator;
pub mod debt_simplifier;
pub mod expense_validator;
pub mod settlement_check;
pub mod split_policy;

pub use balance_calculator::BalanceCalculator;
pub use debt_simplifier::{DEFAULT_TOLERANCE, DebtSimplifier};
pub use expense_validator::{ExpenseValidationError, ExpenseValidator};
pub use settlement_check::{apply_transfers, is_settled};
pub use split_policy::SplitPolicy;
