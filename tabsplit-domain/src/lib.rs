#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Category, Expense, Member, MemberBalances, MemberId, Money, MoneyError, Settlement, Transfer,
};
pub use services::{
    BalanceCalculator, DEFAULT_TOLERANCE, DebtSimplifier, ExpenseValidationError,
    ExpenseValidator, SplitPolicy,
};
