use crate::model::{Expense, Member, MemberId, Money};
use fxhash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Expense amount must be positive (found {0})")]
    NonPositiveAmount(Money),
    #[error("Payer '{0}' is not a group member")]
    UnknownPayer(MemberId),
    #[error("Expense has no split")]
    EmptySplit,
    #[error("Split references '{0}', who is not a group member")]
    UnknownSplitMember(MemberId),
    #[error("Share owed by '{member}' is negative ({share})")]
    NegativeShare { member: MemberId, share: Money },
    #[error("Split total {split_total} does not match amount {amount}")]
    SplitMismatch { amount: Money, split_total: Money },
}

/// Strict checks applied before an expense is accepted into a ledger.
///
/// The debt simplifier itself tolerates everything rejected here.
pub struct ExpenseValidator;

impl ExpenseValidator {
    pub fn validate(expense: &Expense, members: &[Member]) -> Result<(), ExpenseValidationError> {
        let known: FxHashSet<&MemberId> = members.iter().map(|member| &member.id).collect();

        if !expense.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(expense.amount));
        }
        if !known.contains(&expense.payer) {
            return Err(ExpenseValidationError::UnknownPayer(expense.payer.clone()));
        }
        if expense.split.is_empty() {
            return Err(ExpenseValidationError::EmptySplit);
        }
        if let Some(member) = expense.split.keys().find(|member| !known.contains(member)) {
            return Err(ExpenseValidationError::UnknownSplitMember(member.clone()));
        }
        if let Some((member, share)) = expense.split.iter().find(|(_, share)| share.is_negative())
        {
            return Err(ExpenseValidationError::NegativeShare {
                member: member.clone(),
                share: *share,
            });
        }

        let split_total = expense.split_total();
        if split_total != expense.amount {
            return Err(ExpenseValidationError::SplitMismatch {
                amount: expense.amount,
                split_total,
            });
        }

        Ok(())
    }
}
