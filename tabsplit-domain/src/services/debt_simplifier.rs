use crate::{
    model::{Expense, Member, MemberBalances, MemberId, Money, Settlement, Transfer},
    services::{BalanceCalculator, settlement_check},
};
use std::cmp::Reverse;

/// Balances within this band of zero count as settled (0.01).
pub const DEFAULT_TOLERANCE: Money = Money::from_minor(1);

/// Greedy minimum-cash-flow matcher.
///
/// Debtors are sorted most negative first and creditors most positive first,
/// then walked with two cursors so that the largest debts meet the largest
/// credits. Both sorts are stable, so equal balances keep member input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebtSimplifier {
    tolerance: Money,
}

impl Default for DebtSimplifier {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl DebtSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: Money) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Transfers that settle every member's balance computed from `expenses`.
    ///
    /// Never fails: empty input or already-settled members yield no transfers,
    /// and unknown member ids are ignored.
    pub fn simplify(&self, expenses: &[Expense], members: &[Member]) -> Vec<Transfer> {
        let balances = BalanceCalculator::calculate(expenses, members);
        self.simplify_balances(&balances)
    }

    /// Like [`Self::simplify`], also returning the balances left after applying
    /// the transfers.
    pub fn settle(&self, expenses: &[Expense], members: &[Member]) -> Settlement {
        let balances = BalanceCalculator::calculate(expenses, members);
        let transfers = self.simplify_balances(&balances);
        let residual = settlement_check::apply_transfers(balances, &transfers);

        Settlement {
            transfers,
            residual,
        }
    }

    pub fn simplify_balances(&self, balances: &MemberBalances) -> Vec<Transfer> {
        let tolerance = self.tolerance;

        let mut debtors: Vec<(MemberId, Money)> = balances
            .iter()
            .filter(|(_, balance)| **balance < -tolerance)
            .map(|(member, balance)| (member.clone(), *balance))
            .collect();
        let mut creditors: Vec<(MemberId, Money)> = balances
            .iter()
            .filter(|(_, balance)| **balance > tolerance)
            .map(|(member, balance)| (member.clone(), *balance))
            .collect();

        debtors.sort_by_key(|(_, balance)| *balance);
        creditors.sort_by_key(|(_, balance)| Reverse(*balance));

        let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
        let mut debtor_idx = 0;
        let mut creditor_idx = 0;

        // Each round drives at least one side to zero, so the walk is bounded by
        // debtors + creditors rounds even when the totals do not cancel out.
        while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
            let (debtor, debt) = &mut debtors[debtor_idx];
            let (creditor, credit) = &mut creditors[creditor_idx];

            let amount = debt.abs().min(*credit);
            if amount > tolerance {
                transfers.push(Transfer {
                    from: debtor.clone(),
                    to: creditor.clone(),
                    amount,
                });
                *debt += amount;
                *credit -= amount;
            }

            if debt.abs() <= tolerance {
                debtor_idx += 1;
            }
            if credit.abs() <= tolerance {
                creditor_idx += 1;
            }
        }

        tracing::debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = transfers.len(),
            "Simplified debts"
        );

        transfers
    }
}
