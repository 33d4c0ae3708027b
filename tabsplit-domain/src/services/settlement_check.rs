use crate::model::{MemberBalances, Money, Transfer};

/// Applies transfers to a balance table. The sender's balance rises by the
/// amount and the receiver's falls; ids missing from the table are skipped.
pub fn apply_transfers(mut balances: MemberBalances, transfers: &[Transfer]) -> MemberBalances {
    for transfer in transfers {
        if let Some(balance) = balances.get_mut(&transfer.from) {
            *balance += transfer.amount;
        }
        if let Some(balance) = balances.get_mut(&transfer.to) {
            *balance -= transfer.amount;
        }
    }
    balances
}

pub fn is_settled(balances: &MemberBalances, tolerance: Money) -> bool {
    let tolerance = tolerance.abs();
    balances.values().all(|balance| balance.abs() <= tolerance)
}
