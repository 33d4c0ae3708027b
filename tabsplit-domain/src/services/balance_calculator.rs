use crate::model::{Expense, Member, MemberBalances, Money};

/// Net position per member: paid minus owed.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Every member starts at zero in input order. The payer is credited with the
    /// amount and each split member is debited with their share. References to
    /// ids outside `members` leave all balances untouched.
    pub fn calculate(expenses: &[Expense], members: &[Member]) -> MemberBalances {
        let mut balances = MemberBalances::with_capacity(members.len());
        for member in members {
            balances.entry(member.id.clone()).or_insert(Money::ZERO);
        }

        for expense in expenses {
            match balances.get_mut(&expense.payer) {
                Some(balance) => *balance += expense.amount,
                None => tracing::debug!(
                    expense = %expense.id,
                    payer = %expense.payer,
                    "Ignoring payment from unknown member"
                ),
            }

            for (member, owed) in &expense.split {
                match balances.get_mut(member) {
                    Some(balance) => *balance -= *owed,
                    None => tracing::debug!(
                        expense = %expense.id,
                        member = %member,
                        "Ignoring share owed by unknown member"
                    ),
                }
            }
        }

        balances
    }

    pub fn total(balances: &MemberBalances) -> Money {
        balances.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberId;
    use indexmap::IndexMap;
    use rstest::{fixture, rstest};

    #[fixture]
    fn members() -> Vec<Member> {
        vec![Member::new("A"), Member::new("B"), Member::new("C")]
    }

    fn expense(payer: &str, amount: i64, split: &[(&str, i64)]) -> Expense {
        let split: IndexMap<MemberId, Money> = split
            .iter()
            .map(|(id, share)| (MemberId::from(*id), Money::from_major(*share)))
            .collect();
        Expense::new("exp", payer, Money::from_major(amount), split)
    }

    fn balances(entries: &[(&str, i64)]) -> MemberBalances {
        entries
            .iter()
            .map(|(id, value)| (MemberId::from(*id), Money::from_major(*value)))
            .collect()
    }

    #[rstest]
    #[case::no_expenses(vec![], &[("A", 0), ("B", 0), ("C", 0)])]
    #[case::even_split(
        vec![expense("A", 90, &[("A", 30), ("B", 30), ("C", 30)])],
        &[("A", 60), ("B", -30), ("C", -30)]
    )]
    #[case::several_payers(
        vec![
            expense("A", 60, &[("A", 20), ("B", 20), ("C", 20)]),
            expense("B", 30, &[("A", 10), ("B", 10), ("C", 10)]),
        ],
        &[("A", 30), ("B", 0), ("C", -30)]
    )]
    #[case::unknown_payer(
        vec![expense("Z", 100, &[("Z", 100)])],
        &[("A", 0), ("B", 0), ("C", 0)]
    )]
    #[case::unknown_split_member(
        vec![expense("A", 100, &[("A", 50), ("Z", 50)])],
        &[("A", 50), ("B", 0), ("C", 0)]
    )]
    #[case::negative_amount_propagates(
        vec![expense("A", -20, &[("B", -20)])],
        &[("A", -20), ("B", 20), ("C", 0)]
    )]
    fn calculate_cases(
        members: Vec<Member>,
        #[case] expenses: Vec<Expense>,
        #[case] expected: &[(&str, i64)],
    ) {
        let result = BalanceCalculator::calculate(&expenses, &members);

        assert_eq!(result, balances(expected));
    }

    #[rstest]
    fn calculate_keeps_member_input_order(members: Vec<Member>) {
        let mut reversed = members;
        reversed.reverse();

        let result = BalanceCalculator::calculate(&[], &reversed);

        let order: Vec<&str> = result.keys().map(MemberId::as_str).collect();
        assert_eq!(order, ["C", "B", "A"]);
    }

    #[test]
    fn calculate_keeps_first_position_of_duplicate_members() {
        let members = vec![Member::new("A"), Member::new("B"), Member::new("A")];
        let expenses = vec![expense("A", 10, &[("B", 10)])];

        let result = BalanceCalculator::calculate(&expenses, &members);

        assert_eq!(result, balances(&[("A", 10), ("B", -10)]));
    }

    #[test]
    fn calculate_without_members_is_empty() {
        let expenses = vec![expense("A", 10, &[("B", 10)])];

        assert!(BalanceCalculator::calculate(&expenses, &[]).is_empty());
    }

    #[rstest]
    fn total_is_zero_for_balanced_splits(members: Vec<Member>) {
        let expenses = vec![
            expense("A", 90, &[("A", 30), ("B", 30), ("C", 30)]),
            expense("C", 12, &[("A", 4), ("B", 8)]),
        ];

        let result = BalanceCalculator::calculate(&expenses, &members);

        assert_eq!(BalanceCalculator::total(&result), Money::ZERO);
    }
}
