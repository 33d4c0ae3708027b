use crate::model::{MemberId, Money};
use indexmap::IndexMap;

/// Builds the per-member shares of an expense.
pub struct SplitPolicy;

impl SplitPolicy {
    /// Equal shares in minor units. Leftover cents go one each to the first
    /// members, so 65.00 over three becomes 21.67, 21.67, 21.66.
    pub fn equal(amount: Money, members: &[MemberId]) -> IndexMap<MemberId, Money> {
        let mut split = IndexMap::with_capacity(members.len());
        if members.is_empty() {
            return split;
        }

        let member_count = members.len() as i64;
        let total = amount.minor_units();
        let base = total / member_count;
        let remainder = (total % member_count).unsigned_abs() as usize;
        let step = total.signum();

        for (idx, member) in members.iter().enumerate() {
            let mut share = base;
            if idx < remainder {
                share += step;
            }
            *split.entry(member.clone()).or_insert(Money::ZERO) += Money::from_minor(share);
        }

        split
    }

    pub fn exact<I>(shares: I) -> IndexMap<MemberId, Money>
    where
        I: IntoIterator<Item = (MemberId, Money)>,
    {
        let mut split = IndexMap::new();
        for (member, share) in shares {
            *split.entry(member).or_insert(Money::ZERO) += share;
        }
        split
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(values: &[&str]) -> Vec<MemberId> {
        values.iter().copied().map(MemberId::from).collect()
    }

    fn shares(split: &IndexMap<MemberId, Money>) -> Vec<i64> {
        split.values().map(|share| share.minor_units()).collect()
    }

    #[rstest]
    #[case::even(18_075, &["a", "b", "c"], vec![6_025, 6_025, 6_025])]
    #[case::remainder_to_first(6_500, &["a", "b", "c"], vec![2_167, 2_167, 2_166])]
    #[case::two_leftover_cents(7_040, &["a", "b", "c"], vec![2_347, 2_347, 2_346])]
    #[case::single_member(4_550, &["a"], vec![4_550])]
    #[case::more_members_than_cents(2, &["a", "b", "c"], vec![1, 1, 0])]
    #[case::negative_amount(-100, &["a", "b", "c"], vec![-34, -33, -33])]
    #[case::no_members(100, &[], vec![])]
    fn equal_split_cases(
        #[case] amount: i64,
        #[case] members: &[&str],
        #[case] expected: Vec<i64>,
    ) {
        let split = SplitPolicy::equal(Money::from_minor(amount), &ids(members));

        assert_eq!(shares(&split), expected);
    }

    #[test]
    fn equal_split_sums_to_amount() {
        let amount = Money::from_minor(10_001);
        let split = SplitPolicy::equal(amount, &ids(&["a", "b", "c", "d", "e", "f", "g"]));

        assert_eq!(split.values().sum::<Money>(), amount);
    }

    #[test]
    fn exact_merges_repeated_members() {
        let split = SplitPolicy::exact([
            (MemberId::from("a"), Money::from_minor(100)),
            (MemberId::from("b"), Money::from_minor(50)),
            (MemberId::from("a"), Money::from_minor(25)),
        ]);

        assert_eq!(shares(&split), vec![125, 50]);
    }
}
