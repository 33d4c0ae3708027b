use tabsplit_domain::{Category, Expense, Member, MemberId, Money, Transfer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<MemberId>,
    pub owner_id: MemberId,
    pub invite_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupExpense {
    pub group_id: String,
    pub expense: Expense,
}

/// Everything the ledger knows at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub members: Vec<Member>,
    pub groups: Vec<Group>,
    pub expenses: Vec<GroupExpense>,
}

impl LedgerSnapshot {
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn group_expenses<'a>(
        &'a self,
        group_id: &'a str,
    ) -> impl Iterator<Item = &'a Expense> + 'a {
        self.expenses
            .iter()
            .filter(move |entry| entry.group_id == group_id)
            .map(|entry| &entry.expense)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub description: String,
    pub amount: Money,
    pub payer: MemberId,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySuggestion {
    pub category: Category,
    /// Between 0.0 and 1.0.
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonBalance {
    pub id: MemberId,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSettlement {
    pub group_id: String,
    pub group_name: String,
    pub balances: Vec<PersonBalance>,
    pub transfers: Vec<Transfer>,
    /// Balances still outside tolerance once the transfers are paid.
    pub residual: Vec<PersonBalance>,
    pub expense_total: Money,
}

impl GroupSettlement {
    /// Nothing left to pay and nothing left unmatched.
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty() && self.residual.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub member: MemberId,
    pub owes: Money,
    pub owed: Money,
    pub net: Money,
}
