use crate::{
    error::LedgerError,
    model::{ExpenseDraft, Group, GroupSettlement, LedgerSnapshot, MemberSummary, PersonBalance},
    ports::ExpenseClassifier,
};
use tabsplit_domain::{
    BalanceCalculator, Category, DEFAULT_TOLERANCE, DebtSimplifier, Expense, ExpenseValidator,
    Member, MemberId, Money, SplitPolicy, services::apply_transfers,
};

pub const DEFAULT_MIN_CATEGORY_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerConfig {
    pub tolerance: Money,
    /// Suggestions below this confidence are discarded.
    pub min_category_confidence: f32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_category_confidence: DEFAULT_MIN_CATEGORY_CONFIDENCE,
        }
    }
}

#[derive(Clone, Copy)]
pub struct LedgerService<'a> {
    classifier: &'a dyn ExpenseClassifier,
    simplifier: DebtSimplifier,
    min_category_confidence: f32,
}

impl<'a> LedgerService<'a> {
    pub fn new(classifier: &'a dyn ExpenseClassifier, config: LedgerConfig) -> Self {
        Self {
            classifier,
            simplifier: DebtSimplifier::with_tolerance(config.tolerance),
            min_category_confidence: config.min_category_confidence,
        }
    }

    /// Group roster in group order. Ids without a member record are skipped.
    pub fn group_members(
        &self,
        snapshot: &LedgerSnapshot,
        group_id: &str,
    ) -> Result<Vec<Member>, LedgerError> {
        let group = Self::find_group(snapshot, group_id)?;
        Ok(Self::roster(snapshot, group))
    }

    pub fn settle_group(
        &self,
        snapshot: &LedgerSnapshot,
        group_id: &str,
    ) -> Result<GroupSettlement, LedgerError> {
        let group = Self::find_group(snapshot, group_id)?;
        Ok(self.settle(snapshot, group))
    }

    pub fn settle_all(&self, snapshot: &LedgerSnapshot) -> Vec<GroupSettlement> {
        snapshot
            .groups
            .iter()
            .map(|group| self.settle(snapshot, group))
            .collect()
    }

    /// The group's expenses, with a suggested category filled in where none
    /// was recorded.
    pub fn categorized_expenses(
        &self,
        snapshot: &LedgerSnapshot,
        group_id: &str,
    ) -> Result<Vec<Expense>, LedgerError> {
        let group = Self::find_group(snapshot, group_id)?;
        Ok(snapshot
            .group_expenses(&group.id)
            .map(|expense| {
                let mut expense = expense.clone();
                if expense.category.is_none() {
                    expense.category = self.suggest_category(&expense.title, &expense.description);
                }
                expense
            })
            .collect())
    }

    /// Builds an expense shared equally by `members`.
    ///
    /// Without an explicit category the classifier is consulted; a failed or
    /// low-confidence suggestion leaves the expense uncategorised.
    pub fn record_expense(
        &self,
        id: impl Into<String>,
        draft: ExpenseDraft,
        members: &[Member],
    ) -> Result<Expense, LedgerError> {
        if !draft.amount.is_positive() {
            return Err(LedgerError::InvalidAmount(draft.amount));
        }

        let member_ids: Vec<MemberId> = members.iter().map(|member| member.id.clone()).collect();
        let split = SplitPolicy::equal(draft.amount, &member_ids);
        let category = match draft.category {
            Some(category) => Some(category),
            None => self.suggest_category(&draft.title, &draft.description),
        };

        let expense = Expense {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            payer: draft.payer,
            amount: draft.amount,
            split,
            category,
        };
        ExpenseValidator::validate(&expense, members)?;

        tracing::info!(
            expense = %expense.id,
            amount = %expense.amount,
            payer = %expense.payer,
            "Recorded expense"
        );
        Ok(expense)
    }

    pub fn suggest_category(&self, title: &str, description: &str) -> Option<Category> {
        match self.classifier.classify(title, description) {
            Ok(suggestion) if suggestion.confidence >= self.min_category_confidence => {
                Some(suggestion.category)
            }
            Ok(suggestion) => {
                tracing::debug!(
                    category = %suggestion.category,
                    confidence = suggestion.confidence,
                    "Discarding low-confidence category suggestion"
                );
                None
            }
            Err(error) => {
                tracing::warn!(%error, "Could not suggest a category for this expense");
                None
            }
        }
    }

    pub fn member_summary(settlement: &GroupSettlement, member: &MemberId) -> MemberSummary {
        let owes = settlement
            .transfers
            .iter()
            .filter(|transfer| &transfer.from == member)
            .map(|transfer| transfer.amount)
            .sum();
        let owed = settlement
            .transfers
            .iter()
            .filter(|transfer| &transfer.to == member)
            .map(|transfer| transfer.amount)
            .sum();
        let net = settlement
            .balances
            .iter()
            .find(|person| &person.id == member)
            .map_or(Money::ZERO, |person| person.balance);

        MemberSummary {
            member: member.clone(),
            owes,
            owed,
            net,
        }
    }

    fn settle(&self, snapshot: &LedgerSnapshot, group: &Group) -> GroupSettlement {
        let members = Self::roster(snapshot, group);
        let expenses: Vec<Expense> = snapshot.group_expenses(&group.id).cloned().collect();

        let balances = BalanceCalculator::calculate(&expenses, &members);
        let transfers = self.simplifier.simplify_balances(&balances);
        let tolerance = self.simplifier.tolerance();
        let residual: Vec<PersonBalance> = apply_transfers(balances.clone(), &transfers)
            .into_iter()
            .filter(|(_, balance)| balance.abs() > tolerance)
            .map(|(id, balance)| PersonBalance { id, balance })
            .collect();
        let expense_total = expenses.iter().map(|expense| expense.amount).sum();

        if !residual.is_empty() {
            tracing::warn!(
                group = %group.id,
                unsettled = residual.len(),
                "Transfers leave balances unsettled"
            );
        }

        tracing::info!(
            group = %group.id,
            expenses = expenses.len(),
            transfers = transfers.len(),
            "Settled group"
        );

        GroupSettlement {
            group_id: group.id.clone(),
            group_name: group.name.clone(),
            balances: balances
                .into_iter()
                .map(|(id, balance)| PersonBalance { id, balance })
                .collect(),
            transfers,
            residual,
            expense_total,
        }
    }

    fn find_group<'s>(
        snapshot: &'s LedgerSnapshot,
        group_id: &str,
    ) -> Result<&'s Group, LedgerError> {
        snapshot
            .group(group_id)
            .ok_or_else(|| LedgerError::UnknownGroup(group_id.to_owned()))
    }

    fn roster(snapshot: &LedgerSnapshot, group: &Group) -> Vec<Member> {
        group
            .members
            .iter()
            .filter_map(|id| {
                let member = snapshot.members.iter().find(|member| &member.id == id);
                if member.is_none() {
                    tracing::debug!(
                        group = %group.id,
                        member = %id,
                        "Skipping unknown group member"
                    );
                }
                member.cloned()
            })
            .collect()
    }
}
