//! JSON ledger snapshots.
//!
//! Field names follow the web front-end (`uid`, `displayName`, `paidBy`,
//! `groupId`). Amounts may be JSON numbers or strings and are converted to
//! minor units on load. Exported amounts are JSON numbers.

use fxhash::FxHashSet;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabsplit_application::{Group, GroupExpense, GroupSettlement, LedgerSnapshot};
use tabsplit_domain::{Category, Expense, Member, MemberId, Money, MoneyError};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expense '{expense}' has an invalid amount: {source}")]
    Amount {
        expense: String,
        #[source]
        source: MoneyError,
    },
    #[error("Member '{0}' is listed more than once")]
    DuplicateMember(String),
    #[error("Group '{0}' is listed more than once")]
    DuplicateGroup(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDto {
    #[serde(default)]
    users: Vec<UserDto>,
    #[serde(default)]
    groups: Vec<GroupDto>,
    #[serde(default)]
    expenses: Vec<ExpenseDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    uid: String,
    email: Option<String>,
    display_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupDto {
    id: String,
    name: String,
    members: Vec<String>,
    owner_id: String,
    #[serde(default)]
    invite_code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseDto {
    id: String,
    group_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    amount: Decimal,
    paid_by: String,
    #[serde(default)]
    split: IndexMap<String, Decimal>,
    category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettlementDto<'a> {
    group_id: &'a str,
    group_name: &'a str,
    balances: IndexMap<&'a str, AmountDto>,
    debts: Vec<DebtDto<'a>>,
}

#[derive(Serialize)]
struct DebtDto<'a> {
    from: &'a str,
    to: &'a str,
    amount: AmountDto,
}

#[derive(Serialize)]
struct AmountDto(#[serde(with = "rust_decimal::serde::float")] Decimal);

pub fn load_snapshot(json: &str) -> Result<LedgerSnapshot, SnapshotError> {
    let dto: SnapshotDto = serde_json::from_str(json)?;

    let mut seen_members = FxHashSet::default();
    let mut members = Vec::with_capacity(dto.users.len());
    for user in dto.users {
        if !seen_members.insert(user.uid.clone()) {
            return Err(SnapshotError::DuplicateMember(user.uid));
        }
        members.push(Member {
            id: MemberId::from(user.uid),
            display_name: user.display_name,
            email: user.email,
        });
    }

    let mut seen_groups = FxHashSet::default();
    let mut groups = Vec::with_capacity(dto.groups.len());
    for group in dto.groups {
        if !seen_groups.insert(group.id.clone()) {
            return Err(SnapshotError::DuplicateGroup(group.id));
        }
        groups.push(Group {
            id: group.id,
            name: group.name,
            members: group.members.into_iter().map(MemberId::from).collect(),
            owner_id: MemberId::from(group.owner_id),
            invite_code: group.invite_code,
        });
    }

    let expenses = dto
        .expenses
        .into_iter()
        .map(convert_expense)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        members = members.len(),
        groups = groups.len(),
        expenses = expenses.len(),
        "Loaded ledger snapshot"
    );

    Ok(LedgerSnapshot {
        members,
        groups,
        expenses,
    })
}

fn convert_expense(dto: ExpenseDto) -> Result<GroupExpense, SnapshotError> {
    let to_money = |value: Decimal| {
        Money::try_from_decimal(value).map_err(|source| SnapshotError::Amount {
            expense: dto.id.clone(),
            source,
        })
    };

    let amount = to_money(dto.amount)?;
    let split = dto
        .split
        .iter()
        .map(|(member, share)| to_money(*share).map(|share| (MemberId::new(member), share)))
        .collect::<Result<IndexMap<_, _>, _>>()?;

    Ok(GroupExpense {
        group_id: dto.group_id,
        expense: Expense {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            payer: MemberId::from(dto.paid_by),
            amount,
            split,
            category: dto.category.as_deref().map(Category::parse),
        },
    })
}

pub fn export_settlement(settlement: &GroupSettlement) -> Result<String, SnapshotError> {
    let dto = SettlementDto {
        group_id: &settlement.group_id,
        group_name: &settlement.group_name,
        balances: settlement
            .balances
            .iter()
            .map(|person| (person.id.as_str(), AmountDto(person.balance.to_decimal())))
            .collect(),
        debts: settlement
            .transfers
            .iter()
            .map(|transfer| DebtDto {
                from: transfer.from.as_str(),
                to: transfer.to.as_str(),
                amount: AmountDto(transfer.amount.to_decimal()),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&dto)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsplit_application::PersonBalance;
    use tabsplit_domain::Transfer;

    const SNAPSHOT: &str = r#"{
        "users": [
            { "uid": "user-1", "email": "alice@example.com", "displayName": "Alice Johnson", "photoURL": null },
            { "uid": "user-2", "email": "bob@example.com", "displayName": "Bob Williams" },
            { "uid": "user-3", "email": null, "displayName": null }
        ],
        "groups": [
            { "id": "group-1", "name": "Apartment 4B", "members": ["user-1", "user-2", "user-3"], "ownerId": "user-1", "inviteCode": "APT4B-2024" }
        ],
        "expenses": [
            {
                "id": "exp-2",
                "groupId": "group-1",
                "title": "Internet Bill",
                "description": "High-speed fiber internet.",
                "amount": 65.0,
                "paidBy": "user-2",
                "split": { "user-1": 21.67, "user-2": "21.67", "user-3": 21.66 },
                "category": "utilities",
                "createdAt": "2024-07-19T14:30:00Z"
            }
        ]
    }"#;

    #[test]
    fn load_converts_amounts_to_minor_units() {
        let snapshot = load_snapshot(SNAPSHOT).expect("valid snapshot");

        let expense = &snapshot.expenses[0].expense;
        assert_eq!(expense.amount, Money::from_minor(6_500));
        assert_eq!(expense.split_total(), Money::from_minor(6_500));
        assert_eq!(expense.payer, MemberId::from("user-2"));
        assert_eq!(expense.category, Some(Category::Utilities));
        assert_eq!(snapshot.members[0].display_name.as_deref(), Some("Alice Johnson"));
        assert_eq!(snapshot.members[2].display_name, None);
        assert_eq!(snapshot.groups[0].owner_id, MemberId::from("user-1"));
    }

    #[test]
    fn load_accepts_missing_sections() {
        let snapshot = load_snapshot("{}").expect("valid snapshot");

        assert_eq!(snapshot, LedgerSnapshot::default());
    }

    #[test]
    fn load_rejects_duplicate_members() {
        let json = r#"{ "users": [{ "uid": "a" }, { "uid": "a" }] }"#;

        assert!(matches!(
            load_snapshot(json),
            Err(SnapshotError::DuplicateMember(uid)) if uid == "a"
        ));
    }

    #[test]
    fn load_rejects_malformed_json() {
        assert!(matches!(
            load_snapshot("{ \"users\": 3 }"),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn load_rejects_unrepresentable_amount() {
        let json = r#"{
            "expenses": [{
                "id": "exp-9",
                "groupId": "g",
                "amount": "79228162514264337593543950335",
                "paidBy": "a"
            }]
        }"#;

        assert!(matches!(
            load_snapshot(json),
            Err(SnapshotError::Amount { expense, .. }) if expense == "exp-9"
        ));
    }

    #[test]
    fn export_lists_balances_and_debts() {
        let settlement = GroupSettlement {
            group_id: "group-1".to_owned(),
            group_name: "Apartment 4B".to_owned(),
            balances: vec![
                PersonBalance {
                    id: MemberId::from("A"),
                    balance: Money::from_minor(5_000),
                },
                PersonBalance {
                    id: MemberId::from("B"),
                    balance: Money::from_minor(-5_000),
                },
            ],
            transfers: vec![Transfer {
                from: MemberId::from("B"),
                to: MemberId::from("A"),
                amount: Money::from_minor(5_000),
            }],
            residual: vec![],
            expense_total: Money::from_minor(10_000),
        };

        let json = export_settlement(&settlement).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("round trip");

        assert_eq!(value["groupId"], "group-1");
        assert_eq!(value["debts"][0]["from"], "B");
        assert_eq!(value["debts"][0]["amount"], 50.0);
        assert_eq!(value["balances"]["B"], -50.0);
        assert_eq!(value["balances"]["A"], 50.0);
    }
}
