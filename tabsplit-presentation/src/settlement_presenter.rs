use crate::text_table::{Alignment, TextTableBuilder};
use std::{borrow::Cow, fmt::Write as _};
use tabsplit_application::{GroupSettlement, MemberDirectory, MemberSummary, PersonBalance};
use tabsplit_domain::{Expense, MemberId, Money, Transfer};

const MEMBER: &str = "Member";
const BALANCE: &str = "Balance";
const FROM: &str = "From";
const TO: &str = "To";
const AMOUNT: &str = "Amount";
const TITLE: &str = "Title";
const CATEGORY: &str = "Category";
const PAID_BY: &str = "Paid by";
const UNCATEGORISED: &str = "-";
const SETTLED_UP: &str = "Everyone is settled up.";
const UNSETTLED_RESIDUAL: &str = "Unsettled residual";

pub struct SettlementPresenter;

impl SettlementPresenter {
    pub fn render(settlement: &GroupSettlement, member_directory: &dyn MemberDirectory) -> String {
        let mut reply = String::with_capacity(512);

        let _ = writeln!(
            &mut reply,
            "## {} ({})",
            settlement.group_name, settlement.group_id
        );
        let _ = writeln!(&mut reply, "Total expenses: {}", settlement.expense_total);
        reply.push('\n');
        reply.push_str(&Self::build_balance_table(
            &settlement.balances,
            member_directory,
        ));
        reply.push('\n');

        if settlement.is_settled() {
            let _ = writeln!(&mut reply, "{SETTLED_UP}");
            return reply;
        }

        if !settlement.transfers.is_empty() {
            reply.push_str(&Self::build_transfer_table(
                &settlement.transfers,
                member_directory,
            ));
        }
        if !settlement.residual.is_empty() {
            let _ = writeln!(
                &mut reply,
                "{UNSETTLED_RESIDUAL}: {}",
                format_residual(&settlement.residual, member_directory)
            );
        }

        reply
    }

    /// Title, category, payer and amount of each expense, in input order.
    pub fn build_expense_table(
        expenses: &[Expense],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
            ])
            .headers([
                Cow::Borrowed(TITLE),
                Cow::Borrowed(CATEGORY),
                Cow::Borrowed(PAID_BY),
                Cow::Borrowed(AMOUNT),
            ]);

        for expense in expenses {
            let category = expense
                .category
                .as_ref()
                .map_or(UNCATEGORISED, |category| category.label());
            builder = builder.row([
                Cow::Borrowed(expense.title.as_str()),
                Cow::Borrowed(category),
                format_member_label(&expense.payer, member_directory),
                Cow::Owned(expense.amount.to_string()),
            ]);
        }

        builder.build()
    }

    pub fn build_balance_table(
        person_balances: &[PersonBalance],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers([Cow::Borrowed(MEMBER), Cow::Borrowed(BALANCE)]);

        for person in person_balances {
            builder = builder.row([
                format_member_label(&person.id, member_directory),
                Cow::Owned(format_signed(person.balance)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers([
                Cow::Borrowed(FROM),
                Cow::Borrowed(TO),
                Cow::Borrowed(AMOUNT),
            ]);

        for transfer in transfers {
            builder = builder.row([
                format_member_label(&transfer.from, member_directory),
                format_member_label(&transfer.to, member_directory),
                Cow::Owned(transfer.amount.to_string()),
            ]);
        }

        builder.build()
    }

    pub fn render_member_summary(
        summary: &MemberSummary,
        member_directory: &dyn MemberDirectory,
    ) -> String {
        format!(
            "{}: owes {}, is owed {} (net {})",
            format_member_label(&summary.member, member_directory),
            summary.owes,
            summary.owed,
            format_signed(summary.net),
        )
    }
}

fn format_residual(residual: &[PersonBalance], member_directory: &dyn MemberDirectory) -> String {
    residual
        .iter()
        .map(|person| {
            format!(
                "{} {}",
                format_member_label(&person.id, member_directory),
                format_signed(person.balance)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_member_label<'a>(
    member_id: &'a MemberId,
    member_directory: &'a dyn MemberDirectory,
) -> Cow<'a, str> {
    match member_directory.display_name(member_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Borrowed(member_id.as_str()),
    }
}

fn format_signed(amount: Money) -> String {
    let sign = if amount.minor_units() >= 0 { "+" } else { "" };
    format!("{sign}{amount}")
}
