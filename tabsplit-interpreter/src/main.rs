mod config;

use std::{borrow::Cow, env, fs, process};

use config::AppConfig;
use tabsplit_application::{GroupSettlement, LedgerService, LedgerSnapshot};
use tabsplit_infrastructure::{KeywordExpenseClassifier, export_settlement, load_snapshot};
use tabsplit_presentation::SettlementPresenter;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "Usage: tabsplit_interpreter <snapshot.json> [group-id] [--json]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    path: String,
    group_id: Option<String>,
    json: bool,
}

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> CliResult<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = AppConfig::from_env();

    let source = fs::read_to_string(&args.path)
        .map_err(|err| format!("Failed to read '{}': {err}", args.path))?;
    let snapshot = load_snapshot(&source).map_err(|err| err.to_string())?;

    let classifier = KeywordExpenseClassifier;
    let service = LedgerService::new(&classifier, config.ledger);

    let settlements = match &args.group_id {
        Some(group_id) => vec![
            service
                .settle_group(&snapshot, group_id)
                .map_err(|err| err.to_string())?,
        ],
        None => service.settle_all(&snapshot),
    };

    if settlements.is_empty() {
        return Err("Snapshot contains no groups".into());
    }

    for settlement in &settlements {
        let output = if args.json {
            export_settlement(settlement).map_err(|err| err.to_string())?
        } else {
            render_text(&service, &snapshot, settlement)?
        };
        println!("{output}");
    }

    Ok(())
}

fn render_text(
    service: &LedgerService<'_>,
    snapshot: &LedgerSnapshot,
    settlement: &GroupSettlement,
) -> CliResult<String> {
    let expenses = service
        .categorized_expenses(snapshot, &settlement.group_id)
        .map_err(|err| err.to_string())?;

    let mut output = SettlementPresenter::render(settlement, &snapshot.members);
    output.push('\n');
    output.push_str(&SettlementPresenter::build_expense_table(
        &expenses,
        &snapshot.members,
    ));
    output.push('\n');
    for person in &settlement.balances {
        let summary = LedgerService::member_summary(settlement, &person.id);
        output.push_str(&SettlementPresenter::render_member_summary(
            &summary,
            &snapshot.members,
        ));
        output.push('\n');
    }
    Ok(output)
}

fn parse_args(args: impl IntoIterator<Item = String>) -> CliResult<CliArgs> {
    let mut path = None;
    let mut group_id = None;
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{flag}'\n{USAGE}").into());
            }
            _ if path.is_none() => path = Some(arg),
            _ if group_id.is_none() => group_id = Some(arg),
            _ => return Err(USAGE.into()),
        }
    }

    let Some(path) = path else {
        return Err(USAGE.into());
    };

    Ok(CliArgs {
        path,
        group_id,
        json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[rstest]
    #[case::path_only(&["ledger.json"], None, false)]
    #[case::with_group(&["ledger.json", "group-1"], Some("group-1"), false)]
    #[case::json_anywhere(&["--json", "ledger.json", "group-2"], Some("group-2"), true)]
    fn parse_args_accepts(
        #[case] input: &[&str],
        #[case] group_id: Option<&str>,
        #[case] json: bool,
    ) {
        assert_eq!(
            parse_args(args(input)),
            Ok(CliArgs {
                path: "ledger.json".to_owned(),
                group_id: group_id.map(str::to_owned),
                json,
            })
        );
    }

    #[rstest]
    #[case::missing_path(&[])]
    #[case::only_flag(&["--json"])]
    #[case::unknown_flag(&["ledger.json", "--yaml"])]
    #[case::too_many(&["ledger.json", "group-1", "extra"])]
    fn parse_args_rejects(#[case] input: &[&str]) {
        assert!(parse_args(args(input)).is_err());
    }

    #[test]
    fn render_text_lists_member_summaries() {
        let snapshot = load_snapshot(
            r#"{
                "users": [
                    { "uid": "a", "displayName": "Alice" },
                    { "uid": "b", "displayName": "Bob" }
                ],
                "groups": [{ "id": "g", "name": "Flat", "members": ["a", "b"], "ownerId": "a" }],
                "expenses": [{
                    "id": "e",
                    "groupId": "g",
                    "title": "Pizza Night",
                    "amount": 100,
                    "paidBy": "a",
                    "split": { "a": 50, "b": 50 }
                }]
            }"#,
        )
        .expect("valid snapshot");
        let classifier = KeywordExpenseClassifier;
        let service = LedgerService::new(&classifier, AppConfig::from_lookup(|_| None).ledger);
        let settlement = service.settle_group(&snapshot, "g").expect("group exists");

        let output = render_text(&service, &snapshot, &settlement).expect("group exists");

        assert!(output.contains("Bob   Alice   50.00"));
        assert!(output.contains("Pizza Night  Food      Alice    100.00"));
        assert!(output.contains("Alice: owes 0.00, is owed 50.00 (net +50.00)"));
        assert!(output.contains("Bob: owes 50.00, is owed 0.00 (net -50.00)"));
    }

    #[test]
    fn render_text_flags_balances_left_by_outside_payer() {
        let snapshot = load_snapshot(
            r#"{
                "users": [{ "uid": "a" }, { "uid": "b" }, { "uid": "z" }],
                "groups": [{ "id": "g", "name": "Flat", "members": ["a", "b"], "ownerId": "a" }],
                "expenses": [{
                    "id": "e",
                    "groupId": "g",
                    "title": "Movie tickets",
                    "amount": 100,
                    "paidBy": "z",
                    "split": { "a": 50, "b": 50 }
                }]
            }"#,
        )
        .expect("valid snapshot");
        let classifier = KeywordExpenseClassifier;
        let service = LedgerService::new(&classifier, AppConfig::from_lookup(|_| None).ledger);
        let settlement = service.settle_group(&snapshot, "g").expect("group exists");

        let output = render_text(&service, &snapshot, &settlement).expect("group exists");

        assert!(!output.contains("Everyone is settled up."));
        assert!(output.contains("Unsettled residual: a -50.00, b -50.00"));
    }
}
