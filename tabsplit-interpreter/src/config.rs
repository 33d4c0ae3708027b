use std::{env, fmt::Display, str::FromStr};
use tabsplit_application::{LedgerConfig, ledger_service::DEFAULT_MIN_CATEGORY_CONFIDENCE};
use tabsplit_domain::{DEFAULT_TOLERANCE, Money};

pub const TOLERANCE_VAR: &str = "TABSPLIT_TOLERANCE_CENTS";
pub const MIN_CATEGORY_CONFIDENCE_VAR: &str = "TABSPLIT_MIN_CATEGORY_CONFIDENCE";

/// Runtime configuration read from the environment (and `.env`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub ledger: LedgerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unset variables use defaults; invalid ones are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tolerance_cents = parse_var(
            &lookup,
            TOLERANCE_VAR,
            DEFAULT_TOLERANCE.minor_units(),
            |cents| *cents >= 0,
        );
        let min_category_confidence = parse_var(
            &lookup,
            MIN_CATEGORY_CONFIDENCE_VAR,
            DEFAULT_MIN_CATEGORY_CONFIDENCE,
            |confidence| (0.0..=1.0).contains(confidence),
        );

        Self {
            ledger: LedgerConfig {
                tolerance: Money::from_minor(tolerance_cents),
                min_category_confidence,
            },
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    is_valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if is_valid(&value) => value,
        _ => {
            tracing::warn!(key, value = %raw, %default, "Ignoring invalid configuration value");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]).ledger, LedgerConfig::default());
    }

    #[rstest]
    #[case::valid(&[(TOLERANCE_VAR, "5")], 5)]
    #[case::padded(&[(TOLERANCE_VAR, " 0 ")], 0)]
    #[case::negative(&[(TOLERANCE_VAR, "-3")], 1)]
    #[case::not_a_number(&[(TOLERANCE_VAR, "a cent")], 1)]
    fn tolerance_cases(#[case] vars: &[(&str, &str)], #[case] expected_cents: i64) {
        assert_eq!(
            config(vars).ledger.tolerance,
            Money::from_minor(expected_cents)
        );
    }

    #[rstest]
    #[case::valid(&[(MIN_CATEGORY_CONFIDENCE_VAR, "0.8")], 0.8)]
    #[case::out_of_range(&[(MIN_CATEGORY_CONFIDENCE_VAR, "1.5")], 0.5)]
    #[case::not_a_number(&[(MIN_CATEGORY_CONFIDENCE_VAR, "high")], 0.5)]
    fn min_category_confidence_cases(#[case] vars: &[(&str, &str)], #[case] expected: f32) {
        assert_eq!(config(vars).ledger.min_category_confidence, expected);
    }
}
