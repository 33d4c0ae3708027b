use fxhash::FxHashSet;
use tabsplit_application::{CategorySuggestion, ClassificationError, ExpenseClassifier};
use tabsplit_domain::Category;

const UNCATEGORIZED: &str = "Uncategorized";

const RULES: &[(&str, &[&str])] = &[
    (
        "Groceries",
        &["grocery", "groceries", "supermarket", "market", "essentials", "produce"],
    ),
    (
        "Utilities",
        &["internet", "electricity", "electric", "water", "gas", "bill", "utility", "fiber"],
    ),
    (
        "Transportation",
        &["fuel", "tank", "taxi", "uber", "bus", "train", "parking", "toll", "road"],
    ),
    (
        "Food",
        &["pizza", "dinner", "lunch", "breakfast", "restaurant", "takeout", "cafe", "coffee"],
    ),
    ("Rent", &["rent", "landlord", "lease", "deposit"]),
    (
        "Entertainment",
        &["movie", "cinema", "concert", "tickets", "game", "netflix", "streaming"],
    ),
    ("Travel", &["hotel", "flight", "airbnb", "trip", "hostel", "luggage"]),
];

/// Offline category suggester scoring keyword hits per category.
///
/// Confidence is the winning category's share of all hits; ties go to the
/// category listed first.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordExpenseClassifier;

impl KeywordExpenseClassifier {
    fn tokens(text: &str) -> FxHashSet<String> {
        text.split(|ch: char| !ch.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

impl ExpenseClassifier for KeywordExpenseClassifier {
    fn classify(
        &self,
        title: &str,
        description: &str,
    ) -> Result<CategorySuggestion, ClassificationError> {
        if title.trim().is_empty() && description.trim().is_empty() {
            return Err(ClassificationError::EmptyInput);
        }

        let mut tokens = Self::tokens(title);
        tokens.extend(Self::tokens(description));

        let mut best: Option<(&str, usize)> = None;
        let mut total_hits = 0usize;
        for (label, keywords) in RULES {
            let hits = keywords
                .iter()
                .filter(|keyword| tokens.contains(**keyword))
                .count();
            total_hits += hits;
            if hits > best.map_or(0, |(_, best_hits)| best_hits) {
                best = Some((*label, hits));
            }
        }

        let suggestion = match best {
            Some((label, hits)) => CategorySuggestion {
                category: Category::parse(label),
                confidence: hits as f32 / total_hits as f32,
            },
            None => CategorySuggestion {
                category: Category::Other(UNCATEGORIZED.to_owned()),
                confidence: 0.0,
            },
        };

        tracing::debug!(
            category = %suggestion.category,
            confidence = suggestion.confidence,
            "Classified expense"
        );
        Ok(suggestion)
    }
}
