//! Entity extraction from free-form guest text.
//!
//! Three independent, pure extractors feed the responder: a quantity
//! parser, a fuzzy dish matcher over the catalog, and a scanner that
//! recovers parenthesized menu-id tokens from generated reply text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Category, MenuItem};

/// Digit quantity, optionally suffixed ("2", "2x", "3 pieces", "2 orders").
static DIGIT_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:x|pieces?|orders?)?").expect("Invalid regex: digit quantity")
});

/// Parenthesized menu-id token embedded in reply text, e.g. "(mn1)".
static MENU_ID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([a-z]{2}\d+)\)").expect("Invalid regex: menu id token"));

/// English number words recognized when no digit is present.
const NUMBER_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Alias word-lists per canonical dish name, used when no full dish name
/// appears verbatim in the utterance. Order decides result order.
const DISH_ALIASES: &[(&str, &[&str])] = &[
    ("Bavarian Pretzel", &["pretzel", "brezel", "brezn"]),
    ("Obatzda", &["obazda", "cheese dip"]),
    ("Kartoffelsuppe", &["potato soup", "soup"]),
    ("Wurstsalat", &["sausage salad"]),
    ("Wiener Schnitzel", &["schnitzel"]),
    ("Rinderrouladen", &["rouladen", "beef roll", "beef rolls"]),
    ("Bratwurst Platter", &["bratwurst", "grilled sausage"]),
    ("Schweinshaxe", &["haxe", "pork knuckle"]),
    ("Kaesespaetzle", &["spaetzle", "cheese noodles"]),
    ("Forelle Muellerin", &["trout", "forelle"]),
    ("Apfelstrudel", &["apple strudel", "strudel"]),
    ("Kaiserschmarrn", &["schmarrn", "pancake"]),
    ("Schwarzwaelder Kirschtorte", &["black forest", "kirschtorte", "cherry cake"]),
    ("Augustiner Lager", &["beer", "lager", "helles"]),
    ("Pfaelzer Riesling", &["wine", "riesling"]),
    ("Apfelschorle", &["schorle", "apple spritzer"]),
    ("Kaffee", &["coffee", "espresso", "cappuccino"]),
];

/// Allergen names guests ask about, with spelling variants folded in.
const ALLERGEN_TERMS: &[(&str, &str)] = &[
    ("gluten", "gluten"),
    ("lactose", "dairy"),
    ("dairy", "dairy"),
    ("nut", "nuts"),
    ("egg", "egg"),
    ("fish", "fish"),
    ("mustard", "mustard"),
    ("celery", "celery"),
    ("alcohol", "alcohol"),
];

/// Extract the first quantity mentioned in an utterance. Digit patterns
/// are checked before number words; defaults to 1.
pub fn extract_quantity(text: &str) -> u32 {
    let lower = text.to_lowercase();

    if let Some(caps) = DIGIT_QUANTITY.captures(&lower) {
        if let Ok(n) = caps[1].parse::<u32>() {
            return n.max(1);
        }
    }

    for (word, value) in NUMBER_WORDS {
        if lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|w| w == *word)
        {
            return *value;
        }
    }

    1
}

/// Match catalog dishes mentioned in an utterance.
///
/// First pass: case-insensitive substring match of each full item name.
/// Only when that yields nothing, the alias table is consulted. Results
/// are de-duplicated by id, preserving first-match order.
pub fn match_dishes<'a>(catalog: &'a Catalog, text: &str) -> Vec<&'a MenuItem> {
    let lower = text.to_lowercase();
    let mut matched: Vec<&MenuItem> = Vec::new();

    for item in catalog.items() {
        if lower.contains(&item.name.to_lowercase()) {
            matched.push(item);
        }
    }
    if !matched.is_empty() {
        return matched;
    }

    for (canonical, aliases) in DISH_ALIASES {
        if aliases.iter().any(|alias| lower.contains(alias)) {
            if let Some(item) = catalog
                .items()
                .iter()
                .find(|i| i.name.eq_ignore_ascii_case(canonical))
            {
                if !matched.iter().any(|m| m.id == item.id) {
                    matched.push(item);
                }
            }
        }
    }

    matched
}

/// Scan text (typically a generated reply) for parenthesized menu-id
/// tokens, returning the bare ids in order of appearance. Stateless and
/// idempotent.
pub fn extract_menu_ids(text: &str) -> Vec<String> {
    MENU_ID_TOKEN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Everything recognized in a single utterance. Derived fresh per input,
/// never persisted; serializable for structured logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedEntities {
    /// Ids of dishes the utterance referred to, first-match order.
    pub dish_ids: Vec<String>,
    /// Requested quantity, defaulting to 1.
    pub quantity: u32,
    /// Menu section the guest asked about, if any.
    pub category: Option<Category>,
    /// Allergen the guest asked about, if any (catalog spelling).
    pub allergen: Option<String>,
}

impl RecognizedEntities {
    /// Run all extractors over one utterance.
    pub fn recognize(catalog: &Catalog, text: &str) -> Self {
        let lower = text.to_lowercase();

        let dish_ids = match_dishes(catalog, text)
            .iter()
            .map(|i| i.id.clone())
            .collect();

        let category = if lower.contains("starter") || lower.contains("appetizer") {
            Some(Category::Starter)
        } else if lower.contains("main course") || lower.contains("mains") {
            Some(Category::Main)
        } else if lower.contains("dessert") || lower.contains("sweet") {
            Some(Category::Dessert)
        } else if lower.contains("drink") || lower.contains("beverage") {
            Some(Category::Drinks)
        } else {
            None
        };

        let allergen = ALLERGEN_TERMS
            .iter()
            .find(|(term, _)| lower.contains(term))
            .map(|(_, canonical)| (*canonical).to_string());

        Self {
            dish_ids,
            quantity: extract_quantity(text),
            category,
            allergen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_quantity() {
        assert_eq!(extract_quantity("2 Bavarian Pretzels please"), 2);
        assert_eq!(extract_quantity("give me 3x schnitzel"), 3);
        assert_eq!(extract_quantity("4 pieces of strudel"), 4);
    }

    #[test]
    fn test_word_quantity() {
        assert_eq!(extract_quantity("I'll have three beers"), 3);
        assert_eq!(extract_quantity("two coffees for us"), 2);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        assert_eq!(extract_quantity("I want the Schnitzel"), 1);
        assert_eq!(extract_quantity(""), 1);
    }

    #[test]
    fn test_digit_beats_number_word() {
        // The digit pattern is checked first in the ordered list.
        assert_eq!(extract_quantity("one moment, 5 pretzels please"), 5);
    }

    #[test]
    fn test_direct_name_match() {
        let catalog = Catalog::bavarian();

        let hits = match_dishes(&catalog, "I'll have 2 Bavarian Pretzels");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "st1");
    }

    #[test]
    fn test_alias_match() {
        let catalog = Catalog::bavarian();

        let hits = match_dishes(&catalog, "do the beef rolls come with cabbage");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Rinderrouladen");

        let hits = match_dishes(&catalog, "Can I have the wine?");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "dr2");
    }

    #[test]
    fn test_direct_match_suppresses_alias_pass() {
        let catalog = Catalog::bavarian();

        // "Wiener Schnitzel" matches by full name, so the alias table is
        // never consulted and no second dish sneaks in.
        let hits = match_dishes(&catalog, "the Wiener Schnitzel please");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "mn1");
    }

    #[test]
    fn test_sausage_salad_is_one_dish() {
        let catalog = Catalog::bavarian();

        // "sausage salad" is the Wurstsalat alone; the Bratwurst Platter
        // must not ride along on a shared word.
        let hits = match_dishes(&catalog, "I want the sausage salad");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "st4");

        let hits = match_dishes(&catalog, "one grilled sausage for me");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "mn3");
    }

    #[test]
    fn test_no_dish_matched() {
        let catalog = Catalog::bavarian();
        assert!(match_dishes(&catalog, "just some tap water thanks").is_empty());
    }

    #[test]
    fn test_menu_id_extraction_order_and_idempotence() {
        let text = "Try (mn1) and (mn2)";

        let first = extract_menu_ids(text);
        assert_eq!(first, vec!["mn1".to_string(), "mn2".to_string()]);
        assert_eq!(extract_menu_ids(text), first);
    }

    #[test]
    fn test_menu_id_extraction_ignores_other_parentheses() {
        assert!(extract_menu_ids("my table (by the window)").is_empty());
        assert!(extract_menu_ids("(MN1) is not an id").is_empty());
    }

    #[test]
    fn test_recognize_bundles_everything() {
        let catalog = Catalog::bavarian();

        let entities = RecognizedEntities::recognize(&catalog, "2 pretzels without gluten?");
        assert_eq!(entities.quantity, 2);
        assert_eq!(entities.dish_ids, vec!["st1".to_string()]);
        assert_eq!(entities.allergen.as_deref(), Some("gluten"));
        assert!(entities.category.is_none());
    }
}
