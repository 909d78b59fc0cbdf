//! Ordering-intent classification.
//!
//! Decides whether an utterance asks to put an item on the order, as
//! opposed to browsing the menu, checking the bill, viewing the cart or
//! heading to checkout. Those flows are handled by different responder
//! branches and must not be misrouted into add-to-cart.
//!
//! Two-stage pipeline: exclusion patterns are checked first and take
//! absolute precedence; inclusion keywords are only consulted when no
//! exclusion fired. A browsing sentence that borrows an ordering verb
//! ("I want to see the dessert menu") classifies as non-ordering.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Patterns that veto ordering intent, tested in order against the
/// lowercased utterance. First match wins and short-circuits stage 2.
static EXCLUSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"checkout",
        r"\bpay(?:ing|ment)?\b",
        r"\bbill\b",
        r"\bcheck\b",
        r"\b(?:cart|basket)\b",
        r"proceed to",
        r"ready to pay",
        r"show me",
        r"could you show",
        r"can you show",
        r"may i see",
        r"what.*menu",
        r"^see\b.*\bmenu\b",
        r"like to see",
        r"\bbrowse\b",
        r"view.*cart",
        r"what are your",
        r"what do you have",
        r"do you have",
        r"are there",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex: intent exclusion pattern"))
    .collect()
});

/// Keywords whose presence signals ordering intent, case-insensitive
/// substring semantics. Checked only after stage 1 found no exclusion.
const ORDER_KEYWORDS: &[&str] = &[
    "want",
    "would like",
    "i'll have",
    "i'll take",
    "order",
    "get me",
    "add",
    "can i have",
    "could i get",
    "please give me",
    "bring me",
    "i'd like",
    "give me",
    "serve me",
    "need",
    "looking for",
];

/// Classify one utterance: `true` means the dominant intent is placing or
/// adding an order item. Pure and deterministic; never fails.
pub fn has_ordering_intent(text: &str) -> bool {
    let lower = text.trim().to_lowercase();

    for pattern in EXCLUSION_PATTERNS.iter() {
        if pattern.is_match(&lower) {
            debug!(pattern = %pattern.as_str(), "ordering intent excluded");
            return false;
        }
    }

    ORDER_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
