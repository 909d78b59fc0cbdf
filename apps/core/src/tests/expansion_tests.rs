//! Quick-Action Expansion Tests
//!
//! Verifies the table lookup contract (case and whitespace insensitivity)
//! and the well-formedness guarantee of the fallback chain.

use crate::quick_actions::expand;

#[test]
fn test_table_lookup_normalization() {
    let labels = vec!["menu", "Menu", "MENU", " menu ", "\tmenu\n"];

    let expected = expand("menu");
    for label in labels {
        assert_eq!(expand(label), expected, "for label '{}'", label);
    }
}

#[test]
fn test_themed_entries_resolve() {
    // One probe per theme group of the table.
    assert_eq!(expand("desserts"), "What desserts do you have?");
    assert_eq!(expand("gluten-free"), "Are there any gluten-free options?");
    assert_eq!(expand("checkout"), "I would like to proceed to checkout.");
    assert_eq!(expand("pay cash"), "I would like to pay in cash.");
    assert_eq!(expand("wine pairing"), "Which wine would pair well with my meal?");
    assert_eq!(expand("hello"), "Hello! Nice to meet you.");
    assert_eq!(expand("no onions"), "Please prepare that without onions.");
    assert_eq!(expand("birthday"), "We are celebrating a birthday today!");
}

#[test]
fn test_unmapped_labels_are_well_formed() {
    let labels = vec![
        "mystery button",
        "today only",
        "xyz",
        "weird   spacing here",
        "ümlaut start",
    ];

    for label in labels {
        let out = expand(label);
        assert!(!out.is_empty(), "empty output for '{}'", label);
        assert!(
            out.ends_with('.') || out.ends_with('?') || out.ends_with('!'),
            "missing terminal punctuation for '{}': '{}'",
            label,
            out
        );
        let first = out.chars().next().unwrap();
        assert!(
            !first.is_lowercase(),
            "uncapitalized output for '{}': '{}'",
            label,
            out
        );
    }
}

#[test]
fn test_heuristic_tier_beats_default_tier() {
    // Unmapped, but mentioning "how much" / "contains": the heuristic
    // sentences win over plain capitalization.
    assert_eq!(
        expand("how much for the haxe"),
        "What is the price of that dish?"
    );
    assert_eq!(
        expand("check if it contains peanuts"),
        "Could you tell me what that dish contains?"
    );
}

#[test]
fn test_unmapped_output_ends_in_period_or_question_mark() {
    assert_eq!(expand("anything new today?"), "Anything new today?");
    assert_eq!(expand("bring the big platter."), "Bring the big platter.");
    // Every unmapped expansion is closed with '.' unless the input
    // already ends a sentence; '!' is not treated as terminal.
    let out = expand("surprise me with dessert!");
    assert!(out.ends_with('.'), "got: {out}");
}
