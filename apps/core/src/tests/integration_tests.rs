//! Integration Tests
//!
//! Full responder scenarios: a guest session from greeting to order to
//! bill, with a live host-owned cart and a spied add-to-cart callback.

use crate::catalog::{CartLine, Catalog, Category, MenuItem};
use crate::responder::WaiterResponder;

fn responder() -> WaiterResponder {
    WaiterResponder::new(Catalog::bavarian())
}

#[test]
fn test_two_pretzels_end_to_end() {
    let r = responder();
    let mut spy_calls: Vec<String> = Vec::new();

    let reply = r.respond(
        "I'll have 2 Bavarian Pretzels",
        &[],
        &mut |item: &MenuItem| spy_calls.push(item.id.clone()),
    );

    // Callback invoked exactly twice, both times with the pretzel.
    assert_eq!(spy_calls, vec!["st1".to_string(), "st1".to_string()]);
    // One auto-added entry, not duplicated per unit.
    assert_eq!(reply.auto_added_items.len(), 1);
    assert_eq!(reply.auto_added_items[0].id, "st1");
    assert!(reply.text.contains("Bavarian Pretzel"));
    // Pairing drawn from the static table: pretzel -> lager.
    assert_eq!(reply.suggested_items.len(), 1);
    assert_eq!(reply.suggested_items[0].id, "dr1");
}

#[test]
fn test_guest_session_flow() {
    let r = responder();
    let mut cart: Vec<CartLine> = Vec::new();

    let mut turn = |utterance: &str, cart: &mut Vec<CartLine>| {
        let mut added: Vec<MenuItem> = Vec::new();
        let snapshot = cart.clone();
        let reply = r.respond(utterance, &snapshot, &mut |item: &MenuItem| {
            added.push(item.clone())
        });
        for item in added {
            match cart.iter_mut().find(|l| l.item.id == item.id) {
                Some(line) => line.quantity += 1,
                None => cart.push(CartLine { item, quantity: 1 }),
            }
        }
        reply
    };

    let reply = turn("Good evening!", &mut cart);
    assert_eq!(reply.topic, "greeting");
    assert!(cart.is_empty());

    let reply = turn("What main courses do you have?", &mut cart);
    assert_eq!(reply.topic, "mains");
    assert!(reply
        .suggested_items
        .iter()
        .all(|i| i.category == Category::Main));

    let reply = turn("I want the Schnitzel", &mut cart);
    assert_eq!(reply.topic, "order");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].item.id, "mn1");
    assert_eq!(cart[0].quantity, 1);

    // Cart-aware nudge: a main is in the cart, no dessert yet.
    let reply = turn("any recommendations?", &mut cart);
    assert_eq!(reply.topic, "recommendation");
    assert!(reply
        .suggested_items
        .iter()
        .all(|i| i.category == Category::Dessert));

    let reply = turn("I'll take the Apfelstrudel", &mut cart);
    assert_eq!(reply.topic, "order");
    assert_eq!(cart.len(), 2);

    let reply = turn("what's in my cart?", &mut cart);
    assert_eq!(reply.topic, "cart");
    assert!(reply.text.contains("1x Wiener Schnitzel"));
    assert!(reply.text.contains("1x Apfelstrudel"));

    let reply = turn("I'll pay using cash", &mut cart);
    assert_eq!(reply.topic, "payment");
    assert!(reply.text.contains("cash"));
    // Payment confirmation never touches the cart.
    assert_eq!(cart.len(), 2);
}

#[test]
fn test_quantity_word_order() {
    let r = responder();
    let mut calls = 0;

    let reply = r.respond("I'll have three beers", &[], &mut |_: &MenuItem| calls += 1);

    assert_eq!(reply.topic, "order");
    assert_eq!(calls, 3);
    assert_eq!(reply.auto_added_items[0].id, "dr1");
}

#[test]
fn test_replies_serialize_for_the_transport() {
    let r = responder();
    let reply = r.respond("show me the desserts", &[], &mut |_: &MenuItem| {
        panic!("browsing must not mutate the cart")
    });

    let json = serde_json::to_string(&reply).unwrap();
    assert!(json.contains("\"suggested_items\""));
    assert!(json.contains("Apfelstrudel"));

    let parsed: crate::responder::WaiterReply = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.topic, reply.topic);
    assert_eq!(parsed.suggested_items.len(), reply.suggested_items.len());
}

#[test]
fn test_custom_catalog_from_json() {
    let json = r#"[
        {"id": "mn1", "name": "Gulasch", "description": "Rich beef stew",
         "price": 15.5, "category": "main", "allergens": ["celery"], "popular": true},
        {"id": "dr1", "name": "Zwickl", "description": "Unfiltered lager",
         "price": 4.2, "category": "drinks", "allergens": ["gluten"], "popular": true}
    ]"#;
    let r = WaiterResponder::new(Catalog::from_json(json).unwrap());

    let mut calls = 0;
    let reply = r.respond("I want the Gulasch", &[], &mut |_: &MenuItem| calls += 1);
    assert_eq!(reply.topic, "order");
    assert_eq!(calls, 1);
    assert_eq!(reply.auto_added_items[0].id, "mn1");
}
