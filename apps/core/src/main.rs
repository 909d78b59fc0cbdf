// Gasthaus demo — a console chat loop around the waiter rule engine.
//
// Lines starting with '/' are treated as quick-action button taps and are
// expanded before being answered, everything else goes straight to the
// responder. The cart lives here, in the host, as the core expects.

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use gasthaus_core::{expand, CartLine, Catalog, MenuItem, WaiterResponder};

fn print_reply(reply: &gasthaus_core::WaiterReply) {
    println!("Waiter: {}", reply.text);
    if !reply.suggested_items.is_empty() {
        for item in &reply.suggested_items {
            println!("    [{}] {} — {:.2}", item.id, item.name, item.price);
        }
    }
}

fn apply_added(cart: &mut Vec<CartLine>, added: &[MenuItem]) {
    for item in added {
        match cart.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => line.quantity += 1,
            None => cart.push(CartLine {
                item: item.clone(),
                quantity: 1,
            }),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let responder = WaiterResponder::new(Catalog::bavarian());
    let mut cart: Vec<CartLine> = Vec::new();

    println!("Servus! Type a message, or /label for a quick action (e.g. /menu). Ctrl-D quits.");
    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let utterance = match line.strip_prefix('/') {
            Some(label) => {
                let expanded = expand(label);
                println!("You: {}", expanded);
                expanded
            }
            None => line,
        };

        if !utterance.trim().is_empty() {
            let mut added_units: Vec<MenuItem> = Vec::new();
            let reply = responder.respond(&utterance, &cart, &mut |item: &MenuItem| {
                added_units.push(item.clone())
            });
            apply_added(&mut cart, &added_units);
            print_reply(&reply);
            info!(topic = %reply.topic, cart_lines = cart.len(), "turn complete");
        }

        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}
