//! Templated response generation.
//!
//! Composes the intent classifier, entity extractors and catalog into one
//! reply per guest utterance. Branches are evaluated in a fixed priority
//! order, first match wins:
//!
//! 1. payment-method confirmation
//! 2. guest-count confirmation
//! 3. ordering intent (the only branch with a side effect, via the
//!    injected add-to-cart callback)
//! 4. topic detector chain (static rule list, first-match-wins)
//! 5. default fallback
//!
//! Everything outside branch 3 is a pure function of the utterance and the
//! cart snapshot; the generic fallback's reply wording is the single
//! random choice, and it does not affect the suggested items.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{CartLine, Catalog, Category, MenuItem};
use crate::entities::{extract_menu_ids, extract_quantity, match_dishes, RecognizedEntities};
use crate::intent::has_ordering_intent;

/// Static dish-id -> dish-id pairing table.
const PAIRINGS: &[(&str, &str)] = &[
    ("st1", "dr1"),
    ("st2", "dr1"),
    ("st3", "st1"),
    ("st4", "dr1"),
    ("mn1", "dr2"),
    ("mn2", "dr1"),
    ("mn3", "dr1"),
    ("mn4", "dr1"),
    ("mn5", "dr3"),
    ("mn6", "dr2"),
    ("ds1", "dr4"),
    ("ds2", "dr4"),
    ("ds3", "dr4"),
    ("dr1", "st1"),
    ("dr2", "st2"),
    ("dr4", "ds1"),
];

/// Dishes suitable for children, suggested alongside starters when a
/// guest-count phrase mentions kids.
const KID_FRIENDLY_IDS: &[&str] = &["mn5", "dr3"];

/// Wordings for the generic fallback. The choice of variant is the only
/// nondeterminism in the responder.
const GENERIC_REPLIES: &[&str] = &[
    "I'm your waiter today — ask me anything about the menu! Here are our guest favorites:",
    "Happy to help! You can ask about dishes, allergens or recommendations. Our bestsellers:",
    "Not sure I caught that, but I'm here for menu questions and orders. These are popular today:",
];

static PAY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:€\s*(\d+(?:[.,]\d{1,2})?))|(?:(\d+(?:[.,]\d{1,2})?)\s*(?:€|euros?))")
        .expect("Invalid regex: payment amount")
});

static ADULT_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*adults?").expect("Invalid regex: adult count"));
static CHILD_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:child(?:ren)?|kids?)").expect("Invalid regex: child count")
});
static SENIOR_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*seniors?").expect("Invalid regex: senior count"));
static PARTY_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:party of|table for)\s*(\d+)").expect("Invalid regex: party count")
});

/// One reply from the waiter: the text to render, items to surface as
/// tappable suggestion cards, items a side-effecting branch put in the
/// cart, and the name of the branch that fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiterReply {
    /// Rendered reply text, possibly multi-line.
    pub text: String,
    /// Items to show as suggestion cards.
    pub suggested_items: Vec<MenuItem>,
    /// Items the ordering branch added to the cart (one entry per dish,
    /// regardless of quantity).
    pub auto_added_items: Vec<MenuItem>,
    /// Name of the branch that produced the reply.
    pub topic: String,
}

impl WaiterReply {
    fn new(topic: &str, text: String) -> Self {
        Self {
            text,
            suggested_items: vec![],
            auto_added_items: vec![],
            topic: topic.to_string(),
        }
    }

    fn with_suggestions(mut self, items: Vec<&MenuItem>) -> Self {
        self.suggested_items = items.into_iter().cloned().collect();
        self
    }
}

/// Per-call view handed to topic handlers. Read-only.
struct TurnContext<'a> {
    catalog: &'a Catalog,
    cart: &'a [CartLine],
    lower: String,
}

type TopicHandler = for<'a> fn(&TurnContext<'a>) -> WaiterReply;

struct TopicRule {
    name: &'static str,
    pattern: Regex,
    handler: TopicHandler,
}

/// Ordered topic-detector chain for branch 4. Order is part of the
/// contract: specific sections come before the generic menu rule, and
/// checkout before the bill rule.
static TOPIC_RULES: LazyLock<Vec<TopicRule>> = LazyLock::new(|| {
    fn rule(name: &'static str, pattern: &str, handler: TopicHandler) -> TopicRule {
        TopicRule {
            name,
            pattern: Regex::new(pattern).expect("Invalid regex: topic rule"),
            handler,
        }
    }

    vec![
        rule(
            "greeting",
            r"^(?:hi|hello|hey|servus|gruess gott|good (?:morning|afternoon|evening))\b",
            topic_greeting,
        ),
        rule("starters", r"\bstarters?\b|\bappetizers?\b", topic_starters),
        rule("mains", r"\bmains?\b|\bmain courses?\b", topic_mains),
        rule("desserts", r"\bdesserts?\b", topic_desserts),
        rule(
            "drinks",
            r"\bdrinks?\b|\bbeverages?\b|wine list|\bbeers?\b",
            topic_drinks,
        ),
        rule(
            "recommendation",
            r"recommend|suggest|surprise me|what should i",
            topic_recommendation,
        ),
        rule(
            "vegetarian",
            r"vegetarian|veggie|vegan|meatless",
            topic_vegetarian,
        ),
        rule("kids", r"\bkids?\b|child|family", topic_kids),
        rule(
            "light",
            r"\blight\b|\bdiet\b|healthy|low.calorie",
            topic_light,
        ),
        rule("soup", r"\bsoups?\b", topic_soup),
        rule("salad", r"\bsalads?\b", topic_salad),
        rule("quick", r"\bquick\b|\bfast\b|in a (?:rush|hurry)", topic_quick),
        rule("lunch", r"\blunch\b", topic_lunch),
        rule(
            "traditional",
            r"traditional|bavarian|classic|authentic",
            topic_traditional,
        ),
        rule(
            "allergens",
            r"allerg|gluten|lactose|dairy|\bnuts?\b|intoleran",
            topic_allergens,
        ),
        rule(
            "menu",
            r"\bmenu\b|what do you have|what are your",
            topic_menu,
        ),
        rule("cart", r"\bcart\b|\bbasket\b", topic_cart),
        rule("checkout", r"checkout|proceed to", topic_checkout),
        rule("bill", r"\bbill\b|\bcheck\b|\bpay\b", topic_bill),
        rule("chef", r"\bchef\b", topic_chef),
        rule("pairing", r"\bpair|goes with|go with", topic_pairing),
        rule(
            "nutrition",
            r"nutrition|calorie|kcal|protein",
            topic_nutrition,
        ),
    ]
});

fn names(items: &[&MenuItem]) -> String {
    items
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn topic_greeting(ctx: &TurnContext) -> WaiterReply {
    WaiterReply::new(
        "greeting",
        "Servus and welcome! I'm your waiter today. Ask me about the menu, \
         dietary options or just tell me what you'd like to order. \
         A few guest favorites to get you started:"
            .to_string(),
    )
    .with_suggestions(ctx.catalog.popular_items())
}

fn topic_section(ctx: &TurnContext, topic: &str, category: Category, lead: &str) -> WaiterReply {
    let items = ctx.catalog.by_category(category);
    let text = format!("{}\n{}", lead, names(&items));
    WaiterReply::new(topic, text).with_suggestions(items)
}

fn topic_starters(ctx: &TurnContext) -> WaiterReply {
    topic_section(
        ctx,
        "starters",
        Category::Starter,
        "Here are our starters — the pretzel comes warm from the oven:",
    )
}

fn topic_mains(ctx: &TurnContext) -> WaiterReply {
    topic_section(
        ctx,
        "mains",
        Category::Main,
        "These are our main courses, all cooked to order:",
    )
}

fn topic_desserts(ctx: &TurnContext) -> WaiterReply {
    topic_section(
        ctx,
        "desserts",
        Category::Dessert,
        "Something sweet to finish? Our desserts:",
    )
}

fn topic_drinks(ctx: &TurnContext) -> WaiterReply {
    topic_section(
        ctx,
        "drinks",
        Category::Drinks,
        "From the bar and the cellar:",
    )
}

fn topic_recommendation(ctx: &TurnContext) -> WaiterReply {
    let has_dessert = ctx
        .cart
        .iter()
        .any(|l| l.item.category == Category::Dessert);
    let has_drink = ctx.cart.iter().any(|l| l.item.category == Category::Drinks);

    if !ctx.cart.is_empty() && !has_dessert {
        let items = ctx.catalog.by_category(Category::Dessert);
        return WaiterReply::new(
            "recommendation",
            "Your order is missing a sweet ending — may I suggest one of our desserts?"
                .to_string(),
        )
        .with_suggestions(items);
    }
    if !ctx.cart.is_empty() && !has_drink {
        let items = ctx.catalog.by_category(Category::Drinks);
        return WaiterReply::new(
            "recommendation",
            "How about something to drink with that?".to_string(),
        )
        .with_suggestions(items);
    }

    WaiterReply::new(
        "recommendation",
        "Happy to recommend! These are the dishes our guests love most:".to_string(),
    )
    .with_suggestions(ctx.catalog.popular_items())
}

fn topic_vegetarian(ctx: &TurnContext) -> WaiterReply {
    let items = ctx.catalog.vegetarian_items();
    WaiterReply::new(
        "vegetarian",
        format!(
            "We have plenty for vegetarians:\n{}",
            names(&items)
        ),
    )
    .with_suggestions(items)
}

fn topic_kids(ctx: &TurnContext) -> WaiterReply {
    let items = kid_suggestions(ctx.catalog);
    WaiterReply::new(
        "kids",
        "For our young guests I'd suggest something simple and mild:".to_string(),
    )
    .with_suggestions(items)
}

fn topic_light(ctx: &TurnContext) -> WaiterReply {
    // Lightest dishes the kitchen publishes facts for, by calories.
    let mut items: Vec<&MenuItem> = ctx
        .catalog
        .items()
        .iter()
        .filter(|i| i.nutrition.is_some())
        .collect();
    items.sort_by_key(|i| i.nutrition.as_ref().map(|n| n.kcal).unwrap_or(u32::MAX));
    items.truncate(3);

    WaiterReply::new(
        "light",
        "Keeping it light? These are the gentlest plates we serve:".to_string(),
    )
    .with_suggestions(items)
}

fn topic_soup(ctx: &TurnContext) -> WaiterReply {
    let items: Vec<&MenuItem> = ctx
        .catalog
        .items()
        .iter()
        .filter(|i| i.name.to_lowercase().contains("suppe") || i.description.to_lowercase().contains("soup"))
        .collect();
    WaiterReply::new(
        "soup",
        "Our soup of the house, ladled hot:".to_string(),
    )
    .with_suggestions(items)
}

fn topic_salad(ctx: &TurnContext) -> WaiterReply {
    let items: Vec<&MenuItem> = ctx
        .catalog
        .items()
        .iter()
        .filter(|i| i.name.to_lowercase().contains("salat") || i.description.to_lowercase().contains("salad"))
        .collect();
    WaiterReply::new("salad", "Something crisp and fresh:".to_string()).with_suggestions(items)
}

fn topic_quick(ctx: &TurnContext) -> WaiterReply {
    let items = ctx.catalog.quick_items(15);
    WaiterReply::new(
        "quick",
        "In a hurry? These leave the kitchen in fifteen minutes or less:".to_string(),
    )
    .with_suggestions(items)
}

fn topic_lunch(ctx: &TurnContext) -> WaiterReply {
    let items = ctx.catalog.quick_items(15);
    WaiterReply::new(
        "lunch",
        "For lunch I'd go with something that doesn't keep you waiting:".to_string(),
    )
    .with_suggestions(items)
}

fn topic_traditional(ctx: &TurnContext) -> WaiterReply {
    // The mains are the heart of the traditional card.
    let items = ctx.catalog.by_category(Category::Main);
    WaiterReply::new(
        "traditional",
        "You're in the right place for Bavarian classics:".to_string(),
    )
    .with_suggestions(items)
}

fn topic_allergens(ctx: &TurnContext) -> WaiterReply {
    let entities = RecognizedEntities::recognize(ctx.catalog, &ctx.lower);

    if let Some(allergen) = entities.allergen {
        let items = ctx.catalog.without_allergen(&allergen);
        return WaiterReply::new(
            "allergens",
            format!(
                "These dishes are free of {}:\n{}",
                allergen,
                names(&items)
            ),
        )
        .with_suggestions(items);
    }

    WaiterReply::new(
        "allergens",
        "Every dish lists its allergens on the card — tell me an allergen \
         (gluten, dairy, nuts, egg, ...) and I'll filter the menu for you."
            .to_string(),
    )
}

fn topic_menu(ctx: &TurnContext) -> WaiterReply {
    let text = format!(
        "With pleasure! We serve {} starters, {} mains, {} desserts and {} drinks. \
         Ask for any section, or start with our favorites:",
        ctx.catalog.by_category(Category::Starter).len(),
        ctx.catalog.by_category(Category::Main).len(),
        ctx.catalog.by_category(Category::Dessert).len(),
        ctx.catalog.by_category(Category::Drinks).len(),
    );
    WaiterReply::new("menu", text).with_suggestions(ctx.catalog.popular_items())
}

fn topic_cart(ctx: &TurnContext) -> WaiterReply {
    if ctx.cart.is_empty() {
        return WaiterReply::new(
            "cart",
            "Your cart is still empty — tell me what you'd like and I'll note it down."
                .to_string(),
        );
    }

    let lines: Vec<String> = ctx
        .cart
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.item.name))
        .collect();
    WaiterReply::new(
        "cart",
        format!("Here's what I have noted for you:\n{}", lines.join("\n")),
    )
}

fn topic_checkout(_ctx: &TurnContext) -> WaiterReply {
    WaiterReply::new(
        "checkout",
        "Of course — I'll take you to checkout. You can review your order there before paying."
            .to_string(),
    )
}

fn topic_bill(_ctx: &TurnContext) -> WaiterReply {
    WaiterReply::new(
        "bill",
        "I'll bring the bill right over. You can pay in cash, by card or via QR code."
            .to_string(),
    )
}

fn topic_chef(ctx: &TurnContext) -> WaiterReply {
    WaiterReply::new(
        "chef",
        "Our chef's heart beats for the slow-braised Rinderrouladen — and the \
         Schweinshaxe roasts for a good forty minutes until the crackling is perfect."
            .to_string(),
    )
    .with_suggestions(
        ["mn2", "mn4"]
            .iter()
            .filter_map(|id| ctx.catalog.get(id))
            .collect(),
    )
}

fn topic_pairing(ctx: &TurnContext) -> WaiterReply {
    let dishes = match_dishes(ctx.catalog, &ctx.lower);
    if let Some(dish) = dishes.first() {
        if let Some(partner) = pairing_for(ctx.catalog, &dish.id) {
            return WaiterReply::new(
                "pairing",
                format!("With the {} I'd pour you the {}.", dish.name, partner.name),
            )
            .with_suggestions(vec![partner]);
        }
    }

    WaiterReply::new(
        "pairing",
        "Tell me the dish and I'll suggest what goes with it — beer with the hearty \
         plates, Riesling with the Schnitzel, coffee with dessert."
            .to_string(),
    )
}

fn topic_nutrition(ctx: &TurnContext) -> WaiterReply {
    let dishes = match_dishes(ctx.catalog, &ctx.lower);
    if let Some(dish) = dishes.first() {
        if let Some(facts) = &dish.nutrition {
            return WaiterReply::new(
                "nutrition",
                format!(
                    "The {} has about {} kcal and {} g protein per serving.",
                    dish.name, facts.kcal, facts.protein_g
                ),
            )
            .with_suggestions(vec![*dish]);
        }
        return WaiterReply::new(
            "nutrition",
            format!(
                "The kitchen doesn't publish facts for the {} yet — happy to ask for you.",
                dish.name
            ),
        );
    }

    let items: Vec<&MenuItem> = ctx
        .catalog
        .items()
        .iter()
        .filter(|i| i.nutrition.is_some())
        .collect();
    WaiterReply::new(
        "nutrition",
        "I have nutritional facts for these dishes:".to_string(),
    )
    .with_suggestions(items)
}

fn kid_suggestions(catalog: &Catalog) -> Vec<&MenuItem> {
    let mut items = catalog.by_category(Category::Starter);
    for id in KID_FRIENDLY_IDS {
        if let Some(item) = catalog.get(id) {
            if !items.iter().any(|i| i.id == item.id) {
                items.push(item);
            }
        }
    }
    items
}

fn pairing_for<'a>(catalog: &'a Catalog, dish_id: &str) -> Option<&'a MenuItem> {
    PAIRINGS
        .iter()
        .find(|(dish, _)| *dish == dish_id)
        .and_then(|(_, partner)| catalog.get(partner))
}

/// The rule-based waiter: composes classifier, extractors and catalog
/// into one templated reply per utterance.
pub struct WaiterResponder {
    catalog: Catalog,
}

impl WaiterResponder {
    /// Create a responder over a shared read-only catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog this responder answers from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Produce a reply for one utterance.
    ///
    /// `cart` is a snapshot owned by the caller; `add_to_cart` is the one
    /// permitted side effect and is invoked once per unit ordered. Total
    /// over all input; unrecognized text falls through to the fallback.
    pub fn respond(
        &self,
        utterance: &str,
        cart: &[CartLine],
        add_to_cart: &mut dyn FnMut(&MenuItem),
    ) -> WaiterReply {
        let ctx = TurnContext {
            catalog: &self.catalog,
            cart,
            lower: utterance.trim().to_lowercase(),
        };

        let reply = self
            .try_payment_confirmation(&ctx)
            .or_else(|| self.try_guest_count(&ctx))
            .or_else(|| self.try_ordering(&ctx, add_to_cart))
            .or_else(|| self.try_topics(&ctx))
            .unwrap_or_else(|| self.fallback(&ctx));

        debug!(topic = %reply.topic, "responder branch fired");
        reply
    }

    /// Branch 1: "pay €X using Y" style confirmations, independent of the
    /// intent classifier.
    fn try_payment_confirmation(&self, ctx: &TurnContext) -> Option<WaiterReply> {
        if !ctx.lower.contains("pay") {
            return None;
        }

        let method = if ctx.lower.contains("cash") {
            "cash"
        } else if ctx.lower.contains("card") {
            "card"
        } else if ctx.lower.contains("qr") {
            "qr"
        } else {
            return None;
        };

        let amount = PAY_AMOUNT.captures(&ctx.lower).map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        });
        let amount_note = match &amount {
            Some(a) if !a.is_empty() => format!(" of €{}", a),
            _ => String::new(),
        };

        let text = match method {
            "cash" => format!(
                "Very well — your server will come by to take the payment{} in cash.",
                amount_note
            ),
            "card" => format!(
                "Very well — I'll bring the card reader for your payment{}.",
                amount_note
            ),
            _ => format!(
                "Very well — just scan the QR code on your table to settle the payment{}.",
                amount_note
            ),
        };

        Some(WaiterReply::new("payment", text))
    }

    /// Branch 2: guest-count phrases; children bias the suggestions.
    fn try_guest_count(&self, ctx: &TurnContext) -> Option<WaiterReply> {
        let grab = |re: &Regex| {
            re.captures(&ctx.lower)
                .and_then(|caps| caps[1].parse::<u32>().ok())
        };

        let adults = grab(&ADULT_COUNT);
        let children = grab(&CHILD_COUNT);
        let seniors = grab(&SENIOR_COUNT);
        let party = grab(&PARTY_COUNT);

        if adults.is_none() && children.is_none() && seniors.is_none() && party.is_none() {
            return None;
        }

        let total = party.unwrap_or_else(|| {
            adults
                .unwrap_or(0)
                .saturating_add(children.unwrap_or(0))
                .saturating_add(seniors.unwrap_or(0))
        });
        let mut reply = WaiterReply::new(
            "guests",
            format!(
                "A table for {} — wonderful, I'll get everything ready for you!",
                total.max(1)
            ),
        );

        if children.unwrap_or(0) > 0 {
            reply.text.push_str(" For the little ones I can suggest:");
            reply = reply.with_suggestions(kid_suggestions(&self.catalog));
        }

        Some(reply)
    }

    /// Branch 3: ordering intent. The only branch that mutates anything,
    /// and only via the injected callback.
    fn try_ordering(
        &self,
        ctx: &TurnContext,
        add_to_cart: &mut dyn FnMut(&MenuItem),
    ) -> Option<WaiterReply> {
        if !has_ordering_intent(&ctx.lower) {
            return None;
        }

        let dishes = match_dishes(&self.catalog, &ctx.lower);
        if dishes.is_empty() {
            return Some(WaiterReply::new(
                "order_clarify",
                "I'd love to get that started for you — which dish did you mean? \
                 For example: \"I want the Wiener Schnitzel\" or \"I'll have 2 Bavarian Pretzels\"."
                    .to_string(),
            ));
        }

        let quantity = extract_quantity(&ctx.lower);
        for dish in &dishes {
            for _ in 0..quantity {
                add_to_cart(dish);
            }
            info!(dish = %dish.id, quantity, "added to cart");
        }

        let added = names(&dishes);
        let mut reply = WaiterReply::new(
            "order",
            format!("Excellent choice! I've added {}x {} to your order.", quantity, added),
        );
        reply.auto_added_items = dishes.iter().map(|d| (*d).clone()).collect();

        if let Some(partner) = pairing_for(&self.catalog, &dishes[0].id) {
            reply
                .text
                .push_str(&format!(" May I suggest the {} to go with it?", partner.name));
            reply.suggested_items = vec![partner.clone()];
        }

        Some(reply)
    }

    /// Branch 4: the ordered topic chain.
    fn try_topics(&self, ctx: &TurnContext) -> Option<WaiterReply> {
        for rule in TOPIC_RULES.iter() {
            if rule.pattern.is_match(&ctx.lower) {
                debug!(rule = rule.name, "topic rule matched");
                return Some((rule.handler)(ctx));
            }
        }
        None
    }

    /// Branch 5: menu-id tokens, then a generic reply.
    fn fallback(&self, ctx: &TurnContext) -> WaiterReply {
        let ids = extract_menu_ids(&ctx.lower);
        if !ids.is_empty() {
            let items: Vec<&MenuItem> =
                ids.iter().filter_map(|id| self.catalog.get(id)).collect();
            if !items.is_empty() {
                return WaiterReply::new(
                    "fallback_ids",
                    "Happy to help with these:".to_string(),
                )
                .with_suggestions(items);
            }
        }

        let mut rng = rand::thread_rng();
        let text = GENERIC_REPLIES
            .choose(&mut rng)
            .copied()
            .unwrap_or(GENERIC_REPLIES[0]);
        WaiterReply::new("fallback", text.to_string())
            .with_suggestions(self.catalog.popular_items())
    }
}
