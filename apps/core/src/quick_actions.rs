//! Quick-action phrase expansion.
//!
//! Maps the short labels on UI buttons ("Menu", "Vegetarian", "Checkout")
//! to full, polite sentences inserted into the compose box as if the guest
//! had typed them. Exact table hits control phrasing for the common cases;
//! a fallback chain guarantees well-formed output for labels the table does
//! not know yet, so the table can grow without code changes elsewhere.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Keyword -> sentence table, grouped by theme. Lookup is case-insensitive
/// and trimmed; the stored sentence is returned verbatim.
const EXPANSIONS: &[(&str, &str)] = &[
    // Menu browsing
    ("menu", "Could you show me the menu, please?"),
    ("full menu", "I would like to see the full menu, please."),
    ("starters", "What starters do you have?"),
    ("appetizers", "Could you show me your appetizers?"),
    ("mains", "What main courses do you have?"),
    ("main courses", "Could you show me the main courses, please?"),
    ("desserts", "What desserts do you have?"),
    ("drinks", "Could you show me the drinks menu, please?"),
    ("beverages", "What beverages do you have?"),
    ("specials", "What are today's specials?"),
    ("today's specials", "Could you tell me about today's specials?"),
    ("popular", "What are your most popular dishes?"),
    ("bestsellers", "Could you show me your bestsellers?"),
    ("recommendations", "What would you recommend today?"),
    ("recommend", "Could you recommend something for me?"),
    ("surprise me", "Please surprise me with something you love."),
    ("soups", "What soups do you have today?"),
    ("salads", "Do you have any salads?"),
    ("wine list", "Could I see the wine list, please?"),
    ("beers", "What beers do you have on tap?"),
    ("lunch", "What do you recommend for a quick lunch?"),
    ("quick bites", "What dishes are ready quickly?"),
    ("traditional", "Could you show me your traditional Bavarian dishes?"),
    ("bavarian classics", "What are your classic Bavarian dishes?"),
    ("fish", "Do you have any fish dishes?"),
    ("new", "Is there anything new on the menu?"),
    // Dietary filters
    ("vegetarian", "What vegetarian options do you have?"),
    ("vegan", "Do you have any vegan dishes?"),
    ("gluten-free", "Are there any gluten-free options?"),
    ("gluten free", "Are there any gluten-free options?"),
    ("lactose-free", "Are there any lactose-free options?"),
    ("dairy-free", "Which dishes are free of dairy?"),
    ("nut-free", "Which dishes are free of nuts?"),
    ("no nuts", "Could you show me dishes without nuts?"),
    ("allergens", "Could you tell me about allergens in your dishes?"),
    ("allergy info", "I have allergies, what information can you give me?"),
    ("low calorie", "What are your lightest dishes?"),
    ("light meals", "Do you have any light meals?"),
    ("healthy", "What healthy options do you have?"),
    ("diet", "I am on a diet, what would you suggest?"),
    ("no pork", "Which dishes are made without pork?"),
    ("spicy", "Do you have anything spicy?"),
    ("mild", "Which dishes are mild?"),
    ("kids meals", "What do you have for children?"),
    ("family", "What would you recommend for a family?"),
    // Ordering
    ("order", "I would like to place an order."),
    ("order now", "I am ready to order now."),
    ("add to cart", "Please add that to my cart."),
    ("the usual", "I will have my usual, please."),
    ("one more", "Could I get one more of the same?"),
    ("another round", "Another round for the table, please!"),
    ("cancel order", "I would like to cancel my order."),
    ("remove item", "Please remove that item from my cart."),
    ("clear cart", "Please clear my cart."),
    ("schnitzel", "I want the Wiener Schnitzel."),
    ("pretzel", "I want a Bavarian Pretzel."),
    ("bratwurst", "I want the Bratwurst Platter."),
    ("rouladen", "I want the Rinderrouladen."),
    ("beer", "Can I have a beer, please?"),
    ("wine", "Can I have a glass of wine, please?"),
    ("coffee", "Can I have a coffee, please?"),
    ("water", "Could I get some water, please?"),
    ("tap water", "Could I get a glass of tap water, please?"),
    // Cart, bill and payment
    ("cart", "What is in my cart?"),
    ("my cart", "Could you show me my cart?"),
    ("view cart", "I would like to view my cart."),
    ("checkout", "I would like to proceed to checkout."),
    ("pay", "I am ready to pay."),
    ("payment", "How can I pay?"),
    ("bill", "Could I have the bill, please?"),
    ("the bill", "Could I have the bill, please?"),
    ("check please", "Check, please!"),
    ("split bill", "Could we split the bill, please?"),
    ("pay cash", "I would like to pay in cash."),
    ("pay by card", "I would like to pay by card."),
    ("pay with qr", "I would like to pay with a QR code."),
    ("receipt", "Could I get a receipt, please?"),
    ("tip", "How can I leave a tip?"),
    ("voucher", "I have a voucher, how do I redeem it?"),
    // Pairing
    ("pairing", "What would pair well with my order?"),
    ("wine pairing", "Which wine would pair well with my meal?"),
    ("beer pairing", "Which beer goes best with my meal?"),
    ("dessert pairing", "Which dessert would round off my meal?"),
    ("chef's pick", "What is the chef's pick today?"),
    ("chef recommendation", "What does the chef recommend?"),
    ("drink suggestion", "Could you suggest a drink for me?"),
    ("what goes with schnitzel", "What goes well with the Schnitzel?"),
    // Greetings and small talk
    ("hello", "Hello! Nice to meet you."),
    ("hi", "Hi there!"),
    ("good morning", "Good morning!"),
    ("good evening", "Good evening!"),
    ("thanks", "Thank you very much!"),
    ("thank you", "Thank you so much for your help!"),
    ("goodbye", "Goodbye, and thank you!"),
    ("bye", "Bye, see you next time!"),
    ("help", "Could you help me, please?"),
    ("what can you do", "What can you help me with?"),
    // Modifiers
    ("extra sauce", "Could I get extra sauce with that, please?"),
    ("no onions", "Please prepare that without onions."),
    ("no cheese", "Please leave out the cheese."),
    ("well done", "I would like that well done, please."),
    ("medium", "I would like that medium, please."),
    ("rare", "I would like that rare, please."),
    ("large portion", "Could I get a large portion, please?"),
    ("small portion", "A small portion is enough for me, please."),
    ("to go", "Could I get that to go, please?"),
    ("takeaway", "I would like that as takeaway, please."),
    ("less salt", "Please use less salt."),
    ("extra crispy", "Could you make that extra crispy, please?"),
    // Guests and occasions
    ("birthday", "We are celebrating a birthday today!"),
    ("anniversary", "We are celebrating our anniversary tonight."),
    ("date night", "It is date night, could you suggest something special?"),
    ("business lunch", "We are here for a business lunch."),
    ("large group", "We are a large group, what would you suggest?"),
    ("reservation", "I would like to make a reservation."),
    ("book a table", "Could I book a table, please?"),
    ("window seat", "Could we have a table by the window?"),
    ("outdoor seating", "Do you have outdoor seating?"),
    ("high chair", "Could we get a high chair for our child?"),
    ("two adults", "We are two adults."),
    ("party of four", "We are a party of four."),
    // Meta questions
    ("opening hours", "What are your opening hours?"),
    ("wifi", "Do you have free wifi?"),
    ("nutrition", "Could you tell me the nutritional facts of your dishes?"),
    ("calories", "How many calories does that dish have?"),
    ("ingredients", "What ingredients are in that dish?"),
    ("how much", "How much does that cost?"),
    ("prep time", "How long does the preparation take?"),
    ("how long", "How long will my order take?"),
    // Assorted follow-ups
    ("more starters", "Could you show me more starters?"),
    ("more mains", "Could you show me more main courses?"),
    ("more desserts", "Could you show me more desserts?"),
    ("more drinks", "Could you show me more drinks?"),
    ("something hearty", "I am looking for something hearty."),
    ("something sweet", "I am looking for something sweet."),
    ("something warm", "I am looking for something warm."),
    ("something cold", "Do you have anything cold?"),
    ("for two", "Could you suggest something to share for two?"),
    ("sharing", "What would be good for sharing?"),
    ("non-alcoholic", "What non-alcoholic drinks do you have?"),
    ("alcohol-free", "Which drinks are alcohol-free?"),
    ("hot drinks", "What hot drinks do you have?"),
    ("soft drinks", "What soft drinks do you have?"),
    ("first time", "It is my first time here, what should I try?"),
    ("regulars", "What do your regulars usually order?"),
    ("seasonal", "Do you have any seasonal dishes?"),
    ("dessert first", "Can I order dessert first?"),
    ("wait time", "How long is the current wait for food?"),
    ("anything else", "Is there anything else you would suggest?"),
];

/// Lowercase lookup map built once from [`EXPANSIONS`].
static EXPANSION_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| EXPANSIONS.iter().copied().collect());

/// Price-inquiry sentence for unmapped labels mentioning "how much".
const PRICE_INQUIRY: &str = "What is the price of that dish?";
/// Ingredient-inquiry sentence for unmapped labels mentioning "contains".
const INGREDIENT_INQUIRY: &str = "Could you tell me what that dish contains?";

/// Expand a tapped quick-action label into a full, polite sentence.
///
/// Resolution order: exact case-insensitive table hit, then light
/// heuristics for price/ingredient questions and "I want ..." phrasing,
/// then a default that capitalizes the input and terminates it. Total
/// over all string input; the result is never empty and always ends in
/// "." or "?".
pub fn expand(label: &str) -> String {
    let trimmed = label.trim();
    let lower = trimmed.to_lowercase();

    if let Some(phrase) = EXPANSION_INDEX.get(lower.as_str()) {
        return (*phrase).to_string();
    }

    if lower.contains("how much") {
        return PRICE_INQUIRY.to_string();
    }
    if lower.contains("contains") {
        return INGREDIENT_INQUIRY.to_string();
    }
    if lower.starts_with("i want") || lower.starts_with("i need") || lower.starts_with("i would like")
    {
        return terminate(capitalize(trimmed));
    }

    if trimmed.is_empty() {
        // Blank taps still produce a sendable sentence.
        return "Could you help me, please?".to_string();
    }

    terminate(capitalize(trimmed))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn terminate(mut sentence: String) -> String {
    if !sentence.ends_with('.') && !sentence.ends_with('?') {
        sentence.push('.');
    }
    sentence
}
