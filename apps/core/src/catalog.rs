//! Menu catalog and cart data model.
//!
//! The catalog is loaded once at startup and never mutated; every other
//! component borrows it read-only. Cart state is owned by the host UI and
//! passed in as a snapshot per call.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Shape of a catalog item id: two lowercase letters followed by digits
/// (e.g. "st1", "mn12"). The same shape is scanned for inside generated
/// replies to recover item references.
pub static ID_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}\d+$").expect("Invalid regex: id shape"));

/// Menu section a dish belongs to. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Starter,
    Main,
    Dessert,
    Drinks,
}

impl Category {
    /// Returns a human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Starter => "starter",
            Category::Main => "main course",
            Category::Dessert => "dessert",
            Category::Drinks => "drink",
        }
    }
}

/// Optional nutritional facts for a dish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Energy per serving in kilocalories.
    pub kcal: u32,
    /// Protein per serving in grams.
    pub protein_g: f32,
}

/// A single immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    /// Short alphanumeric code, e.g. "mn1". See [`ID_SHAPE`].
    #[validate(length(min = 3))]
    pub id: String,
    /// Display name of the dish.
    #[validate(length(min = 1))]
    pub name: String,
    /// One-line menu description.
    pub description: String,
    /// Price per serving, currency-agnostic decimal.
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Menu section.
    pub category: Category,
    /// Allergens contained in the dish (lowercase names).
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Whether the dish is vegetarian.
    #[serde(default)]
    pub vegetarian: bool,
    /// Whether the dish is a house bestseller.
    #[serde(default)]
    pub popular: bool,
    /// Nutritional facts, where the kitchen provides them.
    #[serde(default)]
    pub nutrition: Option<NutritionFacts>,
    /// Typical preparation time in minutes.
    #[serde(default)]
    pub prep_minutes: Option<u32>,
}

impl MenuItem {
    /// Case-insensitive check whether the dish contains the given allergen.
    pub fn contains_allergen(&self, allergen: &str) -> bool {
        let needle = allergen.to_lowercase();
        self.allergens.iter().any(|a| a.to_lowercase() == needle)
    }

    fn veg(mut self) -> Self {
        self.vegetarian = true;
        self
    }

    fn bestseller(mut self) -> Self {
        self.popular = true;
        self
    }

    fn prep(mut self, minutes: u32) -> Self {
        self.prep_minutes = Some(minutes);
        self
    }

    fn facts(mut self, kcal: u32, protein_g: f32) -> Self {
        self.nutrition = Some(NutritionFacts { kcal, protein_g });
        self
    }
}

/// One line of the host-owned cart: an item plus a positive quantity.
/// A zero-or-negative quantity update removes the line on the host side;
/// the core only ever sees lines with `quantity >= 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// The ordered item.
    pub item: MenuItem,
    /// How many servings; invariant `>= 1`.
    pub quantity: u32,
}

/// Read-only, ordered menu catalog shared by all components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

fn entry(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: Category,
    allergens: &[&str],
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        allergens: allergens.iter().map(|s| s.to_string()).collect(),
        vegetarian: false,
        popular: false,
        nutrition: None,
        prep_minutes: None,
    }
}

impl Catalog {
    /// The built-in Bavarian demo menu.
    pub fn bavarian() -> Self {
        use Category::*;

        let items = vec![
            // Starters
            entry(
                "st1",
                "Bavarian Pretzel",
                "Oven-fresh laugenbrezel with coarse salt and sweet mustard",
                4.50,
                Starter,
                &["gluten"],
            )
            .veg()
            .bestseller()
            .prep(5)
            .facts(320, 9.0),
            entry(
                "st2",
                "Obatzda",
                "Creamy camembert and paprika spread with red onions and rye bread",
                7.90,
                Starter,
                &["dairy", "gluten"],
            )
            .veg()
            .prep(10),
            entry(
                "st3",
                "Kartoffelsuppe",
                "Hearty potato soup with marjoram and crispy croutons",
                6.50,
                Starter,
                &["gluten", "celery"],
            )
            .veg()
            .prep(12),
            entry(
                "st4",
                "Wurstsalat",
                "Tangy sausage salad with pickles, onions and vinaigrette",
                8.50,
                Starter,
                &["mustard"],
            )
            .prep(10),
            // Mains
            entry(
                "mn1",
                "Wiener Schnitzel",
                "Golden-fried veal schnitzel with potato salad and lingonberries",
                18.90,
                Main,
                &["gluten", "egg"],
            )
            .bestseller()
            .prep(20)
            .facts(860, 42.0),
            entry(
                "mn2",
                "Rinderrouladen",
                "Slow-braised beef rolls with bacon, onions and pickles, served with red cabbage",
                19.50,
                Main,
                &["mustard", "celery"],
            )
            .prep(30),
            entry(
                "mn3",
                "Bratwurst Platter",
                "Grilled Nuremberg bratwurst with sauerkraut and farmhouse bread",
                14.50,
                Main,
                &["gluten", "mustard"],
            )
            .prep(15),
            entry(
                "mn4",
                "Schweinshaxe",
                "Crispy roasted pork knuckle with potato dumplings and dark beer gravy",
                21.90,
                Main,
                &["gluten"],
            )
            .prep(40)
            .facts(1150, 68.0),
            entry(
                "mn5",
                "Kaesespaetzle",
                "Pan-fried egg noodles with mountain cheese and roasted onions",
                13.90,
                Main,
                &["gluten", "dairy", "egg"],
            )
            .veg()
            .prep(18),
            entry(
                "mn6",
                "Forelle Muellerin",
                "Pan-fried trout with brown butter, almonds and parsley potatoes",
                19.90,
                Main,
                &["fish", "dairy", "nuts"],
            )
            .prep(25),
            // Desserts
            entry(
                "ds1",
                "Apfelstrudel",
                "Warm apple strudel with vanilla sauce and whipped cream",
                6.90,
                Dessert,
                &["gluten", "dairy", "egg"],
            )
            .veg()
            .bestseller()
            .prep(10)
            .facts(450, 6.0),
            entry(
                "ds2",
                "Kaiserschmarrn",
                "Fluffy shredded pancake with rum raisins and plum compote",
                8.90,
                Dessert,
                &["gluten", "dairy", "egg"],
            )
            .veg()
            .prep(20),
            entry(
                "ds3",
                "Schwarzwaelder Kirschtorte",
                "Black Forest gateau with cherries, chocolate and kirsch cream",
                6.50,
                Dessert,
                &["gluten", "dairy", "egg", "alcohol"],
            )
            .veg()
            .prep(5),
            // Drinks
            entry(
                "dr1",
                "Augustiner Lager",
                "Munich-brewed helles lager, 0.5l",
                4.90,
                Drinks,
                &["gluten"],
            )
            .prep(2),
            entry(
                "dr2",
                "Pfaelzer Riesling",
                "Dry German riesling, 0.2l glass",
                6.50,
                Drinks,
                &["sulfites"],
            )
            .prep(2),
            entry(
                "dr3",
                "Apfelschorle",
                "Sparkling apple spritzer, 0.4l",
                3.90,
                Drinks,
                &[],
            )
            .veg()
            .prep(2),
            entry(
                "dr4",
                "Kaffee",
                "Freshly brewed coffee, milk on request",
                3.20,
                Drinks,
                &["dairy"],
            )
            .veg()
            .prep(5),
        ];

        Self { items }
    }

    /// Load a catalog from a JSON array of items, validating every entry.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;

        if items.is_empty() {
            return Err(AppError::Validation("catalog is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for item in &items {
            item.validate()?;
            if !ID_SHAPE.is_match(&item.id) {
                return Err(AppError::Validation(format!(
                    "item id '{}' does not match the expected shape",
                    item.id
                )));
            }
            if !seen.insert(item.id.clone()) {
                return Err(AppError::Validation(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }

        Ok(Self { items })
    }

    /// All items, in menu order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up a single item by id.
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// All items of one menu section, in menu order.
    pub fn by_category(&self, category: Category) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|i| i.category == category)
            .collect()
    }

    /// All vegetarian dishes.
    pub fn vegetarian_items(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|i| i.vegetarian).collect()
    }

    /// The house bestsellers, used as default suggestions.
    pub fn popular_items(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|i| i.popular).collect()
    }

    /// All items free of the given allergen.
    pub fn without_allergen(&self, allergen: &str) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|i| !i.contains_allergen(allergen))
            .collect()
    }

    /// Dishes that leave the kitchen within `max_minutes`.
    pub fn quick_items(&self, max_minutes: u32) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|i| matches!(i.prep_minutes, Some(m) if m <= max_minutes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::bavarian();

        assert!(catalog.items().len() >= 15);
        for item in catalog.items() {
            assert!(ID_SHAPE.is_match(&item.id), "bad id '{}'", item.id);
            assert!(item.price > 0.0);
        }
        // Every section is populated
        for category in [
            Category::Starter,
            Category::Main,
            Category::Dessert,
            Category::Drinks,
        ] {
            assert!(!catalog.by_category(category).is_empty());
        }
        assert_eq!(catalog.popular_items().len(), 3);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::bavarian();

        let pretzel = catalog.get("st1").unwrap();
        assert_eq!(pretzel.name, "Bavarian Pretzel");
        assert!(catalog.get("zz99").is_none());
    }

    #[test]
    fn test_allergen_filter() {
        let catalog = Catalog::bavarian();

        let gluten_free = catalog.without_allergen("gluten");
        assert!(!gluten_free.is_empty());
        assert!(gluten_free.iter().all(|i| !i.contains_allergen("GLUTEN")));
    }

    #[test]
    fn test_from_json_valid() {
        let json = r#"[
            {"id": "mn1", "name": "Test Dish", "description": "A dish",
             "price": 9.5, "category": "main", "allergens": ["gluten"]}
        ]"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.items().len(), 1);
        assert!(!catalog.items()[0].vegetarian);
    }

    #[test]
    fn test_from_json_rejects_bad_id() {
        let json = r#"[
            {"id": "MN1", "name": "Test Dish", "description": "A dish",
             "price": 9.5, "category": "main"}
        ]"#;

        assert!(matches!(
            Catalog::from_json(json),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "mn1", "name": "A", "description": "", "price": 1.0, "category": "main"},
            {"id": "mn1", "name": "B", "description": "", "price": 2.0, "category": "main"}
        ]"#;

        assert!(matches!(
            Catalog::from_json(json),
            Err(AppError::Validation(_))
        ));
    }
}
