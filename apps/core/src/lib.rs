//! # Gasthaus Core
//!
//! Rule-based "AI waiter" for the Gasthaus ordering demo. Analyzes guest
//! input without any model: quick-action phrase expansion, ordering-intent
//! classification, entity extraction and templated reply generation.
//!
//! ## Components
//! - `catalog`: immutable menu catalog and cart snapshot types
//! - `quick_actions`: button-label to full-sentence expansion
//! - `intent`: exclusion-before-inclusion ordering-intent classifier
//! - `entities`: quantity, fuzzy dish and menu-id extractors
//! - `responder`: priority-ordered branch chain producing the reply
//!
//! The whole core is synchronous and side-effect-free, except for the one
//! explicit add-to-cart callback the responder's ordering branch invokes.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod intent;
pub mod quick_actions;
pub mod responder;

pub use catalog::{CartLine, Catalog, Category, MenuItem, NutritionFacts};
pub use entities::{extract_menu_ids, extract_quantity, match_dishes, RecognizedEntities};
pub use error::AppError;
pub use intent::has_ordering_intent;
pub use quick_actions::expand;
pub use responder::{WaiterReply, WaiterResponder};

#[cfg(test)]
mod tests;
