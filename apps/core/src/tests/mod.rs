//! Test Module
//!
//! Cross-module test suite for the waiter rule engine.
//!
//! ## Test Categories
//! - `expansion_tests`: quick-action table lookup and fallback chain
//! - `classifier_tests`: exclusion/inclusion ordering-intent pipeline
//! - `integration_tests`: full responder scenarios with a live cart

pub mod expansion_tests;
pub mod integration_tests;
