//! Flat namespace store tests

mod flat_store_tests;
mod format_tests;
