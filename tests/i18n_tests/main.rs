//! Localization tests

mod culture_tests;
