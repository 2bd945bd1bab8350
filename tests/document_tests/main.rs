//! Document model tests

mod parser_tests;
