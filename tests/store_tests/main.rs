//! Section-keyed store tests
