//! Settings coordinator tests
