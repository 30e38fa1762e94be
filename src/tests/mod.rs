//! Binary-crate test suite.
