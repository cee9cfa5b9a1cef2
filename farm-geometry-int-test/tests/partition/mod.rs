//! Partitioning integration tests.
//!
//! These tests split farms built from WKT and check the resulting fields
//! against the farm boundary.

mod split_into_fields_test;
mod random_farm_test;
