//! Fixture layer for the storefront e2e suite.

pub mod cli;
pub mod fixtures;

pub use fixtures::Fixtures;
