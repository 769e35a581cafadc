//! Plumbing for the storefront e2e suite: configuration, errors, logging,
//! browser session lifecycle, persisted auth state, API client, test data.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod session;

pub use api::ApiClient;
pub use config::SuiteConfig;
pub use data::TestData;
pub use error::{HarnessError, Result};
pub use session::{BrowserSession, StateStore, StorageState};
