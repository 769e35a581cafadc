//! Suite configuration resolved from the environment at startup.
//!
//! No module-level state: the resolved [`SuiteConfig`] is constructed once
//! and handed explicitly to fixtures and sessions.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{HarnessError, Result};

/// Default storefront under test.
const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";
/// Default local chromedriver endpoint.
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
/// Default external auth endpoint for the API token fixture.
const DEFAULT_API_LOGIN_URL: &str = "https://reqres.in/api/login";

/// Per-interaction wait budgets.
///
/// Exceeding a budget aborts the current test with a timeout failure,
/// never a hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBudget {
	/// Click/fill/read interactions.
	pub action: Duration,
	/// Full-page navigations and URL transitions.
	pub navigation: Duration,
	/// Verification helpers polling for expected UI state.
	pub assertion: Duration,
	/// Polling interval while a budget is open.
	pub poll: Duration,
}

impl Default for WaitBudget {
	fn default() -> Self {
		Self {
			action: Duration::from_secs(10),
			navigation: Duration::from_secs(30),
			assertion: Duration::from_secs(15),
			poll: Duration::from_millis(250),
		}
	}
}

/// Fully owned suite configuration.
///
/// This type is the stable handoff between environment parsing and
/// session/fixture construction.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
	/// Root address of the application under test.
	pub base_url: Url,
	/// WebDriver server endpoint.
	pub webdriver_url: String,
	/// Whether the browser launches headless.
	pub headless: bool,
	/// Fixed relative location of the persisted storage-state file.
	pub storage_state_path: PathBuf,
	/// Directory receiving screenshot artifacts.
	pub screenshots_dir: PathBuf,
	/// UI login credentials for the baseline session.
	pub username: String,
	pub password: String,
	/// External login endpoint used by the API token fixture.
	pub api_login_url: String,
	/// Optional API key sent as `x-api-key` on every API request.
	pub api_key: Option<String>,
	/// Credentials for the external auth endpoint.
	pub api_email: Option<String>,
	pub api_password: Option<String>,
	/// Set on CI; tightens parallelism and enables runner retries.
	pub ci: bool,
	/// Wait budgets applied to every interaction.
	pub waits: WaitBudget,
}

impl SuiteConfig {
	/// Resolves configuration from process environment variables.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Resolves configuration from an arbitrary variable source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let raw_base = lookup("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
		let base_url = Url::parse(&raw_base)
			.map_err(|e| HarnessError::Config(format!("invalid BASE_URL {raw_base:?}: {e}")))?;

		let headless = match lookup("HEADLESS").as_deref() {
			None => true,
			Some(v) => parse_bool("HEADLESS", v)?,
		};
		let ci = match lookup("CI").as_deref() {
			None | Some("") => false,
			Some(v) => parse_bool("CI", v)?,
		};

		Ok(Self {
			base_url,
			webdriver_url: lookup("WEBDRIVER_URL").unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string()),
			headless,
			storage_state_path: lookup("STORAGE_STATE_PATH")
				.map(PathBuf::from)
				.unwrap_or_else(|| PathBuf::from(".auth/storage-state.json")),
			screenshots_dir: lookup("SCREENSHOTS_DIR")
				.map(PathBuf::from)
				.unwrap_or_else(|| PathBuf::from("screenshots")),
			username: lookup("E2E_USERNAME").unwrap_or_else(|| "standard_user".to_string()),
			password: lookup("E2E_PASSWORD").unwrap_or_else(|| "secret_sauce".to_string()),
			api_login_url: lookup("API_LOGIN_URL").unwrap_or_else(|| DEFAULT_API_LOGIN_URL.to_string()),
			api_key: lookup("X_API_KEY").filter(|v| !v.is_empty()),
			api_email: lookup("API_USER_EMAIL").filter(|v| !v.is_empty()),
			api_password: lookup("API_USER_PASSWORD").filter(|v| !v.is_empty()),
			ci,
			waits: WaitBudget::default(),
		})
	}

	/// Resolves a relative path against the configured base address.
	pub fn url_for(&self, path: &str) -> Result<String> {
		let url = self
			.base_url
			.join(path)
			.map_err(|e| HarnessError::Config(format!("cannot resolve path {path:?}: {e}")))?;
		Ok(url.into())
	}

	/// Runner retry count: 2 on CI, 0 locally. Retries are the external
	/// runner's concern; the suite only surfaces the number.
	pub fn retries(&self) -> u32 {
		if self.ci { 2 } else { 0 }
	}

	/// Explicit worker cap, `None` meaning runner default.
	pub fn workers(&self) -> Option<usize> {
		if self.ci { Some(1) } else { None }
	}
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" | "" => Ok(false),
		other => Err(HarnessError::Config(format!("{key} must be a boolean, got {other:?}"))),
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn config_from(pairs: &[(&str, &str)]) -> Result<SuiteConfig> {
		let vars: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		SuiteConfig::from_lookup(|key| vars.get(key).cloned())
	}

	#[test]
	fn defaults_apply_when_environment_is_empty() {
		let cfg = config_from(&[]).unwrap();
		assert_eq!(cfg.base_url.as_str(), "https://www.saucedemo.com/");
		assert_eq!(cfg.webdriver_url, "http://localhost:9515");
		assert!(cfg.headless);
		assert!(!cfg.ci);
		assert_eq!(cfg.username, "standard_user");
		assert_eq!(cfg.storage_state_path, PathBuf::from(".auth/storage-state.json"));
		assert_eq!(cfg.waits, WaitBudget::default());
	}

	#[test]
	fn ci_flag_derives_retries_and_workers() {
		let local = config_from(&[]).unwrap();
		assert_eq!(local.retries(), 0);
		assert_eq!(local.workers(), None);

		let ci = config_from(&[("CI", "true")]).unwrap();
		assert_eq!(ci.retries(), 2);
		assert_eq!(ci.workers(), Some(1));
	}

	#[test]
	fn invalid_base_url_is_a_config_error() {
		let err = config_from(&[("BASE_URL", "not a url")]).unwrap_err();
		assert!(matches!(err, HarnessError::Config(_)));
	}

	#[test]
	fn url_for_resolves_routes_against_base() {
		let cfg = config_from(&[("BASE_URL", "https://storefront.test")]).unwrap();
		assert_eq!(cfg.url_for("/cart.html").unwrap(), "https://storefront.test/cart.html");
		assert_eq!(cfg.url_for("/").unwrap(), "https://storefront.test/");
	}

	#[test]
	fn empty_optional_credentials_collapse_to_none() {
		let cfg = config_from(&[("X_API_KEY", ""), ("API_USER_EMAIL", "qa@storefront.test")]).unwrap();
		assert_eq!(cfg.api_key, None);
		assert_eq!(cfg.api_email.as_deref(), Some("qa@storefront.test"));
	}

	#[test]
	fn malformed_boolean_is_rejected() {
		let err = config_from(&[("HEADLESS", "maybe")]).unwrap_err();
		assert!(err.to_string().contains("HEADLESS"));
	}
}
