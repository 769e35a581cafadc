//! Browser session lifecycle.
//!
//! A [`BrowserSession`] owns the WebDriver handle for one test, applies the
//! configured wait budgets, and can seed itself from / capture into a
//! persisted [`StorageState`].

mod storage;

use serde_json::json;
pub use storage::{LocalStorageEntry, OriginState, StateStore, StorageState, StoredCookie};
use thirtyfour::{ChromiumLikeCapabilities, Cookie, DesiredCapabilities, WebDriver};
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::error::{HarnessError, Result};

const DUMP_LOCAL_STORAGE_JS: &str = "\
	const out = {}; \
	for (let i = 0; i < window.localStorage.length; i++) { \
		const key = window.localStorage.key(i); \
		out[key] = window.localStorage.getItem(key); \
	} \
	return out;";

/// Active browser session used by page objects and fixtures.
pub struct BrowserSession {
	driver: WebDriver,
	config: SuiteConfig,
}

impl BrowserSession {
	/// Launches a fresh browsing context against the configured WebDriver
	/// endpoint.
	pub async fn launch(config: &SuiteConfig) -> Result<Self> {
		let mut caps = DesiredCapabilities::chrome();
		if config.headless {
			caps.add_arg("--headless=new")?;
		}
		caps.add_arg("--window-size=1280,1024")?;
		caps.add_arg("--disable-gpu")?;

		debug!(webdriver = %config.webdriver_url, headless = config.headless, "launching browser session");
		let driver = WebDriver::new(&config.webdriver_url, caps)
			.await
			.map_err(|e| HarnessError::Session(format!("webdriver connect failed: {e}")))?;

		driver.set_page_load_timeout(config.waits.navigation).await?;
		driver.set_script_timeout(config.waits.action).await?;

		Ok(Self { driver, config: config.clone() })
	}

	/// Handle for page-object construction. `WebDriver` is a cheap clone of
	/// the underlying session handle.
	pub fn driver(&self) -> &WebDriver {
		&self.driver
	}

	pub fn config(&self) -> &SuiteConfig {
		&self.config
	}

	/// Seeds cookies and local storage into the live context.
	///
	/// The browser must be on the target origin before either store can be
	/// written, so this navigates to the base URL first and reloads after.
	pub async fn apply_storage_state(&self, state: &StorageState) -> Result<()> {
		let base = self.config.base_url.as_str().to_string();
		self.driver.goto(&base).await.map_err(|e| HarnessError::Navigation {
			url: base.clone(),
			source: e,
		})?;

		// Expiry is not replayed; restored cookies live for the session,
		// which is all a test run needs.
		for stored in &state.cookies {
			let mut cookie = Cookie::new(stored.name.clone(), stored.value.clone());
			if let Some(path) = &stored.path {
				cookie.set_path(path.clone());
			}
			if let Some(domain) = &stored.domain {
				cookie.set_domain(domain.clone());
			}
			if let Some(secure) = stored.secure {
				cookie.set_secure(secure);
			}
			self.driver.add_cookie(cookie).await?;
		}

		let origin = self.config.base_url.origin().ascii_serialization();
		if let Some(entries) = state.local_storage_for(&origin) {
			for entry in entries {
				self.driver
					.execute(
						"window.localStorage.setItem(arguments[0], arguments[1]);",
						vec![json!(entry.name), json!(entry.value)],
					)
					.await?;
			}
		}

		self.driver.refresh().await?;
		info!(cookies = state.cookies.len(), "storage state applied");
		Ok(())
	}

	/// Captures the current cookies and local storage for later reuse.
	pub async fn capture_storage_state(&self) -> Result<StorageState> {
		let cookies = self
			.driver
			.get_all_cookies()
			.await?
			.into_iter()
			.map(|c| StoredCookie {
				name: c.name,
				value: c.value,
				domain: c.domain,
				path: c.path,
				expires: c.expiry.map(|e| e as f64),
				secure: c.secure,
				// thirtyfour's Cookie does not expose the httpOnly flag.
				http_only: None,
			})
			.collect();

		let ret = self.driver.execute(DUMP_LOCAL_STORAGE_JS, vec![]).await?;
		let local_storage = match ret.json() {
			serde_json::Value::Object(map) => map
				.iter()
				.map(|(name, value)| LocalStorageEntry {
					name: name.clone(),
					value: value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string()),
				})
				.collect(),
			_ => Vec::new(),
		};

		let origin = self.config.base_url.origin().ascii_serialization();
		Ok(StorageState {
			cookies,
			origins: vec![OriginState { origin, local_storage }],
		})
	}

	/// Ends the session and releases the browser.
	pub async fn close(self) -> Result<()> {
		self.driver.quit().await?;
		Ok(())
	}
}
