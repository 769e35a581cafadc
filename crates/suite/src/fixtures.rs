//! Test fixtures: one browser session plus wired page objects.
//!
//! `launch_authenticated` reuses a persisted storage state so repeated
//! runs skip the login UI entirely; the first run logs in once and writes
//! the state file. Bootstrap failure is fatal for the whole run.

use storefront_harness::api::ApiClient;
use storefront_harness::config::SuiteConfig;
use storefront_harness::error::Result;
use storefront_harness::session::{BrowserSession, StateStore};
use storefront_pages::{CartPage, CheckoutPage, LoginPage, Navigator, ProductPage};
use tracing::{error, info};

/// Everything one spec needs: session, page objects, API client.
///
/// Created fresh per test and discarded at test end; nothing is shared
/// across parallel tests except the read-only data table and the
/// persisted state file.
pub struct Fixtures {
	config: SuiteConfig,
	session: BrowserSession,
	pub login_page: LoginPage,
	pub product_page: ProductPage,
	pub cart_page: CartPage,
	pub checkout_page: CheckoutPage,
}

impl Fixtures {
	/// Fresh unauthenticated session, configuration from the environment.
	pub async fn launch() -> Result<Self> {
		Self::launch_with(SuiteConfig::from_env()?).await
	}

	/// Fresh unauthenticated session with explicit configuration.
	pub async fn launch_with(config: SuiteConfig) -> Result<Self> {
		let session = BrowserSession::launch(&config).await?;
		let nav = Navigator::new(session.driver().clone(), config.clone());
		Ok(Self {
			login_page: LoginPage::new(nav.clone()),
			product_page: ProductPage::new(nav.clone()),
			cart_page: CartPage::new(nav.clone()),
			checkout_page: CheckoutPage::new(nav),
			config,
			session,
		})
	}

	/// Authenticated session, configuration from the environment.
	pub async fn launch_authenticated() -> Result<Self> {
		Self::launch_authenticated_with(SuiteConfig::from_env()?).await
	}

	/// Authenticated session: reuse the persisted storage state when the
	/// file exists, otherwise drive the login UI once and persist it.
	pub async fn launch_authenticated_with(config: SuiteConfig) -> Result<Self> {
		match Self::bootstrap_authenticated(config).await {
			Ok(fixtures) => Ok(fixtures),
			Err(err) => {
				error!(error = %err, "session bootstrap failed; no tests can proceed");
				Err(err)
			}
		}
	}

	async fn bootstrap_authenticated(config: SuiteConfig) -> Result<Self> {
		let store = StateStore::new(&config.storage_state_path);
		let fixtures = Self::launch_with(config).await?;

		if let Some(state) = store.load()? {
			info!(path = %store.path().display(), "reusing persisted session state");
			fixtures.session.apply_storage_state(&state).await?;
			fixtures.product_page.nav().navigate_to("/inventory.html").await?;
			fixtures.product_page.verify_on_product_page().await?;
		} else {
			fixtures.login_fresh().await?;
			let state = fixtures.session.capture_storage_state().await?;
			if store.save_if_absent(&state)? {
				info!(path = %store.path().display(), "persisted session state for reuse");
			}
		}

		Ok(fixtures)
	}

	/// Drives the login UI with the configured baseline credentials.
	pub async fn login_fresh(&self) -> Result<()> {
		self.login_page.navigate_to_login().await?;
		self.login_page.login(&self.config.username, &self.config.password).await?;
		self.login_page.verify_login_success().await
	}

	/// API request client configured with the suite's base address and
	/// API key header.
	pub fn api_client(&self) -> Result<ApiClient> {
		ApiClient::new(&self.config)
	}

	pub fn config(&self) -> &SuiteConfig {
		&self.config
	}

	pub fn session(&self) -> &BrowserSession {
		&self.session
	}

	/// Ends the session and releases the browser.
	pub async fn close(self) -> Result<()> {
		self.session.close().await
	}
}
