//! Login screen.
//!
//! State machine: `Unauthenticated -> (valid submit) -> Authenticated`;
//! invalid submits stay unauthenticated with an error banner. `login`
//! itself takes no verdict; callers pick a verify helper.

use storefront_harness::error::{HarnessError, Result};
use tracing::info;

use crate::base::Navigator;

const USERNAME_INPUT: &str = "#user-name";
const PASSWORD_INPUT: &str = "#password";
const LOGIN_BUTTON: &str = "#login-button";
const ERROR_MESSAGE: &str = "h3[data-test='error']";

/// Route reached after successful authentication.
pub const INVENTORY_ROUTE: &str = "/inventory.html";

pub struct LoginPage {
	nav: Navigator,
}

impl LoginPage {
	pub fn new(nav: Navigator) -> Self {
		Self { nav }
	}

	pub fn nav(&self) -> &Navigator {
		&self.nav
	}

	/// Goes to the root path and waits for the form to settle.
	pub async fn navigate_to_login(&self) -> Result<()> {
		self.nav.navigate_to("/").await?;
		self.nav.wait_for_page_load().await
	}

	/// Fills both fields and submits. Success or failure is the caller's
	/// call via the verify helpers.
	pub async fn login(&self, username: &str, password: &str) -> Result<()> {
		info!(username, "submitting login form");
		self.nav.enter_text(USERNAME_INPUT, username).await?;
		self.nav.enter_text(PASSWORD_INPUT, password).await?;
		self.nav.click_element(LOGIN_BUTTON).await
	}

	/// Blocks until the application lands on the authenticated inventory
	/// route; times out if the transition never happens.
	pub async fn verify_login_success(&self) -> Result<()> {
		self.nav.wait_for_url_contains(INVENTORY_ROUTE).await
	}

	/// Asserts the error banner is shown and the page stayed on the login
	/// route.
	pub async fn verify_login_failure(&self) -> Result<()> {
		self.nav.wait_until_visible(ERROR_MESSAGE).await?;
		let url = self.nav.current_url().await?;
		if url.contains(INVENTORY_ROUTE) {
			return Err(HarnessError::assertion("login failure route", "login page", url));
		}
		Ok(())
	}

	/// Rendered text of the error banner.
	pub async fn error_message_text(&self) -> Result<String> {
		self.nav.element_text(ERROR_MESSAGE).await
	}

	/// Asserts the banner shows exactly `expected`.
	pub async fn verify_error_message(&self, expected: &str) -> Result<()> {
		self.nav.wait_until_visible(ERROR_MESSAGE).await?;
		let actual = self.error_message_text().await?;
		if actual != expected {
			return Err(HarnessError::assertion("login error message", expected, actual));
		}
		Ok(())
	}

	pub async fn is_error_visible(&self) -> Result<bool> {
		self.nav.is_element_visible(ERROR_MESSAGE).await
	}
}
