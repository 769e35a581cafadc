//! Checkout flow: information step, overview step, completion.
//!
//! Three-state linear flow; each verify helper pins the flow to one step.

use storefront_harness::error::{HarnessError, Result};
use thirtyfour::By;
use tracing::info;

use crate::base::{Navigator, clean_amount_label};

const PAGE_TITLE: &str = "span[data-test='title']";
const FIRST_NAME_INPUT: &str = "#first-name";
const LAST_NAME_INPUT: &str = "#last-name";
const POSTAL_CODE_INPUT: &str = "#postal-code";
const CONTINUE_BUTTON: &str = "#continue";
const CANCEL_BUTTON: &str = "#cancel";
const FINISH_BUTTON: &str = "#finish";
const ERROR_MESSAGE: &str = "h3[data-test='error']";
const ITEM_PRICE: &str = ".inventory_item_price";
const SUMMARY_SUBTOTAL: &str = ".summary_subtotal_label";
const SUMMARY_TAX: &str = ".summary_tax_label";
const SUMMARY_TOTAL: &str = ".summary_total_label";
const COMPLETE_HEADER: &str = "[data-test='complete-header']";
const COMPLETE_TEXT: &str = "[data-test='complete-text']";
const BACK_HOME_BUTTON: &str = "#back-to-products";

pub const STEP_ONE_ROUTE: &str = "/checkout-step-one.html";
pub const STEP_TWO_ROUTE: &str = "/checkout-step-two.html";
pub const COMPLETE_ROUTE: &str = "/checkout-complete.html";

/// Transient checkout form input; not persisted beyond the flow.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
	pub first_name: String,
	pub last_name: String,
	pub postal_code: String,
}

impl CheckoutForm {
	pub fn new(first: impl Into<String>, last: impl Into<String>, postal: impl Into<String>) -> Self {
		Self {
			first_name: first.into(),
			last_name: last.into(),
			postal_code: postal.into(),
		}
	}
}

pub struct CheckoutPage {
	nav: Navigator,
}

impl CheckoutPage {
	pub fn new(nav: Navigator) -> Self {
		Self { nav }
	}

	pub fn nav(&self) -> &Navigator {
		&self.nav
	}

	async fn verify_step(&self, route: &str, expected_title: &str) -> Result<()> {
		self.nav.wait_for_url_contains(route).await?;
		let title = self.nav.wait_until_visible(PAGE_TITLE).await?;
		let text = title.text().await?;
		if text != expected_title {
			return Err(HarnessError::assertion("checkout step title", expected_title, text));
		}
		Ok(())
	}

	pub async fn verify_on_step_one(&self) -> Result<()> {
		self.verify_step(STEP_ONE_ROUTE, "Checkout: Your Information").await
	}

	pub async fn verify_on_step_two(&self) -> Result<()> {
		self.verify_step(STEP_TWO_ROUTE, "Checkout: Overview").await
	}

	pub async fn verify_on_complete(&self) -> Result<()> {
		self.verify_step(COMPLETE_ROUTE, "Checkout: Complete!").await
	}

	/// Fills the information step. Advancing is a separate click so specs
	/// can exercise partial forms.
	pub async fn fill_information(&self, form: &CheckoutForm) -> Result<()> {
		self.nav.enter_text(FIRST_NAME_INPUT, &form.first_name).await?;
		self.nav.enter_text(LAST_NAME_INPUT, &form.last_name).await?;
		self.nav.enter_text(POSTAL_CODE_INPUT, &form.postal_code).await
	}

	/// StepOne -> StepTwo.
	pub async fn click_continue(&self) -> Result<()> {
		self.nav.click_element(CONTINUE_BUTTON).await
	}

	/// Asserts a specific validation message while the flow stays at
	/// StepOne.
	pub async fn verify_validation_error(&self, expected: &str) -> Result<()> {
		self.nav.wait_until_visible(ERROR_MESSAGE).await?;
		let actual = self.nav.element_text(ERROR_MESSAGE).await?;
		if !actual.contains(expected) {
			return Err(HarnessError::assertion("checkout validation message", expected, actual));
		}
		let url = self.nav.current_url().await?;
		if !url.contains(STEP_ONE_ROUTE) {
			return Err(HarnessError::assertion("checkout step after validation error", STEP_ONE_ROUTE, url));
		}
		Ok(())
	}

	pub async fn summary_subtotal(&self) -> Result<f64> {
		Ok(clean_amount_label(&self.nav.element_text(SUMMARY_SUBTOTAL).await?))
	}

	pub async fn summary_tax(&self) -> Result<f64> {
		Ok(clean_amount_label(&self.nav.element_text(SUMMARY_TAX).await?))
	}

	pub async fn summary_total(&self) -> Result<f64> {
		Ok(clean_amount_label(&self.nav.element_text(SUMMARY_TOTAL).await?))
	}

	/// Recomputes the subtotal from the individual overview rows, so specs
	/// can cross-check the displayed subtotal arithmetically instead of
	/// trusting the UI.
	pub async fn item_total_from_rows(&self) -> Result<f64> {
		let mut total = 0.0;
		for price in self.nav.driver().find_all(By::Css(ITEM_PRICE)).await? {
			total += clean_amount_label(&price.text().await?);
		}
		Ok(total)
	}

	/// StepTwo -> Complete.
	pub async fn click_finish(&self) -> Result<()> {
		self.nav.click_element(FINISH_BUTTON).await
	}

	/// Asserts the completion banner, message, and back-home control.
	pub async fn verify_order_complete(&self) -> Result<()> {
		self.verify_on_complete().await?;
		let header = self.nav.wait_until_visible(COMPLETE_HEADER).await?;
		let text = header.text().await?;
		if text != "Thank you for your order!" {
			return Err(HarnessError::assertion("completion banner", "Thank you for your order!", text));
		}
		self.nav.wait_until_visible(COMPLETE_TEXT).await?;
		self.nav.wait_until_visible(BACK_HOME_BUTTON).await?;
		info!("order completed");
		Ok(())
	}

	/// Abandons the flow back to the prior page.
	pub async fn click_cancel(&self) -> Result<()> {
		self.nav.click_element(CANCEL_BUTTON).await
	}

	/// Complete -> landing page.
	pub async fn click_back_home(&self) -> Result<()> {
		self.nav.click_element(BACK_HOME_BUTTON).await
	}
}
