//! Cart screen.
//!
//! Line items are derived from the live DOM; a row's identity is its
//! product name text. Exact-name lookups that match nothing are defined
//! no-ops or empty results, never errors.

use storefront_harness::error::{HarnessError, Result};
use thirtyfour::{By, WebElement};
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::base::{Navigator, clean_amount_label, exact_name_match};

const PAGE_TITLE: &str = "span[data-test='title']";
const ITEM_ROW: &str = ".cart_item";
const ITEM_NAME: &str = ".inventory_item_name";
const ITEM_PRICE: &str = ".inventory_item_price";
const ROW_REMOVE_BUTTON: &str = "button[id^='remove']";
const CHECKOUT_BUTTON: &str = "#checkout";
const CONTINUE_SHOPPING_BUTTON: &str = "#continue-shopping";

pub struct CartPage {
	nav: Navigator,
}

impl CartPage {
	pub fn new(nav: Navigator) -> Self {
		Self { nav }
	}

	pub fn nav(&self) -> &Navigator {
		&self.nav
	}

	/// Asserts the cart route and its "Your Cart" title.
	pub async fn verify_on_cart_page(&self) -> Result<()> {
		self.nav.wait_for_url_contains("/cart.html").await?;
		let title = self.nav.wait_until_visible(PAGE_TITLE).await?;
		let text = title.text().await?;
		if text != "Your Cart" {
			return Err(HarnessError::assertion("cart title", "Your Cart", text));
		}
		Ok(())
	}

	/// Pure read of the current row count.
	pub async fn item_count_in_cart(&self) -> Result<usize> {
		self.nav.count_elements(ITEM_ROW).await
	}

	/// The row whose name label equals `name`, if any. Exact match only.
	async fn find_row_by_name(&self, name: &str) -> Result<Option<WebElement>> {
		for row in self.nav.driver().find_all(By::Css(ITEM_ROW)).await? {
			let Ok(label) = row.find(By::Css(ITEM_NAME)).await else {
				continue;
			};
			if exact_name_match(&label.text().await?, name) {
				return Ok(Some(row));
			}
		}
		Ok(None)
	}

	/// Exact-name membership; partial names are false.
	pub async fn is_item_in_cart(&self, name: &str) -> Result<bool> {
		Ok(self.find_row_by_name(name).await?.is_some())
	}

	/// Clicks the remove control of the matching row. With no matching
	/// row this is a silent no-op and the count stays unchanged.
	pub async fn remove_item_from_cart_by_name(&self, name: &str) -> Result<()> {
		match self.find_row_by_name(name).await? {
			Some(row) => {
				row.find(By::Css(ROW_REMOVE_BUTTON)).await?.click().await?;
				info!(name, "removed from cart");
				Ok(())
			}
			None => {
				debug!(name, "no cart row matched; leaving cart unchanged");
				Ok(())
			}
		}
	}

	/// Price of the matching row, 0.0 when no row matches or the label is
	/// empty.
	pub async fn item_price_by_name(&self, name: &str) -> Result<f64> {
		match self.find_row_by_name(name).await? {
			Some(row) => match row.find(By::Css(ITEM_PRICE)).await {
				Ok(price) => Ok(clean_amount_label(&price.text().await?)),
				Err(_) => Ok(0.0),
			},
			None => Ok(0.0),
		}
	}

	/// Removes rows until none remain, bounded by the initial count so
	/// shifting row order cannot loop forever. Idempotent on an already
	/// empty cart.
	pub async fn clear_cart(&self) -> Result<()> {
		let initial = self.item_count_in_cart().await?;
		for _ in 0..initial {
			let buttons = self.nav.driver().find_all(By::Css(ROW_REMOVE_BUTTON)).await?;
			match buttons.first() {
				Some(button) => button.click().await?,
				None => break,
			}
		}
		Ok(())
	}

	/// Asserts the row count settles at exactly 0.
	pub async fn verify_cart_is_empty(&self) -> Result<()> {
		let budget = self.nav.config().waits.assertion;
		let deadline = Instant::now() + budget;
		loop {
			let count = self.item_count_in_cart().await?;
			if count == 0 {
				return Ok(());
			}
			if Instant::now() >= deadline {
				return Err(HarnessError::assertion("cart row count", 0, count));
			}
			sleep(self.nav.config().waits.poll).await;
		}
	}

	/// Clicks checkout and asserts arrival at the first checkout step.
	pub async fn proceed_to_checkout(&self) -> Result<()> {
		self.nav.click_element(CHECKOUT_BUTTON).await?;
		self.nav.wait_for_url_contains("/checkout-step-one.html").await
	}

	/// Continue Shopping control, back to the listing.
	pub async fn return_to_products(&self) -> Result<()> {
		self.nav.click_element(CONTINUE_SHOPPING_BUTTON).await?;
		self.nav.wait_for_url_contains("/inventory.html").await
	}

	pub async fn take_cart_screenshot(&self, name: &str) -> Result<()> {
		self.nav.take_screenshot(name).await?;
		Ok(())
	}
}
