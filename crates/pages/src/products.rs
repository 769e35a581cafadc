//! Product listing screen.

use storefront_harness::error::{HarnessError, Result};
use thirtyfour::By;
use tracing::{debug, info, warn};

use crate::base::{Navigator, clean_amount_label, exact_name_match};

const PAGE_TITLE: &str = "span[data-test='title']";
const ITEM_ROW: &str = ".inventory_item";
const ITEM_NAME: &str = "[data-test='inventory-item-name']";
const ITEM_PRICE: &str = ".inventory_item_price";
const ADD_TO_CART_BUTTON: &str = "button[id^='add-to-cart']";
const BACK_TO_PRODUCTS: &str = "#back-to-products";
const CART_LINK: &str = ".shopping_cart_link";
const CART_BADGE: &str = ".shopping_cart_badge";

pub struct ProductPage {
	nav: Navigator,
}

impl ProductPage {
	pub fn new(nav: Navigator) -> Self {
		Self { nav }
	}

	pub fn nav(&self) -> &Navigator {
		&self.nav
	}

	/// Asserts the listing title is present and visible.
	pub async fn verify_on_product_page(&self) -> Result<()> {
		let title = self.nav.wait_until_visible(PAGE_TITLE).await?;
		let text = title.text().await?;
		if text != "Products" {
			return Err(HarnessError::assertion("listing title", "Products", text));
		}
		Ok(())
	}

	/// Opens the detail view of the product whose label equals `name`.
	///
	/// Returns false without failing when no label matches: unmatched
	/// names add nothing.
	async fn open_product_by_name(&self, name: &str) -> Result<bool> {
		for link in self.nav.driver().find_all(By::Css(ITEM_NAME)).await? {
			if exact_name_match(&link.text().await?, name) {
				link.click().await?;
				return Ok(true);
			}
		}
		warn!(name, "no product label matched; nothing added");
		Ok(false)
	}

	/// Adds one product via its detail view, then returns to the listing.
	///
	/// Silent no-op when the name matches nothing. A product already in
	/// the cart shows a remove control instead of an add control, so
	/// adding the same name twice also leaves the cart with one row.
	pub async fn add_one_item_to_cart(&self, name: &str) -> Result<()> {
		if !self.open_product_by_name(name).await? {
			return Ok(());
		}
		let add_buttons = self.nav.driver().find_all(By::Css(ADD_TO_CART_BUTTON)).await?;
		match add_buttons.first() {
			Some(button) => {
				button.click().await?;
				info!(name, "added to cart");
			}
			None => debug!(name, "already in cart; nothing to add"),
		}
		self.nav.click_element(BACK_TO_PRODUCTS).await?;
		Ok(())
	}

	pub async fn add_multiple_items_to_cart(&self, names: &[&str]) -> Result<()> {
		for name in names {
			self.add_one_item_to_cart(name).await?;
		}
		Ok(())
	}

	pub async fn add_all_items_to_cart(&self, names: &[&str]) -> Result<()> {
		self.add_multiple_items_to_cart(names).await
	}

	/// Asserts the listing shows exactly `expected` items. Mismatch fails
	/// the test; there is no recovery.
	pub async fn verify_all_products_displayed(&self, expected: usize) -> Result<()> {
		let actual = self.nav.count_elements(ITEM_ROW).await?;
		if actual != expected {
			return Err(HarnessError::assertion("listing item count", expected, actual));
		}
		Ok(())
	}

	pub async fn item_count(&self) -> Result<usize> {
		self.nav.count_elements(ITEM_ROW).await
	}

	/// All product labels currently rendered, in listing order.
	pub async fn listed_names(&self) -> Result<Vec<String>> {
		self.nav.element_texts(ITEM_NAME).await
	}

	/// Price shown on the listing for `name`; 0.0 when no row matches.
	pub async fn listed_price_of(&self, name: &str) -> Result<f64> {
		for row in self.nav.driver().find_all(By::Css(ITEM_ROW)).await? {
			let Ok(label) = row.find(By::Css(ITEM_NAME)).await else {
				continue;
			};
			if exact_name_match(&label.text().await?, name) {
				let price = row.find(By::Css(ITEM_PRICE)).await?;
				return Ok(clean_amount_label(&price.text().await?));
			}
		}
		Ok(0.0)
	}

	/// Cart badge count; `None` while the cart is empty and the badge is
	/// not rendered.
	pub async fn cart_badge_count(&self) -> Result<Option<usize>> {
		let badges = self.nav.driver().find_all(By::Css(CART_BADGE)).await?;
		match badges.first() {
			Some(badge) => Ok(badge.text().await?.trim().parse().ok()),
			None => Ok(None),
		}
	}

	pub async fn go_to_cart_page(&self) -> Result<()> {
		self.nav.click_element(CART_LINK).await?;
		self.nav.wait_for_url_contains("/cart.html").await
	}
}
