//! Cart scenarios: contents, removal, pricing, and navigation out of
//! the cart.

use anyhow::Result;
use storefront_harness::TestData;
use storefront_suite::Fixtures;

const BACKPACK: &str = "Sauce Labs Backpack";
const BIKE_LIGHT: &str = "Sauce Labs Bike Light";
const FLEECE_JACKET: &str = "Sauce Labs Fleece Jacket";

async fn signed_in() -> Result<Fixtures> {
	let fixtures = Fixtures::launch().await?;
	let user = TestData::get().valid_user();
	fixtures.login_page.navigate_to_login().await?;
	fixtures.login_page.login(&user.username, &user.password).await?;
	fixtures.login_page.verify_login_success().await?;
	Ok(fixtures)
}

/// Signs in and puts `names` in the cart, landing on the cart page.
async fn with_cart(names: &[&str]) -> Result<Fixtures> {
	let fixtures = signed_in().await?;
	fixtures.product_page.add_multiple_items_to_cart(names).await?;
	fixtures.product_page.go_to_cart_page().await?;
	fixtures.cart_page.verify_on_cart_page().await?;
	Ok(fixtures)
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn empty_cart_shows_no_rows() -> Result<()> {
	let fixtures = signed_in().await?;

	fixtures.product_page.go_to_cart_page().await?;
	fixtures.cart_page.verify_on_cart_page().await?;
	assert_eq!(fixtures.cart_page.item_count_in_cart().await?, 0);

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn added_items_appear_as_cart_rows() -> Result<()> {
	let wanted = [BACKPACK, BIKE_LIGHT];
	let fixtures = with_cart(&wanted).await?;

	assert_eq!(fixtures.cart_page.item_count_in_cart().await?, wanted.len());
	for name in wanted {
		assert!(fixtures.cart_page.is_item_in_cart(name).await?, "missing row: {name}");
	}

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn cart_row_prices_match_the_data_table() -> Result<()> {
	let wanted = [BACKPACK, FLEECE_JACKET];
	let fixtures = with_cart(&wanted).await?;
	let data = TestData::get();

	for name in wanted {
		let expected = data.product_named(name).unwrap().price;
		let listed = fixtures.cart_page.item_price_by_name(name).await?;
		assert_eq!(listed, expected, "price mismatch for {name}");
	}

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn removing_one_item_leaves_the_rest() -> Result<()> {
	let fixtures = with_cart(&[BACKPACK, BIKE_LIGHT]).await?;

	fixtures.cart_page.remove_item_from_cart_by_name(BACKPACK).await?;
	assert!(!fixtures.cart_page.is_item_in_cart(BACKPACK).await?);
	assert!(fixtures.cart_page.is_item_in_cart(BIKE_LIGHT).await?);
	assert_eq!(fixtures.cart_page.item_count_in_cart().await?, 1);

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn removing_an_absent_name_changes_nothing() -> Result<()> {
	let fixtures = with_cart(&[BACKPACK]).await?;

	fixtures.cart_page.remove_item_from_cart_by_name("No Such Product").await?;
	assert_eq!(fixtures.cart_page.item_count_in_cart().await?, 1);

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn clearing_the_cart_empties_it() -> Result<()> {
	let fixtures = with_cart(&[BACKPACK, BIKE_LIGHT, FLEECE_JACKET]).await?;

	fixtures.cart_page.clear_cart().await?;
	fixtures.cart_page.verify_cart_is_empty().await?;

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn clearing_an_already_empty_cart_is_a_no_op() -> Result<()> {
	let fixtures = with_cart(&[BACKPACK]).await?;

	fixtures.cart_page.clear_cart().await?;
	fixtures.cart_page.verify_cart_is_empty().await?;

	// A second clear finds nothing to remove and leaves the count at 0.
	fixtures.cart_page.clear_cart().await?;
	assert_eq!(fixtures.cart_page.item_count_in_cart().await?, 0);

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn continue_shopping_returns_to_the_listing() -> Result<()> {
	let fixtures = with_cart(&[BACKPACK]).await?;

	fixtures.cart_page.return_to_products().await?;
	fixtures.product_page.verify_on_product_page().await?;
	// Cart contents survive the round trip.
	assert_eq!(fixtures.product_page.cart_badge_count().await?, Some(1));

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn checkout_leads_to_the_information_step() -> Result<()> {
	let fixtures = with_cart(&[BACKPACK]).await?;

	fixtures.cart_page.proceed_to_checkout().await?;
	fixtures.checkout_page.verify_on_step_one().await?;

	fixtures.close().await?;
	Ok(())
}
