//! Checkout scenarios: form validation, order summary math, and order
//! completion.

use anyhow::Result;
use storefront_harness::TestData;
use storefront_pages::CheckoutForm;
use storefront_suite::Fixtures;

const BACKPACK: &str = "Sauce Labs Backpack";
const ONESIE: &str = "Sauce Labs Onesie";

async fn signed_in() -> Result<Fixtures> {
	let fixtures = Fixtures::launch().await?;
	let user = TestData::get().valid_user();
	fixtures.login_page.navigate_to_login().await?;
	fixtures.login_page.login(&user.username, &user.password).await?;
	fixtures.login_page.verify_login_success().await?;
	Ok(fixtures)
}

/// Lands on the information step with `names` in the cart.
async fn at_step_one(names: &[&str]) -> Result<Fixtures> {
	let fixtures = signed_in().await?;
	fixtures.product_page.add_multiple_items_to_cart(names).await?;
	fixtures.product_page.go_to_cart_page().await?;
	fixtures.cart_page.proceed_to_checkout().await?;
	fixtures.checkout_page.verify_on_step_one().await?;
	Ok(fixtures)
}

fn valid_form() -> CheckoutForm {
	CheckoutForm::new("Jane", "Doe", "94105")
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn complete_information_reaches_the_overview() -> Result<()> {
	let fixtures = at_step_one(&[BACKPACK]).await?;

	fixtures.checkout_page.fill_information(&valid_form()).await?;
	fixtures.checkout_page.click_continue().await?;
	fixtures.checkout_page.verify_on_step_two().await?;

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn missing_first_name_is_rejected() -> Result<()> {
	let fixtures = at_step_one(&[BACKPACK]).await?;
	let data = TestData::get();

	fixtures
		.checkout_page
		.fill_information(&CheckoutForm::new("", "Doe", "94105"))
		.await?;
	fixtures.checkout_page.click_continue().await?;
	fixtures
		.checkout_page
		.verify_validation_error(data.error_message("firstNameRequired").unwrap())
		.await?;

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn missing_last_name_is_rejected() -> Result<()> {
	let fixtures = at_step_one(&[BACKPACK]).await?;
	let data = TestData::get();

	fixtures
		.checkout_page
		.fill_information(&CheckoutForm::new("Jane", "", "94105"))
		.await?;
	fixtures.checkout_page.click_continue().await?;
	fixtures
		.checkout_page
		.verify_validation_error(data.error_message("lastNameRequired").unwrap())
		.await?;

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn missing_postal_code_is_rejected() -> Result<()> {
	let fixtures = at_step_one(&[BACKPACK]).await?;
	let data = TestData::get();

	fixtures
		.checkout_page
		.fill_information(&CheckoutForm::new("Jane", "Doe", ""))
		.await?;
	fixtures.checkout_page.click_continue().await?;
	fixtures
		.checkout_page
		.verify_validation_error(data.error_message("postalCodeRequired").unwrap())
		.await?;

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn overview_subtotal_matches_item_prices() -> Result<()> {
	let wanted = [BACKPACK, ONESIE];
	let fixtures = at_step_one(&wanted).await?;
	let data = TestData::get();

	fixtures.checkout_page.fill_information(&valid_form()).await?;
	fixtures.checkout_page.click_continue().await?;
	fixtures.checkout_page.verify_on_step_two().await?;

	let expected: f64 = wanted
		.iter()
		.map(|name| data.product_named(name).unwrap().price)
		.sum();
	let subtotal = fixtures.checkout_page.summary_subtotal().await?;
	assert!((subtotal - expected).abs() < 0.005, "subtotal {subtotal} != {expected}");

	let row_total = fixtures.checkout_page.item_total_from_rows().await?;
	assert!((row_total - subtotal).abs() < 0.005, "rows {row_total} != subtotal {subtotal}");

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn overview_total_is_subtotal_plus_tax() -> Result<()> {
	let fixtures = at_step_one(&[BACKPACK]).await?;

	fixtures.checkout_page.fill_information(&valid_form()).await?;
	fixtures.checkout_page.click_continue().await?;
	fixtures.checkout_page.verify_on_step_two().await?;

	let subtotal = fixtures.checkout_page.summary_subtotal().await?;
	let tax = fixtures.checkout_page.summary_tax().await?;
	let total = fixtures.checkout_page.summary_total().await?;
	assert!(tax > 0.0);
	assert!((subtotal + tax - total).abs() < 0.005, "{subtotal} + {tax} != {total}");

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn finishing_completes_the_order_and_empties_the_cart() -> Result<()> {
	let fixtures = at_step_one(&[BACKPACK]).await?;

	fixtures.checkout_page.fill_information(&valid_form()).await?;
	fixtures.checkout_page.click_continue().await?;
	fixtures.checkout_page.verify_on_step_two().await?;
	fixtures.checkout_page.click_finish().await?;
	fixtures.checkout_page.verify_order_complete().await?;

	fixtures.checkout_page.click_back_home().await?;
	fixtures.product_page.verify_on_product_page().await?;
	assert_eq!(fixtures.product_page.cart_badge_count().await?, None);

	fixtures.close().await?;
	Ok(())
}

#[tokio::test]
#[ignore = "requires chromedriver and a live storefront"]
async fn cancel_returns_to_the_cart_with_items_intact() -> Result<()> {
	let fixtures = at_step_one(&[BACKPACK]).await?;

	fixtures.checkout_page.click_cancel().await?;
	fixtures.cart_page.verify_on_cart_page().await?;
	assert!(fixtures.cart_page.is_item_in_cart(BACKPACK).await?);

	fixtures.close().await?;
	Ok(())
}
