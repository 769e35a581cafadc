//! Page Object Model for the storefront under test.
//!
//! Each application screen is wrapped in a struct exposing locators and
//! semantic actions. Pages do not inherit from a base page; they share a
//! [`Navigator`] interaction capability by composition.

pub mod base;
pub mod cart;
pub mod checkout;
pub mod login;
pub mod products;

pub use base::{Navigator, clean_amount_label};
pub use cart::CartPage;
pub use checkout::{CheckoutForm, CheckoutPage};
pub use login::LoginPage;
pub use products::ProductPage;
