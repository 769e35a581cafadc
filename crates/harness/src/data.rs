//! Static test-data table and dynamic data generators.
//!
//! The table is embedded at compile time and read-only for the whole run.
//! Generators are time-seeded and keep no state.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const TABLE: &str = include_str!("test_data.json");

/// `{username, password}` pair. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

/// `{name, price}`, identified by exact display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
	pub name: String,
	pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Users {
	pub valid_user: Credentials,
	pub locked_out_user: Credentials,
	pub problem_user: Credentials,
	pub performance_glitch_user: Credentials,
	pub invalid_user: Credentials,
}

/// The full data table: `users`, `credentials`, `edgeCases`,
/// `errorMessages`, `products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
	pub users: Users,
	credentials: HashMap<String, Credentials>,
	edge_cases: HashMap<String, Credentials>,
	error_messages: HashMap<String, String>,
	products: Vec<Product>,
}

impl TestData {
	/// Shared table, parsed once per process.
	pub fn get() -> &'static TestData {
		static DATA: OnceLock<TestData> = OnceLock::new();
		DATA.get_or_init(|| {
			serde_json::from_str(TABLE).expect("embedded test_data.json is well-formed")
		})
	}

	/// Parses a table from external JSON, for overridden data sets.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn valid_user(&self) -> &Credentials {
		&self.users.valid_user
	}

	pub fn locked_out_user(&self) -> &Credentials {
		&self.users.locked_out_user
	}

	/// Scenario credentials by key, e.g. `wrongPassword`, `emptyUsername`.
	pub fn credentials(&self, key: &str) -> Option<&Credentials> {
		self.credentials.get(key)
	}

	/// Edge-case credentials by key, e.g. `sqlInjection`, `unicode`.
	pub fn edge_case(&self, key: &str) -> Option<&Credentials> {
		self.edge_cases.get(key)
	}

	pub fn error_message(&self, key: &str) -> Option<&str> {
		self.error_messages.get(key).map(String::as_str)
	}

	pub fn products(&self) -> &[Product] {
		&self.products
	}

	pub fn product_named(&self, name: &str) -> Option<&Product> {
		self.products.iter().find(|p| p.name == name)
	}

	/// Time-seeded pick from the product table.
	pub fn random_product(&self) -> &Product {
		let index = nanos() as usize % self.products.len();
		&self.products[index]
	}
}

/// A string of `len` repeated `a`s, for over-length input checks.
pub fn long_string(len: usize) -> String {
	"a".repeat(len)
}

/// Unique-enough email for registration-style inputs.
pub fn random_email() -> String {
	format!("test{}@example.com", nanos())
}

/// Unique-enough username.
pub fn random_username() -> String {
	format!("user{}", nanos())
}

fn nanos() -> u128 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default()
		.as_nanos()
}
