use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
	#[error("configuration error: {0}")]
	Config(String),

	#[error("browser session failed: {0}")]
	Session(String),

	#[error("navigation failed: {url}")]
	Navigation {
		url: String,
		#[source]
		source: thirtyfour::error::WebDriverError,
	},

	#[error("element not found: {selector}")]
	ElementNotFound { selector: String },

	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error("{check}: expected {expected}, got {actual}")]
	Assertion {
		check: &'static str,
		expected: String,
		actual: String,
	},

	#[error("api request failed: {0}")]
	Api(String),

	#[error("screenshot failed: {path}")]
	Screenshot {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	WebDriver(#[from] thirtyfour::error::WebDriverError),

	#[error(transparent)]
	Http(#[from] reqwest::Error),
}

impl HarnessError {
	/// Builds an assertion failure with rendered expected/actual values.
	pub fn assertion(check: &'static str, expected: impl ToString, actual: impl ToString) -> Self {
		HarnessError::Assertion {
			check,
			expected: expected.to_string(),
			actual: actual.to_string(),
		}
	}

	/// True for failures that abort the current test without retry
	/// (element lookup and wait-budget exhaustion).
	pub fn is_wait_failure(&self) -> bool {
		matches!(self, HarnessError::ElementNotFound { .. } | HarnessError::Timeout { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn assertion_renders_expected_and_actual() {
		let err = HarnessError::assertion("cart count", 1, 3);
		assert_eq!(err.to_string(), "cart count: expected 1, got 3");
	}

	#[test]
	fn wait_failures_are_classified() {
		let not_found = HarnessError::ElementNotFound { selector: ".cart_item".into() };
		let timeout = HarnessError::Timeout { ms: 10_000, condition: "url contains /cart.html".into() };
		let config = HarnessError::Config("BASE_URL unset".into());

		assert!(not_found.is_wait_failure());
		assert!(timeout.is_wait_failure());
		assert!(!config.is_wait_failure());
	}
}
