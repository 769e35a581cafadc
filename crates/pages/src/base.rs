//! Shared interaction capability injected into every page object.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use storefront_harness::config::SuiteConfig;
use storefront_harness::error::{HarnessError, Result};
use thirtyfour::{By, WebDriver, WebElement};
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Extracts a decimal amount from a currency-formatted label.
///
/// Strips everything that is not a digit or a dot and parses the rest,
/// returning 0.0 for empty or unparseable input. Single normalization
/// point for every price display; assumes `.` as decimal separator.
pub fn clean_amount_label(text: &str) -> f64 {
	let cleaned: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
	cleaned.parse().unwrap_or(0.0)
}

/// Whole-label name matching: trims rendered whitespace, never partial.
pub fn exact_name_match(label: &str, name: &str) -> bool {
	label.trim() == name
}

/// Navigation and element-interaction capability shared by all page
/// objects. Cheap to clone; clones share one browser session.
#[derive(Clone)]
pub struct Navigator {
	driver: WebDriver,
	config: SuiteConfig,
}

impl Navigator {
	pub fn new(driver: WebDriver, config: SuiteConfig) -> Self {
		Self { driver, config }
	}

	pub fn driver(&self) -> &WebDriver {
		&self.driver
	}

	pub fn config(&self) -> &SuiteConfig {
		&self.config
	}

	/// Resolves `path` against the configured base address and navigates.
	pub async fn navigate_to(&self, path: &str) -> Result<()> {
		let url = self.config.url_for(path)?;
		debug!(%url, "navigate");
		self.driver
			.goto(&url)
			.await
			.map_err(|e| HarnessError::Navigation { url, source: e })
	}

	/// Suspends until the document reports itself complete.
	pub async fn wait_for_page_load(&self) -> Result<()> {
		let budget = self.config.waits.navigation;
		let deadline = Instant::now() + budget;
		loop {
			let ret = self.driver.execute("return document.readyState;", vec![]).await?;
			if ret.json().as_str() == Some("complete") {
				return Ok(());
			}
			if Instant::now() >= deadline {
				return Err(HarnessError::Timeout {
					ms: budget.as_millis() as u64,
					condition: "document.readyState == complete".into(),
				});
			}
			sleep(self.config.waits.poll).await;
		}
	}

	pub async fn title(&self) -> Result<String> {
		Ok(self.driver.title().await?)
	}

	pub async fn current_url(&self) -> Result<String> {
		Ok(self.driver.current_url().await?.to_string())
	}

	/// Finds one element, polling within `budget`.
	async fn find_within(&self, selector: &str, budget: Duration) -> Result<WebElement> {
		let deadline = Instant::now() + budget;
		loop {
			if let Ok(element) = self.driver.find(By::Css(selector)).await {
				return Ok(element);
			}
			if Instant::now() >= deadline {
				return Err(HarnessError::ElementNotFound { selector: selector.to_string() });
			}
			sleep(self.config.waits.poll).await;
		}
	}

	/// Finds one element within the action budget.
	pub async fn wait_for_element(&self, selector: &str) -> Result<WebElement> {
		self.find_within(selector, self.config.waits.action).await
	}

	/// Blocks until `selector` is present and displayed, within the
	/// assertion budget.
	pub async fn wait_until_visible(&self, selector: &str) -> Result<WebElement> {
		let budget = self.config.waits.assertion;
		let deadline = Instant::now() + budget;
		loop {
			if let Ok(element) = self.driver.find(By::Css(selector)).await {
				if element.is_displayed().await.unwrap_or(false) {
					return Ok(element);
				}
			}
			if Instant::now() >= deadline {
				return Err(HarnessError::Timeout {
					ms: budget.as_millis() as u64,
					condition: format!("{selector} visible"),
				});
			}
			sleep(self.config.waits.poll).await;
		}
	}

	/// Blocks until the current URL contains `fragment`, within the
	/// navigation budget.
	pub async fn wait_for_url_contains(&self, fragment: &str) -> Result<()> {
		let budget = self.config.waits.navigation;
		let deadline = Instant::now() + budget;
		loop {
			let url = self.current_url().await?;
			if url.contains(fragment) {
				return Ok(());
			}
			if Instant::now() >= deadline {
				return Err(HarnessError::Timeout {
					ms: budget.as_millis() as u64,
					condition: format!("url contains {fragment} (currently {url})"),
				});
			}
			sleep(self.config.waits.poll).await;
		}
	}

	pub async fn click_element(&self, selector: &str) -> Result<()> {
		let element = self.wait_for_element(selector).await?;
		element.click().await?;
		Ok(())
	}

	/// Clears the field and types `text`.
	pub async fn enter_text(&self, selector: &str, text: &str) -> Result<()> {
		let element = self.wait_for_element(selector).await?;
		element.clear().await?;
		element.send_keys(text).await?;
		Ok(())
	}

	/// Immediate visibility read; absent elements are simply not visible.
	pub async fn is_element_visible(&self, selector: &str) -> Result<bool> {
		let elements = self.driver.find_all(By::Css(selector)).await?;
		match elements.first() {
			Some(element) => Ok(element.is_displayed().await?),
			None => Ok(false),
		}
	}

	pub async fn element_text(&self, selector: &str) -> Result<String> {
		let element = self.wait_for_element(selector).await?;
		Ok(element.text().await?)
	}

	/// Rendered text of every match, in DOM order. Empty when none match.
	pub async fn element_texts(&self, selector: &str) -> Result<Vec<String>> {
		let mut texts = Vec::new();
		for element in self.driver.find_all(By::Css(selector)).await? {
			texts.push(element.text().await?);
		}
		Ok(texts)
	}

	pub async fn count_elements(&self, selector: &str) -> Result<usize> {
		Ok(self.driver.find_all(By::Css(selector)).await?.len())
	}

	/// Captures a timestamped PNG under the configured screenshots
	/// directory. Side effect only.
	pub async fn take_screenshot(&self, name: &str) -> Result<PathBuf> {
		let dir = &self.config.screenshots_dir;
		std::fs::create_dir_all(dir)
			.map_err(|e| HarnessError::Screenshot { path: dir.clone(), source: e })?;

		let stamp = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.unwrap_or_default()
			.as_millis();
		let path = dir.join(format!("{name}-{stamp}.png"));
		self.driver.screenshot(&path).await?;
		debug!(path = %path.display(), "screenshot captured");
		Ok(path)
	}

	pub async fn scroll_to_top(&self) -> Result<()> {
		self.driver.execute("window.scrollTo(0, 0);", vec![]).await?;
		Ok(())
	}
}
