//! API request client and programmatic auth-token retrieval.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SuiteConfig;
use crate::error::{HarnessError, Result};

/// HTTP client preconfigured with the suite's API headers.
///
/// Sends `x-api-key` on every request when the key is configured, the way
/// the UI session sends its auth cookies implicitly.
#[derive(Debug, Clone)]
pub struct ApiClient {
	client: reqwest::Client,
	login_url: String,
	email: Option<String>,
	password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
	email: &'a str,
	password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
	// Some auth endpoints answer `accessToken`, others `token`; accept
	// both.
	#[serde(alias = "token")]
	access_token: String,
}

impl ApiClient {
	pub fn new(config: &SuiteConfig) -> Result<Self> {
		let mut headers = HeaderMap::new();
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		if let Some(key) = &config.api_key {
			let value = HeaderValue::from_str(key)
				.map_err(|_| HarnessError::Config("X_API_KEY contains invalid header bytes".into()))?;
			headers.insert("x-api-key", value);
		}

		let client = reqwest::Client::builder().default_headers(headers).build()?;

		Ok(Self {
			client,
			login_url: config.api_login_url.clone(),
			email: config.api_email.clone(),
			password: config.api_password.clone(),
		})
	}

	/// Bare request builder for specs that mix API calls with UI actions.
	pub fn post(&self, url: &str) -> reqwest::RequestBuilder {
		self.client.post(url)
	}

	pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
		self.client.get(url)
	}

	/// Performs a programmatic login against the external auth endpoint and
	/// extracts the access token from the JSON body.
	pub async fn auth_token(&self) -> Result<String> {
		let email = self
			.email
			.as_deref()
			.ok_or_else(|| HarnessError::Config("API_USER_EMAIL is not set".into()))?;
		let password = self
			.password
			.as_deref()
			.ok_or_else(|| HarnessError::Config("API_USER_PASSWORD is not set".into()))?;

		debug!(url = %self.login_url, "requesting api auth token");
		let response = self
			.client
			.post(&self.login_url)
			.json(&LoginRequest { email, password })
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(HarnessError::Api(format!("login returned {status}: {body}")));
		}

		let body: LoginResponse = response.json().await?;
		Ok(body.access_token)
	}
}
