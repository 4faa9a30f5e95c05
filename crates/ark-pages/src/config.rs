//! Client configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration. In the browser the server may inline the configuration in
//! the page:
//!
//! ```html
//! <script type="application/json" id="ark-config">{"apiBaseUrl": ""}</script>
//! ```

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SESSION_COOKIE: &str = "SESSION";
pub const DEFAULT_TITLE: &str = "The Ark";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: &'static str, message: String },

	#[error("Configuration element '{0}' not found")]
	MissingElement(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
	/// Prefix for every API request; empty means same origin
	pub api_base_url: String,
	/// Name of the cookie whose presence means "maybe logged in"
	pub session_cookie: String,
	/// Document title when the page has nothing more specific
	pub default_title: String,
	/// Page sizes used until the forum structure has been fetched
	pub threads_per_page: u32,
	pub messages_per_page: u32,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: String::new(),
			session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
			default_title: DEFAULT_TITLE.to_string(),
			threads_per_page: DEFAULT_PAGE_SIZE,
			messages_per_page: DEFAULT_PAGE_SIZE,
		}
	}
}

impl AppConfig {
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Read the JSON configuration embedded in the element with `element_id`
	#[cfg(target_arch = "wasm32")]
	pub fn from_document(element_id: &str) -> Result<Self, ConfigError> {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(element_id))
			.and_then(|e| e.text_content())
			.ok_or_else(|| ConfigError::MissingElement(element_id.to_string()))?;
		Self::from_json(&text)
	}

	pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
		self.api_base_url = url.into();
		self
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.threads_per_page == 0 {
			return Err(ConfigError::InvalidValue {
				key: "threadsPerPage",
				message: "must be positive".to_string(),
			});
		}
		if self.messages_per_page == 0 {
			return Err(ConfigError::InvalidValue {
				key: "messagesPerPage",
				message: "must be positive".to_string(),
			});
		}
		if self.session_cookie.is_empty() {
			return Err(ConfigError::InvalidValue {
				key: "sessionCookie",
				message: "must not be empty".to_string(),
			});
		}
		Ok(())
	}
}
