//! Session cookie and password encoding seams.
//!
//! Both are owned by the authentication layer; the client only needs to know
//! whether a session cookie exists and to hand the password to an encoder
//! before it leaves the browser.

/// Reads the session cookie
pub trait SessionSource {
	/// Cookie value, `None` when absent or empty
	fn session(&self) -> Option<String>;

	fn has_session(&self) -> bool {
		self.session().is_some()
	}
}

/// Fixed session value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSession(pub Option<String>);

impl StaticSession {
	pub fn none() -> Self {
		Self(None)
	}

	pub fn with(session: impl Into<String>) -> Self {
		Self(Some(session.into()))
	}
}

impl SessionSource for StaticSession {
	fn session(&self) -> Option<String> {
		self.0.clone().filter(|s| !s.is_empty())
	}
}

/// Find `name` in a `document.cookie` style string (`a=1; b=2`)
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
	cookies
		.split(';')
		.filter_map(|pair| pair.trim().split_once('='))
		.find(|(key, _)| *key == name)
		.map(|(_, value)| value.to_string())
		.filter(|value| !value.is_empty())
}

#[cfg(target_arch = "wasm32")]
pub use browser::DocumentCookieSession;

#[cfg(target_arch = "wasm32")]
mod browser {
	use wasm_bindgen::JsCast;
	use web_sys::HtmlDocument;

	use super::{SessionSource, find_cookie};

	/// Reads the named cookie from `document.cookie` on every call
	pub struct DocumentCookieSession {
		cookie_name: String,
	}

	impl DocumentCookieSession {
		pub fn new(cookie_name: impl Into<String>) -> Self {
			Self {
				cookie_name: cookie_name.into(),
			}
		}
	}

	impl SessionSource for DocumentCookieSession {
		fn session(&self) -> Option<String> {
			let cookies = web_sys::window()
				.and_then(|w| w.document())
				.and_then(|d| d.dyn_into::<HtmlDocument>().ok())
				.and_then(|d| d.cookie().ok())?;
			find_cookie(&cookies, &self.cookie_name)
		}
	}
}

/// Turns the typed password into what the server expects
pub trait PasswordEncoder {
	fn encode(&self, password: &str) -> String;
}

/// Sends the password unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPassword;

impl PasswordEncoder for PlainPassword {
	fn encode(&self, password: &str) -> String {
		password.to_string()
	}
}
