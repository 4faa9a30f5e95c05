//! History backends.
//!
//! The [`Router`](super::Router) never talks to the browser directly. It reads
//! and pushes URLs through a [`HistoryBackend`] and gets told when the user
//! moved through history on their own (back/forward buttons, editing the hash).
//!
//! - [`BrowserHistory`]: `window.history` + `window.location` (wasm32 only)
//! - [`MemoryHistory`]: an in-memory entry stack, used natively and in tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::error::RouterError;
use super::location::RawLocation;

pub trait HistoryBackend {
	/// The location the user is currently at
	fn current_location(&self) -> RawLocation;

	/// Add a history entry for `url` and make it current.
	///
	/// Must not call the navigation callbacks.
	fn push(&self, url: &str) -> Result<(), RouterError>;

	/// Register a callback for navigation the application did not initiate
	fn on_navigate(&self, callback: Box<dyn Fn()>);
}

/// In-memory history stack.
///
/// Pushing drops every entry after the current one, like a browser does.
pub struct MemoryHistory {
	entries: RefCell<Vec<String>>,
	index: Cell<usize>,
	listeners: RefCell<Vec<Rc<dyn Fn()>>>,
	reject_pushes: Cell<bool>,
}

impl MemoryHistory {
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			entries: RefCell::new(vec![initial_url.into()]),
			index: Cell::new(0),
			listeners: RefCell::new(Vec::new()),
			reject_pushes: Cell::new(false),
		}
	}

	pub fn current_url(&self) -> String {
		self.entries.borrow()[self.index.get()].clone()
	}

	pub fn entries(&self) -> Vec<String> {
		self.entries.borrow().clone()
	}

	pub fn can_go_back(&self) -> bool {
		self.index.get() > 0
	}

	pub fn can_go_forward(&self) -> bool {
		self.index.get() + 1 < self.entries.borrow().len()
	}

	/// Simulate the back button. Returns `false` at the first entry.
	pub fn back(&self) -> bool {
		if !self.can_go_back() {
			return false;
		}
		self.index.set(self.index.get() - 1);
		self.notify();
		true
	}

	/// Simulate the forward button. Returns `false` at the last entry.
	pub fn forward(&self) -> bool {
		if !self.can_go_forward() {
			return false;
		}
		self.index.set(self.index.get() + 1);
		self.notify();
		true
	}

	/// Simulate the user editing the hash in the address bar
	pub fn set_hash(&self, hash: &str) {
		let url = self.current_url();
		let base = url.split_once('#').map_or(url.as_str(), |(base, _)| base);
		let hash = hash.strip_prefix('#').unwrap_or(hash);
		let url = if hash.is_empty() {
			base.to_string()
		} else {
			format!("{}#{}", base, hash)
		};
		self.add_entry(url);
		self.notify();
	}

	/// Make every following [`HistoryBackend::push`] fail
	pub fn reject_pushes(&self, reject: bool) {
		self.reject_pushes.set(reject);
	}

	fn add_entry(&self, url: String) {
		let mut entries = self.entries.borrow_mut();
		entries.truncate(self.index.get() + 1);
		entries.push(url);
		self.index.set(entries.len() - 1);
	}

	fn notify(&self) {
		// Callbacks may register more listeners
		let listeners = self.listeners.borrow().clone();
		for listener in listeners {
			listener();
		}
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl HistoryBackend for MemoryHistory {
	fn current_location(&self) -> RawLocation {
		RawLocation::parse(&self.current_url())
	}

	fn push(&self, url: &str) -> Result<(), RouterError> {
		if self.reject_pushes.get() {
			return Err(RouterError::History(format!("push of {} rejected", url)));
		}
		self.add_entry(url.to_string());
		Ok(())
	}

	fn on_navigate(&self, callback: Box<dyn Fn()>) {
		self.listeners.borrow_mut().push(Rc::from(callback));
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserHistory, scroll_into_view};

#[cfg(target_arch = "wasm32")]
mod browser {
	use std::rc::Rc;

	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;
	use web_sys::{Event, ScrollBehavior, ScrollIntoViewOptions, Window};

	use super::HistoryBackend;
	use crate::error_log;
	use crate::router::error::RouterError;
	use crate::router::location::RawLocation;

	/// `window.history` backed history
	pub struct BrowserHistory {
		window: Window,
	}

	impl BrowserHistory {
		pub fn new() -> Result<Self, RouterError> {
			let window =
				web_sys::window().ok_or_else(|| RouterError::History("No window object".into()))?;
			Ok(Self { window })
		}
	}

	impl HistoryBackend for BrowserHistory {
		fn current_location(&self) -> RawLocation {
			let location = self.window.location();
			let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
			let search = location.search().unwrap_or_default();
			let hash = location.hash().unwrap_or_default();
			RawLocation::from_url(&pathname, &search, &hash)
		}

		fn push(&self, url: &str) -> Result<(), RouterError> {
			let history = self
				.window
				.history()
				.map_err(|e| RouterError::History(format!("{:?}", e)))?;
			history
				.push_state_with_url(&JsValue::NULL, "", Some(url))
				.map_err(|e| RouterError::History(format!("{:?}", e)))
		}

		fn on_navigate(&self, callback: Box<dyn Fn()>) {
			let callback: Rc<dyn Fn()> = Rc::from(callback);

			// Back/forward and manual hash edits
			for event_name in ["popstate", "hashchange"] {
				let callback = callback.clone();
				let handler =
					Closure::wrap(Box::new(move |_event: Event| callback()) as Box<dyn FnMut(_)>);

				if let Err(e) = self
					.window
					.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())
				{
					error_log!("failed to listen for {}: {:?}", event_name, e);
				}
				// Listeners live as long as the page
				handler.forget();
			}
		}
	}

	/// Smoothly scroll the element with the given id into view, if it exists
	pub fn scroll_into_view(element_id: &str) {
		let Some(element) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(element_id))
		else {
			return;
		};

		let options = ScrollIntoViewOptions::new();
		options.set_behavior(ScrollBehavior::Smooth);
		element.scroll_into_view_with_scroll_into_view_options(&options);
	}
}

/// Smoothly scroll the element with the given id into view, if it exists
#[cfg(not(target_arch = "wasm32"))]
pub fn scroll_into_view(_element_id: &str) {}
