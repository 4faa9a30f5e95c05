//! Core Router Implementation.
//!
//! The router owns the raw location state, a single
//! `Signal<RawLocation>`. Browser navigation and [`Router::navigate_to`] are
//! the only writers, and each replaces the whole value at once, so observers
//! never see a path from one URL next to the query of another.

use std::fmt;
use std::rc::Rc;

use ark_core::reactive::Signal;

use super::error::RouterError;
use super::history::{HistoryBackend, scroll_into_view};
use super::location::{QueryParams, RawLocation};
use crate::info_log;

/// Raw location state plus the history it is synchronized with.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct Router {
	history: Rc<dyn HistoryBackend>,
	location: Signal<RawLocation>,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("location", &self.location.with_untracked(RawLocation::to_url))
			.finish()
	}
}

impl Router {
	/// Create a router at the backend's current location.
	///
	/// Back/forward and hash changes re-read the backend's location from then
	/// on.
	pub fn new(history: Rc<dyn HistoryBackend>) -> Self {
		let location = Signal::new(history.current_location());

		let weak_history = Rc::downgrade(&history);
		let location_clone = location.clone();
		history.on_navigate(Box::new(move || {
			if let Some(history) = weak_history.upgrade() {
				Self::replace_location(&location_clone, history.current_location());
			}
		}));

		Self { history, location }
	}

	/// Re-read the backend's location
	pub fn parse_current_location(&self) {
		Self::replace_location(&self.location, self.history.current_location());
	}

	fn replace_location(location: &Signal<RawLocation>, new_location: RawLocation) {
		info_log!("location changed to {}", new_location.to_url());
		location.set(new_location);
	}

	/// Navigate to a new location and add a history entry for it.
	///
	/// The history entry is pushed before observers see the new location, so
	/// a navigation started by an observer ends up on top of it. If the push
	/// fails the new location still becomes current and the error is returned.
	pub fn navigate_to(
		&self,
		segments: Vec<String>,
		query: QueryParams,
		hash: impl Into<String>,
	) -> Result<(), RouterError> {
		let location = RawLocation::new(segments, query, hash);
		let url = location.to_url();

		info_log!("navigating to {}", url);
		let pushed = self.history.push(&url);
		self.location.set(location);
		pushed
	}

	/// Navigate to a relative URL such as `/forum/t/5?page=2`
	pub fn navigate_to_url(&self, url: &str) -> Result<(), RouterError> {
		let RawLocation {
			segments,
			query,
			hash,
		} = RawLocation::parse(url);
		self.navigate_to(segments, query, hash)
	}

	/// The location signal. Reading it inside an effect subscribes to it.
	pub fn location(&self) -> &Signal<RawLocation> {
		&self.location
	}

	pub fn location_untracked(&self) -> RawLocation {
		self.location.get_untracked()
	}

	pub fn path_segments(&self) -> Vec<String> {
		self.location.with(|location| location.segments.clone())
	}

	pub fn query_params(&self) -> QueryParams {
		self.location.with(|location| location.query.clone())
	}

	pub fn hash(&self) -> String {
		self.location.with(|location| location.hash.clone())
	}

	pub fn query_param(&self, name: &str) -> Option<String> {
		self.location
			.with(|location| location.query_param(name).map(str::to_string))
	}

	/// Scroll the element whose id is the current hash into view
	pub fn scroll_to_hash_element(&self) {
		let hash = self.location.with_untracked(|location| location.hash.clone());
		if !hash.is_empty() {
			scroll_into_view(&hash);
		}
	}
}
