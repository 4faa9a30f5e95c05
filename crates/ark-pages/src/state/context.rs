//! Handles every store is built from.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use ark_core::reactive::{Effect, EffectTiming, untrack};
use ark_core::signals::EventChannel;

use crate::api::ForumApi;
use crate::events::DomainEvents;
use crate::router::{CurrentAddress, PageAddress, Router};
use crate::spawn::defer;

/// The shared services a store needs.
///
/// Cloning is cheap; all fields are shared handles.
#[derive(Clone)]
pub struct StoreContext {
	pub api: Rc<dyn ForumApi>,
	pub address: CurrentAddress,
	pub events: DomainEvents,
}

impl fmt::Debug for StoreContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StoreContext")
			.field("address", &self.address)
			.field("events", &self.events)
			.finish_non_exhaustive()
	}
}

impl StoreContext {
	pub fn new(api: Rc<dyn ForumApi>, address: CurrentAddress, events: DomainEvents) -> Self {
		Self {
			api,
			address,
			events,
		}
	}

	pub fn router(&self) -> &Router {
		self.address.router()
	}

	/// Current address without tracking
	pub fn current(&self) -> PageAddress {
		self.address.address_untracked()
	}

	pub fn go_to(&self, address: &PageAddress) {
		self.address.go_to(address);
	}
}

/// Remembers whether the location hash changed since the last scroll.
///
/// Starts out set, so the first load after startup scrolls to the hash of
/// the initial URL. Every later change is also sent on [`HashWatch::changes`].
/// Clones share the flag and the channel.
#[derive(Clone)]
pub(crate) struct HashWatch {
	router: Router,
	changed: Rc<Cell<bool>>,
	changes: EventChannel<String>,
	_effect: Rc<Effect>,
}

impl HashWatch {
	pub(crate) fn new(router: &Router) -> Self {
		let changed = Rc::new(Cell::new(true));
		let changes = EventChannel::new("hash");

		let effect = {
			let location = router.location().clone();
			let changed = changed.clone();
			let changes = changes.clone();
			let mut last_hash: Option<String> = None;
			Effect::new_with_timing(
				move || {
					let hash = location.with(|l| l.hash.clone());
					if let Some(previous) = last_hash.replace(hash.clone())
						&& previous != hash
					{
						changed.set(true);
						untrack(|| changes.send(&hash));
					}
				},
				EffectTiming::Layout,
			)
		};

		Self {
			router: router.clone(),
			changed,
			changes,
			_effect: Rc::new(effect),
		}
	}

	/// New hash after every change, sent after the flag is set
	pub(crate) fn changes(&self) -> &EventChannel<String> {
		&self.changes
	}

	pub(crate) fn is_pending(&self) -> bool {
		self.changed.get()
	}

	/// After a load: if the hash changed, clear the flag and scroll to the
	/// anchor once the page had a chance to render.
	pub(crate) fn scroll_if_changed(&self) {
		if self.changed.replace(false) {
			let router = self.router.clone();
			defer(move || router.scroll_to_hash_element());
		}
	}
}
