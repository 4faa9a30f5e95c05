//! Refresh triggers.
//!
//! A store builds one [`Trigger`] around its `refresh` and attaches it to the
//! sources that can make its data stale:
//!
//! ```ignore
//! Trigger::weak(&store, ThreadListState::refresh)
//! 	.on(&events.threads)
//! 	.on_address(&address);
//! ```
//!
//! [`Trigger::on_address`] replays the current address, so attaching it also
//! performs the initial refresh. Stores that do not depend on the address call
//! [`Trigger::fire`] once instead.

use std::fmt;
use std::rc::Rc;

use ark_core::signals::EventChannel;

use crate::router::CurrentAddress;

#[derive(Clone)]
pub struct Trigger {
	refresh: Rc<dyn Fn()>,
}

impl fmt::Debug for Trigger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Trigger").finish_non_exhaustive()
	}
}

impl Trigger {
	pub fn new<F>(refresh: F) -> Self
	where
		F: Fn() + 'static,
	{
		Self {
			refresh: Rc::new(refresh),
		}
	}

	/// Trigger calling `refresh` on `store` for as long as the store is alive.
	///
	/// Channels hold on to the trigger, so it must not own the store.
	pub fn weak<S: 'static>(store: &Rc<S>, refresh: fn(&S)) -> Self {
		let store = Rc::downgrade(store);
		Self::new(move || {
			if let Some(store) = store.upgrade() {
				refresh(&store);
			}
		})
	}

	/// Refresh on every address change, and right now
	pub fn on_address(self, address: &CurrentAddress) -> Self {
		let refresh = self.refresh.clone();
		address.subscribe(move |_| refresh());
		self
	}

	/// Refresh on every event of `channel`
	pub fn on<E: 'static>(self, channel: &EventChannel<E>) -> Self {
		let refresh = self.refresh.clone();
		channel.connect(move |_| refresh());
		self
	}

	/// Refresh on the events of `channel` that match `predicate`
	pub fn on_filtered<E, P>(self, channel: &EventChannel<E>, predicate: P) -> Self
	where
		E: 'static,
		P: Fn(&E) -> bool + 'static,
	{
		let refresh = self.refresh.clone();
		channel.connect_filtered(predicate, move |_| refresh());
		self
	}

	pub fn fire(&self) {
		(self.refresh)();
	}
}
