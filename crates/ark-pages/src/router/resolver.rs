//! Current page address.
//!
//! [`CurrentAddress`] keeps the typed [`PageAddress`] in sync with the
//! router's raw location. A layout effect re-resolves it on every location
//! write, so the address is up to date as soon as `navigate_to` returns.
//!
//! Stores react to it through [`CurrentAddress::subscribe`], which replays
//! the current address first and then reports every change.

use std::fmt;
use std::rc::Rc;

use ark_core::reactive::{Effect, EffectTiming, Signal, untrack};
use ark_core::signals::{EventChannel, ReceiverId};

use super::address::PageAddress;
use super::core::Router;
use super::error::RouterError;
use crate::{debug_log, warn_log};

struct Inner {
	router: Router,
	address: Signal<PageAddress>,
	changes: EventChannel<PageAddress>,
	_effect: Effect,
}

/// The resolved address of the current location.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct CurrentAddress {
	inner: Rc<Inner>,
}

impl fmt::Debug for CurrentAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CurrentAddress")
			.field("address", &self.inner.address.get_untracked())
			.field("subscribers", &self.inner.changes.receiver_count())
			.finish()
	}
}

impl CurrentAddress {
	pub fn new(router: &Router) -> Self {
		let initial = router.location().with_untracked(PageAddress::resolve);
		let address = Signal::new(initial);
		let changes = EventChannel::new("address");

		let effect = {
			let location = router.location().clone();
			let address = address.clone();
			let changes = changes.clone();
			Effect::new_with_timing(
				move || {
					let resolved = location.with(PageAddress::resolve);
					untrack(|| {
						if address.set_if_changed(resolved.clone()) {
							debug_log!("address changed to {:?}", resolved);
							changes.send(&resolved);
						}
					});
				},
				EffectTiming::Layout,
			)
		};

		Self {
			inner: Rc::new(Inner {
				router: router.clone(),
				address,
				changes,
				_effect: effect,
			}),
		}
	}

	/// The current address, tracking the dependency
	pub fn address(&self) -> PageAddress {
		self.inner.address.get()
	}

	pub fn address_untracked(&self) -> PageAddress {
		self.inner.address.get_untracked()
	}

	pub fn signal(&self) -> &Signal<PageAddress> {
		&self.inner.address
	}

	pub fn router(&self) -> &Router {
		&self.inner.router
	}

	/// Call `f` with the current address now and with every later change.
	pub fn subscribe<F>(&self, f: F) -> ReceiverId
	where
		F: Fn(&PageAddress) + 'static,
	{
		let current = self.address_untracked();
		f(&current);
		self.inner.changes.connect(f)
	}

	pub fn unsubscribe(&self, id: ReceiverId) -> bool {
		self.inner.changes.disconnect(id)
	}

	/// Navigate to `address`
	pub fn go_to(&self, address: &PageAddress) {
		if let Err(e) = self.try_go_to(address) {
			warn_log!("navigation to {:?} failed: {}", address, e);
		}
	}

	pub fn try_go_to(&self, address: &PageAddress) -> Result<(), RouterError> {
		let location = address.to_location()?;
		self.inner
			.router
			.navigate_to(location.segments, location.query, location.hash)
	}
}
