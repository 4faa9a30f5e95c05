//! Latest-wins async values.
//!
//! A [`Resource`] owns one observable [`ResourceState`]. Every
//! [`Resource::load`] takes a new generation ticket; a fetch that completes
//! after a newer ticket was taken is dropped, so the state always ends on the
//! result of the most recent trigger regardless of completion order.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use ark_core::reactive::Signal;

use crate::api::FetchError;
use crate::spawn::spawn_task;
use crate::{debug_log, warn_log};

/// Outcome of the most recent fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState<T> {
	Loading,
	Success(T),
	/// Message to show the user
	Error(String),
}

impl<T> ResourceState<T> {
	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Self::Success(value) => Some(value),
			_ => None,
		}
	}

	pub fn error(&self) -> Option<&str> {
		match self {
			Self::Error(message) => Some(message),
			_ => None,
		}
	}

	pub fn as_ref(&self) -> ResourceState<&T> {
		match self {
			Self::Loading => ResourceState::Loading,
			Self::Success(value) => ResourceState::Success(value),
			Self::Error(message) => ResourceState::Error(message.clone()),
		}
	}

	pub fn map<U, F>(self, f: F) -> ResourceState<U>
	where
		F: FnOnce(T) -> U,
	{
		match self {
			Self::Loading => ResourceState::Loading,
			Self::Success(value) => ResourceState::Success(f(value)),
			Self::Error(message) => ResourceState::Error(message),
		}
	}
}

impl<T> From<Result<T, FetchError>> for ResourceState<T> {
	fn from(result: Result<T, FetchError>) -> Self {
		match result {
			Ok(value) => Self::Success(value),
			Err(e) => Self::Error(e.user_message()),
		}
	}
}

/// An observable [`ResourceState`] with switch-to-latest loading.
///
/// Cloning is cheap; clones share the state and the ticket counter.
pub struct Resource<T: 'static> {
	name: &'static str,
	state: Signal<ResourceState<T>>,
	generation: Rc<Cell<u64>>,
}

impl<T: 'static> Clone for Resource<T> {
	fn clone(&self) -> Self {
		Self {
			name: self.name,
			state: self.state.clone(),
			generation: self.generation.clone(),
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Resource<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Resource")
			.field("name", &self.name)
			.field("generation", &self.generation.get())
			.field("state", &self.state)
			.finish()
	}
}

impl<T: Clone + 'static> Resource<T> {
	/// `name` only shows up in logs
	pub fn new(name: &'static str, initial: ResourceState<T>) -> Self {
		Self {
			name,
			state: Signal::new(initial),
			generation: Rc::new(Cell::new(0)),
		}
	}

	pub fn loading(name: &'static str) -> Self {
		Self::new(name, ResourceState::Loading)
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn state(&self) -> &Signal<ResourceState<T>> {
		&self.state
	}

	/// Current state, tracking the dependency
	pub fn get(&self) -> ResourceState<T> {
		self.state.get()
	}

	pub fn get_untracked(&self) -> ResourceState<T> {
		self.state.get_untracked()
	}

	pub fn with<R>(&self, f: impl FnOnce(&ResourceState<T>) -> R) -> R {
		self.state.with(f)
	}

	pub fn with_untracked<R>(&self, f: impl FnOnce(&ResourceState<T>) -> R) -> R {
		self.state.with_untracked(f)
	}

	/// The loaded value, if the last fetch succeeded
	pub fn value(&self) -> Option<T> {
		self.state.with(|s| s.value().cloned())
	}

	/// Start `fetch`, replacing whatever is in flight
	pub fn load<F>(&self, fetch: F)
	where
		F: Future<Output = Result<T, FetchError>> + 'static,
	{
		self.load_then(fetch, |_| {});
	}

	/// Like [`load`](Self::load), calling `after` with the new state once it
	/// has been applied. `after` does not run for a superseded fetch.
	pub fn load_then<F, A>(&self, fetch: F, after: A)
	where
		F: Future<Output = Result<T, FetchError>> + 'static,
		A: FnOnce(&ResourceState<T>) + 'static,
	{
		let ticket = self.next_ticket();
		self.state.set(ResourceState::Loading);

		let name = self.name;
		let state = self.state.clone();
		let generation = self.generation.clone();
		spawn_task(async move {
			let result = fetch.await;
			if generation.get() != ticket {
				debug_log!("{}: dropping result of superseded fetch {}", name, ticket);
				return;
			}
			if let Err(e) = &result {
				warn_log!("{}: fetch failed: {}", name, e);
			}

			let new_state = ResourceState::from(result);
			state.set(new_state.clone());
			after(&new_state);
		});
	}

	/// Discard any fetch in flight and keep the current state
	pub fn suspend(&self) {
		self.next_ticket();
	}

	/// Replace the state directly, discarding any fetch in flight
	pub fn set(&self, state: ResourceState<T>) {
		self.next_ticket();
		self.state.set(state);
	}

	fn next_ticket(&self) -> u64 {
		let ticket = self.generation.get().wrapping_add(1);
		self.generation.set(ticket);
		ticket
	}
}
