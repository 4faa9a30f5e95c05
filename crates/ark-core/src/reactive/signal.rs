//! `Signal<T>`: an observable value.
//!
//! Reading with [`Signal::get`] or [`Signal::with`] inside an effect makes the
//! effect depend on the signal; writing with [`Signal::set`] or
//! [`Signal::update`] re-runs or queues every dependent effect.
//!
//! ```ignore
//! let count = Signal::new(0);
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

/// An observable value shared between clones.
///
/// Clones share the same value and the same node in the dependency graph.
pub struct Signal<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

// A handle: cloning never requires `T: Clone`
impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			value: self.value.clone(),
		}
	}
}

impl<T: 'static> Signal<T> {
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Clone the current value, tracking the dependency
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Borrow the current value, tracking the dependency.
	///
	/// Avoids a clone for large values such as maps and lists.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		with_runtime(|rt| rt.track_dependency(self.id));
		self.with_untracked(f)
	}

	pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replace the value and notify dependents
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Mutate the value in place, notifying dependents once
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: PartialEq + 'static> Signal<T> {
	/// Set the value only if it differs from the current one.
	///
	/// Returns whether dependents were notified.
	pub fn set_if_changed(&self, value: T) -> bool {
		if *self.value.borrow() == value {
			return false;
		}
		self.set(value);
		true
	}
}

impl<T: Default + 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		// Last clone going away
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &*self.value.borrow())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::runtime::{EffectTiming, Observer};
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_signal_set_and_update() {
		let signal = Signal::new(0);

		signal.set(10);
		assert_eq!(signal.get_untracked(), 10);

		signal.update(|n| *n *= 2);
		assert_eq!(signal.get_untracked(), 20);
	}

	#[test]
	#[serial]
	fn test_signal_clone_shares_value() {
		let signal1 = Signal::new(String::from("a"));
		let signal2 = signal1.clone();

		signal1.set(String::from("b"));

		assert_eq!(signal2.get_untracked(), "b");
		assert_eq!(signal1.id(), signal2.id());
	}

	#[test]
	#[serial]
	fn test_clone_of_non_clone_value() {
		// Not Clone on purpose
		struct Draft(Vec<String>);

		let signal1 = Signal::new(Draft(Vec::new()));
		let signal2 = signal1.clone();

		signal1.update(|draft| draft.0.push(String::from("first line")));

		assert_eq!(signal2.with_untracked(|draft| draft.0.len()), 1);
		assert_eq!(signal1.id(), signal2.id());
	}

	#[test]
	#[serial]
	fn test_with_borrows_without_clone() {
		let signal = Signal::new(vec![1, 2, 3]);

		let len = signal.with(|v| v.len());

		assert_eq!(len, 3);
	}

	#[test]
	#[serial]
	fn test_set_if_changed() {
		let signal = Signal::new(5);

		assert!(!signal.set_if_changed(5));
		assert!(signal.set_if_changed(6));
		assert_eq!(signal.get_untracked(), 6);
	}

	#[test]
	#[serial]
	fn test_get_tracks_current_observer() {
		let signal = Signal::new(42);
		let observer_id = NodeId::new();

		with_runtime(|rt| {
			rt.push_observer(Observer {
				id: observer_id,
				timing: EffectTiming::Passive,
			})
		});
		let _ = signal.get();
		with_runtime(|rt| rt.pop_observer());

		with_runtime(|rt| {
			let graph = rt.dependency_graph.borrow();
			assert!(graph[&signal.id()].subscribers.contains(&observer_id));
		});
	}

	#[test]
	#[serial]
	fn test_drop_of_last_clone_removes_node() {
		let signal = Signal::new(1);
		let id = signal.id();
		let observer_id = NodeId::new();

		with_runtime(|rt| {
			rt.push_observer(Observer {
				id: observer_id,
				timing: EffectTiming::Passive,
			})
		});
		let _ = signal.get();
		with_runtime(|rt| rt.pop_observer());

		let clone = signal.clone();
		drop(clone);
		assert!(with_runtime(|rt| rt.has_node(id)));

		drop(signal);
		assert!(!with_runtime(|rt| rt.has_node(id)));
	}
}
