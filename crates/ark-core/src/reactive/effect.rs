//! `Effect`: a closure that re-runs when the signals it read change.
//!
//! Dependencies are collected anew on every run, so an effect only reacts to
//! the signals it actually touched last time. Dropping the `Effect` handle
//! disposes it.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::runtime::{EffectTiming, NodeId, Observer, Runtime, try_with_runtime, with_runtime};

type EffectFn = Box<dyn FnMut() + 'static>;

thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = RefCell::new(BTreeMap::new());
	static EFFECT_TIMING: RefCell<BTreeMap<NodeId, EffectTiming>> = const { RefCell::new(BTreeMap::new()) };
	// Effects currently executing, and whether they were invalidated meanwhile
	static RUNNING_EFFECTS: RefCell<BTreeMap<NodeId, bool>> = const { RefCell::new(BTreeMap::new()) };
}

/// Consecutive runs of one effect that keeps writing its own dependencies
pub const MAX_RERUNS: usize = 100;

/// Timing of a live effect, `None` if `effect_id` is not an effect.
pub(crate) fn get_effect_timing(effect_id: NodeId) -> Option<EffectTiming> {
	EFFECT_TIMING.with(|storage| storage.borrow().get(&effect_id).copied())
}

/// Handle to a running effect.
///
/// The closure runs once on creation and again whenever a signal it read
/// changes.
///
/// ```ignore
/// let location = Signal::new(String::from("/"));
/// let _log = Effect::new_with_timing(
/// 	{
/// 		let location = location.clone();
/// 		move || info_log!("now at {}", location.get())
/// 	},
/// 	EffectTiming::Layout,
/// );
/// ```
pub struct Effect {
	id: NodeId,
	disposed: Rc<Cell<bool>>,
}

impl Effect {
	/// Create a passive effect (re-runs on the next flush)
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::Passive)
	}

	pub fn new_with_timing<F>(mut f: F, timing: EffectTiming) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(Cell::new(false));

		let disposed_clone = disposed.clone();
		EFFECT_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(
				id,
				Box::new(move || {
					if !disposed_clone.get() {
						f();
					}
				}),
			);
		});

		EFFECT_TIMING.with(|storage| {
			storage.borrow_mut().insert(id, timing);
		});

		Self::execute_effect(id);

		Self { id, disposed }
	}

	/// Run an effect, re-collecting its dependencies.
	///
	/// An effect is never re-entered. If one of its dependencies is written
	/// while it runs (directly or through other layout effects), the running
	/// call goes again once it returns, up to [`MAX_RERUNS`] times.
	pub(crate) fn execute_effect(effect_id: NodeId) {
		let running = RUNNING_EFFECTS.with(|running| {
			if let Some(dirty) = running.borrow_mut().get_mut(&effect_id) {
				*dirty = true;
				return true;
			}
			false
		});
		if running {
			return;
		}

		let Some(mut effect_fn) =
			EFFECT_FUNCTIONS.with(|storage| storage.borrow_mut().remove(&effect_id))
		else {
			return;
		};

		let timing = get_effect_timing(effect_id).unwrap_or_default();
		RUNNING_EFFECTS.with(|running| running.borrow_mut().insert(effect_id, false));

		let mut runs = 0;
		loop {
			with_runtime(|rt| {
				rt.clear_dependencies(effect_id);
				rt.push_observer(Observer {
					id: effect_id,
					timing,
				});
			});

			effect_fn();
			runs += 1;

			with_runtime(|rt| {
				rt.pop_observer();
			});

			let dirty = RUNNING_EFFECTS.with(|running| {
				running
					.borrow_mut()
					.insert(effect_id, false)
					.unwrap_or(false)
			});
			if !dirty || get_effect_timing(effect_id).is_none() {
				break;
			}
			if runs >= MAX_RERUNS {
				tracing::warn!(effect = ?effect_id, runs, "effect keeps invalidating itself, giving up");
				break;
			}
		}

		RUNNING_EFFECTS.with(|running| running.borrow_mut().remove(&effect_id));

		// Disposed while running: the timing entry is gone
		if get_effect_timing(effect_id).is_some() {
			EFFECT_FUNCTIONS.with(|storage| {
				storage.borrow_mut().insert(effect_id, effect_fn);
			});
		}
	}

	pub fn id(&self) -> NodeId {
		self.id
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Stop the effect and release its graph node
	pub fn dispose(&self) {
		self.disposed.set(true);

		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		let _ = EFFECT_FUNCTIONS.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
		let _ = EFFECT_TIMING.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl Runtime {
	/// Run every queued passive effect.
	///
	/// Effects queued while flushing wait for the next flush.
	pub fn flush_updates(&self) {
		*self.update_scheduled.borrow_mut() = false;

		let pending = std::mem::take(&mut *self.pending_updates.borrow_mut());
		for node_id in pending {
			Effect::execute_effect(node_id);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::{Signal, untrack};
	use serial_test::serial;

	fn flush() {
		with_runtime(|rt| rt.flush_updates());
	}

	#[test]
	#[serial]
	fn test_effect_runs_immediately() {
		let runs = Rc::new(Cell::new(0));
		let runs_clone = runs.clone();

		let _effect = Effect::new(move || runs_clone.set(runs_clone.get() + 1));

		assert_eq!(runs.get(), 1);
	}

	#[test]
	#[serial]
	fn test_passive_effect_waits_for_flush() {
		let signal = Signal::new(0);
		let seen = Rc::new(Cell::new(-1));

		let _effect = Effect::new({
			let signal = signal.clone();
			let seen = seen.clone();
			move || seen.set(signal.get())
		});
		assert_eq!(seen.get(), 0);

		signal.set(7);
		assert_eq!(seen.get(), 0);

		flush();
		assert_eq!(seen.get(), 7);
	}

	#[test]
	#[serial]
	fn test_layout_effect_runs_synchronously() {
		let signal = Signal::new(1);
		let doubled = Signal::new(0);

		let _effect = Effect::new_with_timing(
			{
				let signal = signal.clone();
				let doubled = doubled.clone();
				move || doubled.set(signal.get() * 2)
			},
			EffectTiming::Layout,
		);

		signal.set(21);
		assert_eq!(doubled.get_untracked(), 42);
	}

	#[test]
	#[serial]
	fn test_chained_layout_effects() {
		let source = Signal::new(1);
		let middle = Signal::new(0);
		let sink = Signal::new(0);

		let _first = Effect::new_with_timing(
			{
				let source = source.clone();
				let middle = middle.clone();
				move || middle.set(source.get() + 1)
			},
			EffectTiming::Layout,
		);
		let _second = Effect::new_with_timing(
			{
				let middle = middle.clone();
				let sink = sink.clone();
				move || sink.set(middle.get() * 10)
			},
			EffectTiming::Layout,
		);
		assert_eq!(sink.get_untracked(), 20);

		source.set(4);
		assert_eq!(sink.get_untracked(), 50);
	}

	#[test]
	#[serial]
	fn test_self_triggering_effect_reruns_until_stable() {
		let signal = Signal::new(0);
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new_with_timing(
			{
				let signal = signal.clone();
				let runs = runs.clone();
				move || {
					runs.set(runs.get() + 1);
					let value = signal.get();
					if value < 3 {
						signal.set(value + 1);
					}
				}
			},
			EffectTiming::Layout,
		);

		assert_eq!(runs.get(), 4);
		assert_eq!(signal.get_untracked(), 3);
	}

	#[test]
	#[serial]
	fn test_write_from_untracked_callback_reruns_effect() {
		// A callback inside the effect redirects, like a listener that
		// navigates away from a page it refuses to show
		let location = Signal::new(String::from("/signup"));
		let shown = Signal::new(String::new());

		let _effect = Effect::new_with_timing(
			{
				let location = location.clone();
				let shown = shown.clone();
				move || {
					let current = location.get();
					untrack(|| {
						shown.set(current.clone());
						if current == "/signup" {
							location.set(String::from("/articles"));
						}
					});
				}
			},
			EffectTiming::Layout,
		);
		assert_eq!(shown.get_untracked(), "/articles");

		location.set(String::from("/signup"));
		assert_eq!(shown.get_untracked(), "/articles");
		assert_eq!(location.get_untracked(), "/articles");
	}

	#[test]
	#[serial]
	fn test_runaway_effect_stops_at_rerun_limit() {
		let signal = Signal::new(0usize);
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new_with_timing(
			{
				let signal = signal.clone();
				let runs = runs.clone();
				move || {
					runs.set(runs.get() + 1);
					let value = signal.get();
					signal.set(value + 1);
				}
			},
			EffectTiming::Layout,
		);

		assert_eq!(runs.get(), MAX_RERUNS);
		assert_eq!(signal.get_untracked(), MAX_RERUNS);
		assert!(RUNNING_EFFECTS.with(|running| running.borrow().is_empty()));
	}

	#[test]
	#[serial]
	fn test_dropped_effect_stops_running() {
		let signal = Signal::new(0);
		let runs = Rc::new(Cell::new(0));

		let effect = Effect::new_with_timing(
			{
				let signal = signal.clone();
				let runs = runs.clone();
				move || {
					let _ = signal.get();
					runs.set(runs.get() + 1);
				}
			},
			EffectTiming::Layout,
		);
		let id = effect.id();
		drop(effect);

		signal.set(1);

		assert_eq!(runs.get(), 1);
		assert!(get_effect_timing(id).is_none());
	}

	#[test]
	#[serial]
	fn test_dependencies_are_recollected() {
		let flag = Signal::new(true);
		let a = Signal::new(0);
		let b = Signal::new(0);
		let runs = Rc::new(Cell::new(0));

		let _effect = Effect::new_with_timing(
			{
				let (flag, a, b, runs) = (flag.clone(), a.clone(), b.clone(), runs.clone());
				move || {
					runs.set(runs.get() + 1);
					if flag.get() {
						let _ = a.get();
					} else {
						let _ = b.get();
					}
				}
			},
			EffectTiming::Layout,
		);

		flag.set(false);
		assert_eq!(runs.get(), 2);

		a.set(1);
		assert_eq!(runs.get(), 2);

		b.set(1);
		assert_eq!(runs.get(), 3);
	}
}
