//! Reactive runtime.
//!
//! Owns the dependency graph between signals and the effects that read them,
//! the observer stack used for automatic tracking, and the queue of passive
//! effects waiting for the next flush.
//!
//! 1. **Observer stack**: the effect currently executing is on top; any
//!    `Signal::get()` made while it runs records an edge.
//! 2. **Notification**: on `Signal::set()` layout effects re-run immediately,
//!    passive effects are queued.
//! 3. **Flush**: queued effects run from the scheduler installed with
//!    [`set_scheduler`] or from a manual [`Runtime::flush_updates`] call.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for reactive nodes (signals and effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// When an effect re-runs after one of its dependencies changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectTiming {
	/// Re-runs synchronously inside the `Signal::set()` call
	Layout,
	/// Queued and re-run on the next flush
	#[default]
	Passive,
}

/// An executing effect, as seen by the tracker
#[derive(Debug, Clone, Copy)]
pub struct Observer {
	pub id: NodeId,
	pub timing: EffectTiming,
}

#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// Nodes that depend on this node
	pub(crate) subscribers: Vec<NodeId>,
	/// Nodes this node depends on
	pub(crate) dependencies: Vec<NodeId>,
}

type SchedulerFn = Box<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>;

static SCHEDULER: OnceLock<SchedulerFn> = OnceLock::new();

/// Install the function used to schedule passive-effect flushes.
///
/// Only the first call has an effect. Without a scheduler, queued effects
/// stay queued until [`Runtime::flush_updates`] is called, which is what
/// native tests do.
///
/// ```ignore
/// ark_core::reactive::set_scheduler(|task| {
/// 	wasm_bindgen_futures::spawn_local(async move { task() });
/// });
/// ```
pub fn set_scheduler<F>(scheduler: F)
where
	F: Fn(Box<dyn FnOnce() + Send>) + Send + Sync + 'static,
{
	let _ = SCHEDULER.set(Box::new(scheduler));
}

pub struct Runtime {
	observer_stack: RefCell<Vec<Observer>>,
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	pub(crate) pending_updates: RefCell<Vec<NodeId>>,
	pub(crate) update_scheduled: RefCell<bool>,
}

impl Runtime {
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
			pending_updates: RefCell::new(Vec::new()),
			update_scheduled: RefCell::new(false),
		}
	}

	/// The effect currently executing, if any
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack.borrow().last().map(|observer| observer.id)
	}

	pub fn push_observer(&self, observer: Observer) {
		self.observer_stack.borrow_mut().push(observer);
	}

	pub fn pop_observer(&self) -> Option<Observer> {
		self.observer_stack.borrow_mut().pop()
	}

	fn take_observers(&self) -> Vec<Observer> {
		std::mem::take(&mut *self.observer_stack.borrow_mut())
	}

	fn restore_observers(&self, observers: Vec<Observer>) {
		*self.observer_stack.borrow_mut() = observers;
	}

	/// Record that the current observer read `signal_id`.
	///
	/// Called by `Signal::get()`; a no-op outside of an effect.
	pub fn track_dependency(&self, signal_id: NodeId) {
		if let Some(observer_id) = self.current_observer() {
			let mut graph = self.dependency_graph.borrow_mut();

			let signal_node = graph.entry(signal_id).or_default();
			if !signal_node.subscribers.contains(&observer_id) {
				signal_node.subscribers.push(observer_id);
			}

			let observer_node = graph.entry(observer_id).or_default();
			if !observer_node.dependencies.contains(&signal_id) {
				observer_node.dependencies.push(signal_id);
			}
		}
	}

	/// Re-run or queue every subscriber of `signal_id`.
	///
	/// Layout effects run before this returns, in subscription order.
	pub fn notify_signal_change(&self, signal_id: NodeId) {
		let (layout_effects, passive_effects) = {
			let graph = self.dependency_graph.borrow();
			let Some(node) = graph.get(&signal_id) else {
				return;
			};

			let mut layout_effects = Vec::new();
			let mut passive_effects = Vec::new();
			for &subscriber_id in &node.subscribers {
				match super::effect::get_effect_timing(subscriber_id) {
					Some(EffectTiming::Layout) => layout_effects.push(subscriber_id),
					_ => passive_effects.push(subscriber_id),
				}
			}
			(layout_effects, passive_effects)
		};

		for effect_id in layout_effects {
			super::effect::Effect::execute_effect(effect_id);
		}

		for effect_id in passive_effects {
			self.schedule_update(effect_id);
		}
	}

	/// Queue a node for the next flush
	pub fn schedule_update(&self, node_id: NodeId) {
		{
			let mut pending = self.pending_updates.borrow_mut();
			if !pending.contains(&node_id) {
				pending.push(node_id);
			}
		}

		if !*self.update_scheduled.borrow() {
			*self.update_scheduled.borrow_mut() = true;

			if let Some(scheduler) = SCHEDULER.get() {
				scheduler(Box::new(|| {
					RUNTIME.with(|rt| rt.flush_updates());
				}));
			}
		}
	}

	/// Remove `node_id` from the subscriber lists of everything it read
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = match graph.get_mut(&node_id) {
			Some(node) => std::mem::take(&mut node.dependencies),
			None => return,
		};

		for dep_id in dependencies {
			if let Some(dep_node) = graph.get_mut(&dep_id) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Drop a node from the graph entirely (signal or effect went away)
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		let removed = self.dependency_graph.borrow_mut().remove(&node_id);

		// Effects that read a dropped signal must not keep a dangling edge
		if let Some(node) = removed {
			let mut graph = self.dependency_graph.borrow_mut();
			for subscriber in node.subscribers {
				if let Some(subscriber_node) = graph.get_mut(&subscriber) {
					subscriber_node.dependencies.retain(|&id| id != node_id);
				}
			}
		}
	}

	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}

	pub fn pending_count(&self) -> usize {
		self.pending_updates.borrow().len()
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

// One runtime per thread; in the browser that is the whole application.
thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Like [`with_runtime`], but `None` once thread-local storage is gone.
/// Used from `Drop` impls.
pub(crate) fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

/// Run `f` without recording any dependency for the current effect.
///
/// Signals read inside `f` do not become dependencies of the effect that is
/// executing, and effects created inside `f` are unaffected.
pub fn untrack<F, R>(f: F) -> R
where
	F: FnOnce() -> R,
{
	let saved = with_runtime(|rt| rt.take_observers());
	let result = f();
	with_runtime(|rt| rt.restore_observers(saved));
	result
}
