//! Core channel implementation

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type ReceiverFn<E> = Rc<dyn Fn(&E)>;
type PredicateFn<E> = Rc<dyn Fn(&E) -> bool>;

/// Handle returned by [`EventChannel::connect`], used to disconnect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiverId(u64);

struct ReceiverInfo<E: 'static> {
	id: ReceiverId,
	receiver: ReceiverFn<E>,
	predicate: Option<PredicateFn<E>>,
}

impl<E: 'static> Clone for ReceiverInfo<E> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			receiver: Rc::clone(&self.receiver),
			predicate: self.predicate.clone(),
		}
	}
}

/// A named broadcast channel.
///
/// Clones share the same receiver list.
pub struct EventChannel<E: 'static> {
	name: &'static str,
	receivers: Rc<RefCell<Vec<ReceiverInfo<E>>>>,
	next_id: Rc<Cell<u64>>,
}

impl<E: 'static> EventChannel<E> {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			receivers: Rc::new(RefCell::new(Vec::new())),
			next_id: Rc::new(Cell::new(0)),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Connect a receiver for every event on this channel
	pub fn connect<F>(&self, receiver: F) -> ReceiverId
	where
		F: Fn(&E) + 'static,
	{
		self.connect_with_predicate(receiver, None::<fn(&E) -> bool>)
	}

	/// Connect a receiver that only sees events matching `predicate`
	pub fn connect_filtered<P, F>(&self, predicate: P, receiver: F) -> ReceiverId
	where
		P: Fn(&E) -> bool + 'static,
		F: Fn(&E) + 'static,
	{
		self.connect_with_predicate(receiver, Some(predicate))
	}

	fn connect_with_predicate<F, P>(&self, receiver: F, predicate: Option<P>) -> ReceiverId
	where
		F: Fn(&E) + 'static,
		P: Fn(&E) -> bool + 'static,
	{
		let id = ReceiverId(self.next_id.get());
		self.next_id.set(id.0 + 1);

		self.receivers.borrow_mut().push(ReceiverInfo {
			id,
			receiver: Rc::new(receiver),
			predicate: predicate.map(|p| Rc::new(p) as PredicateFn<E>),
		});

		id
	}

	/// Returns whether a receiver was removed
	pub fn disconnect(&self, id: ReceiverId) -> bool {
		let mut receivers = self.receivers.borrow_mut();
		let before = receivers.len();
		receivers.retain(|r| r.id != id);
		receivers.len() != before
	}

	pub fn disconnect_all(&self) {
		self.receivers.borrow_mut().clear();
	}

	pub fn receiver_count(&self) -> usize {
		self.receivers.borrow().len()
	}

	/// Deliver `event` to the receivers connected right now.
	///
	/// Receivers may connect, disconnect or send again while being called;
	/// those changes apply from the next `send`. A receiver disconnected by an
	/// earlier receiver of the same send is skipped.
	pub fn send(&self, event: &E) {
		let snapshot: Vec<ReceiverInfo<E>> = self.receivers.borrow().clone();
		tracing::trace!(channel = self.name, receivers = snapshot.len(), "sending event");

		for info in snapshot {
			if !self.is_connected(info.id) {
				continue;
			}
			if let Some(predicate) = &info.predicate
				&& !predicate(event)
			{
				continue;
			}
			(info.receiver)(event);
		}
	}

	fn is_connected(&self, id: ReceiverId) -> bool {
		self.receivers.borrow().iter().any(|r| r.id == id)
	}
}

impl<E: 'static> Clone for EventChannel<E> {
	fn clone(&self) -> Self {
		Self {
			name: self.name,
			receivers: Rc::clone(&self.receivers),
			next_id: Rc::clone(&self.next_id),
		}
	}
}

impl<E: 'static> fmt::Debug for EventChannel<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventChannel")
			.field("name", &self.name)
			.field("receivers", &self.receiver_count())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum TestEvent {
		Created,
		Deleted,
	}

	fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn Fn(&TestEvent)>) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let log_clone = log.clone();
		let make = move |tag: &'static str| -> Box<dyn Fn(&TestEvent)> {
			let log = log_clone.clone();
			Box::new(move |e: &TestEvent| log.borrow_mut().push(format!("{tag}:{e:?}")))
		};
		(log, make)
	}

	#[rstest]
	fn test_send_reaches_receivers_in_connection_order() {
		let channel = EventChannel::new("test");
		let (log, make) = recorder();

		channel.connect(make("first"));
		channel.connect(make("second"));
		channel.send(&TestEvent::Created);
		channel.send(&TestEvent::Deleted);

		assert_eq!(
			*log.borrow(),
			vec![
				"first:Created",
				"second:Created",
				"first:Deleted",
				"second:Deleted"
			]
		);
	}

	#[rstest]
	fn test_late_receiver_sees_no_replay() {
		let channel = EventChannel::new("test");
		let (log, make) = recorder();

		channel.send(&TestEvent::Created);
		channel.connect(make("late"));

		assert!(log.borrow().is_empty());
	}

	#[rstest]
	fn test_disconnect() {
		let channel = EventChannel::new("test");
		let (log, make) = recorder();

		let id = channel.connect(make("gone"));
		channel.connect(make("kept"));

		assert!(channel.disconnect(id));
		assert!(!channel.disconnect(id));
		channel.send(&TestEvent::Created);

		assert_eq!(*log.borrow(), vec!["kept:Created"]);
		assert_eq!(channel.receiver_count(), 1);
	}

	#[rstest]
	#[case(TestEvent::Created, 0)]
	#[case(TestEvent::Deleted, 1)]
	fn test_filtered_receiver(#[case] event: TestEvent, #[case] expected: usize) {
		let channel = EventChannel::new("test");
		let (log, make) = recorder();

		channel.connect_filtered(|e| *e == TestEvent::Deleted, make("filtered"));
		channel.send(&event);

		assert_eq!(log.borrow().len(), expected);
	}

	#[rstest]
	fn test_reentrant_send_and_connect() {
		let channel: EventChannel<TestEvent> = EventChannel::new("test");
		let log = Rc::new(RefCell::new(Vec::new()));

		let inner = channel.clone();
		let inner_log = log.clone();
		channel.connect(move |e| {
			inner_log.borrow_mut().push(*e);
			if *e == TestEvent::Created {
				inner.send(&TestEvent::Deleted);
				let late_log = inner_log.clone();
				inner.connect(move |e| late_log.borrow_mut().push(*e));
			}
		});

		channel.send(&TestEvent::Created);

		assert_eq!(*log.borrow(), vec![TestEvent::Created, TestEvent::Deleted]);
		assert_eq!(channel.receiver_count(), 2);
	}

	#[rstest]
	fn test_receiver_disconnected_mid_send_is_skipped() {
		let channel: EventChannel<TestEvent> = EventChannel::new("test");
		let (log, make) = recorder();

		let victim = Rc::new(Cell::new(None));
		let victim_clone = victim.clone();
		let handle = channel.clone();
		channel.connect(move |_| {
			if let Some(id) = victim_clone.get() {
				handle.disconnect(id);
			}
		});
		victim.set(Some(channel.connect(make("victim"))));

		channel.send(&TestEvent::Created);

		assert!(log.borrow().is_empty());
	}

	#[rstest]
	fn test_clones_share_receivers() {
		let channel = EventChannel::new("shared");
		let clone = channel.clone();
		let (log, make) = recorder();

		clone.connect(make("via-clone"));
		channel.send(&TestEvent::Created);

		assert_eq!(*log.borrow(), vec!["via-clone:Created"]);
		assert_eq!(clone.name(), "shared");
	}
}
