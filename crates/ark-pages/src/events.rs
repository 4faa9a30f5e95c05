//! Domain events.
//!
//! One channel per mutation category. Dialogs and actions send on them after
//! the server confirmed a change; stores listen to refetch what the change
//! made stale. Ordering holds within a channel only.

use ark_core::signals::EventChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadEvent {
	Renamed,
	Created,
	Moved,
	Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageEvent {
	Created,
	Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentEvent {
	Created,
	Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserEvent {
	LoggedOn,
	LoggedOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleEvent {
	Created,
	Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteEvent {
	Added,
	Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForumStructureEvent {
	SectionCreated,
	SubsectionCreated,
	SectionRenamed,
	SubsectionRenamed,
	SubsectionMoved,
}

/// All domain event channels of one application instance.
///
/// Cloning is cheap and the clones share receivers.
#[derive(Debug, Clone)]
pub struct DomainEvents {
	pub threads: EventChannel<ThreadEvent>,
	pub messages: EventChannel<MessageEvent>,
	pub comments: EventChannel<CommentEvent>,
	pub user: EventChannel<UserEvent>,
	pub articles: EventChannel<ArticleEvent>,
	pub favorites: EventChannel<FavoriteEvent>,
	pub forum_structure: EventChannel<ForumStructureEvent>,
}

impl DomainEvents {
	pub fn new() -> Self {
		Self {
			threads: EventChannel::new("threads"),
			messages: EventChannel::new("messages"),
			comments: EventChannel::new("comments"),
			user: EventChannel::new("user"),
			articles: EventChannel::new("articles"),
			favorites: EventChannel::new("favorites"),
			forum_structure: EventChannel::new("forum_structure"),
		}
	}
}

impl Default for DomainEvents {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;
	use std::rc::Rc;

	#[rstest]
	fn test_clones_share_channels() {
		let events = DomainEvents::new();
		let clone = events.clone();
		let seen = Rc::new(RefCell::new(Vec::new()));

		let seen_clone = seen.clone();
		clone.threads.connect(move |e| seen_clone.borrow_mut().push(*e));
		events.threads.send(&ThreadEvent::Moved);

		assert_eq!(*seen.borrow(), vec![ThreadEvent::Moved]);
	}

	#[rstest]
	fn test_channels_are_independent() {
		let events = DomainEvents::new();
		let count = Rc::new(RefCell::new(0));

		let count_clone = count.clone();
		events.messages.connect(move |_| *count_clone.borrow_mut() += 1);
		events.comments.send(&CommentEvent::Created);
		events.user.send(&UserEvent::LoggedOn);

		assert_eq!(*count.borrow(), 0);
		assert_eq!(events.forum_structure.name(), "forum_structure");
	}
}
