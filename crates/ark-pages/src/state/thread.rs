//! The thread page: thread record and one page of messages.

use std::rc::Rc;

use ark_core::reactive::Signal;

use super::context::{HashWatch, StoreContext};
use super::forum_structure::ForumStructureState;
use super::resource::{Resource, ResourceState};
use super::trigger::Trigger;
use crate::api::models::{Message, MessagesQueryResult, Thread};
use crate::events::ThreadEvent;
use crate::router::PageAddress;
use crate::views::{PageLink, page_window, total_pages};

pub struct CurrentThreadState {
	/// `Success(None)` means the thread does not exist
	pub messages: Resource<Option<MessagesQueryResult>>,
	/// Thread of the last successful load
	pub current_thread: Signal<Option<Thread>>,
	pub page_messages: Signal<Vec<Message>>,
	structure: Rc<ForumStructureState>,
	hash_watch: HashWatch,
	ctx: StoreContext,
}

impl CurrentThreadState {
	pub fn new(ctx: &StoreContext, structure: &Rc<ForumStructureState>) -> Rc<Self> {
		let state = Rc::new(Self {
			messages: Resource::loading("current_thread"),
			current_thread: Signal::new(None),
			page_messages: Signal::new(Vec::new()),
			structure: structure.clone(),
			hash_watch: HashWatch::new(ctx.router()),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh)
			.on(&ctx.events.messages)
			.on_filtered(&ctx.events.threads, |e| *e == ThreadEvent::Moved)
			.on_address(&ctx.address);

		state
	}

	pub fn refresh(&self) {
		let PageAddress::Thread {
			thread_id, params, ..
		} = self.ctx.current()
		else {
			self.messages.suspend();
			return;
		};

		let api = self.ctx.api.clone();
		let page = params.page_or_first();
		let current_thread = self.current_thread.clone();
		let page_messages = self.page_messages.clone();
		let hash_watch = self.hash_watch.clone();
		let ctx = self.ctx.clone();

		self.messages.load_then(
			async move { api.messages(&thread_id, page).await },
			move |state| match state {
				ResourceState::Success(Some(result)) => {
					current_thread.set(Some(result.thread.clone()));
					page_messages.set(result.messages.clone());
					hash_watch.scroll_if_changed();
				}
				ResourceState::Success(None) => {
					current_thread.set(None);
					page_messages.set(Vec::new());
					ctx.go_to(&PageAddress::NotFound);
				}
				_ => {}
			},
		);
	}

	pub fn total_pages(&self) -> u32 {
		let total_messages = self
			.current_thread
			.with(|thread| thread.as_ref().map_or(0, |t| t.total_messages));
		total_pages(total_messages, self.structure.messages_per_page.get())
	}

	pub fn page_links(&self) -> Vec<PageLink> {
		let current = self.ctx.address.address().page_or_first().unwrap_or(1);
		page_window(current, self.total_pages(), true, true)
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::config::AppConfig;
	use crate::events::MessageEvent;
	use crate::spawn::run_until_stalled;
	use crate::testing::{MockApi, context, messages, structure, thread};
	use rstest::rstest;
	use serial_test::serial;

	fn setup(url: &str) -> (Rc<MockApi>, StoreContext, Rc<CurrentThreadState>) {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		let ctx = context(&api, url);
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let state = CurrentThreadState::new(&ctx, &structure);
		(api, ctx, state)
	}

	#[rstest]
	#[serial]
	fn test_loads_requested_page() {
		let (api, _ctx, state) = setup("/forum/t/7?page=3#m25");
		api.messages.set_ok(Some(messages(thread(7, 10, 0), &[21, 22])));
		run_until_stalled();

		assert_eq!(api.messages.args(), vec!["7 page 3"]);
		assert_eq!(state.current_thread.get_untracked().map(|t| t.id), Some(7));
		assert_eq!(state.page_messages.get_untracked().len(), 2);
		assert!(!state.hash_watch.is_pending());
	}

	#[rstest]
	#[serial]
	fn test_missing_thread_goes_to_not_found() {
		let (api, ctx, state) = setup("/forum/t/404404");
		api.messages.set_ok(None);
		run_until_stalled();

		assert_eq!(ctx.current(), PageAddress::NotFound);
		assert_eq!(state.current_thread.get_untracked(), None);
		assert!(state.page_messages.get_untracked().is_empty());
	}

	#[rstest]
	#[serial]
	fn test_message_event_and_move_refetch() {
		let (api, ctx, _state) = setup("/forum/t/7");
		api.messages.set_ok(Some(messages(thread(7, 10, 0), &[1])));
		run_until_stalled();

		ctx.events.messages.send(&MessageEvent::Created);
		ctx.events.threads.send(&ThreadEvent::Renamed);
		ctx.events.threads.send(&ThreadEvent::Moved);
		run_until_stalled();

		assert_eq!(api.messages.calls(), 3);
	}

	#[rstest]
	#[serial]
	fn test_leaving_thread_discards_pending_load() {
		let (api, ctx, state) = setup("/forum/t/7");
		let reply = api.messages.defer();
		run_until_stalled();

		ctx.go_to(&PageAddress::Articles);
		reply.send(Ok(None)).unwrap();
		run_until_stalled();

		assert_eq!(ctx.current(), PageAddress::Articles);
		assert!(state.messages.get_untracked().is_loading());
	}

	#[rstest]
	#[serial]
	fn test_total_pages_from_message_count() {
		let (api, _ctx, state) = setup("/forum/t/7");
		let mut long_thread = thread(7, 10, 0);
		long_thread.total_messages = 31;
		api.messages.set_ok(Some(messages(long_thread, &[1])));
		run_until_stalled();

		assert_eq!(state.total_pages(), 4);
		assert_eq!(state.page_links().last(), Some(&PageLink::Next(2)));
	}
}
