//! Thread list of the main, section and subsection pages.

use std::collections::BTreeMap;
use std::rc::Rc;

use ark_core::reactive::Signal;

use super::context::StoreContext;
use super::forum_structure::ForumStructureState;
use super::resource::{Resource, ResourceState};
use super::trigger::Trigger;
use crate::api::ThreadQuery;
use crate::api::models::{Thread, ThreadQueryResult};
use crate::router::PageAddress;
use crate::views::{PageLink, group_threads_by_sub_section, page_window, thread_count_by_section};

/// Which threads `address` lists, and on which page
pub fn thread_query(address: &PageAddress) -> Option<(ThreadQuery, u32)> {
	match address {
		PageAddress::Root { params } => Some((ThreadQuery::All, params.page_or_first())),
		PageAddress::Section { section_id, params } => Some((
			ThreadQuery::Section(section_id.clone()),
			params.page_or_first(),
		)),
		PageAddress::SubSection {
			sub_section_id,
			params,
		} => Some((
			ThreadQuery::SubSection(sub_section_id.clone()),
			params.page_or_first(),
		)),
		_ => None,
	}
}

pub struct ThreadListState {
	pub threads: Resource<ThreadQueryResult>,
	/// Threads of the current page by id; replaced only by a successful fetch
	pub page_threads: Signal<BTreeMap<i64, Thread>>,
	/// Threads matching the query across all pages
	pub total_threads: Signal<u32>,
	structure: Rc<ForumStructureState>,
	ctx: StoreContext,
}

impl ThreadListState {
	pub fn new(ctx: &StoreContext, structure: &Rc<ForumStructureState>) -> Rc<Self> {
		let state = Rc::new(Self {
			threads: Resource::loading("thread_list"),
			page_threads: Signal::new(BTreeMap::new()),
			total_threads: Signal::new(0),
			structure: structure.clone(),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh)
			.on(&ctx.events.threads)
			.on_address(&ctx.address);

		state
	}

	pub fn refresh(&self) {
		let Some((query, page)) = thread_query(&self.ctx.current()) else {
			self.threads.suspend();
			return;
		};

		let api = self.ctx.api.clone();
		let page_threads = self.page_threads.clone();
		let total_threads = self.total_threads.clone();
		self.threads.load_then(
			async move { api.threads(query, page).await },
			move |state| {
				if let ResourceState::Success(result) = state {
					page_threads.set(result.threads.iter().map(|t| (t.id, t.clone())).collect());
					total_threads.set(result.count);
				}
			},
		);
	}

	/// Threads of the current page grouped by subsection, newest first
	pub fn threads_by_sub_section(&self) -> BTreeMap<i64, Vec<Thread>> {
		self.page_threads
			.with(|threads| group_threads_by_sub_section(threads.values()))
	}

	/// Threads of the current page that belong to `section_id`
	pub fn thread_count_by_section(&self, section_id: i64) -> usize {
		thread_count_by_section(
			&self.threads_by_sub_section(),
			&self.structure.sub_sections_by_section(),
			section_id,
		)
	}

	pub fn total_pages(&self) -> u32 {
		crate::views::total_pages(self.total_threads.get(), self.structure.threads_per_page.get())
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
	use crate::events::ThreadEvent;
	use crate::spawn::run_until_stalled;
	use crate::testing::{self, MockApi, context, structure, thread};
	use rstest::rstest;
	use serial_test::serial;

	fn setup(url: &str) -> (Rc<MockApi>, StoreContext, Rc<ThreadListState>) {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		let ctx = context(&api, url);
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let state = ThreadListState::new(&ctx, &structure);
		(api, ctx, state)
	}

	#[rstest]
	#[case(PageAddress::root(), Some((ThreadQuery::All, 1)))]
	#[case(PageAddress::section("2").with_page(3), Some((ThreadQuery::Section("2".into()), 3)))]
	#[case(PageAddress::sub_section("10"), Some((ThreadQuery::SubSection("10".into()), 1)))]
	#[case(PageAddress::thread("1"), None)]
	#[case(PageAddress::Articles, None)]
	fn test_thread_query(#[case] address: PageAddress, #[case] expected: Option<(ThreadQuery, u32)>) {
		assert_eq!(thread_query(&address), expected);
	}

	#[rstest]
	#[serial]
	fn test_loads_for_root() {
		let (api, _ctx, state) = setup("/?page=2");
		api.threads
			.set_ok(testing::threads(vec![thread(1, 10, 5), thread(2, 20, 9)], 42));
		run_until_stalled();

		assert_eq!(api.threads.args(), vec!["All page 2"]);
		assert_eq!(state.page_threads.get_untracked().len(), 2);
		assert_eq!(state.total_threads.get_untracked(), 42);
		assert_eq!(state.total_pages(), 3);
	}

	#[rstest]
	#[serial]
	fn test_irrelevant_address_does_not_fetch() {
		let (api, ctx, state) = setup("/articles");
		run_until_stalled();

		assert_eq!(api.threads.calls(), 0);
		assert!(state.threads.get_untracked().is_loading());

		ctx.go_to(&PageAddress::section("1"));
		api.threads.set_ok(testing::threads(vec![thread(1, 10, 5)], 1));
		run_until_stalled();
		assert_eq!(api.threads.args(), vec!["Section(\"1\") page 1"]);
	}

	#[rstest]
	#[serial]
	fn test_failure_keeps_previous_page() {
		let (api, ctx, state) = setup("/");
		api.threads.set_ok(testing::threads(vec![thread(1, 10, 5)], 1));
		run_until_stalled();

		api.threads.set_status(500, "Database unavailable");
		ctx.events.threads.send(&ThreadEvent::Created);
		run_until_stalled();

		assert_eq!(
			state.threads.get_untracked(),
			ResourceState::Error("Database unavailable".to_string())
		);
		assert_eq!(state.page_threads.get_untracked().len(), 1);
	}

	#[rstest]
	#[serial]
	fn test_grouping_and_section_count() {
		let (api, _ctx, state) = setup("/");
		api.threads.set_ok(testing::threads(
			vec![thread(1, 10, 5), thread(2, 11, 9), thread(3, 10, 7), thread(4, 20, 1)],
			4,
		));
		run_until_stalled();

		let groups = state.threads_by_sub_section();
		let ids: Vec<_> = groups[&10].iter().map(|t| t.id).collect();
		assert_eq!(ids, vec![3, 1]);
		assert_eq!(state.thread_count_by_section(1), 3);
		assert_eq!(state.thread_count_by_section(2), 1);
	}

	#[rstest]
	#[serial]
	fn test_empty_list_has_one_page() {
		let (api, _ctx, state) = setup("/");
		api.threads.set_ok(testing::threads(Vec::new(), 0));
		run_until_stalled();

		assert_eq!(state.total_pages(), 1);
		assert!(state.page_links().is_empty());
	}
}
