//! Comments page of an article version.

use std::rc::Rc;

use super::context::{HashWatch, StoreContext};
use super::forum_structure::ForumStructureState;
use super::resource::Resource;
use super::trigger::Trigger;
use crate::api::models::{ArticleInfo, CommentsQueryResult};
use crate::router::PageAddress;
use crate::views::{PageLink, page_window, total_pages};

pub struct ArticleCommentsState {
	pub comments: Resource<CommentsQueryResult>,
	structure: Rc<ForumStructureState>,
	hash_watch: HashWatch,
	ctx: StoreContext,
}

impl ArticleCommentsState {
	pub fn new(ctx: &StoreContext, structure: &Rc<ForumStructureState>) -> Rc<Self> {
		let state = Rc::new(Self {
			comments: Resource::loading("article_comments"),
			structure: structure.clone(),
			hash_watch: HashWatch::new(ctx.router()),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh)
			.on(&ctx.events.comments)
			.on_address(&ctx.address);
		Trigger::weak(&state, Self::on_hash_change).on(state.hash_watch.changes());

		state
	}

	/// The address carries no hash, so a hash change alone reloads here.
	/// A load already in flight scrolls once it completes.
	fn on_hash_change(&self) {
		let on_comments = matches!(self.ctx.current(), PageAddress::ArticleComments { .. });
		if on_comments && !self.comments.with_untracked(|state| state.is_loading()) {
			self.refresh();
		}
	}

	pub fn refresh(&self) {
		let PageAddress::ArticleComments {
			article_id, params, ..
		} = self.ctx.current()
		else {
			self.comments.suspend();
			return;
		};

		let api = self.ctx.api.clone();
		let page = params.page_or_first();
		let hash_watch = self.hash_watch.clone();
		self.comments.load_then(
			async move { api.comments(&article_id, page).await },
			move |state| {
				if state.is_success() {
					hash_watch.scroll_if_changed();
				}
			},
		);
	}

	/// The commented article, once loaded
	pub fn article_info(&self) -> Option<ArticleInfo> {
		self.comments
			.with(|state| state.value().map(|c| c.article_info.clone()))
	}

	pub fn total_pages(&self) -> u32 {
		let total_comments = self
			.comments
			.with(|state| state.value().map_or(0, |c| c.total_comments));
		total_pages(total_comments, self.structure.messages_per_page.get())
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
	use crate::events::CommentEvent;
	use crate::spawn::run_until_stalled;
	use crate::testing::{MockApi, article_info, comments, context, context_with_history, structure};
	use rstest::rstest;
	use serial_test::serial;

	fn setup(url: &str) -> (Rc<MockApi>, StoreContext, Rc<ArticleCommentsState>) {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		let ctx = context(&api, url);
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let state = ArticleCommentsState::new(&ctx, &structure);
		(api, ctx, state)
	}

	#[rstest]
	#[serial]
	fn test_loads_comments_page() {
		let (api, _ctx, state) = setup("/forum/ac/3/2?page=2");
		api.comments
			.set_ok(comments(article_info(3, "docs", "Install guide"), 25));
		run_until_stalled();

		assert_eq!(api.comments.args(), vec!["3 page 2"]);
		assert_eq!(state.article_info().map(|a| a.name), Some("Install guide".to_string()));
		assert_eq!(state.total_pages(), 3);
	}

	#[rstest]
	#[serial]
	fn test_comment_event_refetches_only_on_comments_page() {
		let (api, ctx, _state) = setup("/forum/ac/3/2");
		api.comments.set_ok(comments(article_info(3, "docs", "Guide"), 0));
		run_until_stalled();

		ctx.events.comments.send(&CommentEvent::Created);
		run_until_stalled();
		assert_eq!(api.comments.calls(), 2);

		ctx.go_to(&PageAddress::Articles);
		ctx.events.comments.send(&CommentEvent::Updated);
		run_until_stalled();
		assert_eq!(api.comments.calls(), 2);
	}

	#[rstest]
	#[serial]
	fn test_error_message_from_server() {
		let (api, _ctx, state) = setup("/forum/ac/3/2");
		api.comments.set_status(404, "Article not found");
		run_until_stalled();

		assert_eq!(state.comments.get_untracked().error(), Some("Article not found"));
		assert_eq!(state.total_pages(), 1);
	}

	#[rstest]
	#[serial]
	fn test_hash_change_reloads_and_scrolls() {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		api.comments.set_ok(comments(article_info(3, "docs", "Guide"), 12));
		let (ctx, history) = context_with_history(&api, "/forum/ac/3/2");
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let state = ArticleCommentsState::new(&ctx, &structure);
		run_until_stalled();
		assert_eq!(api.comments.calls(), 1);
		assert!(!state.hash_watch.is_pending());

		history.set_hash("m5");
		assert!(state.comments.get_untracked().is_loading());
		run_until_stalled();

		assert_eq!(api.comments.calls(), 2);
		assert!(!state.hash_watch.is_pending());
		assert!(state.comments.get_untracked().is_success());
	}

	#[rstest]
	#[serial]
	fn test_navigation_with_hash_fetches_once() {
		let (api, ctx, state) = setup("/articles");
		api.comments.set_ok(comments(article_info(3, "docs", "Guide"), 12));
		run_until_stalled();

		ctx.router().navigate_to_url("/forum/ac/3/2#m5").unwrap();
		run_until_stalled();

		assert_eq!(api.comments.calls(), 1);
		assert!(!state.hash_watch.is_pending());
	}

	#[rstest]
	#[serial]
	fn test_hash_change_elsewhere_does_not_fetch() {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		let (ctx, history) = context_with_history(&api, "/forum/t/5");
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let _state = ArticleCommentsState::new(&ctx, &structure);
		run_until_stalled();

		history.set_hash("m2");
		run_until_stalled();

		assert_eq!(api.comments.calls(), 0);
	}
}
