//! Side panel: latest threads and the user's favorite articles.

use std::collections::BTreeMap;
use std::rc::Rc;

use ark_core::reactive::Signal;

use super::context::StoreContext;
use super::forum_structure::ForumStructureState;
use super::resource::{Resource, ResourceState};
use super::trigger::Trigger;
use super::user::CurrentUserState;
use crate::api::models::{ArticleInfo, Articles, Thread, ThreadQueryResult};
use crate::api::{Ack, ThreadQuery};
use crate::events::FavoriteEvent;
use crate::spawn::spawn_task;
use crate::views::{group_threads_by_sub_section, thread_count_by_section};
use crate::warn_log;

pub struct SidePanelState {
	pub last_threads: Resource<ThreadQueryResult>,
	/// Latest threads by id; replaced only by a successful fetch
	pub last_thread_map: Signal<BTreeMap<i64, Thread>>,
	pub favorites: Resource<Articles>,
	/// Local favorites list. Toggling edits it before the server answers.
	pub favorite_articles: Signal<Vec<ArticleInfo>>,
	current_user: Rc<CurrentUserState>,
	structure: Rc<ForumStructureState>,
	ctx: StoreContext,
}

impl SidePanelState {
	pub fn new(
		ctx: &StoreContext,
		structure: &Rc<ForumStructureState>,
		current_user: &Rc<CurrentUserState>,
	) -> Rc<Self> {
		let state = Rc::new(Self {
			last_threads: Resource::loading("last_threads"),
			last_thread_map: Signal::new(BTreeMap::new()),
			favorites: Resource::loading("favorite_articles"),
			favorite_articles: Signal::new(Vec::new()),
			current_user: current_user.clone(),
			structure: structure.clone(),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh_last_threads)
			.on(&ctx.events.threads)
			.fire();
		Trigger::weak(&state, Self::refresh_favorites)
			.on(&ctx.events.user)
			.on(&ctx.events.favorites)
			.fire();

		state
	}

	pub fn refresh_last_threads(&self) {
		let api = self.ctx.api.clone();
		let last_thread_map = self.last_thread_map.clone();
		self.last_threads.load_then(
			async move { api.threads(ThreadQuery::All, 1).await },
			move |state| {
				if let ResourceState::Success(result) = state {
					last_thread_map.set(result.threads.iter().map(|t| (t.id, t.clone())).collect());
				}
			},
		);
	}

	/// Refetch favorites; anonymous users have none
	pub fn refresh_favorites(&self) {
		if !self.current_user.is_logged_on() {
			self.favorites.set(ResourceState::Success(Articles::default()));
			self.favorite_articles.set(Vec::new());
			return;
		}

		let api = self.ctx.api.clone();
		let favorite_articles = self.favorite_articles.clone();
		self.favorites.load_then(
			async move { api.favorite_articles().await },
			move |state| {
				if let ResourceState::Success(result) = state {
					favorite_articles.set(result.articles.clone());
				}
			},
		);
	}

	/// Favorites sorted by name
	pub fn ordered_favorites(&self) -> Vec<ArticleInfo> {
		let mut favorites = self.favorite_articles.get();
		favorites.sort_by(|a, b| a.name.cmp(&b.name));
		favorites
	}

	pub fn is_favorite(&self, article_id: i64) -> bool {
		self.favorite_articles
			.with(|favorites| favorites.iter().any(|a| a.id == article_id))
	}

	pub fn last_threads_by_sub_section(&self) -> BTreeMap<i64, Vec<Thread>> {
		self.last_thread_map
			.with(|threads| group_threads_by_sub_section(threads.values()))
	}

	pub fn thread_count_by_section(&self, section_id: i64) -> usize {
		thread_count_by_section(
			&self.last_threads_by_sub_section(),
			&self.structure.sub_sections_by_section(),
			section_id,
		)
	}

	/// Add or remove `article` from the favorites.
	///
	/// The local list changes immediately. The server is told afterwards and
	/// a confirmed change is announced on the favorites channel, which
	/// reloads the list. A failed request leaves the local edit in place.
	pub fn toggle_favorite_article(&self, article: &ArticleInfo) {
		let removing = self.is_favorite(article.id);
		self.favorite_articles.update(|favorites| {
			if removing {
				favorites.retain(|a| a.id != article.id);
			} else {
				favorites.push(article.clone());
			}
		});

		let api = self.ctx.api.clone();
		let favorites_channel = self.ctx.events.favorites.clone();
		let article_id = article.id;
		spawn_task(async move {
			let (result, event) = if removing {
				(api.remove_favorite_article(article_id).await, FavoriteEvent::Removed)
			} else {
				(api.add_favorite_article(article_id).await, FavoriteEvent::Added)
			};
			match result {
				Ok(Ack::Ok) => favorites_channel.send(&event),
				Ok(Ack::Rejected(body)) => {
					warn_log!("favorite toggle of article {} rejected: {}", article_id, body)
				}
				Err(e) => warn_log!("favorite toggle of article {} failed: {}", article_id, e),
			}
		});
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::api::StaticSession;
	use crate::config::AppConfig;
	use crate::events::{ThreadEvent, UserEvent};
	use crate::spawn::run_until_stalled;
	use crate::testing::{self, MockApi, article_info, articles, context, structure, thread, user};
	use rstest::rstest;
	use serial_test::serial;

	struct Fixture {
		api: Rc<MockApi>,
		ctx: StoreContext,
		current_user: Rc<CurrentUserState>,
		panel: Rc<SidePanelState>,
	}

	fn setup(logged_on: bool) -> Fixture {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		api.threads
			.set_ok(testing::threads(vec![thread(1, 10, 5), thread(2, 20, 7)], 2));
		api.favorite_articles.set_ok(articles(vec![
			article_info(2, "docs", "Zebra"),
			article_info(1, "docs", "Apple"),
		]));
		if logged_on {
			api.current_user.set_ok(Some(user(1, "ann")));
		}
		let ctx = context(&api, "/articles");
		let session = if logged_on {
			StaticSession::with("abc")
		} else {
			StaticSession::none()
		};
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let current_user = CurrentUserState::new(&ctx, &session);
		let panel = SidePanelState::new(&ctx, &structure, &current_user);
		run_until_stalled();
		Fixture {
			api,
			ctx,
			current_user,
			panel,
		}
	}

	#[rstest]
	#[serial]
	fn test_last_threads_load_regardless_of_address() {
		let f = setup(false);

		assert_eq!(f.api.threads.args(), vec!["All page 1"]);
		assert_eq!(f.panel.thread_count_by_section(1), 1);
		assert_eq!(f.panel.thread_count_by_section(2), 1);

		f.ctx.events.threads.send(&ThreadEvent::Created);
		run_until_stalled();
		assert_eq!(f.api.threads.calls(), 2);
	}

	#[rstest]
	#[serial]
	fn test_anonymous_has_no_favorites() {
		let f = setup(false);

		assert_eq!(f.api.favorite_articles.calls(), 0);
		assert_eq!(f.panel.favorites.value(), Some(Articles::default()));
		assert!(f.panel.ordered_favorites().is_empty());
	}

	#[rstest]
	#[serial]
	fn test_log_on_loads_favorites() {
		let f = setup(true);

		assert_eq!(f.api.favorite_articles.calls(), 1);
		let names: Vec<_> = f.panel.ordered_favorites().into_iter().map(|a| a.name).collect();
		assert_eq!(names, vec!["Apple", "Zebra"]);
	}

	#[rstest]
	#[serial]
	fn test_log_off_clears_favorites() {
		let f = setup(true);

		f.current_user.set_current_user(None);
		f.ctx.events.user.send(&UserEvent::LoggedOff);

		assert!(f.panel.favorite_articles.get_untracked().is_empty());
		assert!(!f.panel.is_favorite(1));
	}

	#[rstest]
	#[serial]
	fn test_toggle_is_immediate() {
		let f = setup(true);
		let article = article_info(5, "misc", "Notes");

		f.panel.toggle_favorite_article(&article);
		assert!(f.panel.is_favorite(5));

		f.panel.toggle_favorite_article(&article);
		assert!(!f.panel.is_favorite(5));
		assert!(f.panel.is_favorite(1));
	}

	#[rstest]
	#[serial]
	fn test_confirmed_toggle_reloads_favorites() {
		let f = setup(true);

		f.panel.toggle_favorite_article(&article_info(1, "docs", "Apple"));
		assert!(!f.panel.is_favorite(1));
		f.api
			.favorite_articles
			.set_ok(articles(vec![article_info(2, "docs", "Zebra")]));
		run_until_stalled();

		assert_eq!(f.api.remove_favorite_article.args(), vec!["1"]);
		assert_eq!(f.api.favorite_articles.calls(), 2);
		assert!(!f.panel.is_favorite(1));
	}

	#[rstest]
	#[serial]
	fn test_rejected_toggle_keeps_local_edit() {
		let f = setup(true);
		f.api
			.add_favorite_article
			.set_ok(Ack::Rejected("Not allowed".into()));

		f.panel.toggle_favorite_article(&article_info(9, "x", "Nine"));
		run_until_stalled();

		assert_eq!(f.api.favorite_articles.calls(), 1);
		assert!(f.panel.is_favorite(9));
	}
}
