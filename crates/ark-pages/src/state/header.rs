//! Page chrome: document title and breadcrumb.
//!
//! Both are derived on demand from whatever the page stores have loaded.
//! Records that belong to another page than the current address (a thread
//! still cached from the previous visit) are ignored.

use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use ark_core::reactive::Effect;

use super::article::ViewArticleState;
use super::comments::ArticleCommentsState;
use super::context::StoreContext;
use super::forum_structure::ForumStructureState;
use super::thread::CurrentThreadState;
use crate::router::PageAddress;
use crate::views::{Crumb, PageData, breadcrumb, page_title};

/// The stores page chrome reads from
#[derive(Clone)]
pub struct PageSources {
	pub structure: Rc<ForumStructureState>,
	pub thread: Rc<CurrentThreadState>,
	pub article: Rc<ViewArticleState>,
	pub comments: Rc<ArticleCommentsState>,
}

impl PageSources {
	/// Run `f` with the current address and the data loaded for it
	fn with_page_data<R>(&self, address: &PageAddress, f: impl FnOnce(&PageData<'_>) -> R) -> R {
		let thread = self.thread.current_thread.get().filter(|t| match address {
			PageAddress::Thread { thread_id, .. } => t.id.to_string() == *thread_id,
			_ => false,
		});
		let article = self.article.article_info().filter(|a| match address {
			PageAddress::Article { article_id } | PageAddress::ArchivedArticle { article_id, .. } => {
				a.id.to_string() == *article_id
			}
			_ => false,
		});
		let comments_article = self.comments.article_info().filter(|a| match address {
			PageAddress::ArticleComments { article_id, .. } => a.id.to_string() == *article_id,
			_ => false,
		});

		self.structure.sections.with(|sections| {
			self.structure.sub_sections.with(|sub_sections| {
				let data = PageData::new(sections, sub_sections)
					.with_thread(thread.as_ref())
					.with_article(article.as_ref())
					.with_comments_article(comments_article.as_ref());
				f(&data)
			})
		})
	}
}

pub struct DocumentTitleState {
	sources: PageSources,
	default_title: String,
	ctx: StoreContext,
	#[cfg(target_arch = "wasm32")]
	_apply: Effect,
}

impl DocumentTitleState {
	/// On wasm the title is also kept applied to `document.title`
	pub fn new(ctx: &StoreContext, sources: PageSources, default_title: &str) -> Rc<Self> {
		#[cfg(target_arch = "wasm32")]
		let apply = {
			let sources = sources.clone();
			let ctx = ctx.clone();
			let default_title = default_title.to_string();
			Effect::new(move || {
				let title = document_title(&sources, &ctx, &default_title);
				if let Some(document) = web_sys::window().and_then(|w| w.document()) {
					document.set_title(&title);
				}
			})
		};

		Rc::new(Self {
			sources,
			default_title: default_title.to_string(),
			ctx: ctx.clone(),
			#[cfg(target_arch = "wasm32")]
			_apply: apply,
		})
	}

	/// Title of the current page
	pub fn title(&self) -> String {
		document_title(&self.sources, &self.ctx, &self.default_title)
	}
}

fn document_title(sources: &PageSources, ctx: &StoreContext, default_title: &str) -> String {
	let address = ctx.address.address();
	sources.with_page_data(&address, |data| page_title(&address, data, default_title))
}

pub struct BreadcrumbState {
	sources: PageSources,
	ctx: StoreContext,
}

impl BreadcrumbState {
	pub fn new(ctx: &StoreContext, sources: PageSources) -> Rc<Self> {
		Rc::new(Self {
			sources,
			ctx: ctx.clone(),
		})
	}

	pub fn crumbs(&self) -> Vec<Crumb> {
		let address = self.ctx.address.address();
		self.sources
			.with_page_data(&address, |data| breadcrumb(&address, data))
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::api::StaticSession;
	use crate::config::AppConfig;
	use crate::spawn::run_until_stalled;
	use crate::state::{CurrentUserState, SidePanelState};
	use crate::testing::{
		self, MockApi, article, article_info, comments, context, messages, structure, thread,
	};
	use crate::views::{ARTICLES_LABEL, COMMENTS_LABEL, MAIN_LABEL};
	use rstest::rstest;
	use serial_test::serial;

	fn setup(url: &str) -> (Rc<MockApi>, StoreContext, PageSources) {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		api.threads.set_ok(testing::threads(Vec::new(), 0));
		api.messages.set_ok(Some(messages(thread(7, 10, 0), &[1])));
		api.article.set_ok(article(3, "Install guide", 1, 1));
		api.comments
			.set_ok(comments(article_info(3, "docs", "Install guide"), 0));
		let ctx = context(&api, url);
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let current_user = CurrentUserState::new(&ctx, &StaticSession::none());
		let side_panel = SidePanelState::new(&ctx, &structure, &current_user);
		let sources = PageSources {
			thread: CurrentThreadState::new(&ctx, &structure),
			article: ViewArticleState::new(&ctx, &side_panel),
			comments: ArticleCommentsState::new(&ctx, &structure),
			structure,
		};
		run_until_stalled();
		(api, ctx, sources)
	}

	#[rstest]
	#[case("/", "The Ark")]
	#[case("/forum/s/1", "General")]
	#[case("/forum/ss/20", "Rust")]
	#[case("/forum/t/7", "Thread 7")]
	#[case("/article/a/3", "Install guide")]
	#[case("/forum/ac/3/1", "Comments on the article Install guide")]
	#[case("/nowhere", "Not found")]
	#[serial]
	fn test_title(#[case] url: &str, #[case] expected: &str) {
		let (_api, ctx, sources) = setup(url);
		let state = DocumentTitleState::new(&ctx, sources, "The Ark");

		assert_eq!(state.title(), expected);
	}

	#[rstest]
	#[serial]
	fn test_title_ignores_thread_of_previous_page() {
		let (api, ctx, sources) = setup("/forum/t/7");
		let state = DocumentTitleState::new(&ctx, sources, "The Ark");
		let _pending = api.messages.defer();

		ctx.go_to(&PageAddress::thread("8"));
		run_until_stalled();

		assert_eq!(state.title(), "The Ark");
	}

	#[rstest]
	#[serial]
	fn test_breadcrumb_for_thread() {
		let (_api, ctx, sources) = setup("/forum/t/7");
		let state = BreadcrumbState::new(&ctx, sources);

		let labels: Vec<_> = state.crumbs().into_iter().map(|c| c.label).collect();
		assert_eq!(labels, vec![MAIN_LABEL, "General", "Announcements", "Thread 7"]);
	}

	#[rstest]
	#[serial]
	fn test_breadcrumb_for_comments() {
		let (_api, ctx, sources) = setup("/forum/ac/3/1");
		let state = BreadcrumbState::new(&ctx, sources);

		let labels: Vec<_> = state.crumbs().into_iter().map(|c| c.label).collect();
		assert_eq!(labels, vec![MAIN_LABEL, ARTICLES_LABEL, "Install guide", COMMENTS_LABEL]);
	}
}
