//! Composition root.
//!
//! [`App`] builds the router and every page store once, in dependency order,
//! and keeps them alive for the lifetime of the page. In the browser
//! [`start`] wires the real services:
//!
//! ```ignore
//! #[wasm_bindgen(start)]
//! pub fn main() -> Result<(), JsValue> {
//!     ark_pages::app::start()
//! }
//! ```
//!
//! Natively the same constructor takes any [`ForumApi`] and
//! [`HistoryBackend`], which is how the integration tests drive it.

use std::rc::Rc;

use crate::api::{ForumApi, PasswordEncoder, SessionSource};
use crate::config::AppConfig;
use crate::events::DomainEvents;
use crate::info_log;
use crate::router::{CurrentAddress, HistoryBackend, Router};
use crate::state::dialogs::{
	ArticleEditorDialog, DeleteArticleDialog, DeleteThreadDialog, MoveSubsectionDialog,
	MoveThreadDialog, NewMessageState, NewSectionDialog, NewSubsectionDialog, NewThreadDialog,
	RenameSectionDialog, RenameSubsectionDialog, RenameThreadDialog, UpdateMessageDialog,
};
use crate::state::{
	ArticleCommentsState, ArticleSearchState, ArticlesPageState, BreadcrumbState,
	CurrentThreadState, CurrentUserState, DocumentTitleState, ForumSearchState,
	ForumStructureState, LoginState, PageSources, SearchBarState, SidePanelState, SignupState,
	StoreContext, ThreadListState, UserSessionsState, ViewArticleState,
};

/// Every dialog of the client
pub struct Dialogs {
	pub new_thread: Rc<NewThreadDialog>,
	pub rename_thread: Rc<RenameThreadDialog>,
	pub move_thread: Rc<MoveThreadDialog>,
	pub delete_thread: Rc<DeleteThreadDialog>,
	pub new_section: Rc<NewSectionDialog>,
	pub rename_section: Rc<RenameSectionDialog>,
	pub new_subsection: Rc<NewSubsectionDialog>,
	pub rename_subsection: Rc<RenameSubsectionDialog>,
	pub move_subsection: Rc<MoveSubsectionDialog>,
	pub update_message: Rc<UpdateMessageDialog>,
	pub article_editor: Rc<ArticleEditorDialog>,
	pub delete_article: Rc<DeleteArticleDialog>,
}

impl Dialogs {
	fn new(ctx: &StoreContext, structure: &Rc<ForumStructureState>) -> Self {
		Self {
			new_thread: NewThreadDialog::new(ctx),
			rename_thread: RenameThreadDialog::new(ctx),
			move_thread: MoveThreadDialog::new(ctx, structure),
			delete_thread: DeleteThreadDialog::new(ctx),
			new_section: NewSectionDialog::new(ctx),
			rename_section: RenameSectionDialog::new(ctx),
			new_subsection: NewSubsectionDialog::new(ctx),
			rename_subsection: RenameSubsectionDialog::new(ctx),
			move_subsection: MoveSubsectionDialog::new(ctx, structure),
			update_message: UpdateMessageDialog::new(ctx),
			article_editor: ArticleEditorDialog::new(ctx),
			delete_article: DeleteArticleDialog::new(ctx),
		}
	}
}

/// The running client: router, event channels and all page stores
pub struct App {
	pub config: AppConfig,
	pub ctx: StoreContext,

	pub structure: Rc<ForumStructureState>,
	pub current_user: Rc<CurrentUserState>,
	pub login: Rc<LoginState>,
	pub signup: Rc<SignupState>,
	pub user_sessions: Rc<UserSessionsState>,
	pub side_panel: Rc<SidePanelState>,

	pub thread_list: Rc<ThreadListState>,
	pub thread: Rc<CurrentThreadState>,
	pub new_message: Rc<NewMessageState>,
	pub comments: Rc<ArticleCommentsState>,
	pub view_article: Rc<ViewArticleState>,
	pub articles_page: Rc<ArticlesPageState>,

	pub forum_search: Rc<ForumSearchState>,
	pub article_search: Rc<ArticleSearchState>,
	pub search_bar: Rc<SearchBarState>,

	pub title: Rc<DocumentTitleState>,
	pub breadcrumb: Rc<BreadcrumbState>,

	pub dialogs: Dialogs,
}

impl App {
	/// Build all stores over the given services.
	///
	/// Stores that belong to the initial address start fetching right away.
	pub fn new(
		api: Rc<dyn ForumApi>,
		history: Rc<dyn HistoryBackend>,
		session: Rc<dyn SessionSource>,
		encoder: Rc<dyn PasswordEncoder>,
		config: AppConfig,
	) -> Self {
		let router = Router::new(history);
		let address = CurrentAddress::new(&router);
		let ctx = StoreContext::new(api, address, DomainEvents::new());
		info_log!("starting at {}", ctx.current().route());

		let structure = ForumStructureState::new(&ctx, &config);
		let current_user = CurrentUserState::new(&ctx, session.as_ref());
		let login = LoginState::new(&ctx, &current_user, encoder.clone());
		let signup = SignupState::new(&ctx, encoder);
		let user_sessions = UserSessionsState::new(&ctx, session);
		let side_panel = SidePanelState::new(&ctx, &structure, &current_user);

		let thread_list = ThreadListState::new(&ctx, &structure);
		let thread = CurrentThreadState::new(&ctx, &structure);
		let new_message = NewMessageState::new(&ctx, &thread);
		let comments = ArticleCommentsState::new(&ctx, &structure);
		let view_article = ViewArticleState::new(&ctx, &side_panel);
		let articles_page = ArticlesPageState::new(&ctx);

		let forum_search = ForumSearchState::new(&ctx, &structure);
		let article_search = ArticleSearchState::new(&ctx);
		let search_bar = SearchBarState::new(&ctx);

		let sources = PageSources {
			structure: structure.clone(),
			thread: thread.clone(),
			article: view_article.clone(),
			comments: comments.clone(),
		};
		let title = DocumentTitleState::new(&ctx, sources.clone(), &config.default_title);
		let breadcrumb = BreadcrumbState::new(&ctx, sources);

		let dialogs = Dialogs::new(&ctx, &structure);

		Self {
			config,
			ctx,
			structure,
			current_user,
			login,
			signup,
			user_sessions,
			side_panel,
			thread_list,
			thread,
			new_message,
			comments,
			view_article,
			articles_page,
			forum_search,
			article_search,
			search_bar,
			title,
			breadcrumb,
			dialogs,
		}
	}

	pub fn router(&self) -> &Router {
		self.ctx.router()
	}

	pub fn events(&self) -> &DomainEvents {
		&self.ctx.events
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::{start, with_app};

#[cfg(target_arch = "wasm32")]
mod browser {
	use std::cell::RefCell;
	use std::rc::Rc;

	use ark_core::reactive::set_scheduler;
	use wasm_bindgen::JsValue;

	use super::App;
	use crate::api::{DocumentCookieSession, HttpForumApi, PlainPassword, ReqwestTransport};
	use crate::config::AppConfig;
	use crate::router::BrowserHistory;
	use crate::warn_log;

	/// Element holding the inline JSON configuration
	pub const CONFIG_ELEMENT_ID: &str = "ark-config";

	thread_local! {
		static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
	}

	/// Start the client in the current page.
	///
	/// Calling it again replaces the running instance.
	pub fn start() -> Result<(), JsValue> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		set_scheduler(|task| wasm_bindgen_futures::spawn_local(async move { task() }));

		let config = AppConfig::from_document(CONFIG_ELEMENT_ID).unwrap_or_else(|e| {
			warn_log!("using default configuration: {}", e);
			AppConfig::default()
		});

		let history =
			BrowserHistory::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
		let api = HttpForumApi::new(ReqwestTransport::new(config.api_base_url.clone()));
		let session = DocumentCookieSession::new(config.session_cookie.clone());

		let app = App::new(
			Rc::new(api),
			Rc::new(history),
			Rc::new(session),
			Rc::new(PlainPassword),
			config,
		);
		APP.with(|slot| *slot.borrow_mut() = Some(Rc::new(app)));
		Ok(())
	}

	/// Run `f` with the running client, if [`start`] has been called
	pub fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
		let app = APP.with(|slot| slot.borrow().clone())?;
		Some(f(&app))
	}
}
