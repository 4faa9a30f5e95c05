//! Test support: a scripted [`ForumApi`] and sample records.
//!
//! Only compiled for this crate's unit tests or with the `testing` feature.
//!
//! Every endpoint is a [`Reply`]: it answers with a fixed result, or, after
//! [`Reply::defer`], waits for the test to send one. That makes fetch
//! completion order fully controllable:
//!
//! ```ignore
//! let api = MockApi::new();
//! let first = api.threads.defer();
//! let second = api.threads.defer();
//! // ... trigger two refreshes ...
//! second.send(Ok(later)).unwrap();
//! first.send(Ok(earlier)).unwrap();
//! run_until_stalled();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::api::models::{
	Article, ArticleInfo, ArticleSearchResults, ArticleVersion, ArticleVisibility, Articles,
	CommentsQueryResult, ForumStructure, Message, MessageSearchResults, MessagesQueryResult,
	Section, SubSection, Thread, ThreadQueryResult, User, UserSession, UserSessions,
};
use crate::api::requests::{
	CreateArticle, CreateThread, MoveSubsection, MoveThread, NewSection, NewSubsection,
	PostComment, PostMessage, RenameSection, RenameSubsection, RenameThread, UpdateArticle,
	UpdateComment, UpdateMessage,
};
use crate::api::{Ack, FetchError, ForumApi, SignOnOutcome, SignUpOutcome, ThreadQuery};
use crate::events::DomainEvents;
use crate::router::{CurrentAddress, MemoryHistory, Router};
use crate::state::StoreContext;

type Answer<T> = Result<T, FetchError>;

/// One scripted endpoint
pub struct Reply<T> {
	ready: RefCell<Answer<T>>,
	pending: RefCell<VecDeque<oneshot::Receiver<Answer<T>>>>,
	calls: Cell<u32>,
	args: RefCell<Vec<String>>,
}

impl<T: Clone> Reply<T> {
	fn new(ready: Answer<T>) -> Self {
		Self {
			ready: RefCell::new(ready),
			pending: RefCell::new(VecDeque::new()),
			calls: Cell::new(0),
			args: RefCell::new(Vec::new()),
		}
	}

	fn unset() -> Self {
		Self::new(Err(FetchError::Network("no reply scripted".to_string())))
	}

	/// Answer every later call with `result`
	pub fn set(&self, result: Answer<T>) {
		*self.ready.borrow_mut() = result;
	}

	pub fn set_ok(&self, value: T) {
		self.set(Ok(value));
	}

	pub fn set_status(&self, status: u16, body: &str) {
		self.set(Err(FetchError::Status {
			status,
			body: body.to_string(),
		}));
	}

	/// Make the next unanswered call wait for the returned sender
	pub fn defer(&self) -> oneshot::Sender<Answer<T>> {
		let (tx, rx) = oneshot::channel();
		self.pending.borrow_mut().push_back(rx);
		tx
	}

	pub fn calls(&self) -> u32 {
		self.calls.get()
	}

	/// Debug rendering of the arguments of every call so far
	pub fn args(&self) -> Vec<String> {
		self.args.borrow().clone()
	}

	pub fn last_arg(&self) -> Option<String> {
		self.args.borrow().last().cloned()
	}

	async fn call(&self, arg: String) -> Answer<T> {
		self.calls.set(self.calls.get() + 1);
		self.args.borrow_mut().push(arg);

		let pending = self.pending.borrow_mut().pop_front();
		match pending {
			Some(rx) => rx
				.await
				.unwrap_or_else(|_| Err(FetchError::Network("reply dropped".to_string()))),
			None => self.ready.borrow().clone(),
		}
	}
}

/// [`ForumApi`] answering from per-endpoint scripts.
///
/// Queries fail until scripted; mutations answer [`Ack::Ok`].
pub struct MockApi {
	pub structure: Reply<ForumStructure>,
	pub threads: Reply<ThreadQueryResult>,
	pub current_user: Reply<Option<User>>,
	pub messages: Reply<Option<MessagesQueryResult>>,
	pub comments: Reply<CommentsQueryResult>,
	pub search_messages: Reply<MessageSearchResults>,
	pub search_articles: Reply<ArticleSearchResults>,
	pub article: Reply<Article>,
	pub articles: Reply<Articles>,
	pub favorite_articles: Reply<Articles>,
	pub user_sessions: Reply<UserSessions>,
	pub remove_user_session: Reply<UserSessions>,
	pub logout: Reply<Ack>,
	pub sign_on: Reply<SignOnOutcome>,
	pub sign_up: Reply<SignUpOutcome>,
	pub post_message: Reply<Ack>,
	pub update_message: Reply<Ack>,
	pub post_comment: Reply<Ack>,
	pub update_comment: Reply<Ack>,
	pub create_thread: Reply<Ack>,
	pub rename_thread: Reply<Ack>,
	pub move_thread: Reply<Ack>,
	pub delete_thread: Reply<Ack>,
	pub create_section: Reply<Ack>,
	pub rename_section: Reply<Ack>,
	pub create_subsection: Reply<Ack>,
	pub rename_subsection: Reply<Ack>,
	pub move_subsection: Reply<Ack>,
	pub create_article: Reply<Ack>,
	pub update_article: Reply<Ack>,
	pub delete_article: Reply<Ack>,
	pub add_favorite_article: Reply<Ack>,
	pub remove_favorite_article: Reply<Ack>,
}

impl MockApi {
	#[allow(clippy::new_ret_no_self)]
	pub fn new() -> Rc<Self> {
		let ack = || Reply::new(Ok(Ack::Ok));
		Rc::new(Self {
			structure: Reply::unset(),
			threads: Reply::unset(),
			current_user: Reply::unset(),
			messages: Reply::unset(),
			comments: Reply::unset(),
			search_messages: Reply::unset(),
			search_articles: Reply::unset(),
			article: Reply::unset(),
			articles: Reply::unset(),
			favorite_articles: Reply::unset(),
			user_sessions: Reply::unset(),
			remove_user_session: Reply::unset(),
			logout: ack(),
			sign_on: Reply::unset(),
			sign_up: Reply::unset(),
			post_message: ack(),
			update_message: ack(),
			post_comment: ack(),
			update_comment: ack(),
			create_thread: ack(),
			rename_thread: ack(),
			move_thread: ack(),
			delete_thread: ack(),
			create_section: ack(),
			rename_section: ack(),
			create_subsection: ack(),
			rename_subsection: ack(),
			move_subsection: ack(),
			create_article: ack(),
			update_article: ack(),
			delete_article: ack(),
			add_favorite_article: ack(),
			remove_favorite_article: ack(),
		})
	}
}

#[async_trait(?Send)]
impl ForumApi for MockApi {
	async fn forum_structure(&self) -> Result<ForumStructure, FetchError> {
		self.structure.call(String::new()).await
	}

	async fn threads(
		&self,
		query: ThreadQuery,
		page: u32,
	) -> Result<ThreadQueryResult, FetchError> {
		self.threads.call(format!("{query:?} page {page}")).await
	}

	async fn current_user(&self) -> Result<Option<User>, FetchError> {
		self.current_user.call(String::new()).await
	}

	async fn messages(
		&self,
		thread_id: &str,
		page: u32,
	) -> Result<Option<MessagesQueryResult>, FetchError> {
		self.messages.call(format!("{thread_id} page {page}")).await
	}

	async fn comments(
		&self,
		article_id: &str,
		page: u32,
	) -> Result<CommentsQueryResult, FetchError> {
		self.comments.call(format!("{article_id} page {page}")).await
	}

	async fn search_messages(&self, query: &str) -> Result<MessageSearchResults, FetchError> {
		self.search_messages.call(query.to_string()).await
	}

	async fn search_articles(&self, query: &str) -> Result<ArticleSearchResults, FetchError> {
		self.search_articles.call(query.to_string()).await
	}

	async fn article(&self, id: &str, version: Option<&str>) -> Result<Article, FetchError> {
		self.article.call(format!("{id} version {version:?}")).await
	}

	async fn articles(&self) -> Result<Articles, FetchError> {
		self.articles.call(String::new()).await
	}

	async fn favorite_articles(&self) -> Result<Articles, FetchError> {
		self.favorite_articles.call(String::new()).await
	}

	async fn user_sessions(&self) -> Result<UserSessions, FetchError> {
		self.user_sessions.call(String::new()).await
	}

	async fn remove_user_session(&self, session: &str) -> Result<UserSessions, FetchError> {
		self.remove_user_session.call(session.to_string()).await
	}

	async fn logout(&self, remove_all_sessions: bool) -> Result<Ack, FetchError> {
		self.logout.call(remove_all_sessions.to_string()).await
	}

	async fn sign_on(&self, user_name: &str, password: &str) -> Result<SignOnOutcome, FetchError> {
		self.sign_on.call(format!("{user_name}:{password}")).await
	}

	async fn sign_up(&self, user_name: &str, password: &str) -> Result<SignUpOutcome, FetchError> {
		self.sign_up.call(format!("{user_name}:{password}")).await
	}

	async fn post_message(&self, request: &PostMessage) -> Result<Ack, FetchError> {
		self.post_message.call(format!("{request:?}")).await
	}

	async fn update_message(&self, request: &UpdateMessage) -> Result<Ack, FetchError> {
		self.update_message.call(format!("{request:?}")).await
	}

	async fn post_comment(&self, request: &PostComment) -> Result<Ack, FetchError> {
		self.post_comment.call(format!("{request:?}")).await
	}

	async fn update_comment(&self, request: &UpdateComment) -> Result<Ack, FetchError> {
		self.update_comment.call(format!("{request:?}")).await
	}

	async fn create_thread(&self, request: &CreateThread) -> Result<Ack, FetchError> {
		self.create_thread.call(format!("{request:?}")).await
	}

	async fn rename_thread(&self, request: &RenameThread) -> Result<Ack, FetchError> {
		self.rename_thread.call(format!("{request:?}")).await
	}

	async fn move_thread(&self, request: &MoveThread) -> Result<Ack, FetchError> {
		self.move_thread.call(format!("{request:?}")).await
	}

	async fn delete_thread(&self, thread_id: i64) -> Result<Ack, FetchError> {
		self.delete_thread.call(thread_id.to_string()).await
	}

	async fn create_section(&self, request: &NewSection) -> Result<Ack, FetchError> {
		self.create_section.call(format!("{request:?}")).await
	}

	async fn rename_section(&self, request: &RenameSection) -> Result<Ack, FetchError> {
		self.rename_section.call(format!("{request:?}")).await
	}

	async fn create_subsection(&self, request: &NewSubsection) -> Result<Ack, FetchError> {
		self.create_subsection.call(format!("{request:?}")).await
	}

	async fn rename_subsection(&self, request: &RenameSubsection) -> Result<Ack, FetchError> {
		self.rename_subsection.call(format!("{request:?}")).await
	}

	async fn move_subsection(&self, request: &MoveSubsection) -> Result<Ack, FetchError> {
		self.move_subsection.call(format!("{request:?}")).await
	}

	async fn create_article(&self, request: &CreateArticle) -> Result<Ack, FetchError> {
		self.create_article.call(format!("{request:?}")).await
	}

	async fn update_article(&self, request: &UpdateArticle) -> Result<Ack, FetchError> {
		self.update_article.call(format!("{request:?}")).await
	}

	async fn delete_article(&self, id: i64) -> Result<Ack, FetchError> {
		self.delete_article.call(id.to_string()).await
	}

	async fn add_favorite_article(&self, id: i64) -> Result<Ack, FetchError> {
		self.add_favorite_article.call(id.to_string()).await
	}

	async fn remove_favorite_article(&self, id: i64) -> Result<Ack, FetchError> {
		self.remove_favorite_article.call(id.to_string()).await
	}
}

/// Store context over `api`, starting at `url` in an in-memory history
pub fn context(api: &Rc<MockApi>, url: &str) -> StoreContext {
	context_with_history(api, url).0
}

pub fn context_with_history(api: &Rc<MockApi>, url: &str) -> (StoreContext, Rc<MemoryHistory>) {
	let history = Rc::new(MemoryHistory::new(url));
	let router = Router::new(history.clone());
	let address = CurrentAddress::new(&router);
	let ctx = StoreContext::new(api.clone(), address, DomainEvents::new());
	(ctx, history)
}

pub fn user(id: i64, name: &str) -> User {
	User {
		id,
		name: name.to_string(),
	}
}

/// Sections General (1) and Development (2); subsections Announcements (10)
/// and Off-topic (11) in General, Rust (20) in Development
pub fn structure() -> ForumStructure {
	let section = |id, name: &str| Section {
		id,
		name: name.to_string(),
	};
	let sub_section = |id, section_id, name: &str| SubSection {
		id,
		section_id,
		name: name.to_string(),
	};
	ForumStructure {
		sections: vec![section(1, "General"), section(2, "Development")],
		sub_sections: vec![
			sub_section(11, 1, "Off-topic"),
			sub_section(10, 1, "Announcements"),
			sub_section(20, 2, "Rust"),
		],
		threads_per_page: 20,
		messages_per_page: 10,
	}
}

pub fn thread(id: i64, sub_section_id: i64, last_message_date_time: i64) -> Thread {
	Thread {
		id,
		sub_section_id,
		name: format!("Thread {id}"),
		author: user(1, "ann"),
		total_messages: 1,
		creation_date_time: 0,
		last_message_user: user(1, "ann"),
		last_message_id: id * 100,
		last_message_date_time,
	}
}

pub fn threads(threads: Vec<Thread>, count: u32) -> ThreadQueryResult {
	ThreadQueryResult { threads, count }
}

pub fn message(id: i64, thread_id: i64) -> Message {
	Message {
		id,
		user: user(1, "ann"),
		thread_id,
		create_time: 0,
		update_time: 0,
		content: format!("message {id}"),
	}
}

pub fn messages(thread: Thread, ids: &[i64]) -> MessagesQueryResult {
	let thread_id = thread.id;
	MessagesQueryResult {
		thread,
		messages: ids.iter().map(|id| message(*id, thread_id)).collect(),
	}
}

pub fn article_info(id: i64, path: &str, name: &str) -> ArticleInfo {
	ArticleInfo {
		id,
		path: path.to_string(),
		name: name.to_string(),
	}
}

pub fn articles(infos: Vec<ArticleInfo>) -> Articles {
	Articles { articles: infos }
}

/// Article `id` at `version`, with versions `1..=latest` where `latest` is
/// the active one
pub fn article(id: i64, name: &str, version: u32, latest: u32) -> Article {
	Article {
		info: article_info(id, "docs", name),
		content: format!("{name} v{version}"),
		user: user(1, "ann"),
		create_time: 0,
		version,
		active: version == latest,
		comments_count: 0,
		visibility: ArticleVisibility::Public,
		versions: (1..=latest)
			.map(|v| ArticleVersion {
				version: v,
				create_time: 0,
				user: user(1, "ann"),
				active: v == latest,
			})
			.collect(),
	}
}

pub fn comments(article: ArticleInfo, total_comments: u32) -> CommentsQueryResult {
	CommentsQueryResult {
		article_info: article,
		comments: Vec::new(),
		total_comments,
	}
}

pub fn sessions(ids: &[&str]) -> UserSessions {
	UserSessions {
		sessions: ids
			.iter()
			.map(|s| UserSession {
				session: s.to_string(),
			})
			.collect(),
	}
}
