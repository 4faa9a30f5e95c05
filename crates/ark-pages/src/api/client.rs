//! The server API as seen by the stores.

use async_trait::async_trait;

use super::error::FetchError;
use super::models::{
	Article, ArticleSearchResults, Articles, CommentsQueryResult, ForumStructure,
	MessageSearchResults, MessagesQueryResult, ThreadQueryResult, User, UserSessions,
};
use super::requests::{
	CreateArticle, CreateThread, MoveSubsection, MoveThread, NewSection, NewSubsection,
	PostComment, PostMessage, RenameSection, RenameSubsection, RenameThread, UpdateArticle,
	UpdateComment, UpdateMessage,
};

/// Which threads to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadQuery {
	All,
	Section(String),
	SubSection(String),
}

/// Server verdict on a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
	Ok,
	/// Anything but a success; carries the raw response body
	Rejected(String),
}

impl Ack {
	pub fn is_ok(&self) -> bool {
		matches!(self, Self::Ok)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOnOutcome {
	User(User),
	Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
	Ok,
	Failed,
}

/// Every endpoint the client uses.
///
/// Futures are not `Send`: in the browser they wrap JS promises.
#[async_trait(?Send)]
pub trait ForumApi {
	async fn forum_structure(&self) -> Result<ForumStructure, FetchError>;

	async fn threads(&self, query: ThreadQuery, page: u32)
	-> Result<ThreadQueryResult, FetchError>;

	/// `None` when the session is not (or no longer) valid
	async fn current_user(&self) -> Result<Option<User>, FetchError>;

	/// `None` when the thread does not exist
	async fn messages(
		&self,
		thread_id: &str,
		page: u32,
	) -> Result<Option<MessagesQueryResult>, FetchError>;

	async fn comments(&self, article_id: &str, page: u32)
	-> Result<CommentsQueryResult, FetchError>;

	async fn search_messages(&self, query: &str) -> Result<MessageSearchResults, FetchError>;

	async fn search_articles(&self, query: &str) -> Result<ArticleSearchResults, FetchError>;

	/// The current version when `version` is `None`
	async fn article(&self, id: &str, version: Option<&str>) -> Result<Article, FetchError>;

	async fn articles(&self) -> Result<Articles, FetchError>;

	async fn favorite_articles(&self) -> Result<Articles, FetchError>;

	async fn user_sessions(&self) -> Result<UserSessions, FetchError>;

	/// Returns the sessions that remain
	async fn remove_user_session(&self, session: &str) -> Result<UserSessions, FetchError>;

	async fn logout(&self, remove_all_sessions: bool) -> Result<Ack, FetchError>;

	/// `password` must already be encoded
	async fn sign_on(&self, user_name: &str, password: &str) -> Result<SignOnOutcome, FetchError>;

	/// `password` must already be encoded
	async fn sign_up(&self, user_name: &str, password: &str) -> Result<SignUpOutcome, FetchError>;

	async fn post_message(&self, request: &PostMessage) -> Result<Ack, FetchError>;

	async fn update_message(&self, request: &UpdateMessage) -> Result<Ack, FetchError>;

	async fn post_comment(&self, request: &PostComment) -> Result<Ack, FetchError>;

	async fn update_comment(&self, request: &UpdateComment) -> Result<Ack, FetchError>;

	async fn create_thread(&self, request: &CreateThread) -> Result<Ack, FetchError>;

	async fn rename_thread(&self, request: &RenameThread) -> Result<Ack, FetchError>;

	async fn move_thread(&self, request: &MoveThread) -> Result<Ack, FetchError>;

	async fn delete_thread(&self, thread_id: i64) -> Result<Ack, FetchError>;

	async fn create_section(&self, request: &NewSection) -> Result<Ack, FetchError>;

	async fn rename_section(&self, request: &RenameSection) -> Result<Ack, FetchError>;

	async fn create_subsection(&self, request: &NewSubsection) -> Result<Ack, FetchError>;

	async fn rename_subsection(&self, request: &RenameSubsection) -> Result<Ack, FetchError>;

	async fn move_subsection(&self, request: &MoveSubsection) -> Result<Ack, FetchError>;

	async fn create_article(&self, request: &CreateArticle) -> Result<Ack, FetchError>;

	async fn update_article(&self, request: &UpdateArticle) -> Result<Ack, FetchError>;

	async fn delete_article(&self, id: i64) -> Result<Ack, FetchError>;

	async fn add_favorite_article(&self, id: i64) -> Result<Ack, FetchError>;

	async fn remove_favorite_article(&self, id: i64) -> Result<Ack, FetchError>;
}
