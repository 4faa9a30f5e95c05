//! HTTP implementation of [`ForumApi`].
//!
//! Endpoint knowledge (paths, query parameters, response conventions) lives in
//! [`HttpForumApi`]; moving bytes is the job of a [`Transport`]. The browser
//! uses [`ReqwestTransport`]; tests plug in a scripted one.
//!
//! Response conventions of the server:
//!
//! - queries answer 200 with a JSON body, anything else is an error whose body
//!   is a human-readable message
//! - mutations answer 200 with the JSON string `"OK"`
//! - `/signon` answers 200 with either the user or the JSON string `"FAILED"`
//! - `/signup` answers 200 with `"OK"` or `"FAILED"`

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::client::{Ack, ForumApi, SignOnOutcome, SignUpOutcome, ThreadQuery};
use super::error::FetchError;
use super::models::{
	Article, ArticleSearchResults, Articles, CommentsQueryResult, ForumStructure,
	MessageSearchResults, MessagesQueryResult, ThreadQueryResult, User, UserSessions,
};
use super::requests::{
	ArticleId, CreateArticle, CreateThread, Credentials, DeleteThread, Logout, MoveSubsection,
	MoveThread, NewSection, NewSubsection, PostComment, PostMessage, RemoveSession,
	RenameSection, RenameSubsection, RenameThread, UpdateArticle, UpdateComment, UpdateMessage,
};
use crate::debug_log;

const OK_BODY: &str = "OK";
const FAILED_BODY: &str = "FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
}

/// A request relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
	pub method: Method,
	pub path: &'static str,
	pub query: Vec<(String, String)>,
	/// JSON body
	pub body: Option<String>,
}

impl ApiRequest {
	pub fn get(path: &'static str) -> Self {
		Self {
			method: Method::Get,
			path,
			query: Vec::new(),
			body: None,
		}
	}

	pub fn post(path: &'static str, body: String) -> Self {
		Self {
			method: Method::Post,
			path,
			query: Vec::new(),
			body: Some(body),
		}
	}

	pub fn query(mut self, name: &str, value: impl ToString) -> Self {
		self.query.push((name.to_string(), value.to_string()));
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
	pub status: u16,
	pub body: String,
}

impl ApiResponse {
	pub fn is_success(&self) -> bool {
		self.status == 200
	}

	/// The body as a JSON string literal, if it is one
	fn json_string(&self) -> Option<String> {
		serde_json::from_str::<String>(&self.body).ok()
	}
}

/// Sends requests. Every request must carry the session credentials.
#[async_trait(?Send)]
pub trait Transport {
	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError>;
}

pub struct HttpForumApi<T> {
	transport: T,
}

impl<T: Transport> HttpForumApi<T> {
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
		debug_log!("{:?} {}", request.method, request.path);
		self.transport.send(request).await
	}

	async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, FetchError> {
		let response = self.send(request).await?;
		if !response.is_success() {
			return Err(FetchError::Status {
				status: response.status,
				body: response.body,
			});
		}
		Ok(serde_json::from_str(&response.body)?)
	}

	async fn post_json<B: Serialize, R: DeserializeOwned>(
		&self,
		path: &'static str,
		body: &B,
	) -> Result<R, FetchError> {
		self.fetch(ApiRequest::post(path, serde_json::to_string(body)?))
			.await
	}

	async fn post_ack<B: Serialize>(&self, path: &'static str, body: &B) -> Result<Ack, FetchError> {
		let response = self
			.send(ApiRequest::post(path, serde_json::to_string(body)?))
			.await?;

		if response.is_success() && response.json_string().as_deref() == Some(OK_BODY) {
			Ok(Ack::Ok)
		} else {
			Ok(Ack::Rejected(response.body))
		}
	}
}

#[async_trait(?Send)]
impl<T: Transport> ForumApi for HttpForumApi<T> {
	async fn forum_structure(&self) -> Result<ForumStructure, FetchError> {
		self.fetch(ApiRequest::get("/api/structure")).await
	}

	async fn threads(
		&self,
		query: ThreadQuery,
		page: u32,
	) -> Result<ThreadQueryResult, FetchError> {
		let request = ApiRequest::get("/api/threads");
		let request = match query {
			ThreadQuery::All => request.query("query_type", "All"),
			ThreadQuery::Section(id) => request.query("query_type", "Section").query("id", id),
			ThreadQuery::SubSection(id) => {
				request.query("query_type", "SubSection").query("id", id)
			}
		};
		self.fetch(request.query("page", page)).await
	}

	async fn current_user(&self) -> Result<Option<User>, FetchError> {
		self.fetch(ApiRequest::get("/api/current-user")).await
	}

	async fn messages(
		&self,
		thread_id: &str,
		page: u32,
	) -> Result<Option<MessagesQueryResult>, FetchError> {
		self.fetch(
			ApiRequest::get("/api/messages")
				.query("threadId", thread_id)
				.query("page", page),
		)
		.await
	}

	async fn comments(
		&self,
		article_id: &str,
		page: u32,
	) -> Result<CommentsQueryResult, FetchError> {
		self.fetch(
			ApiRequest::get("/api/comments")
				.query("articleId", article_id)
				.query("page", page),
		)
		.await
	}

	async fn search_messages(&self, query: &str) -> Result<MessageSearchResults, FetchError> {
		self.fetch(ApiRequest::get("/api/search-messages").query("query", query))
			.await
	}

	async fn search_articles(&self, query: &str) -> Result<ArticleSearchResults, FetchError> {
		self.fetch(ApiRequest::get("/api/search-articles").query("query", query))
			.await
	}

	async fn article(&self, id: &str, version: Option<&str>) -> Result<Article, FetchError> {
		let mut request = ApiRequest::get("/api/article").query("id", id);
		if let Some(version) = version {
			request = request.query("version", version);
		}
		self.fetch(request).await
	}

	async fn articles(&self) -> Result<Articles, FetchError> {
		self.fetch(ApiRequest::get("/api/article/list")).await
	}

	async fn favorite_articles(&self) -> Result<Articles, FetchError> {
		self.fetch(ApiRequest::get("/api/article/favorite/list"))
			.await
	}

	async fn user_sessions(&self) -> Result<UserSessions, FetchError> {
		self.fetch(ApiRequest::get("/api/current-user-sessions"))
			.await
	}

	async fn remove_user_session(&self, session: &str) -> Result<UserSessions, FetchError> {
		self.post_json(
			"/api/current-user-sessions/remove",
			&RemoveSession {
				session: session.to_string(),
			},
		)
		.await
	}

	async fn logout(&self, remove_all_sessions: bool) -> Result<Ack, FetchError> {
		let response = self
			.send(ApiRequest::post(
				"/api/logout",
				serde_json::to_string(&Logout {
					remove_all_sessions,
				})?,
			))
			.await?;

		// Any successful answer ends the session
		if response.is_success() {
			Ok(Ack::Ok)
		} else {
			Ok(Ack::Rejected(response.body))
		}
	}

	async fn sign_on(&self, user_name: &str, password: &str) -> Result<SignOnOutcome, FetchError> {
		let credentials = Credentials {
			user_name: user_name.to_string(),
			password: password.to_string(),
		};
		let response = self
			.send(ApiRequest::post("/signon", serde_json::to_string(&credentials)?))
			.await?;

		if response.json_string().as_deref() == Some(FAILED_BODY) {
			return Ok(SignOnOutcome::Failed);
		}
		if !response.is_success() {
			return Err(FetchError::Status {
				status: response.status,
				body: response.body,
			});
		}
		Ok(SignOnOutcome::User(serde_json::from_str(&response.body)?))
	}

	async fn sign_up(&self, user_name: &str, password: &str) -> Result<SignUpOutcome, FetchError> {
		let credentials = Credentials {
			user_name: user_name.to_string(),
			password: password.to_string(),
		};
		let response = self
			.send(ApiRequest::post("/signup", serde_json::to_string(&credentials)?))
			.await?;

		match response.json_string().as_deref() {
			Some(OK_BODY) => Ok(SignUpOutcome::Ok),
			Some(FAILED_BODY) => Ok(SignUpOutcome::Failed),
			_ if !response.is_success() => Err(FetchError::Status {
				status: response.status,
				body: response.body,
			}),
			_ => Err(FetchError::Decode(format!(
				"unexpected sign up response: {}",
				response.body
			))),
		}
	}

	async fn post_message(&self, request: &PostMessage) -> Result<Ack, FetchError> {
		self.post_ack("/api/message", request).await
	}

	async fn update_message(&self, request: &UpdateMessage) -> Result<Ack, FetchError> {
		self.post_ack("/api/message/update", request).await
	}

	async fn post_comment(&self, request: &PostComment) -> Result<Ack, FetchError> {
		self.post_ack("/api/comment", request).await
	}

	async fn update_comment(&self, request: &UpdateComment) -> Result<Ack, FetchError> {
		self.post_ack("/api/comment/update", request).await
	}

	async fn create_thread(&self, request: &CreateThread) -> Result<Ack, FetchError> {
		self.post_ack("/api/thread", request).await
	}

	async fn rename_thread(&self, request: &RenameThread) -> Result<Ack, FetchError> {
		self.post_ack("/api/thread/rename", request).await
	}

	async fn move_thread(&self, request: &MoveThread) -> Result<Ack, FetchError> {
		self.post_ack("/api/thread/move", request).await
	}

	async fn delete_thread(&self, thread_id: i64) -> Result<Ack, FetchError> {
		self.post_ack("/api/thread/delete", &DeleteThread { thread_id })
			.await
	}

	async fn create_section(&self, request: &NewSection) -> Result<Ack, FetchError> {
		self.post_ack("/api/section", request).await
	}

	async fn rename_section(&self, request: &RenameSection) -> Result<Ack, FetchError> {
		self.post_ack("/api/section/rename", request).await
	}

	async fn create_subsection(&self, request: &NewSubsection) -> Result<Ack, FetchError> {
		self.post_ack("/api/subsection", request).await
	}

	async fn rename_subsection(&self, request: &RenameSubsection) -> Result<Ack, FetchError> {
		self.post_ack("/api/subsection/rename", request).await
	}

	async fn move_subsection(&self, request: &MoveSubsection) -> Result<Ack, FetchError> {
		self.post_ack("/api/subsection/move", request).await
	}

	async fn create_article(&self, request: &CreateArticle) -> Result<Ack, FetchError> {
		self.post_ack("/api/article", request).await
	}

	async fn update_article(&self, request: &UpdateArticle) -> Result<Ack, FetchError> {
		self.post_ack("/api/article/update", request).await
	}

	async fn delete_article(&self, id: i64) -> Result<Ack, FetchError> {
		self.post_ack("/api/article/delete", &ArticleId { id }).await
	}

	async fn add_favorite_article(&self, id: i64) -> Result<Ack, FetchError> {
		self.post_ack("/api/article/favorite/add", &ArticleId { id })
			.await
	}

	async fn remove_favorite_article(&self, id: i64) -> Result<Ack, FetchError> {
		self.post_ack("/api/article/favorite/remove", &ArticleId { id })
			.await
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::ReqwestTransport;

#[cfg(target_arch = "wasm32")]
mod browser {
	use async_trait::async_trait;

	use super::{ApiRequest, ApiResponse, Method, Transport};
	use crate::api::error::FetchError;

	/// `fetch`-based transport that always sends cookies
	pub struct ReqwestTransport {
		client: reqwest::Client,
		base_url: String,
	}

	impl ReqwestTransport {
		/// An empty `base_url` means the page's own origin
		pub fn new(base_url: impl Into<String>) -> Self {
			let mut base_url = base_url.into();
			if base_url.is_empty() {
				base_url = web_sys::window()
					.and_then(|w| w.location().origin().ok())
					.unwrap_or_default();
			}

			Self {
				client: reqwest::Client::new(),
				base_url: base_url.trim_end_matches('/').to_string(),
			}
		}
	}

	#[async_trait(?Send)]
	impl Transport for ReqwestTransport {
		async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
			let url = format!("{}{}", self.base_url, request.path);
			let builder = match request.method {
				Method::Get => self.client.get(&url),
				Method::Post => self.client.post(&url),
			};

			let mut builder = builder.query(&request.query).fetch_credentials_include();
			if let Some(body) = request.body {
				builder = builder
					.header("Content-Type", "application/json")
					.body(body);
			}

			let response = builder
				.send()
				.await
				.map_err(|e| FetchError::Network(e.to_string()))?;
			let status = response.status().as_u16();
			let body = response
				.text()
				.await
				.map_err(|e| FetchError::Network(e.to_string()))?;

			Ok(ApiResponse { status, body })
		}
	}
}
