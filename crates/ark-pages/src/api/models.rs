//! Records exchanged with the server.
//!
//! Field names are camelCase on the wire. Ids are numeric, timestamps are
//! milliseconds since the Unix epoch.

use serde::{Deserialize, Serialize};

use crate::router::{PageAddress, PageParams};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: i64,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
	pub id: i64,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
	pub id: i64,
	pub section_id: i64,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumStructure {
	pub sections: Vec<Section>,
	pub sub_sections: Vec<SubSection>,
	pub threads_per_page: u32,
	pub messages_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
	pub id: i64,
	pub sub_section_id: i64,
	pub name: String,
	pub author: User,
	pub total_messages: u32,
	pub creation_date_time: i64,
	pub last_message_user: User,
	pub last_message_id: i64,
	pub last_message_date_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadQueryResult {
	pub threads: Vec<Thread>,
	/// Total threads matching the query, across all pages
	pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
	pub id: i64,
	pub user: User,
	pub thread_id: i64,
	pub create_time: i64,
	pub update_time: i64,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQueryResult {
	pub thread: Thread,
	pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	pub id: i64,
	pub user: User,
	pub article_id: i64,
	pub create_time: i64,
	pub update_time: i64,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQueryResult {
	pub article_info: ArticleInfo,
	pub comments: Vec<Comment>,
	pub total_comments: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInfo {
	pub id: i64,
	/// `/`-separated folder path used to build the article tree
	pub path: String,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Articles {
	pub articles: Vec<ArticleInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleVersion {
	pub version: u32,
	pub create_time: i64,
	pub user: User,
	pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleVisibility {
	#[default]
	Public,
	Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
	pub info: ArticleInfo,
	pub content: String,
	pub user: User,
	pub create_time: i64,
	pub version: u32,
	/// Whether this is the current version
	pub active: bool,
	pub comments_count: u32,
	pub visibility: ArticleVisibility,
	pub versions: Vec<ArticleVersion>,
}

impl Article {
	/// Address of `version` of this article: the live page for the active
	/// version, the archive page otherwise. `None` for an unknown version.
	pub fn version_address(&self, version: u32) -> Option<PageAddress> {
		let entry = self.versions.iter().find(|v| v.version == version)?;
		Some(if entry.active {
			PageAddress::article(self.info.id)
		} else {
			PageAddress::archived_article(self.info.id, version)
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSearchResult {
	pub id: i64,
	pub thread_id: i64,
	pub thread_name: String,
	pub create_time: i64,
	pub user: User,
	pub content: String,
}

impl MessageSearchResult {
	/// Link target for a search hit: the thread page, anchored at the message
	pub fn thread_address(&self, messages_per_page: u32) -> PageAddress {
		let per_page = i64::from(messages_per_page.max(1));
		let page = ((self.id + per_page - 1) / per_page).max(1);
		PageAddress::Thread {
			thread_id: self.thread_id.to_string(),
			params: PageParams {
				page: u32::try_from(page).ok(),
			},
			hash: Some(format!("m{}", self.id)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSearchResults {
	pub messages: Vec<MessageSearchResult>,
}

/// Piece of an article search excerpt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchResultFragment {
	Normal(String),
	Highlight(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSearchResult {
	pub info: ArticleInfo,
	pub text: Vec<SearchResultFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSearchResults {
	pub articles: Vec<ArticleSearchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
	pub session: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSessions {
	pub sessions: Vec<UserSession>,
}
