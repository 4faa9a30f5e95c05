//! Request bodies of the mutating endpoints.
//!
//! The server spells some ids `subsectionId` rather than `subSectionId`; the
//! field names here follow the server.

use serde::Serialize;

use super::models::ArticleVisibility;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
	pub user_name: String,
	/// Already passed through the password encoder
	pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logout {
	pub remove_all_sessions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveSession {
	pub session: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThread {
	/// First message of the thread
	pub message: String,
	pub thread_name: String,
	pub subsection_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameThread {
	pub name: String,
	pub thread_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveThread {
	pub thread_id: i64,
	pub new_subsection_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteThread {
	pub thread_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSection {
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameSection {
	pub name: String,
	pub section_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubsection {
	pub name: String,
	pub section_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameSubsection {
	pub name: String,
	pub subsection_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSubsection {
	pub subsection_id: i64,
	pub new_section_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessage {
	pub message: String,
	pub thread_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessage {
	pub message: String,
	pub message_id: i64,
	pub thread_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
	pub message: String,
	pub article_id: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub article_version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComment {
	pub message: String,
	pub comment_id: i64,
	pub article_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
	pub path: String,
	pub name: String,
	pub content: String,
	pub visibility: ArticleVisibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticle {
	pub id: i64,
	pub path: String,
	pub name: String,
	pub content: String,
	pub visibility: ArticleVisibility,
}

/// Body of article delete and favorite add/remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArticleId {
	pub id: i64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_server_field_spelling() {
		let create = CreateThread {
			message: "hi".to_string(),
			thread_name: "Hello".to_string(),
			subsection_id: 3,
		};
		assert_eq!(
			serde_json::to_value(&create).unwrap(),
			json!({"message": "hi", "threadName": "Hello", "subsectionId": 3})
		);

		let moved = MoveThread {
			thread_id: 1,
			new_subsection_id: 9,
		};
		assert_eq!(
			serde_json::to_value(moved).unwrap(),
			json!({"threadId": 1, "newSubsectionId": 9})
		);
	}

	#[rstest]
	fn test_comment_version_omitted_when_absent() {
		let comment = PostComment {
			message: "x".to_string(),
			article_id: 4,
			article_version: None,
		};
		assert_eq!(
			serde_json::to_value(&comment).unwrap(),
			json!({"message": "x", "articleId": 4})
		);
	}

	#[rstest]
	fn test_logout_and_credentials() {
		assert_eq!(
			serde_json::to_value(Logout {
				remove_all_sessions: true
			})
			.unwrap(),
			json!({"removeAllSessions": true})
		);
		assert_eq!(
			serde_json::to_value(Credentials {
				user_name: "bob".to_string(),
				password: "pw".to_string(),
			})
			.unwrap(),
			json!({"userName": "bob", "password": "pw"})
		);
	}
}
