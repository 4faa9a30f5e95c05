//! Document title.

use super::page::PageData;
use crate::router::PageAddress;

/// Title for `address`, or `default_title` when the page has nothing more
/// specific (or its data has not loaded yet).
pub fn page_title(address: &PageAddress, data: &PageData<'_>, default_title: &str) -> String {
	let title = match address {
		PageAddress::Section { section_id, .. } => data.section(section_id).map(|s| s.name.clone()),
		PageAddress::SubSection { sub_section_id, .. } => {
			data.sub_section(sub_section_id).map(|s| s.name.clone())
		}
		PageAddress::Thread { .. } => data.thread.map(|t| t.name.clone()),
		PageAddress::MessageSearch { search_string } => Some(format!("Search: {search_string}")),
		PageAddress::UserProfile => Some("User profile".to_string()),
		PageAddress::Signup => Some("Sign up".to_string()),
		PageAddress::Articles => Some("Articles".to_string()),
		PageAddress::Article { .. } | PageAddress::ArchivedArticle { .. } => {
			data.article.map(|a| a.name.clone())
		}
		PageAddress::ArticleComments { .. } => data
			.comments_article
			.map(|a| format!("Comments on the article {}", a.name)),
		PageAddress::NotFound => Some("Not found".to_string()),
		PageAddress::Root { .. } | PageAddress::ArticleSearch { .. } => None,
	};

	title.unwrap_or_else(|| default_title.to_string())
}
