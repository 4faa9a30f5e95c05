//! Snapshot of loaded data that page chrome is derived from.

use std::collections::BTreeMap;

use crate::api::models::{ArticleInfo, Section, SubSection, Thread};

/// What the header derivations may know about the current page.
///
/// Everything is optional: a missing record only makes the title or the
/// breadcrumb less specific.
#[derive(Debug, Clone, Copy)]
pub struct PageData<'a> {
	pub sections: &'a BTreeMap<i64, Section>,
	pub sub_sections: &'a BTreeMap<i64, SubSection>,
	/// Thread of the thread page, once loaded
	pub thread: Option<&'a Thread>,
	/// Article of the article or archive page, once loaded
	pub article: Option<&'a ArticleInfo>,
	/// Article whose comments are shown, once loaded
	pub comments_article: Option<&'a ArticleInfo>,
}

impl<'a> PageData<'a> {
	pub fn new(
		sections: &'a BTreeMap<i64, Section>,
		sub_sections: &'a BTreeMap<i64, SubSection>,
	) -> Self {
		Self {
			sections,
			sub_sections,
			thread: None,
			article: None,
			comments_article: None,
		}
	}

	pub fn with_thread(mut self, thread: Option<&'a Thread>) -> Self {
		self.thread = thread;
		self
	}

	pub fn with_article(mut self, article: Option<&'a ArticleInfo>) -> Self {
		self.article = article;
		self
	}

	pub fn with_comments_article(mut self, article: Option<&'a ArticleInfo>) -> Self {
		self.comments_article = article;
		self
	}

	/// Section by the id as it appears in a URL
	pub fn section(&self, id: &str) -> Option<&'a Section> {
		id.parse().ok().and_then(|id| self.sections.get(&id))
	}

	/// Subsection by the id as it appears in a URL
	pub fn sub_section(&self, id: &str) -> Option<&'a SubSection> {
		id.parse().ok().and_then(|id| self.sub_sections.get(&id))
	}
}
