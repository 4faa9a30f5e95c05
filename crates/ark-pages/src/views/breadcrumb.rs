//! Breadcrumb trail.
//!
//! ```text
//! Main / General / Announcements / Release 1.0
//! Main / Articles / Install guide
//! Main / Articles / Install guide / Comments
//! ```

use super::page::PageData;
use crate::api::models::{Section, SubSection, Thread};
use crate::router::{PageAddress, PageParams};

pub const MAIN_LABEL: &str = "Main";
pub const ARTICLES_LABEL: &str = "Articles";
pub const COMMENTS_LABEL: &str = "Comments";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
	pub label: String,
	pub address: PageAddress,
}

impl Crumb {
	fn new(label: impl Into<String>, address: PageAddress) -> Self {
		Self {
			label: label.into(),
			address,
		}
	}
}

/// Trail for `address`, starting with the main page.
///
/// Forum pages fill in the enclosing section and subsection from the forum
/// structure; a thread page does so only once the thread has loaded.
pub fn breadcrumb(address: &PageAddress, data: &PageData<'_>) -> Vec<Crumb> {
	let mut crumbs = vec![Crumb::new(MAIN_LABEL, PageAddress::root())];

	let (section, sub_section, thread) = forum_path(address, data);
	if let Some(section) = section {
		crumbs.push(Crumb::new(&section.name, PageAddress::section(section.id)));
	}
	if let Some(sub_section) = sub_section {
		crumbs.push(Crumb::new(
			&sub_section.name,
			PageAddress::sub_section(sub_section.id),
		));
	}
	if let Some(thread) = thread {
		crumbs.push(Crumb::new(&thread.name, PageAddress::thread(thread.id)));
	}

	match address {
		PageAddress::Articles => {
			crumbs.push(Crumb::new(ARTICLES_LABEL, PageAddress::Articles));
		}
		PageAddress::Article { .. } | PageAddress::ArchivedArticle { .. } => {
			crumbs.push(Crumb::new(ARTICLES_LABEL, PageAddress::Articles));
			let name = data.article.map(|a| a.name.clone()).unwrap_or_default();
			crumbs.push(Crumb::new(name, address.clone()));
		}
		PageAddress::ArticleComments {
			article_id,
			article_version,
			..
		} => {
			crumbs.push(Crumb::new(ARTICLES_LABEL, PageAddress::Articles));
			if let Some(article) = data.comments_article {
				crumbs.push(Crumb::new(&article.name, PageAddress::article(article_id)));
			}
			crumbs.push(Crumb::new(
				COMMENTS_LABEL,
				PageAddress::ArticleComments {
					article_id: article_id.clone(),
					article_version: article_version.clone(),
					params: PageParams::default(),
				},
			));
		}
		_ => {}
	}

	crumbs
}

type ForumPath<'a> = (Option<&'a Section>, Option<&'a SubSection>, Option<&'a Thread>);

fn forum_path<'a>(address: &PageAddress, data: &PageData<'a>) -> ForumPath<'a> {
	let section_of = |sub_section: &SubSection| data.sections.get(&sub_section.section_id);

	match address {
		PageAddress::Section { section_id, .. } => (data.section(section_id), None, None),
		PageAddress::SubSection { sub_section_id, .. } => {
			let sub_section = data.sub_section(sub_section_id);
			(sub_section.and_then(section_of), sub_section, None)
		}
		PageAddress::Thread { .. } => {
			let thread = data.thread;
			let sub_section = thread.and_then(|t| data.sub_sections.get(&t.sub_section_id));
			(sub_section.and_then(section_of), sub_section, thread)
		}
		_ => (None, None, None),
	}
}
