//! Search bar mode.

use crate::router::PageAddress;

/// What the search bar searches on the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFormType {
	Forum,
	Article,
}

impl SearchFormType {
	/// `None` on pages without a search bar
	pub fn for_address(address: &PageAddress) -> Option<Self> {
		match address {
			PageAddress::Articles
			| PageAddress::Article { .. }
			| PageAddress::ArchivedArticle { .. }
			| PageAddress::ArticleSearch { .. } => Some(Self::Article),
			PageAddress::Root { .. }
			| PageAddress::Section { .. }
			| PageAddress::SubSection { .. }
			| PageAddress::Thread { .. }
			| PageAddress::MessageSearch { .. } => Some(Self::Forum),
			PageAddress::UserProfile
			| PageAddress::Signup
			| PageAddress::ArticleComments { .. }
			| PageAddress::NotFound => None,
		}
	}

	/// Results page for `query`
	pub fn results_address(self, query: &str) -> PageAddress {
		let search_string = query.to_string();
		match self {
			Self::Forum => PageAddress::MessageSearch { search_string },
			Self::Article => PageAddress::ArticleSearch { search_string },
		}
	}
}
