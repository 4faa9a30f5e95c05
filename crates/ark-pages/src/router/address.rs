//! Typed page addresses.
//!
//! [`Route`] is the closed set of page shapes, each tied to one path template.
//! [`PageAddress`] is a resolved location: a route plus the parameters its
//! template captures, the recognized query parameters and, for threads, the
//! hash anchor.
//!
//! Resolution tries [`Route::PRIORITY`] in order and falls back to
//! [`PageAddress::NotFound`]. Serialization back to a location is an explicit
//! match per variant.

use std::fmt;

use super::error::PathError;
use super::location::{QueryParams, RawLocation};
use super::pattern::{PathParams, PathTemplate};

pub const PAGE_QUERY_PARAM: &str = "page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
	Root,
	Section,
	SubSection,
	Thread,
	MessageSearch,
	UserProfile,
	Signup,
	Articles,
	Article,
	ArchivedArticle,
	ArticleSearch,
	ArticleComments,
	NotFound,
}

impl Route {
	/// Matching order. `NotFound` is not here: it is what remains.
	pub const PRIORITY: [Route; 12] = [
		Route::Root,
		Route::Section,
		Route::SubSection,
		Route::Thread,
		Route::MessageSearch,
		Route::UserProfile,
		Route::Signup,
		Route::Articles,
		Route::Article,
		Route::ArchivedArticle,
		Route::ArticleSearch,
		Route::ArticleComments,
	];

	pub const fn template(self) -> &'static str {
		match self {
			Route::Root => "/",
			Route::Section => "/forum/s/:sectionId",
			Route::SubSection => "/forum/ss/:subSectionId",
			Route::Thread => "/forum/t/:threadId",
			Route::MessageSearch => "/forum/ms/:searchString",
			Route::UserProfile => "/forum/user",
			Route::Signup => "/signup",
			Route::Articles => "/articles",
			Route::Article => "/article/a/:articleId",
			Route::ArchivedArticle => "/article/d/:articleId/:version",
			Route::ArticleSearch => "/forum/as/:searchString",
			Route::ArticleComments => "/forum/ac/:articleId/:articleVersion",
			Route::NotFound => "/404",
		}
	}

	pub fn path_template(self) -> PathTemplate {
		PathTemplate::new(self.template())
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.template())
	}
}

/// Paging query parameters.
///
/// `page` is `None` when the query has no positive integer `page` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageParams {
	pub page: Option<u32>,
}

impl PageParams {
	pub fn page(page: u32) -> Self {
		Self { page: Some(page) }
	}

	/// The requested page, defaulting to the first one
	pub fn page_or_first(&self) -> u32 {
		self.page.unwrap_or(1)
	}

	fn from_query(query: &QueryParams) -> Self {
		let page = query
			.get(PAGE_QUERY_PARAM)
			.and_then(|value| value.parse::<u32>().ok())
			.filter(|page| *page > 0);
		Self { page }
	}

	fn to_query(self) -> QueryParams {
		let mut query = QueryParams::new();
		if let Some(page) = self.page {
			query.insert(PAGE_QUERY_PARAM.to_string(), page.to_string());
		}
		query
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAddress {
	Root {
		params: PageParams,
	},
	Section {
		section_id: String,
		params: PageParams,
	},
	SubSection {
		sub_section_id: String,
		params: PageParams,
	},
	Thread {
		thread_id: String,
		params: PageParams,
		/// Message anchor, `m<messageId>`
		hash: Option<String>,
	},
	MessageSearch {
		search_string: String,
	},
	UserProfile,
	Signup,
	Articles,
	Article {
		article_id: String,
	},
	ArchivedArticle {
		article_id: String,
		version: String,
	},
	ArticleSearch {
		search_string: String,
	},
	ArticleComments {
		article_id: String,
		article_version: String,
		params: PageParams,
	},
	NotFound,
}

impl PageAddress {
	pub fn root() -> Self {
		Self::Root {
			params: PageParams::default(),
		}
	}

	pub fn section(section_id: impl ToString) -> Self {
		Self::Section {
			section_id: section_id.to_string(),
			params: PageParams::default(),
		}
	}

	pub fn sub_section(sub_section_id: impl ToString) -> Self {
		Self::SubSection {
			sub_section_id: sub_section_id.to_string(),
			params: PageParams::default(),
		}
	}

	pub fn thread(thread_id: impl ToString) -> Self {
		Self::Thread {
			thread_id: thread_id.to_string(),
			params: PageParams::default(),
			hash: None,
		}
	}

	pub fn article(article_id: impl ToString) -> Self {
		Self::Article {
			article_id: article_id.to_string(),
		}
	}

	pub fn archived_article(article_id: impl ToString, version: impl ToString) -> Self {
		Self::ArchivedArticle {
			article_id: article_id.to_string(),
			version: version.to_string(),
		}
	}

	pub fn article_comments(article_id: impl ToString, article_version: impl ToString) -> Self {
		Self::ArticleComments {
			article_id: article_id.to_string(),
			article_version: article_version.to_string(),
			params: PageParams::default(),
		}
	}

	/// Same address on another page; no-op for unpaged variants
	pub fn with_page(mut self, page: u32) -> Self {
		if let Some(params) = self.params_mut() {
			params.page = Some(page);
		}
		self
	}

	pub fn route(&self) -> Route {
		match self {
			Self::Root { .. } => Route::Root,
			Self::Section { .. } => Route::Section,
			Self::SubSection { .. } => Route::SubSection,
			Self::Thread { .. } => Route::Thread,
			Self::MessageSearch { .. } => Route::MessageSearch,
			Self::UserProfile => Route::UserProfile,
			Self::Signup => Route::Signup,
			Self::Articles => Route::Articles,
			Self::Article { .. } => Route::Article,
			Self::ArchivedArticle { .. } => Route::ArchivedArticle,
			Self::ArticleSearch { .. } => Route::ArticleSearch,
			Self::ArticleComments { .. } => Route::ArticleComments,
			Self::NotFound => Route::NotFound,
		}
	}

	pub fn params(&self) -> Option<PageParams> {
		match self {
			Self::Root { params }
			| Self::Section { params, .. }
			| Self::SubSection { params, .. }
			| Self::Thread { params, .. }
			| Self::ArticleComments { params, .. } => Some(*params),
			_ => None,
		}
	}

	fn params_mut(&mut self) -> Option<&mut PageParams> {
		match self {
			Self::Root { params }
			| Self::Section { params, .. }
			| Self::SubSection { params, .. }
			| Self::Thread { params, .. }
			| Self::ArticleComments { params, .. } => Some(params),
			_ => None,
		}
	}

	/// Requested page for paged variants, defaulting to 1
	pub fn page_or_first(&self) -> Option<u32> {
		self.params().map(|params| params.page_or_first())
	}

	/// Resolve raw location state into an address
	pub fn resolve(location: &RawLocation) -> Self {
		for route in Route::PRIORITY {
			if let Some(path_params) = route.path_template().matches(&location.segments) {
				return Self::from_match(route, path_params, location);
			}
		}
		Self::NotFound
	}

	fn from_match(route: Route, mut path: PathParams, location: &RawLocation) -> Self {
		let mut take = |name: &str| path.remove(name).unwrap_or_default();
		let params = PageParams::from_query(&location.query);

		match route {
			Route::Root => Self::Root { params },
			Route::Section => Self::Section {
				section_id: take("sectionId"),
				params,
			},
			Route::SubSection => Self::SubSection {
				sub_section_id: take("subSectionId"),
				params,
			},
			Route::Thread => Self::Thread {
				thread_id: take("threadId"),
				params,
				hash: (!location.hash.is_empty()).then(|| location.hash.clone()),
			},
			Route::MessageSearch => Self::MessageSearch {
				search_string: take("searchString"),
			},
			Route::UserProfile => Self::UserProfile,
			Route::Signup => Self::Signup,
			Route::Articles => Self::Articles,
			Route::Article => Self::Article {
				article_id: take("articleId"),
			},
			Route::ArchivedArticle => Self::ArchivedArticle {
				article_id: take("articleId"),
				version: take("version"),
			},
			Route::ArticleSearch => Self::ArticleSearch {
				search_string: take("searchString"),
			},
			Route::ArticleComments => Self::ArticleComments {
				article_id: take("articleId"),
				article_version: take("articleVersion"),
				params,
			},
			Route::NotFound => Self::NotFound,
		}
	}

	/// Values for the placeholders of this address's template
	pub fn path_params(&self) -> PathParams {
		let pairs: Vec<(&str, &String)> = match self {
			Self::Section { section_id, .. } => vec![("sectionId", section_id)],
			Self::SubSection { sub_section_id, .. } => vec![("subSectionId", sub_section_id)],
			Self::Thread { thread_id, .. } => vec![("threadId", thread_id)],
			Self::MessageSearch { search_string } | Self::ArticleSearch { search_string } => {
				vec![("searchString", search_string)]
			}
			Self::Article { article_id } => vec![("articleId", article_id)],
			Self::ArchivedArticle {
				article_id,
				version,
			} => vec![("articleId", article_id), ("version", version)],
			Self::ArticleComments {
				article_id,
				article_version,
				..
			} => vec![
				("articleId", article_id),
				("articleVersion", article_version),
			],
			Self::Root { .. }
			| Self::UserProfile
			| Self::Signup
			| Self::Articles
			| Self::NotFound => Vec::new(),
		};

		pairs
			.into_iter()
			.map(|(name, value)| (name.to_string(), value.clone()))
			.collect()
	}

	pub fn query_params(&self) -> QueryParams {
		self.params()
			.map(PageParams::to_query)
			.unwrap_or_default()
	}

	pub fn hash(&self) -> Option<&str> {
		match self {
			Self::Thread { hash, .. } => hash.as_deref(),
			_ => None,
		}
	}

	pub fn to_location(&self) -> Result<RawLocation, PathError> {
		let segments = self.route().path_template().reverse(&self.path_params())?;
		Ok(RawLocation::new(
			segments,
			self.query_params(),
			self.hash().unwrap_or_default(),
		))
	}

	/// Relative URL for links
	pub fn to_url(&self) -> Result<String, PathError> {
		Ok(self.to_location()?.to_url())
	}
}

impl Default for PageAddress {
	fn default() -> Self {
		Self::root()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn resolve(url: &str) -> PageAddress {
		PageAddress::resolve(&RawLocation::parse(url))
	}

	#[rstest]
	#[case("/", PageAddress::root())]
	#[case("/?page=3", PageAddress::root().with_page(3))]
	#[case("/forum/s/2", PageAddress::section("2"))]
	#[case("/forum/ss/7?page=2", PageAddress::sub_section("7").with_page(2))]
	#[case("/forum/t/11", PageAddress::thread("11"))]
	#[case("/forum/ms/rust%20async", PageAddress::MessageSearch { search_string: "rust async".into() })]
	#[case("/forum/user", PageAddress::UserProfile)]
	#[case("/signup", PageAddress::Signup)]
	#[case("/articles", PageAddress::Articles)]
	#[case("/article/a/5", PageAddress::article("5"))]
	#[case("/article/d/5/2", PageAddress::archived_article("5", "2"))]
	#[case("/forum/as/tree", PageAddress::ArticleSearch { search_string: "tree".into() })]
	#[case("/forum/ac/5/3?page=4", PageAddress::article_comments("5", "3").with_page(4))]
	fn test_resolve_each_route(#[case] url: &str, #[case] expected: PageAddress) {
		assert_eq!(resolve(url), expected);
	}

	#[rstest]
	#[case("/404")]
	#[case("/forum")]
	#[case("/forum/s")]
	#[case("/forum/s/1/extra")]
	#[case("/Articles")]
	#[case("/articles/")]
	#[case("")]
	fn test_unknown_shapes_are_not_found(#[case] url: &str) {
		assert_eq!(resolve(url), PageAddress::NotFound);
	}

	#[rstest]
	#[case("abc")]
	#[case("0")]
	#[case("-1")]
	#[case("")]
	#[case("2.5")]
	fn test_malformed_page_is_absent(#[case] page: &str) {
		let address = resolve(&format!("/forum/t/1?page={page}"));
		assert_eq!(address.params(), Some(PageParams { page: None }));
		assert_eq!(address.page_or_first(), Some(1));
	}

	#[rstest]
	fn test_hash_only_kept_for_threads() {
		assert_eq!(resolve("/forum/t/1#m42").hash(), Some("m42"));
		assert_eq!(resolve("/forum/t/1").hash(), None);
		assert_eq!(resolve("/forum/ac/1/1#m42").hash(), None);
		assert_eq!(resolve("/forum/ms/x#m42").hash(), None);
	}

	#[rstest]
	fn test_unrelated_query_params_are_ignored() {
		assert_eq!(resolve("/articles?page=2&sort=name"), PageAddress::Articles);
		assert_eq!(resolve("/?sort=name"), PageAddress::root());
	}

	#[rstest]
	fn test_thread_to_url() {
		let address = PageAddress::Thread {
			thread_id: "12".into(),
			params: PageParams::page(3),
			hash: Some("m99".into()),
		};
		assert_eq!(address.to_url().unwrap(), "/forum/t/12?page=3#m99");
	}

	#[rstest]
	fn test_search_string_is_encoded() {
		let address = PageAddress::MessageSearch {
			search_string: "a/b c".into(),
		};
		assert_eq!(address.to_url().unwrap(), "/forum/ms/a%2Fb%20c");
		assert_eq!(resolve(&address.to_url().unwrap()), address);
	}

	#[rstest]
	fn test_not_found_serializes_to_404() {
		assert_eq!(PageAddress::NotFound.to_url().unwrap(), "/404");
		assert_eq!(resolve("/404"), PageAddress::NotFound);
	}

	#[rstest]
	fn test_with_page_ignores_unpaged_variants() {
		assert_eq!(PageAddress::Articles.with_page(2), PageAddress::Articles);
	}

	#[rstest]
	fn test_priority_covers_every_route_but_not_found() {
		assert_eq!(Route::PRIORITY.len(), 12);
		assert!(!Route::PRIORITY.contains(&Route::NotFound));
		assert_eq!(Route::PRIORITY[0], Route::Root);
		assert_eq!(Route::PRIORITY[11], Route::ArticleComments);
	}

	#[rstest]
	fn test_route_display_is_template() {
		assert_eq!(Route::ArchivedArticle.to_string(), "/article/d/:articleId/:version");
	}
}
