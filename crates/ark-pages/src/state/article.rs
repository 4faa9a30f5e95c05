//! Article page and the article list.

use std::rc::Rc;

use ark_core::reactive::Signal;

use super::context::StoreContext;
use super::resource::Resource;
use super::side_panel::SidePanelState;
use super::trigger::Trigger;
use crate::api::models::{Article, ArticleInfo, Articles};
use crate::router::PageAddress;
use crate::views::{ArticleTreeNode, build_article_tree, filter_articles};

/// The article shown on the article and archived article pages
pub struct ViewArticleState {
	pub article: Resource<Article>,
	side_panel: Rc<SidePanelState>,
	ctx: StoreContext,
}

impl ViewArticleState {
	pub fn new(ctx: &StoreContext, side_panel: &Rc<SidePanelState>) -> Rc<Self> {
		let state = Rc::new(Self {
			article: Resource::loading("view_article"),
			side_panel: side_panel.clone(),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh)
			.on(&ctx.events.articles)
			.on_address(&ctx.address);

		state
	}

	pub fn refresh(&self) {
		let (article_id, version) = match self.ctx.current() {
			PageAddress::Article { article_id } => (article_id, None),
			PageAddress::ArchivedArticle {
				article_id,
				version,
			} => (article_id, Some(version)),
			_ => {
				self.article.suspend();
				return;
			}
		};

		let api = self.ctx.api.clone();
		self.article
			.load(async move { api.article(&article_id, version.as_deref()).await });
	}

	pub fn article_info(&self) -> Option<ArticleInfo> {
		self.article.with(|state| state.value().map(|a| a.info.clone()))
	}

	/// Whether the loaded article is one of the user's favorites
	pub fn is_current_favorite(&self) -> bool {
		self.article_info()
			.is_some_and(|info| self.side_panel.is_favorite(info.id))
	}

	pub fn toggle_current_favorite(&self) {
		if let Some(info) = self.article_info() {
			self.side_panel.toggle_favorite_article(&info);
		}
	}

	/// Open `version` of the loaded article.
	///
	/// Ignored while the article is loading, since the version list belongs
	/// to the article being replaced.
	pub fn select_version(&self, version: u32) {
		let address = self
			.article
			.with_untracked(|state| state.value().and_then(|a| a.version_address(version)));
		if let Some(address) = address {
			self.ctx.go_to(&address);
		}
	}

	/// Comments page of the loaded article version
	pub fn comments_address(&self) -> Option<PageAddress> {
		self.article.with(|state| {
			state
				.value()
				.map(|a| PageAddress::article_comments(a.info.id, a.version))
		})
	}
}

/// The article list page
pub struct ArticlesPageState {
	pub articles: Resource<Articles>,
	/// Text typed into the filter box
	pub filter: Signal<String>,
	ctx: StoreContext,
}

impl ArticlesPageState {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		let state = Rc::new(Self {
			articles: Resource::loading("articles"),
			filter: Signal::new(String::new()),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh)
			.on(&ctx.events.articles)
			.on(&ctx.events.user)
			.on_address(&ctx.address);

		state
	}

	pub fn refresh(&self) {
		if self.ctx.current() != PageAddress::Articles {
			self.articles.suspend();
			return;
		}

		let api = self.ctx.api.clone();
		self.articles.load(async move { api.articles().await });
	}

	/// Filtered articles arranged by path
	pub fn article_tree(&self) -> ArticleTreeNode {
		let filter = self.filter.get();
		self.articles.with(|state| match state.value() {
			Some(articles) => build_article_tree(&filter_articles(&articles.articles, &filter)),
			None => ArticleTreeNode::default(),
		})
	}
}
