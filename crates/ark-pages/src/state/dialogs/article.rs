use std::rc::Rc;

use ark_core::reactive::Signal;

use super::submit_request;
use crate::api::models::{Article, ArticleVisibility};
use crate::api::requests::{CreateArticle, UpdateArticle};
use crate::events::ArticleEvent;
use crate::router::PageAddress;
use crate::state::StoreContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleEditorMode {
	New,
	Update { article_id: i64 },
}

/// Create and edit dialog for articles
pub struct ArticleEditorDialog {
	pub is_open: Signal<bool>,
	pub mode: Signal<ArticleEditorMode>,
	pub path: Signal<String>,
	pub name: Signal<String>,
	pub content: Signal<String>,
	pub visibility: Signal<ArticleVisibility>,
	ctx: StoreContext,
}

impl ArticleEditorDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			mode: Signal::new(ArticleEditorMode::New),
			path: Signal::new(String::new()),
			name: Signal::new(String::new()),
			content: Signal::new(String::new()),
			visibility: Signal::new(ArticleVisibility::default()),
			ctx: ctx.clone(),
		})
	}

	/// Open an empty form. The visibility keeps its last value.
	pub fn show_new(&self) {
		self.path.set(String::new());
		self.name.set(String::new());
		self.content.set(String::new());
		self.mode.set(ArticleEditorMode::New);
		self.is_open.set(true);
	}

	pub fn show_update(&self, article: &Article) {
		self.path.set(article.info.path.clone());
		self.name.set(article.info.name.clone());
		self.content.set(article.content.clone());
		self.visibility.set(article.visibility);
		self.mode.set(ArticleEditorMode::Update {
			article_id: article.info.id,
		});
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.path.with(String::is_empty) && !self.name.with(String::is_empty)
	}

	pub fn submit(&self) {
		let api = self.ctx.api.clone();
		let articles = self.ctx.events.articles.clone();
		let path = self.path.get_untracked();
		let name = self.name.get_untracked();
		let content = self.content.get_untracked();
		let visibility = self.visibility.get_untracked();

		match self.mode.get_untracked() {
			ArticleEditorMode::New => {
				let request = CreateArticle {
					path,
					name,
					content,
					visibility,
				};
				submit_request(
					"create article",
					&self.is_open,
					async move { api.create_article(&request).await },
					move || articles.send(&ArticleEvent::Created),
				);
			}
			ArticleEditorMode::Update { article_id } => {
				let request = UpdateArticle {
					id: article_id,
					path,
					name,
					content,
					visibility,
				};
				submit_request(
					"update article",
					&self.is_open,
					async move { api.update_article(&request).await },
					move || articles.send(&ArticleEvent::Updated),
				);
			}
		}
	}
}

pub struct DeleteArticleDialog {
	pub is_open: Signal<bool>,
	pub article_id: Signal<i64>,
	pub article_name: Signal<String>,
	pub approve_deletion: Signal<bool>,
	ctx: StoreContext,
}

impl DeleteArticleDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			article_id: Signal::new(0),
			article_name: Signal::new(String::new()),
			approve_deletion: Signal::new(false),
			ctx: ctx.clone(),
		})
	}

	pub fn show(&self, article: &Article) {
		self.article_id.set(article.info.id);
		self.article_name.set(article.info.name.clone());
		self.approve_deletion.set(false);
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn toggle_approve_deletion(&self) {
		self.approve_deletion.update(|approve| *approve = !*approve);
	}

	pub fn can_submit(&self) -> bool {
		self.approve_deletion.get()
	}

	/// Delete the article and go to the article list
	pub fn submit(&self) {
		if !self.approve_deletion.get_untracked() {
			return;
		}
		let article_id = self.article_id.get_untracked();

		let api = self.ctx.api.clone();
		let ctx = self.ctx.clone();
		submit_request(
			"delete article",
			&self.is_open,
			async move { api.delete_article(article_id).await },
			move || ctx.go_to(&PageAddress::Articles),
		);
	}
}
