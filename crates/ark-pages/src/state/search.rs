//! Search result pages and the header search bar.

use std::rc::Rc;

use ark_core::reactive::Signal;

use super::context::StoreContext;
use super::forum_structure::ForumStructureState;
use super::resource::{Resource, ResourceState};
use super::trigger::Trigger;
use crate::api::models::{ArticleSearchResults, MessageSearchResult, MessageSearchResults};
use crate::router::PageAddress;
use crate::views::SearchFormType;

pub struct ForumSearchState {
	pub results: Resource<MessageSearchResults>,
	structure: Rc<ForumStructureState>,
	ctx: StoreContext,
}

impl ForumSearchState {
	pub fn new(ctx: &StoreContext, structure: &Rc<ForumStructureState>) -> Rc<Self> {
		let state = Rc::new(Self {
			results: Resource::new(
				"forum_search",
				ResourceState::Success(MessageSearchResults::default()),
			),
			structure: structure.clone(),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh).on_address(&ctx.address);

		state
	}

	pub fn refresh(&self) {
		let PageAddress::MessageSearch { search_string } = self.ctx.current() else {
			self.results.suspend();
			return;
		};

		let api = self.ctx.api.clone();
		self.results
			.load(async move { api.search_messages(&search_string).await });
	}

	/// Thread page holding `result`, anchored at the message
	pub fn result_address(&self, result: &MessageSearchResult) -> PageAddress {
		result.thread_address(self.structure.messages_per_page.get())
	}
}

pub struct ArticleSearchState {
	pub results: Resource<ArticleSearchResults>,
	ctx: StoreContext,
}

impl ArticleSearchState {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		let state = Rc::new(Self {
			results: Resource::new(
				"article_search",
				ResourceState::Success(ArticleSearchResults::default()),
			),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh).on_address(&ctx.address);

		state
	}

	pub fn refresh(&self) {
		let PageAddress::ArticleSearch { search_string } = self.ctx.current() else {
			self.results.suspend();
			return;
		};

		let api = self.ctx.api.clone();
		self.results
			.load(async move { api.search_articles(&search_string).await });
	}
}

/// The search box in the page header
pub struct SearchBarState {
	pub search_string: Signal<String>,
	ctx: StoreContext,
}

impl SearchBarState {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			search_string: Signal::new(String::new()),
			ctx: ctx.clone(),
		})
	}

	/// `None` hides the search bar
	pub fn form_type(&self) -> Option<SearchFormType> {
		SearchFormType::for_address(&self.ctx.address.address())
	}

	/// Go to the results page for the typed text, if there is any
	pub fn submit(&self) {
		let query = self.search_string.get_untracked();
		if query.is_empty() {
			return;
		}
		let form_type = SearchFormType::for_address(&self.ctx.current());
		if let Some(form_type) = form_type {
			self.ctx.go_to(&form_type.results_address(&query));
		}
	}
}
