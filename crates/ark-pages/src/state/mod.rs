//! Reactive page state.
//!
//! One store per page or page area. A store is built once by the
//! [`App`](crate::app::App), exposes its data as public [`Signal`]s and
//! [`Resource`]s, and reloads itself when the address or a domain event makes
//! that data stale:
//!
//! ```text
//! CurrentAddress ─┐
//!                 ├─> Trigger ─> refresh() ─> Resource::load ─> ForumApi
//! EventChannel ───┘                                   │
//!                                                     └─> Signal<ResourceState<T>>
//! ```
//!
//! `refresh` reads the current address: a store whose page is not shown
//! suspends instead of fetching, which also discards a fetch still in flight.
//!
//! [`Signal`]: ark_core::reactive::Signal

mod article;
mod comments;
mod context;
pub mod dialogs;
mod forum_structure;
mod header;
mod resource;
mod search;
mod side_panel;
mod thread;
mod thread_list;
mod trigger;
mod user;

pub use article::{ArticlesPageState, ViewArticleState};
pub use comments::ArticleCommentsState;
pub use context::StoreContext;
pub use forum_structure::ForumStructureState;
pub use header::{BreadcrumbState, DocumentTitleState, PageSources};
pub use resource::{Resource, ResourceState};
pub use search::{ArticleSearchState, ForumSearchState, SearchBarState};
pub use side_panel::SidePanelState;
pub use thread::CurrentThreadState;
pub use thread_list::{ThreadListState, thread_query};
pub use trigger::Trigger;
pub use user::{
	CurrentUserState, LoginState, SIGN_ON_FAILED, SIGN_UP_FAILED, SignupState, UserSessionsState,
};
