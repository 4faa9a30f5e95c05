//! # The Ark web client
//!
//! Browser client for The Ark forum and wiki. This crate is a facade over the
//! workspace crates:
//!
//! - [`core`]: fine-grained reactive runtime (`Signal`, `Effect`) and
//!   synchronous event channels
//! - [`pages`]: client-side router, forum API access, page stores and dialogs
//!
//! ## Feature Flags
//!
//! - `debug-hooks` - verbose `debug_log!` output in debug builds
//! - `console_error_panic_hook` - forward panics to the browser console
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use ark::prelude::*;
//!
//! let app = App::new(api, history, session, encoder, AppConfig::default());
//!
//! app.ctx.go_to(&PageAddress::Articles);
//! app.articles_page.filter.set("install".to_string());
//! let tree = app.articles_page.article_tree();
//! ```
//!
//! In the browser the generated `main` starts everything from the page's
//! inline configuration.

pub mod core;
pub mod pages;

pub use ark_pages::{App, AppConfig, PageAddress};

/// Browser entry point
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() -> Result<(), wasm_bindgen::JsValue> {
	ark_pages::app::start()
}

/// Commonly used types
pub mod prelude {
	pub use ark_core::reactive::{Effect, EffectTiming, Signal};
	pub use ark_core::signals::EventChannel;

	pub use ark_pages::api::{FetchError, ForumApi, SessionSource};
	pub use ark_pages::app::App;
	pub use ark_pages::config::AppConfig;
	pub use ark_pages::events::DomainEvents;
	pub use ark_pages::router::{CurrentAddress, HistoryBackend, PageAddress, Router};
	pub use ark_pages::state::{Resource, ResourceState, StoreContext};
}
