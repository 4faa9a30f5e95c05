//! Ark Pages - routing and page state for The Ark web client
//!
//! Everything between the browser location and the rendered page, except the
//! rendering itself:
//!
//! - [`router`]: path templates, typed [`PageAddress`](router::PageAddress)es
//!   and history synchronization
//! - [`api`]: the [`ForumApi`](api::ForumApi) the stores fetch through, with a
//!   JSON-over-HTTP implementation for the browser
//! - [`events`]: domain event channels that mark data stale after a mutation
//! - [`state`]: one reactive store per page or page area, plus the dialogs
//! - [`views`]: pure derivations for titles, breadcrumbs, pagers and grouping
//! - [`app`]: the composition root that builds all of the above
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use ark_pages::api::{PlainPassword, StaticSession};
//! use ark_pages::app::App;
//! use ark_pages::config::AppConfig;
//! use ark_pages::router::MemoryHistory;
//!
//! let app = App::new(
//!     api,
//!     Rc::new(MemoryHistory::new("/forum/t/42")),
//!     Rc::new(StaticSession::none()),
//!     Rc::new(PlainPassword),
//!     AppConfig::default(),
//! );
//! println!("{}", app.title.title());
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod events;
pub mod logging;
pub mod router;
pub mod spawn;
pub mod state;
pub mod views;

// Scripted ForumApi and sample records for this crate's tests and downstream tests
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use events::DomainEvents;
pub use router::{CurrentAddress, PageAddress, Router};
pub use state::{Resource, ResourceState, StoreContext};

// Logging macros are exported at the crate root via #[macro_export]

#[doc(hidden)]
pub mod __private {
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
