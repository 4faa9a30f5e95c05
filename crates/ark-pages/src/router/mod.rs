//! Client-side routing.
//!
//! ## Architecture
//!
//! ```text
//! HistoryBackend ──(popstate/hashchange)──> Router ──Signal<RawLocation>──> CurrentAddress
//!       ^                                     │                                 │
//!       └──────────────(push)─────────────────┘                      subscribe / address()
//! ```
//!
//! - [`PathTemplate`]: literal and `:param` segments, exact-length matching
//! - [`PageAddress`]: one variant per [`Route`], resolved in priority order
//! - [`Router`]: raw location state synchronized with a [`HistoryBackend`]
//! - [`CurrentAddress`]: the typed address, kept in sync by a layout effect
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use ark_pages::router::{CurrentAddress, MemoryHistory, PageAddress, Router};
//!
//! let router = Router::new(Rc::new(MemoryHistory::new("/")));
//! let current = CurrentAddress::new(&router);
//!
//! current.go_to(&PageAddress::thread("42"));
//! assert_eq!(current.address_untracked(), PageAddress::thread("42"));
//! ```

mod address;
mod core;
mod error;
mod history;
mod location;
mod pattern;
mod resolver;

pub use address::{PAGE_QUERY_PARAM, PageAddress, PageParams, Route};
pub use core::Router;
pub use error::{PathError, RouterError};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{HistoryBackend, MemoryHistory, scroll_into_view};
pub use location::{QueryParams, RawLocation};
pub use pattern::{PathParams, PathTemplate};
pub use resolver::CurrentAddress;
