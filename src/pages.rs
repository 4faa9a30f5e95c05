//! Routing, API access and reactive page state.
//!
//! ## Architecture
//!
//! - **Router**: typed page addresses over the History API
//! - **Stores**: one reactive store per page, refreshed by address changes
//!   and domain events
//! - **API**: JSON over HTTP through a swappable transport
//!
//! ## Example
//!
//! ```rust,ignore
//! use ark::pages::router::PageAddress;
//!
//! app.ctx.go_to(&PageAddress::thread("42"));
//! let title = app.title.title();
//! ```

// Re-export all ark-pages functionality
pub use ark_pages::*;
