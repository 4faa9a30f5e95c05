//! Reactive runtime and event channels.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ark::core::reactive::{Effect, Signal};
//! use ark::core::signals::EventChannel;
//! ```

pub use ark_core::*;
