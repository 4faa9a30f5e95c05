//! # Ark Core
//!
//! Building blocks shared by the web client:
//!
//! - [`reactive`]: fine-grained `Signal`/`Effect` runtime with automatic
//!   dependency tracking, used for every piece of observable state.
//! - [`signals`]: synchronous, in-order broadcast channels used to announce
//!   completed mutations (thread created, article updated, ...).
//!
//! Both are single-threaded. In the browser there is only one thread; natively
//! every thread gets its own runtime.

pub mod reactive;
pub mod signals;

pub use reactive::{Effect, EffectTiming, Signal, untrack};
pub use signals::{EventChannel, ReceiverId};
