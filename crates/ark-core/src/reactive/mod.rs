//! Reactive primitives.
//!
//! ## Example
//!
//! ```ignore
//! use ark_core::reactive::{Effect, EffectTiming, Signal};
//!
//! let count = Signal::new(0);
//! let doubled = Signal::new(0);
//!
//! let _sync = Effect::new_with_timing(
//! 	{
//! 		let count = count.clone();
//! 		let doubled = doubled.clone();
//! 		move || doubled.set(count.get() * 2)
//! 	},
//! 	EffectTiming::Layout,
//! );
//!
//! count.set(21);
//! assert_eq!(doubled.get_untracked(), 42);
//! ```

pub mod effect;
pub mod runtime;
pub mod signal;

pub use effect::Effect;
pub use runtime::{EffectTiming, NodeId, Runtime, set_scheduler, untrack, with_runtime};
pub use signal::Signal;
