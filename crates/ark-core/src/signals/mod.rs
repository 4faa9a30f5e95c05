//! Synchronous event channels.
//!
//! An [`EventChannel`] broadcasts a value to every connected receiver, in
//! connection order, before `send` returns. Nothing is buffered: receivers
//! connected after a send never see it.
//!
//! ## Example
//!
//! ```ignore
//! use ark_core::signals::EventChannel;
//!
//! #[derive(Debug)]
//! enum ThreadEvent { Created, Deleted }
//!
//! let threads = EventChannel::<ThreadEvent>::new("threads");
//! let id = threads.connect(|event| println!("thread event: {event:?}"));
//! threads.send(&ThreadEvent::Created);
//! threads.disconnect(id);
//! ```

mod channel;

pub use channel::{EventChannel, ReceiverId};
