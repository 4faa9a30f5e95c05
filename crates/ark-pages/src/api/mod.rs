//! Data-fetch layer.
//!
//! Stores talk to the server only through [`ForumApi`]. Every call resolves
//! to `Result<T, FetchError>`; the stores turn that into
//! [`ResourceState`](crate::state::ResourceState).

mod client;
mod error;
mod http;
pub mod models;
pub mod requests;
mod session;

pub use client::{Ack, ForumApi, SignOnOutcome, SignUpOutcome, ThreadQuery};
pub use error::{FetchError, UNEXPECTED_ERROR};
#[cfg(target_arch = "wasm32")]
pub use http::ReqwestTransport;
pub use http::{ApiRequest, ApiResponse, HttpForumApi, Method, Transport};
#[cfg(target_arch = "wasm32")]
pub use session::DocumentCookieSession;
pub use session::{PasswordEncoder, PlainPassword, SessionSource, StaticSession, find_cookie};
