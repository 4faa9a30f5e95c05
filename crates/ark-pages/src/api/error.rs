//! Fetch errors.

use thiserror::Error;

/// Message shown for failures that carry no server explanation
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Why a request produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The request never got a response.
	#[error("Network error: {0}")]
	Network(String),

	/// The server answered with a non-success status.
	#[error("Server returned status {status}: {body}")]
	Status { status: u16, body: String },

	/// The response body did not have the expected shape.
	#[error("Failed to decode response: {0}")]
	Decode(String),
}

impl FetchError {
	/// Text to show the user.
	///
	/// The server puts a readable explanation in the body of error responses;
	/// everything else collapses to a generic message.
	pub fn user_message(&self) -> String {
		match self {
			Self::Status { body, .. } if !body.is_empty() => body.clone(),
			_ => UNEXPECTED_ERROR.to_string(),
		}
	}
}

impl From<serde_json::Error> for FetchError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}
