//! Mutation dialogs.
//!
//! Every dialog has an `is_open` signal, a `show..` that fills the form, a
//! `hide` and a `submit`. A submit that the server acknowledges closes the
//! dialog and announces the change on the matching event channel. Anything
//! else leaves the dialog open and is only logged.

mod article;
mod message;
mod structure;
mod thread;

pub use article::{ArticleEditorDialog, ArticleEditorMode, DeleteArticleDialog};
pub use message::{EditTarget, NewMessageState, UpdateMessageDialog};
pub use structure::{
	MoveSubsectionDialog, NewSectionDialog, NewSubsectionDialog, RenameSectionDialog,
	RenameSubsectionDialog,
};
pub use thread::{DeleteThreadDialog, MoveThreadDialog, NewThreadDialog, RenameThreadDialog};

use std::future::Future;

use ark_core::reactive::Signal;

use crate::api::{Ack, FetchError};
use crate::spawn::spawn_task;
use crate::warn_log;

/// Send `request` and run `confirmed` once the server acknowledged it
fn send_request<F, C>(what: &'static str, request: F, confirmed: C)
where
	F: Future<Output = Result<Ack, FetchError>> + 'static,
	C: FnOnce() + 'static,
{
	spawn_task(async move {
		match request.await {
			Ok(Ack::Ok) => confirmed(),
			Ok(Ack::Rejected(body)) => warn_log!("{}: rejected: {}", what, body),
			Err(e) => warn_log!("{}: request failed: {}", what, e),
		}
	});
}

/// [`send_request`] that also closes the dialog on success
fn submit_request<F, C>(what: &'static str, is_open: &Signal<bool>, request: F, confirmed: C)
where
	F: Future<Output = Result<Ack, FetchError>> + 'static,
	C: FnOnce() + 'static,
{
	let is_open = is_open.clone();
	send_request(what, request, move || {
		is_open.set(false);
		confirmed();
	});
}
