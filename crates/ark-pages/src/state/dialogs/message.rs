use std::rc::Rc;

use ark_core::reactive::Signal;

use super::{send_request, submit_request};
use crate::api::models::{Comment, Message};
use crate::api::requests::{PostComment, PostMessage, UpdateComment, UpdateMessage};
use crate::events::{CommentEvent, MessageEvent};
use crate::router::PageAddress;
use crate::state::{CurrentThreadState, StoreContext};

/// Reply editor under a thread or an article's comments.
///
/// Not a dialog: it is always shown, so a successful post only clears the
/// text.
pub struct NewMessageState {
	pub message_text: Signal<String>,
	thread: Rc<CurrentThreadState>,
	ctx: StoreContext,
}

impl NewMessageState {
	pub fn new(ctx: &StoreContext, thread: &Rc<CurrentThreadState>) -> Rc<Self> {
		Rc::new(Self {
			message_text: Signal::new(String::new()),
			thread: thread.clone(),
			ctx: ctx.clone(),
		})
	}

	pub fn can_submit(&self) -> bool {
		!self.message_text.with(String::is_empty)
	}

	/// Post to the current thread or article; other pages do nothing
	pub fn submit(&self) {
		let message = self.message_text.get_untracked();
		let api = self.ctx.api.clone();
		let message_text = self.message_text.clone();

		match self.ctx.current() {
			PageAddress::Thread { .. } => {
				let Some(thread) = self.thread.current_thread.get_untracked() else {
					return;
				};
				let request = PostMessage {
					message,
					thread_id: thread.id,
				};
				let messages = self.ctx.events.messages.clone();
				send_request(
					"post message",
					async move { api.post_message(&request).await },
					move || {
						message_text.set(String::new());
						messages.send(&MessageEvent::Created);
					},
				);
			}
			PageAddress::ArticleComments {
				article_id,
				article_version,
				..
			} => {
				let Ok(article_id) = article_id.parse() else {
					return;
				};
				let request = PostComment {
					message,
					article_id,
					article_version: article_version.parse().ok(),
				};
				let comments = self.ctx.events.comments.clone();
				send_request(
					"post comment",
					async move { api.post_comment(&request).await },
					move || {
						message_text.set(String::new());
						comments.send(&CommentEvent::Created);
					},
				);
			}
			_ => {}
		}
	}
}

/// What the update dialog edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
	Message { id: i64, thread_id: i64 },
	Comment { id: i64, article_id: i64 },
}

pub struct UpdateMessageDialog {
	pub is_open: Signal<bool>,
	pub message_text: Signal<String>,
	pub target: Signal<Option<EditTarget>>,
	ctx: StoreContext,
}

impl UpdateMessageDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			message_text: Signal::new(String::new()),
			target: Signal::new(None),
			ctx: ctx.clone(),
		})
	}

	pub fn show_message(&self, message: &Message) {
		self.show(
			&message.content,
			EditTarget::Message {
				id: message.id,
				thread_id: message.thread_id,
			},
		);
	}

	pub fn show_comment(&self, comment: &Comment) {
		self.show(
			&comment.content,
			EditTarget::Comment {
				id: comment.id,
				article_id: comment.article_id,
			},
		);
	}

	fn show(&self, content: &str, target: EditTarget) {
		self.message_text.set(content.to_string());
		self.target.set(Some(target));
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.message_text.with(String::is_empty)
	}

	pub fn submit(&self) {
		let Some(target) = self.target.get_untracked() else {
			return;
		};
		let message = self.message_text.get_untracked();
		let api = self.ctx.api.clone();

		match target {
			EditTarget::Message { id, thread_id } => {
				let request = UpdateMessage {
					message,
					message_id: id,
					thread_id,
				};
				let messages = self.ctx.events.messages.clone();
				submit_request(
					"update message",
					&self.is_open,
					async move { api.update_message(&request).await },
					move || messages.send(&MessageEvent::Updated),
				);
			}
			EditTarget::Comment { id, article_id } => {
				let request = UpdateComment {
					message,
					comment_id: id,
					article_id,
				};
				let comments = self.ctx.events.comments.clone();
				submit_request(
					"update comment",
					&self.is_open,
					async move { api.update_comment(&request).await },
					move || comments.send(&CommentEvent::Updated),
				);
			}
		}
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::api::Ack;
	use crate::config::AppConfig;
	use crate::spawn::run_until_stalled;
	use crate::state::ForumStructureState;
	use crate::testing::{MockApi, context, message, messages, thread, user};
	use rstest::rstest;
	use serial_test::serial;
	use std::cell::Cell;

	fn setup(url: &str) -> (Rc<MockApi>, StoreContext, Rc<NewMessageState>) {
		let api = MockApi::new();
		api.messages.set_ok(Some(messages(thread(7, 10, 0), &[1])));
		let ctx = context(&api, url);
		let structure = ForumStructureState::new(&ctx, &AppConfig::default());
		let current_thread = CurrentThreadState::new(&ctx, &structure);
		let editor = NewMessageState::new(&ctx, &current_thread);
		run_until_stalled();
		(api, ctx, editor)
	}

	fn count<E: 'static>(channel: &ark_core::signals::EventChannel<E>) -> Rc<Cell<u32>> {
		let count = Rc::new(Cell::new(0));
		let count_clone = count.clone();
		channel.connect(move |_| count_clone.set(count_clone.get() + 1));
		count
	}

	#[rstest]
	#[serial]
	fn test_post_message_clears_text() {
		let (api, ctx, editor) = setup("/forum/t/7");
		let created = count(&ctx.events.messages);
		editor.message_text.set("Hello".into());

		editor.submit();
		run_until_stalled();

		assert_eq!(
			api.post_message.last_arg().as_deref(),
			Some(r#"PostMessage { message: "Hello", thread_id: 7 }"#)
		);
		assert!(editor.message_text.get_untracked().is_empty());
		assert_eq!(created.get(), 1);
	}

	#[rstest]
	#[serial]
	fn test_post_comment_sends_version() {
		let (api, ctx, editor) = setup("/forum/ac/3/2");
		let created = count(&ctx.events.comments);
		editor.message_text.set("Nice".into());

		editor.submit();
		run_until_stalled();

		assert_eq!(
			api.post_comment.last_arg().as_deref(),
			Some(r#"PostComment { message: "Nice", article_id: 3, article_version: Some(2) }"#)
		);
		assert_eq!(created.get(), 1);
	}

	#[rstest]
	#[serial]
	fn test_rejected_post_keeps_text() {
		let (api, ctx, editor) = setup("/forum/t/7");
		api.post_message.set_ok(Ack::Rejected("Too long".into()));
		let created = count(&ctx.events.messages);
		editor.message_text.set("Hello".into());

		editor.submit();
		run_until_stalled();

		assert_eq!(editor.message_text.get_untracked(), "Hello");
		assert_eq!(created.get(), 0);
	}

	#[rstest]
	#[serial]
	fn test_post_elsewhere_does_nothing() {
		let (api, _ctx, editor) = setup("/articles");
		editor.message_text.set("Hello".into());

		editor.submit();
		run_until_stalled();

		assert_eq!(api.post_message.calls() + api.post_comment.calls(), 0);
	}

	#[rstest]
	#[serial]
	fn test_update_message_and_comment() {
		let api = MockApi::new();
		let ctx = context(&api, "/forum/t/7");
		let updated_messages = count(&ctx.events.messages);
		let updated_comments = count(&ctx.events.comments);
		let dialog = UpdateMessageDialog::new(&ctx);

		dialog.show_message(&message(5, 7));
		assert_eq!(dialog.message_text.get_untracked(), "message 5");
		dialog.submit();
		run_until_stalled();
		assert_eq!(
			api.update_message.last_arg().as_deref(),
			Some(r#"UpdateMessage { message: "message 5", message_id: 5, thread_id: 7 }"#)
		);
		assert!(!dialog.is_open.get_untracked());

		dialog.show_comment(&Comment {
			id: 9,
			user: user(1, "ann"),
			article_id: 3,
			create_time: 0,
			update_time: 0,
			content: "typo".into(),
		});
		dialog.message_text.set("fixed".into());
		dialog.submit();
		run_until_stalled();
		assert_eq!(
			api.update_comment.last_arg().as_deref(),
			Some(r#"UpdateComment { message: "fixed", comment_id: 9, article_id: 3 }"#)
		);

		assert_eq!(updated_messages.get(), 1);
		assert_eq!(updated_comments.get(), 1);
	}
}
