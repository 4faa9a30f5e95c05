use std::rc::Rc;

use ark_core::reactive::Signal;

use super::submit_request;
use crate::api::models::{SubSection, Thread};
use crate::api::requests::{CreateThread, MoveThread, RenameThread};
use crate::events::ThreadEvent;
use crate::router::PageAddress;
use crate::state::{ForumStructureState, StoreContext};

pub struct NewThreadDialog {
	pub is_open: Signal<bool>,
	pub thread_name: Signal<String>,
	pub message_text: Signal<String>,
	pub sub_section: Signal<Option<SubSection>>,
	ctx: StoreContext,
}

impl NewThreadDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			thread_name: Signal::new(String::new()),
			message_text: Signal::new(String::new()),
			sub_section: Signal::new(None),
			ctx: ctx.clone(),
		})
	}

	/// Open an empty form, preselecting `sub_section`
	pub fn show(&self, sub_section: Option<SubSection>) {
		self.thread_name.set(String::new());
		self.message_text.set(String::new());
		self.sub_section.set(sub_section);
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.thread_name.with(String::is_empty)
			&& !self.message_text.with(String::is_empty)
			&& self.sub_section.with(Option::is_some)
	}

	pub fn submit(&self) {
		let Some(sub_section) = self.sub_section.get_untracked() else {
			return;
		};
		let request = CreateThread {
			message: self.message_text.get_untracked(),
			thread_name: self.thread_name.get_untracked(),
			subsection_id: sub_section.id,
		};

		let api = self.ctx.api.clone();
		let threads = self.ctx.events.threads.clone();
		submit_request(
			"create thread",
			&self.is_open,
			async move { api.create_thread(&request).await },
			move || threads.send(&ThreadEvent::Created),
		);
	}
}

pub struct RenameThreadDialog {
	pub is_open: Signal<bool>,
	pub new_name: Signal<String>,
	pub thread: Signal<Option<Thread>>,
	ctx: StoreContext,
}

impl RenameThreadDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			new_name: Signal::new(String::new()),
			thread: Signal::new(None),
			ctx: ctx.clone(),
		})
	}

	pub fn show(&self, thread: &Thread) {
		self.new_name.set(thread.name.clone());
		self.thread.set(Some(thread.clone()));
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.new_name.with(String::is_empty)
	}

	pub fn submit(&self) {
		let Some(thread) = self.thread.get_untracked() else {
			return;
		};
		let request = RenameThread {
			name: self.new_name.get_untracked(),
			thread_id: thread.id,
		};

		let api = self.ctx.api.clone();
		let threads = self.ctx.events.threads.clone();
		submit_request(
			"rename thread",
			&self.is_open,
			async move { api.rename_thread(&request).await },
			move || threads.send(&ThreadEvent::Renamed),
		);
	}
}

pub struct MoveThreadDialog {
	pub is_open: Signal<bool>,
	pub new_sub_section: Signal<Option<SubSection>>,
	pub thread: Signal<Option<Thread>>,
	structure: Rc<ForumStructureState>,
	ctx: StoreContext,
}

impl MoveThreadDialog {
	pub fn new(ctx: &StoreContext, structure: &Rc<ForumStructureState>) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			new_sub_section: Signal::new(None),
			thread: Signal::new(None),
			structure: structure.clone(),
			ctx: ctx.clone(),
		})
	}

	/// Open with the thread's current subsection selected
	pub fn show(&self, thread: &Thread) {
		self.new_sub_section
			.set(self.structure.sub_section(thread.sub_section_id));
		self.thread.set(Some(thread.clone()));
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	/// Pick the target subsection; unknown ids are ignored
	pub fn select_sub_section(&self, sub_section_id: i64) {
		if let Some(sub_section) = self.structure.sub_section(sub_section_id) {
			self.new_sub_section.set(Some(sub_section));
		}
	}

	/// A target other than the thread's current subsection is selected
	pub fn can_submit(&self) -> bool {
		let current = self.thread.with(|t| t.as_ref().map(|t| t.sub_section_id));
		self.new_sub_section
			.with(|target| target.as_ref().is_some_and(|s| Some(s.id) != current))
	}

	pub fn submit(&self) {
		let (Some(thread), Some(target)) = (
			self.thread.get_untracked(),
			self.new_sub_section.get_untracked(),
		) else {
			return;
		};
		let request = MoveThread {
			thread_id: thread.id,
			new_subsection_id: target.id,
		};

		let api = self.ctx.api.clone();
		let threads = self.ctx.events.threads.clone();
		submit_request(
			"move thread",
			&self.is_open,
			async move { api.move_thread(&request).await },
			move || threads.send(&ThreadEvent::Moved),
		);
	}
}

pub struct DeleteThreadDialog {
	pub is_open: Signal<bool>,
	pub thread_id: Signal<i64>,
	pub thread_name: Signal<String>,
	/// The confirmation checkbox
	pub approve_deletion: Signal<bool>,
	ctx: StoreContext,
}

impl DeleteThreadDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			thread_id: Signal::new(0),
			thread_name: Signal::new(String::new()),
			approve_deletion: Signal::new(false),
			ctx: ctx.clone(),
		})
	}

	pub fn show(&self, thread: &Thread) {
		self.thread_id.set(thread.id);
		self.thread_name.set(thread.name.clone());
		self.approve_deletion.set(false);
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn toggle_approve_deletion(&self) {
		self.approve_deletion.update(|approve| *approve = !*approve);
	}

	pub fn can_submit(&self) -> bool {
		self.approve_deletion.get()
	}

	/// Delete the thread and go back to the main page
	pub fn submit(&self) {
		if !self.approve_deletion.get_untracked() {
			return;
		}
		let thread_id = self.thread_id.get_untracked();

		let api = self.ctx.api.clone();
		let ctx = self.ctx.clone();
		submit_request(
			"delete thread",
			&self.is_open,
			async move { api.delete_thread(thread_id).await },
			move || {
				ctx.go_to(&PageAddress::root());
				ctx.events.threads.send(&ThreadEvent::Deleted);
			},
		);
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::api::{Ack, FetchError};
	use crate::config::AppConfig;
	use crate::spawn::run_until_stalled;
	use crate::testing::{MockApi, context, structure, thread};
	use rstest::rstest;
	use serial_test::serial;
	use std::cell::RefCell;

	fn thread_events(ctx: &StoreContext) -> Rc<RefCell<Vec<ThreadEvent>>> {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		ctx.events.threads.connect(move |e| seen_clone.borrow_mut().push(*e));
		seen
	}

	#[rstest]
	#[serial]
	fn test_new_thread() {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		let ctx = context(&api, "/forum/ss/10");
		let forum_structure = ForumStructureState::new(&ctx, &AppConfig::default());
		run_until_stalled();
		let seen = thread_events(&ctx);
		let dialog = NewThreadDialog::new(&ctx);

		dialog.show(forum_structure.sub_section(10));
		assert!(!dialog.can_submit());
		dialog.thread_name.set("Hello".into());
		dialog.message_text.set("First!".into());
		assert!(dialog.can_submit());

		dialog.submit();
		run_until_stalled();

		assert_eq!(
			api.create_thread.last_arg().as_deref(),
			Some(r#"CreateThread { message: "First!", thread_name: "Hello", subsection_id: 10 }"#)
		);
		assert!(!dialog.is_open.get_untracked());
		assert_eq!(*seen.borrow(), vec![ThreadEvent::Created]);
	}

	#[rstest]
	#[case(Ok(Ack::Rejected("Name taken".into())))]
	#[case(Err(FetchError::Network("offline".into())))]
	#[serial]
	fn test_failed_rename_keeps_dialog_open(#[case] reply: Result<Ack, FetchError>) {
		let api = MockApi::new();
		api.rename_thread.set(reply);
		let ctx = context(&api, "/forum/t/1");
		let seen = thread_events(&ctx);
		let dialog = RenameThreadDialog::new(&ctx);

		dialog.show(&thread(1, 10, 0));
		assert_eq!(dialog.new_name.get_untracked(), "Thread 1");
		dialog.new_name.set("Renamed".into());
		dialog.submit();
		run_until_stalled();

		assert!(dialog.is_open.get_untracked());
		assert!(seen.borrow().is_empty());
	}

	#[rstest]
	#[serial]
	fn test_move_thread_requires_other_sub_section() {
		let api = MockApi::new();
		api.structure.set_ok(structure());
		let ctx = context(&api, "/forum/t/1");
		let forum_structure = ForumStructureState::new(&ctx, &AppConfig::default());
		run_until_stalled();
		let seen = thread_events(&ctx);
		let dialog = MoveThreadDialog::new(&ctx, &forum_structure);

		dialog.show(&thread(1, 10, 0));
		assert_eq!(dialog.new_sub_section.get_untracked().map(|s| s.id), Some(10));
		assert!(!dialog.can_submit());

		dialog.select_sub_section(999);
		assert!(!dialog.can_submit());
		dialog.select_sub_section(20);
		assert!(dialog.can_submit());

		dialog.submit();
		run_until_stalled();
		assert_eq!(
			api.move_thread.last_arg().as_deref(),
			Some("MoveThread { thread_id: 1, new_subsection_id: 20 }")
		);
		assert_eq!(*seen.borrow(), vec![ThreadEvent::Moved]);
	}

	#[rstest]
	#[serial]
	fn test_delete_thread_needs_approval_and_goes_home() {
		let api = MockApi::new();
		let ctx = context(&api, "/forum/t/5");
		let seen = thread_events(&ctx);
		let dialog = DeleteThreadDialog::new(&ctx);

		dialog.show(&thread(5, 10, 0));
		dialog.submit();
		run_until_stalled();
		assert_eq!(api.delete_thread.calls(), 0);

		dialog.toggle_approve_deletion();
		dialog.submit();
		run_until_stalled();

		assert_eq!(api.delete_thread.args(), vec!["5"]);
		assert!(!dialog.is_open.get_untracked());
		assert_eq!(ctx.current(), PageAddress::root());
		assert_eq!(*seen.borrow(), vec![ThreadEvent::Deleted]);
	}
}
