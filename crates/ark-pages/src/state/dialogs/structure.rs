use std::rc::Rc;

use ark_core::reactive::Signal;

use super::submit_request;
use crate::api::models::{Section, SubSection};
use crate::api::requests::{MoveSubsection, NewSection, NewSubsection, RenameSection, RenameSubsection};
use crate::events::ForumStructureEvent;
use crate::state::{ForumStructureState, StoreContext};

fn announce(ctx: &StoreContext, event: ForumStructureEvent) -> impl FnOnce() + 'static {
	let channel = ctx.events.forum_structure.clone();
	move || channel.send(&event)
}

pub struct NewSectionDialog {
	pub is_open: Signal<bool>,
	pub name: Signal<String>,
	ctx: StoreContext,
}

impl NewSectionDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			name: Signal::new(String::new()),
			ctx: ctx.clone(),
		})
	}

	pub fn show(&self) {
		self.name.set(String::new());
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.name.with(String::is_empty)
	}

	pub fn submit(&self) {
		let request = NewSection {
			name: self.name.get_untracked(),
		};
		let api = self.ctx.api.clone();
		submit_request(
			"create section",
			&self.is_open,
			async move { api.create_section(&request).await },
			announce(&self.ctx, ForumStructureEvent::SectionCreated),
		);
	}
}

pub struct RenameSectionDialog {
	pub is_open: Signal<bool>,
	pub new_name: Signal<String>,
	pub section: Signal<Option<Section>>,
	ctx: StoreContext,
}

impl RenameSectionDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			new_name: Signal::new(String::new()),
			section: Signal::new(None),
			ctx: ctx.clone(),
		})
	}

	pub fn show(&self, section: &Section) {
		self.new_name.set(section.name.clone());
		self.section.set(Some(section.clone()));
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.new_name.with(String::is_empty)
	}

	pub fn submit(&self) {
		let Some(section) = self.section.get_untracked() else {
			return;
		};
		let request = RenameSection {
			name: self.new_name.get_untracked(),
			section_id: section.id,
		};
		let api = self.ctx.api.clone();
		submit_request(
			"rename section",
			&self.is_open,
			async move { api.rename_section(&request).await },
			announce(&self.ctx, ForumStructureEvent::SectionRenamed),
		);
	}
}

pub struct NewSubsectionDialog {
	pub is_open: Signal<bool>,
	pub name: Signal<String>,
	/// Section the subsection is created in
	pub section: Signal<Option<Section>>,
	ctx: StoreContext,
}

impl NewSubsectionDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			name: Signal::new(String::new()),
			section: Signal::new(None),
			ctx: ctx.clone(),
		})
	}

	pub fn show(&self, section: &Section) {
		self.name.set(String::new());
		self.section.set(Some(section.clone()));
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.name.with(String::is_empty)
	}

	pub fn submit(&self) {
		let Some(section) = self.section.get_untracked() else {
			return;
		};
		let request = NewSubsection {
			name: self.name.get_untracked(),
			section_id: section.id,
		};
		let api = self.ctx.api.clone();
		submit_request(
			"create subsection",
			&self.is_open,
			async move { api.create_subsection(&request).await },
			announce(&self.ctx, ForumStructureEvent::SubsectionCreated),
		);
	}
}

pub struct RenameSubsectionDialog {
	pub is_open: Signal<bool>,
	pub new_name: Signal<String>,
	pub sub_section: Signal<Option<SubSection>>,
	ctx: StoreContext,
}

impl RenameSubsectionDialog {
	pub fn new(ctx: &StoreContext) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			new_name: Signal::new(String::new()),
			sub_section: Signal::new(None),
			ctx: ctx.clone(),
		})
	}

	pub fn show(&self, sub_section: &SubSection) {
		self.new_name.set(sub_section.name.clone());
		self.sub_section.set(Some(sub_section.clone()));
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	pub fn can_submit(&self) -> bool {
		!self.new_name.with(String::is_empty)
	}

	pub fn submit(&self) {
		let Some(sub_section) = self.sub_section.get_untracked() else {
			return;
		};
		let request = RenameSubsection {
			name: self.new_name.get_untracked(),
			subsection_id: sub_section.id,
		};
		let api = self.ctx.api.clone();
		submit_request(
			"rename subsection",
			&self.is_open,
			async move { api.rename_subsection(&request).await },
			announce(&self.ctx, ForumStructureEvent::SubsectionRenamed),
		);
	}
}

pub struct MoveSubsectionDialog {
	pub is_open: Signal<bool>,
	pub sub_section: Signal<Option<SubSection>>,
	pub new_section_id: Signal<i64>,
	structure: Rc<ForumStructureState>,
	ctx: StoreContext,
}

impl MoveSubsectionDialog {
	pub fn new(ctx: &StoreContext, structure: &Rc<ForumStructureState>) -> Rc<Self> {
		Rc::new(Self {
			is_open: Signal::new(false),
			sub_section: Signal::new(None),
			new_section_id: Signal::new(0),
			structure: structure.clone(),
			ctx: ctx.clone(),
		})
	}

	/// Open with the subsection's current section selected
	pub fn show(&self, sub_section: &SubSection) {
		self.new_section_id.set(sub_section.section_id);
		self.sub_section.set(Some(sub_section.clone()));
		self.is_open.set(true);
	}

	pub fn hide(&self) {
		self.is_open.set(false);
	}

	/// Pick the target section; unknown ids are ignored
	pub fn select_section(&self, section_id: i64) {
		if self.structure.section(section_id).is_some() {
			self.new_section_id.set(section_id);
		}
	}

	pub fn submit(&self) {
		let Some(sub_section) = self.sub_section.get_untracked() else {
			return;
		};
		let request = MoveSubsection {
			subsection_id: sub_section.id,
			new_section_id: self.new_section_id.get_untracked(),
		};
		let api = self.ctx.api.clone();
		submit_request(
			"move subsection",
			&self.is_open,
			async move { api.move_subsection(&request).await },
			announce(&self.ctx, ForumStructureEvent::SubsectionMoved),
		);
	}
}
