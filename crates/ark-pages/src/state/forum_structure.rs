//! Sections, subsections and page sizes.

use std::collections::BTreeMap;
use std::rc::Rc;

use ark_core::reactive::Signal;

use super::context::StoreContext;
use super::resource::{Resource, ResourceState};
use super::trigger::Trigger;
use crate::api::models::{ForumStructure, Section, SubSection};
use crate::config::AppConfig;

/// Forum layout as last received from the server.
///
/// The maps are replaced wholesale on every successful fetch and kept as they
/// are when a fetch fails.
pub struct ForumStructureState {
	/// Raw fetch state
	pub structure: Resource<ForumStructure>,
	/// Sections by id
	pub sections: Signal<BTreeMap<i64, Section>>,
	/// Subsections by id
	pub sub_sections: Signal<BTreeMap<i64, SubSection>>,
	pub threads_per_page: Signal<u32>,
	pub messages_per_page: Signal<u32>,
	/// Whether structure editing controls are shown
	pub edit_structure: Signal<bool>,
	ctx: StoreContext,
}

impl ForumStructureState {
	/// Create the store and fetch the structure
	pub fn new(ctx: &StoreContext, config: &AppConfig) -> Rc<Self> {
		let state = Rc::new(Self {
			structure: Resource::loading("forum_structure"),
			sections: Signal::new(BTreeMap::new()),
			sub_sections: Signal::new(BTreeMap::new()),
			threads_per_page: Signal::new(config.threads_per_page),
			messages_per_page: Signal::new(config.messages_per_page),
			edit_structure: Signal::new(false),
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh)
			.on(&ctx.events.forum_structure)
			.fire();

		state
	}

	pub fn refresh(&self) {
		let api = self.ctx.api.clone();
		let sections = self.sections.clone();
		let sub_sections = self.sub_sections.clone();
		let threads_per_page = self.threads_per_page.clone();
		let messages_per_page = self.messages_per_page.clone();

		self.structure.load_then(
			async move { api.forum_structure().await },
			move |state| {
				let ResourceState::Success(structure) = state else {
					return;
				};
				sections.set(structure.sections.iter().map(|s| (s.id, s.clone())).collect());
				sub_sections.set(
					structure
						.sub_sections
						.iter()
						.map(|s| (s.id, s.clone()))
						.collect(),
				);
				threads_per_page.set(structure.threads_per_page);
				messages_per_page.set(structure.messages_per_page);
			},
		);
	}

	pub fn section(&self, id: i64) -> Option<Section> {
		self.sections.with(|sections| sections.get(&id).cloned())
	}

	pub fn sub_section(&self, id: i64) -> Option<SubSection> {
		self.sub_sections.with(|sub_sections| sub_sections.get(&id).cloned())
	}

	/// Sections sorted by name
	pub fn ordered_sections(&self) -> Vec<Section> {
		let mut sections: Vec<Section> = self.sections.with(|s| s.values().cloned().collect());
		sections.sort_by(|a, b| a.name.cmp(&b.name));
		sections
	}

	/// Subsections grouped by section id, each group sorted by name
	pub fn sub_sections_by_section(&self) -> BTreeMap<i64, Vec<SubSection>> {
		let mut groups: BTreeMap<i64, Vec<SubSection>> = BTreeMap::new();
		self.sub_sections.with(|sub_sections| {
			for sub_section in sub_sections.values() {
				groups
					.entry(sub_section.section_id)
					.or_default()
					.push(sub_section.clone());
			}
		});
		for group in groups.values_mut() {
			group.sort_by(|a, b| a.name.cmp(&b.name));
		}
		groups
	}

	pub fn toggle_edit_structure(&self) {
		self.edit_structure.update(|edit| *edit = !*edit);
	}
}
