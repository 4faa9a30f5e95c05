//! Thread grouping for list pages and the side panel.

use std::collections::BTreeMap;

use crate::api::models::{SubSection, Thread};

/// Threads keyed by subsection id, most recent activity first
pub fn group_threads_by_sub_section<'a, I>(threads: I) -> BTreeMap<i64, Vec<Thread>>
where
	I: IntoIterator<Item = &'a Thread>,
{
	let mut groups: BTreeMap<i64, Vec<Thread>> = BTreeMap::new();
	for thread in threads {
		groups
			.entry(thread.sub_section_id)
			.or_default()
			.push(thread.clone());
	}

	for group in groups.values_mut() {
		group.sort_by(|a, b| b.last_message_date_time.cmp(&a.last_message_date_time));
	}

	groups
}

/// Number of grouped threads that belong to `section_id`'s subsections
pub fn thread_count_by_section(
	groups: &BTreeMap<i64, Vec<Thread>>,
	sub_sections_by_section: &BTreeMap<i64, Vec<SubSection>>,
	section_id: i64,
) -> usize {
	sub_sections_by_section
		.get(&section_id)
		.map(|sub_sections| {
			sub_sections
				.iter()
				.filter_map(|s| groups.get(&s.id))
				.map(Vec::len)
				.sum()
		})
		.unwrap_or(0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::models::User;
	use rstest::rstest;

	fn thread(id: i64, sub_section_id: i64, last_message: i64) -> Thread {
		let user = User {
			id: 1,
			name: "u".to_string(),
		};
		Thread {
			id,
			sub_section_id,
			name: format!("thread {id}"),
			author: user.clone(),
			total_messages: 1,
			creation_date_time: 0,
			last_message_user: user,
			last_message_id: 0,
			last_message_date_time: last_message,
		}
	}

	fn sub_section(id: i64, section_id: i64) -> SubSection {
		SubSection {
			id,
			section_id,
			name: format!("sub {id}"),
		}
	}

	#[rstest]
	fn test_sorted_by_last_message_descending() {
		let threads = [thread(1, 5, 100), thread(2, 5, 300), thread(3, 5, 200)];

		let groups = group_threads_by_sub_section(&threads);

		let times: Vec<_> = groups[&5].iter().map(|t| t.last_message_date_time).collect();
		assert_eq!(times, vec![300, 200, 100]);
	}

	#[rstest]
	fn test_grouped_by_sub_section() {
		let threads = [thread(1, 5, 1), thread(2, 6, 1), thread(3, 5, 2)];

		let groups = group_threads_by_sub_section(&threads);

		assert_eq!(groups.len(), 2);
		assert_eq!(groups[&5].len(), 2);
		assert_eq!(groups[&6][0].id, 2);
	}

	#[rstest]
	fn test_thread_count_by_section() {
		let threads = [thread(1, 5, 1), thread(2, 6, 1), thread(3, 7, 1), thread(4, 5, 1)];
		let groups = group_threads_by_sub_section(&threads);
		let structure = BTreeMap::from([
			(1, vec![sub_section(5, 1), sub_section(6, 1)]),
			(2, vec![sub_section(7, 2), sub_section(8, 2)]),
		]);

		assert_eq!(thread_count_by_section(&groups, &structure, 1), 3);
		assert_eq!(thread_count_by_section(&groups, &structure, 2), 1);
		assert_eq!(thread_count_by_section(&groups, &structure, 3), 0);
	}
}
