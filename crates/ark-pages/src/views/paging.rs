//! Pagination window.
//!
//! Pages 1-3, the two pages on either side of the current one and the last
//! four are shown; gaps between them collapse into an ellipsis.
//!
//! ```text
//! page_window(5, 20, true, true):
//!   1 2 3 4 [5] 6 7 … 17 18 19 20 Next
//! ```

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
	/// Link to another page
	Page(u32),
	/// The page being shown, not a link
	Current(u32),
	Ellipsis,
	/// "Next" link to the given page
	Next(u32),
}

/// Number of pages needed for `items`; never less than one
pub fn total_pages(items: u32, page_size: u32) -> u32 {
	if page_size == 0 {
		return 1;
	}
	items.div_ceil(page_size).max(1)
}

pub fn page_window(
	current: u32,
	total: u32,
	include_first_page: bool,
	has_next_button: bool,
) -> Vec<PageLink> {
	if total <= 1 {
		return Vec::new();
	}

	let mut pages = BTreeSet::new();
	pages.extend(1..=total.min(3));
	pages.extend(current.saturating_sub(2).max(1)..=current.saturating_add(2).min(total));
	pages.extend(total.saturating_sub(3).max(1)..=total);

	let mut links = Vec::new();
	let mut prev = 1;
	for page in pages {
		if page == 1 && !include_first_page {
			continue;
		}
		if prev + 1 < page {
			links.push(PageLink::Ellipsis);
		}
		links.push(if page == current {
			PageLink::Current(page)
		} else {
			PageLink::Page(page)
		});
		prev = page;
	}

	if has_next_button && current < total {
		links.push(PageLink::Next(current + 1));
	}

	links
}
