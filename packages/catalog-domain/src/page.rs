use crate::{
	item::{Item, LexicalPage, ResultPage},
	query::QueryDescriptor,
};

/// Row window for a lexical page: one row past the page size so overflow signals a next page.
pub fn lexical_window(page: u32, page_size: u32) -> (u64, u64) {
	let limit = u64::from(page_size) + 1;
	let offset = u64::from(page.max(1) - 1) * u64::from(page_size);

	(limit, offset)
}

/// Semantic fallback only fills gaps: it needs the opt-in flag, query text, and a short page.
pub fn should_fallback(
	descriptor: &QueryDescriptor,
	lexical_rows: usize,
	page_size: usize,
) -> bool {
	descriptor.semantic_enabled() && descriptor.text().is_some() && lexical_rows < page_size
}

/// How many fallback items the current page can still take.
pub fn fallback_limit(lexical_rows: usize, page_size: usize) -> usize {
	page_size.saturating_sub(lexical_rows)
}

/// Lexical rows first, then `extras`. `total` adds only the extras that landed on this page; the
/// semantic total across all pages is never computed.
pub fn merge_page(lexical: LexicalPage, extras: Vec<Item>, page_size: usize) -> ResultPage {
	let LexicalPage { rows, total_matching } = lexical;
	let lexical_count = rows.len();
	let mut items = rows;

	items.extend(extras);

	let has_next = items.len() > page_size;

	items.truncate(page_size);

	let extras_on_page = items.len().saturating_sub(lexical_count);
	let total = total_matching.saturating_add(extras_on_page as u64);

	ResultPage::new(items, has_next, total)
}
