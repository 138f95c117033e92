use std::collections::HashSet;

use serde::Serialize;

use crate::{CatalogService, Result};
use catalog_domain::{
	FallbackPolicy, Item, PageLinks, QueryDescriptor, RawParams, ResultPage, ScoredCandidate,
	fallback_limit, filter_candidates, lexical_window, merge_page, normalize, should_fallback,
};

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
	pub query: Option<String>,
	pub page: u32,
	pub semantic_search: bool,
	pub items: Vec<Item>,
	pub has_next: bool,
	pub total: u64,
	pub links: PageLinks,
}

impl CatalogService {
	/// Lexical page first; the semantic index is consulted only to fill a short page.
	///
	/// Collaborator errors are returned as-is. Nothing is retried.
	pub async fn search(&self, descriptor: &QueryDescriptor) -> Result<ResultPage> {
		let page_size = self.cfg.search.page_size;
		let (limit, offset) = lexical_window(descriptor.page(), page_size);
		let lexical =
			self.collaborators.lexical.search(descriptor.text(), limit, offset).await?;
		let page_size = page_size as usize;
		let lexical_rows = lexical.rows.len();
		let extras = match descriptor.text() {
			Some(text) if should_fallback(descriptor, lexical_rows, page_size) =>
				self.fallback_extras(text, &lexical.rows, page_size).await?,
			_ => Vec::new(),
		};

		tracing::debug!(
			page = descriptor.page(),
			semantic_enabled = descriptor.semantic_enabled(),
			lexical_rows,
			total_matching = lexical.total_matching,
			semantic_extras = extras.len(),
			"Catalog search merged."
		);

		Ok(merge_page(lexical, extras, page_size))
	}

	/// Normalizes a raw parameter bag, runs [`CatalogService::search`] and attaches page links.
	pub async fn search_params(&self, raw: &RawParams) -> Result<SearchResponse> {
		let descriptor = normalize(raw);
		let page = self.search(&descriptor).await?;
		let has_next = page.has_next();
		let total = page.total();

		Ok(SearchResponse {
			query: descriptor.text().map(str::to_string),
			page: descriptor.page(),
			semantic_search: descriptor.semantic_enabled(),
			items: page.into_items(),
			has_next,
			total,
			links: PageLinks::new(&descriptor, has_next),
		})
	}

	async fn fallback_extras(
		&self,
		text: &str,
		lexical_rows: &[Item],
		page_size: usize,
	) -> Result<Vec<Item>> {
		let raw = self.collaborators.vector.query(text, page_size as u64).await?;
		let candidates = raw
			.iter()
			.enumerate()
			.filter_map(|(position, raw)| match ScoredCandidate::try_from_raw(raw) {
				Ok(candidate) => Some(candidate),
				Err(err) => {
					tracing::warn!(error = %err, position, "Dropping malformed fallback candidate.");

					None
				},
			})
			.collect::<Vec<_>>();
		let seen_ids = lexical_rows.iter().map(|item| item.id.as_str()).collect::<HashSet<_>>();
		let policy = FallbackPolicy::from(&self.cfg.search.fallback);

		Ok(filter_candidates(
			candidates,
			&seen_ids,
			fallback_limit(lexical_rows.len(), page_size),
			&policy,
		))
	}
}
