use serde::Serialize;
use url::form_urlencoded;

use crate::{PAGE_PARAM, QUERY_PARAM, SEMANTIC_PARAM, query::QueryDescriptor};

/// Canonical query string for a page of results. Parameters are always emitted in the order
/// `query`, `semanticSearch`, `page`; defaults are left out, so the bare href is `"?"`.
pub fn build_href(target_page: u32, text: Option<&str>, semantic_enabled: bool) -> String {
	let mut serializer = form_urlencoded::Serializer::new(String::new());

	if let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) {
		serializer.append_pair(QUERY_PARAM, text);
	}
	if semantic_enabled {
		serializer.append_pair(SEMANTIC_PARAM, "1");
	}
	if target_page > 1 {
		serializer.append_pair(PAGE_PARAM, &target_page.to_string());
	}

	format!("?{}", serializer.finish())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
	pub previous: Option<String>,
	pub current: String,
	pub next: Option<String>,
}
impl PageLinks {
	pub fn new(descriptor: &QueryDescriptor, has_next: bool) -> Self {
		let href =
			|page: u32| build_href(page, descriptor.text(), descriptor.semantic_enabled());
		let page = descriptor.page();

		Self {
			previous: (page > 1).then(|| href(page - 1)),
			current: href(page),
			next: (has_next && page < u32::MAX).then(|| href(page + 1)),
		}
	}
}
