use regex::Regex;
use serde::Serialize;
use url::form_urlencoded;

use crate::{PAGE_PARAM, QUERY_PARAM, SEMANTIC_PARAM};

const PAGE_PATTERN: &str = r"^\d+$";

/// One request parameter as it arrives from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RawParam {
	#[default]
	Absent,
	Single(String),
	Multi(Vec<String>),
}
impl RawParam {
	fn push(&mut self, value: String) {
		*self = match std::mem::take(self) {
			Self::Absent => Self::Single(value),
			Self::Single(first) => Self::Multi(vec![first, value]),
			Self::Multi(mut values) => {
				values.push(value);

				Self::Multi(values)
			},
		};
	}

	fn as_single(&self) -> Option<&str> {
		match self {
			Self::Single(value) => Some(value),
			_ => None,
		}
	}
}
impl From<&str> for RawParam {
	fn from(value: &str) -> Self {
		Self::Single(value.to_string())
	}
}
impl From<Option<&str>> for RawParam {
	fn from(value: Option<&str>) -> Self {
		value.map(Self::from).unwrap_or_default()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
	pub query: RawParam,
	pub page: RawParam,
	pub semantic_search: RawParam,
}
impl RawParams {
	/// Groups repeated keys into [`RawParam::Multi`]. Unknown keys are ignored.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut params = Self::default();

		for (key, value) in pairs {
			let slot = match key.as_ref() {
				QUERY_PARAM => &mut params.query,
				PAGE_PARAM => &mut params.page,
				SEMANTIC_PARAM => &mut params.semantic_search,
				_ => continue,
			};

			slot.push(value.into());
		}

		params
	}

	pub fn from_query_string(raw: &str) -> Self {
		let raw = raw.strip_prefix('?').unwrap_or(raw);

		Self::from_pairs(form_urlencoded::parse(raw.as_bytes()).into_owned())
	}
}

/// Canonical request state shared by every downstream stage of one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
	text: Option<String>,
	page: u32,
	semantic_enabled: bool,
}
impl QueryDescriptor {
	pub fn new(text: Option<&str>, page: u32, semantic_enabled: bool) -> Self {
		Self { text: normalize_text(text), page: page.max(1), semantic_enabled }
	}

	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	pub fn page(&self) -> u32 {
		self.page
	}

	pub fn semantic_enabled(&self) -> bool {
		self.semantic_enabled
	}
}

/// Never fails: malformed values fall back to no text, page 1 and semantic search off.
pub fn normalize(raw: &RawParams) -> QueryDescriptor {
	let text = match &raw.query {
		RawParam::Absent => None,
		RawParam::Single(value) => Some(value.as_str()),
		RawParam::Multi(values) => values.first().map(String::as_str),
	};
	let page = raw.page.as_single().map(parse_page).unwrap_or(1);
	let semantic_enabled = raw.semantic_search.as_single() == Some("1");

	QueryDescriptor::new(text, page, semantic_enabled)
}

fn normalize_text(text: Option<&str>) -> Option<String> {
	let trimmed = text?.trim();

	if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

fn parse_page(raw: &str) -> u32 {
	if !Regex::new(PAGE_PATTERN).map(|re| re.is_match(raw)).unwrap_or(false) {
		return 1;
	}

	raw.parse::<u32>().ok().filter(|page| *page >= 1).unwrap_or(1)
}
