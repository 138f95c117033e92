use serde::Deserialize;
use serde_json::{Map, Value};

/// Fallback score floor applied regardless of the best candidate.
pub const DEFAULT_ABSOLUTE_MIN: f32 = 0.5;
/// How far below the best candidate a score may drop before rank escalation.
pub const DEFAULT_SCORE_DROP_TOLERANCE: f32 = 0.15;
pub const DEFAULT_RANK_INCREMENT: f32 = 0.1;
pub const DEFAULT_PAGE_SIZE: u32 = 3;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Items per result page. Lexical queries fetch one extra row to detect a next page.
	pub page_size: u32,
	pub fallback: SearchFallback,
}
impl Default for Search {
	fn default() -> Self {
		Self { page_size: DEFAULT_PAGE_SIZE, fallback: SearchFallback::default() }
	}
}

/// Thresholds applied to semantic fallback candidates before they may fill a page.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SearchFallback {
	pub absolute_min: f32,
	pub score_drop_tolerance: f32,
	pub rank_increment: f32,
}
impl Default for SearchFallback {
	fn default() -> Self {
		Self {
			absolute_min: DEFAULT_ABSOLUTE_MIN,
			score_drop_tolerance: DEFAULT_SCORE_DROP_TOLERANCE,
			rank_increment: DEFAULT_RANK_INCREMENT,
		}
	}
}
