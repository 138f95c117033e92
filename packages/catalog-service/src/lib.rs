pub mod search;

mod error;

pub use error::{Error, Result};
pub use search::SearchResponse;

use std::{future::Future, pin::Pin, sync::Arc};

use catalog_config::Config;
use catalog_domain::{Item, LexicalPage, RawCandidate};
use catalog_providers::embedding;
use catalog_storage::{
	db::Db,
	models::CatalogItem,
	qdrant::{PayloadHit, QdrantStore},
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Full-text store holding the catalog.
pub trait LexicalStore
where
	Self: Send + Sync,
{
	/// One window of matches plus the number of matches across all windows. `None` matches all
	/// rows.
	fn search<'a>(
		&'a self,
		text: Option<&'a str>,
		limit: u64,
		offset: u64,
	) -> BoxFuture<'a, Result<LexicalPage>>;
}

/// Similarity index returning untyped item metadata ordered by descending score.
pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn query<'a>(&'a self, text: &'a str, top_k: u64) -> BoxFuture<'a, Result<Vec<RawCandidate>>>;
}

#[derive(Clone)]
pub struct Collaborators {
	pub lexical: Arc<dyn LexicalStore>,
	pub vector: Arc<dyn VectorIndex>,
}
impl Collaborators {
	pub fn new(lexical: Arc<dyn LexicalStore>, vector: Arc<dyn VectorIndex>) -> Self {
		Self { lexical, vector }
	}
}

pub struct CatalogService {
	pub cfg: Arc<Config>,
	pub collaborators: Collaborators,
}
impl CatalogService {
	pub fn new(cfg: Config, db: Db, qdrant: QdrantStore) -> Self {
		let cfg = Arc::new(cfg);
		let collaborators = Collaborators::new(
			Arc::new(PgLexicalStore { db }),
			Arc::new(QdrantVectorIndex { store: qdrant, cfg: cfg.clone() }),
		);

		Self { cfg, collaborators }
	}

	pub fn with_collaborators(cfg: Config, collaborators: Collaborators) -> Self {
		Self { cfg: Arc::new(cfg), collaborators }
	}
}

pub struct PgLexicalStore {
	pub db: Db,
}
impl PgLexicalStore {
	async fn search_rows(
		&self,
		text: Option<&str>,
		limit: u64,
		offset: u64,
	) -> Result<LexicalPage> {
		let found = queries::search_items(&self.db, text, limit, offset).await?;
		let total_matching = u64::try_from(found.total_matching).map_err(|_| Error::Storage {
			message: format!("Negative match count {}.", found.total_matching),
		})?;

		Ok(LexicalPage { rows: found.rows.into_iter().map(item_from_row).collect(), total_matching })
	}
}
impl LexicalStore for PgLexicalStore {
	fn search<'a>(
		&'a self,
		text: Option<&'a str>,
		limit: u64,
		offset: u64,
	) -> BoxFuture<'a, Result<LexicalPage>> {
		Box::pin(self.search_rows(text, limit, offset))
	}
}

/// Embeds the query text with the configured provider, then asks Qdrant for its neighbours.
pub struct QdrantVectorIndex {
	pub store: QdrantStore,
	pub cfg: Arc<Config>,
}
impl QdrantVectorIndex {
	async fn nearest(&self, text: &str, top_k: u64) -> Result<Vec<RawCandidate>> {
		let vectors = embedding::embed(&self.cfg.providers.embedding, &[text.to_string()]).await?;
		let Some(vector) = vectors.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != self.store.vector_dim as usize {
			return Err(Error::Provider {
				message: format!(
					"Embedding has {} dimensions; the collection expects {}.",
					vector.len(),
					self.store.vector_dim
				),
			});
		}

		let hits = self.store.nearest(vector, top_k).await?;

		Ok(hits
			.into_iter()
			.map(|PayloadHit { payload, score }| RawCandidate { metadata: payload, score })
			.collect())
	}
}
impl VectorIndex for QdrantVectorIndex {
	fn query<'a>(&'a self, text: &'a str, top_k: u64) -> BoxFuture<'a, Result<Vec<RawCandidate>>> {
		Box::pin(self.nearest(text, top_k))
	}
}

fn item_from_row(row: CatalogItem) -> Item {
	Item {
		id: row.item_id,
		name: row.name,
		price: row.price,
		description: row.description,
		image: row.image,
	}
}
