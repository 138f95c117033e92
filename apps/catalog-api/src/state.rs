use std::sync::Arc;

use catalog_service::CatalogService;
use catalog_storage::{db::Db, qdrant::QdrantStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CatalogService>,
}
impl AppState {
	/// Connects both stores once; every request shares the resulting handles.
	pub async fn new(config: catalog_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let qdrant = QdrantStore::new(&config.storage.qdrant)?;

		qdrant.ensure_collection().await?;

		Ok(Self::from_service(CatalogService::new(config, db, qdrant)))
	}

	pub fn from_service(service: CatalogService) -> Self {
		Self { service: Arc::new(service) }
	}
}
