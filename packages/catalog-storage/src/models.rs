#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CatalogItem {
	pub item_id: String,
	pub name: String,
	pub price: f64,
	pub description: Option<String>,
	pub image: Option<String>,
}

#[derive(Debug, Default)]
pub struct LexicalRows {
	pub rows: Vec<CatalogItem>,
	pub total_matching: i64,
}
