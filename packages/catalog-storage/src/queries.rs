use crate::{
	Error, Result,
	db::Db,
	models::{CatalogItem, LexicalRows},
};

/// One window of full-text matches plus the count of every match. Absent text matches all rows.
pub async fn search_items(
	db: &Db,
	text: Option<&str>,
	limit: u64,
	offset: u64,
) -> Result<LexicalRows> {
	let limit = to_i64(limit, "limit")?;
	let offset = to_i64(offset, "offset")?;
	let rows: Vec<CatalogItem> = sqlx::query_as(
		"\
SELECT item_id, name, price, description, image
FROM catalog_items
WHERE $1::text IS NULL OR search_vector @@ plainto_tsquery('english', $1)
ORDER BY
	CASE
		WHEN $1::text IS NULL THEN 0
		ELSE ts_rank(search_vector, plainto_tsquery('english', $1))
	END DESC,
	item_id
LIMIT $2
OFFSET $3",
	)
	.bind(text)
	.bind(limit)
	.bind(offset)
	.fetch_all(&db.pool)
	.await?;
	let total_matching: i64 = sqlx::query_scalar(
		"\
SELECT count(*)
FROM catalog_items
WHERE $1::text IS NULL OR search_vector @@ plainto_tsquery('english', $1)",
	)
	.bind(text)
	.fetch_one(&db.pool)
	.await?;

	Ok(LexicalRows { rows, total_matching })
}

pub async fn insert_item(db: &Db, item: &CatalogItem) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO catalog_items (item_id, name, price, description, image)
VALUES ($1, $2, $3, $4, $5)
ON CONFLICT (item_id) DO UPDATE
SET
	name = EXCLUDED.name,
	price = EXCLUDED.price,
	description = EXCLUDED.description,
	image = EXCLUDED.image",
	)
	.bind(item.item_id.as_str())
	.bind(item.name.as_str())
	.bind(item.price)
	.bind(item.description.as_deref())
	.bind(item.image.as_deref())
	.execute(&db.pool)
	.await?;

	Ok(())
}

fn to_i64(value: u64, label: &str) -> Result<i64> {
	i64::try_from(value)
		.map_err(|_| Error::InvalidArgument(format!("{label} {value} exceeds the Postgres range.")))
}
