use catalog_config::Postgres;
use catalog_storage::{
	db::Db,
	models::CatalogItem,
	queries::{insert_item, search_items},
};
use catalog_testkit::TestDatabase;

fn item(id: &str, name: &str, description: &str) -> CatalogItem {
	CatalogItem {
		item_id: id.to_string(),
		name: name.to_string(),
		price: 10.0,
		description: Some(description.to_string()),
		image: None,
	}
}

async fn seeded_db(test_db: &TestDatabase) -> Db {
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	for row in [
		item("a", "Red lamp", "A red desk lamp."),
		item("b", "Blue lamp", "A blue floor lamp."),
		item("c", "Red chair", "A red office chair."),
		item("d", "Oak table", "A solid oak table."),
	] {
		insert_item(&db, &row).await.expect("Failed to insert item.");
	}

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CATALOG_PG_DSN to run."]
async fn schema_bootstrap_is_idempotent() {
	let Some(base_dsn) = catalog_testkit::env_dsn() else {
		eprintln!("Skipping schema_bootstrap_is_idempotent; set CATALOG_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");
	db.ensure_schema().await.expect("Failed to re-run schema bootstrap.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'catalog_items'",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CATALOG_PG_DSN to run."]
async fn full_text_search_windows_and_counts() {
	let Some(base_dsn) = catalog_testkit::env_dsn() else {
		eprintln!("Skipping full_text_search_windows_and_counts; set CATALOG_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = seeded_db(&test_db).await;
	let red = search_items(&db, Some("red"), 10, 0).await.expect("Failed to search.");
	let mut ids = red.rows.iter().map(|row| row.item_id.as_str()).collect::<Vec<_>>();

	ids.sort_unstable();

	assert_eq!(ids, vec!["a", "c"]);
	assert_eq!(red.total_matching, 2);

	let window = search_items(&db, Some("lamp"), 1, 1).await.expect("Failed to search.");

	assert_eq!(window.rows.len(), 1);
	assert_eq!(window.total_matching, 2);

	let everything = search_items(&db, None, 3, 0).await.expect("Failed to search.");
	let ids = everything.rows.iter().map(|row| row.item_id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, vec!["a", "b", "c"]);
	assert_eq!(everything.total_matching, 4);

	let beyond = search_items(&db, None, 3, 40).await.expect("Failed to search.");

	assert!(beyond.rows.is_empty());
	assert_eq!(beyond.total_matching, 4);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CATALOG_PG_DSN to run."]
async fn upsert_replaces_existing_rows() {
	let Some(base_dsn) = catalog_testkit::env_dsn() else {
		eprintln!("Skipping upsert_replaces_existing_rows; set CATALOG_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = seeded_db(&test_db).await;

	insert_item(&db, &item("d", "Walnut table", "A walnut dining table."))
		.await
		.expect("Failed to upsert item.");

	let oak = search_items(&db, Some("oak"), 10, 0).await.expect("Failed to search.");
	let walnut = search_items(&db, Some("walnut"), 10, 0).await.expect("Failed to search.");

	assert_eq!(oak.total_matching, 0);
	assert_eq!(walnut.rows.len(), 1);
	assert_eq!(walnut.rows[0].name, "Walnut table");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
