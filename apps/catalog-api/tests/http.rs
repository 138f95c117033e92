use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Map, Value, json};
use tower::util::ServiceExt;

use catalog_api::{routes, state::AppState};
use catalog_config::{
	Config, EmbeddingProviderConfig, Postgres, Providers, Qdrant, Search, SearchFallback, Service,
	Storage,
};
use catalog_domain::{Item, LexicalPage, RawCandidate};
use catalog_service::{
	BoxFuture, CatalogService, Collaborators, Error, LexicalStore, Result, VectorIndex,
};

/// Substring match over a fixed item list, standing in for the full-text store.
struct MemoryLexical {
	items: Vec<Item>,
}
impl LexicalStore for MemoryLexical {
	fn search<'a>(
		&'a self,
		text: Option<&'a str>,
		limit: u64,
		offset: u64,
	) -> BoxFuture<'a, Result<LexicalPage>> {
		let matching = self
			.items
			.iter()
			.filter(|item| text.is_none_or(|text| item.name.to_lowercase().contains(text)))
			.cloned()
			.collect::<Vec<_>>();
		let total_matching = matching.len() as u64;
		let rows = matching.into_iter().skip(offset as usize).take(limit as usize).collect();

		Box::pin(async move { Ok(LexicalPage { rows, total_matching }) })
	}
}

struct MemoryVector {
	candidates: Vec<RawCandidate>,
}
impl VectorIndex for MemoryVector {
	fn query<'a>(&'a self, _text: &'a str, top_k: u64) -> BoxFuture<'a, Result<Vec<RawCandidate>>> {
		let candidates = self.candidates.iter().take(top_k as usize).cloned().collect();

		Box::pin(async move { Ok(candidates) })
	}
}

struct DownVector;
impl VectorIndex for DownVector {
	fn query<'a>(
		&'a self,
		_text: &'a str,
		_top_k: u64,
	) -> BoxFuture<'a, Result<Vec<RawCandidate>>> {
		Box::pin(async { Err(Error::Qdrant { message: "connection refused".to_string() }) })
	}
}

struct OverflowingLexical;
impl LexicalStore for OverflowingLexical {
	fn search<'a>(
		&'a self,
		_text: Option<&'a str>,
		_limit: u64,
		offset: u64,
	) -> BoxFuture<'a, Result<LexicalPage>> {
		Box::pin(async move {
			Err(Error::InvalidRequest {
				message: format!("offset {offset} exceeds the Postgres range."),
			})
		})
	}
}

fn item(id: &str, name: &str) -> Item {
	Item {
		id: id.to_string(),
		name: name.to_string(),
		price: 20.0,
		description: Some(format!("{name} for the home.")),
		image: None,
	}
}

fn catalog() -> Vec<Item> {
	vec![
		item("a", "Red lamp"),
		item("b", "Blue lamp"),
		item("c", "Desk lamp"),
		item("d", "Floor lamp"),
		item("e", "Oak table"),
	]
}

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres {
				dsn: "postgres://catalog@localhost/catalog".to_string(),
				pool_max_conns: 1,
			},
			qdrant: Qdrant {
				url: "http://localhost:6334".to_string(),
				collection: "catalog_items".to_string(),
				vector_dim: 4,
			},
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://localhost".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "test".to_string(),
				dimensions: 4,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		search: Search { page_size: 3, fallback: SearchFallback::default() },
	}
}

fn app(lexical: Arc<dyn LexicalStore>, vector: Arc<dyn VectorIndex>) -> axum::Router {
	let service =
		CatalogService::with_collaborators(test_config(), Collaborators::new(lexical, vector));

	routes::router(AppState::from_service(service))
}

fn default_app() -> axum::Router {
	app(
		Arc::new(MemoryLexical { items: catalog() }),
		Arc::new(MemoryVector {
			candidates: vec![
				RawCandidate {
					metadata: json!({ "id": "e", "name": "Oak table", "price": 20.0 }),
					score: 0.8,
				},
				RawCandidate {
					metadata: json!({ "id": "f", "name": "Walnut desk", "price": 99.0 }),
					score: 0.78,
				},
			],
		}),
	)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call the router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = serde_json::from_slice(&body).expect("Failed to parse response body.");

	(status, json)
}

fn ids(json: &Value) -> Vec<&str> {
	json["items"]
		.as_array()
		.expect("Missing items array.")
		.iter()
		.map(|item| item["id"].as_str().expect("Missing item id."))
		.collect()
}

#[tokio::test]
async fn health_ok() {
	let response = default_app()
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn lexical_page_with_next_link() {
	let (status, json) = get_json(default_app(), "/v1/catalog/search?query=lamp").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ids(&json), vec!["a", "b", "c"]);
	assert_eq!(json["has_next"], true);
	assert_eq!(json["total"], 4);
	assert_eq!(json["page"], 1);
	assert_eq!(json["semantic_search"], false);
	assert_eq!(json["links"]["previous"], Value::Null);
	assert_eq!(json["links"]["current"], "?query=lamp");
	assert_eq!(json["links"]["next"], "?query=lamp&page=2");
}

#[tokio::test]
async fn second_page_is_filled_semantically() {
	let (status, json) =
		get_json(default_app(), "/v1/catalog/search?query=lamp&page=2&semanticSearch=1").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ids(&json), vec!["d", "e", "f"]);
	assert_eq!(json["has_next"], false);
	assert_eq!(json["total"], 6);
	assert_eq!(json["links"]["previous"], "?query=lamp&semanticSearch=1");
	assert_eq!(json["links"]["current"], "?query=lamp&semanticSearch=1&page=2");
	assert_eq!(json["links"]["next"], Value::Null);
}

#[tokio::test]
async fn repeated_and_malformed_params_use_defaults() {
	let (status, json) = get_json(
		default_app(),
		"/v1/catalog/search?query=%20table%20&query=lamp&page=abc&page=2&semanticSearch=true",
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["query"], "table");
	assert_eq!(json["page"], 1);
	assert_eq!(json["semantic_search"], false);
	assert_eq!(ids(&json), vec!["e"]);
	assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn empty_query_lists_everything() {
	let (status, json) = get_json(default_app(), "/v1/catalog/search").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["query"], Value::Null);
	assert_eq!(ids(&json), vec!["a", "b", "c"]);
	assert_eq!(json["total"], 5);
	assert_eq!(json["links"]["current"], "?");
	assert_eq!(json["links"]["next"], "?page=2");
}

#[tokio::test]
async fn vector_outage_maps_to_bad_gateway() {
	let app = app(Arc::new(MemoryLexical { items: catalog() }), Arc::new(DownVector));
	let (status, json) = get_json(app, "/v1/catalog/search?query=table&semanticSearch=1").await;

	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert_eq!(json["error_code"], "upstream_unavailable");
}

#[tokio::test]
async fn invalid_request_maps_to_bad_request() {
	let app = app(Arc::new(OverflowingLexical), Arc::new(DownVector));
	let (status, json) = get_json(app, "/v1/catalog/search?page=4294967295").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "invalid_request");
}
