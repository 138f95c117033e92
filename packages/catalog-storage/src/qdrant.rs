use std::collections::HashMap;

use qdrant_client::{
	client::Payload,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, Query, QueryPointsBuilder,
		UpsertPointsBuilder, Value, Vector, VectorParamsBuilder, VectorsConfigBuilder,
		value::Kind,
	},
};
use serde_json::{Map, Number};

use crate::Result;

pub const DENSE_VECTOR_NAME: &str = "dense";

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &catalog_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	pub async fn ensure_collection(&self) -> Result<()> {
		let existing = self.client.list_collections().await?;

		if existing.collections.iter().any(|collection| collection.name == self.collection) {
			return Ok(());
		}

		let mut vectors_config = VectorsConfigBuilder::default();

		vectors_config.add_named_vector_params(
			DENSE_VECTOR_NAME,
			VectorParamsBuilder::new(self.vector_dim.into(), Distance::Cosine),
		);

		self.client
			.create_collection(
				CreateCollectionBuilder::new(self.collection.clone()).vectors_config(vectors_config),
			)
			.await?;

		Ok(())
	}

	/// Nearest neighbours of `vector`, with each payload decoded into untyped JSON.
	pub async fn nearest(&self, vector: Vec<f32>, top_k: u64) -> Result<Vec<PayloadHit>> {
		let search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.using(DENSE_VECTOR_NAME)
			.with_payload(true)
			.limit(top_k);
		let response = self.client.query(search).await?;

		Ok(response
			.result
			.into_iter()
			.map(|point| PayloadHit {
				payload: payload_to_json(point.payload),
				score: point.score,
			})
			.collect())
	}

	pub async fn upsert(
		&self,
		point_id: u64,
		vector: Vec<f32>,
		payload: Map<String, serde_json::Value>,
	) -> Result<()> {
		let payload_map: HashMap<String, Value> =
			payload.into_iter().map(|(key, value)| (key, Value::from(value))).collect();
		let payload = Payload::from(payload_map);
		let mut vectors = HashMap::new();

		vectors.insert(DENSE_VECTOR_NAME.to_string(), Vector::from(vector));

		let point = PointStruct::new(point_id, vectors, payload);

		self.client
			.upsert_points(
				UpsertPointsBuilder::new(self.collection.clone(), vec![point]).wait(true),
			)
			.await?;

		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayloadHit {
	pub payload: serde_json::Value,
	pub score: f32,
}

pub fn payload_to_json(payload: HashMap<String, Value>) -> serde_json::Value {
	let object: Map<String, serde_json::Value> =
		payload.into_iter().map(|(key, value)| (key, value_to_json(value))).collect();

	serde_json::Value::Object(object)
}

fn value_to_json(value: Value) -> serde_json::Value {
	match value.kind {
		None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
		Some(Kind::BoolValue(value)) => serde_json::Value::Bool(value),
		Some(Kind::IntegerValue(value)) => serde_json::Value::Number(value.into()),
		Some(Kind::DoubleValue(value)) => Number::from_f64(value)
			.map(serde_json::Value::Number)
			.unwrap_or(serde_json::Value::Null),
		Some(Kind::StringValue(value)) => serde_json::Value::String(value),
		Some(Kind::ListValue(list)) =>
			serde_json::Value::Array(list.values.into_iter().map(value_to_json).collect()),
		Some(Kind::StructValue(object)) => payload_to_json(object.fields),
	}
}
