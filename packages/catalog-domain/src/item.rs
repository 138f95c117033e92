use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
	#[error("Metadata is not an object.")]
	NotAnObject,
	#[error("Metadata field {field} is missing.")]
	MissingField { field: &'static str },
	#[error("Metadata field {field} has the wrong type.")]
	WrongType { field: &'static str },
	#[error("Metadata field {field} is out of range.")]
	OutOfRange { field: &'static str },
	#[error("Candidate score is not a finite number.")]
	NonFiniteScore,
}

/// A catalog entry. Identity is `id` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
	pub id: String,
	pub name: String,
	pub price: f64,
	pub description: Option<String>,
	pub image: Option<String>,
}
impl Item {
	/// Shape guard for untyped vector-index metadata.
	pub fn from_metadata(metadata: &Value) -> Result<Self, ShapeError> {
		let object = metadata.as_object().ok_or(ShapeError::NotAnObject)?;
		let id = required_str(object, "id")?;

		if id.is_empty() {
			return Err(ShapeError::OutOfRange { field: "id" });
		}

		let name = required_str(object, "name")?;
		let price = object
			.get("price")
			.ok_or(ShapeError::MissingField { field: "price" })?
			.as_f64()
			.ok_or(ShapeError::WrongType { field: "price" })?;

		if !price.is_finite() || price < 0.0 {
			return Err(ShapeError::OutOfRange { field: "price" });
		}

		Ok(Self {
			id: id.to_string(),
			name: name.to_string(),
			price,
			description: optional_str(object, "description")?,
			image: optional_str(object, "image")?,
		})
	}
}

/// A vector-index hit before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
	pub metadata: Value,
	pub score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
	pub item: Item,
	pub score: f32,
}
impl ScoredCandidate {
	pub fn try_from_raw(raw: &RawCandidate) -> Result<Self, ShapeError> {
		if !raw.score.is_finite() {
			return Err(ShapeError::NonFiniteScore);
		}

		let item = Item::from_metadata(&raw.metadata)?;

		Ok(Self { item, score: raw.score.clamp(0.0, 1.0) })
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalPage {
	pub rows: Vec<Item>,
	/// Matches across every page, not only `rows`.
	pub total_matching: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
	items: Vec<Item>,
	has_next: bool,
	total: u64,
}
impl ResultPage {
	pub(crate) fn new(items: Vec<Item>, has_next: bool, total: u64) -> Self {
		Self { items, has_next, total }
	}

	pub fn items(&self) -> &[Item] {
		&self.items
	}

	pub fn has_next(&self) -> bool {
		self.has_next
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn into_items(self) -> Vec<Item> {
		self.items
	}
}

fn required_str<'a>(
	object: &'a Map<String, Value>,
	field: &'static str,
) -> Result<&'a str, ShapeError> {
	object
		.get(field)
		.ok_or(ShapeError::MissingField { field })?
		.as_str()
		.ok_or(ShapeError::WrongType { field })
}

fn optional_str(
	object: &Map<String, Value>,
	field: &'static str,
) -> Result<Option<String>, ShapeError> {
	match object.get(field) {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(value)) => Ok(Some(value.clone())),
		Some(_) => Err(ShapeError::WrongType { field }),
	}
}
