pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Qdrant error: {message}")]
	Qdrant { message: String },
}

impl From<catalog_storage::Error> for Error {
	fn from(err: catalog_storage::Error) -> Self {
		match err {
			catalog_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			catalog_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			catalog_storage::Error::Qdrant(inner) => Self::Qdrant { message: inner.to_string() },
		}
	}
}

impl From<catalog_providers::Error> for Error {
	fn from(err: catalog_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
