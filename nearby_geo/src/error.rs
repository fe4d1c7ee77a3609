use std::io;

use thiserror::Error;

pub type Result<T, E = GeoError> = std::result::Result<T, E>;

/// Errors raised while scanning a dataset or validating a query.
#[derive(Error, Debug)]
pub enum GeoError {
    /// A quoted data line that does not split into a name and two numbers.
    /// Carries the raw line as it was read.
    #[error("malformed data line: {line}")]
    DataParsing { line: String },

    /// The dataset could not be opened or read.
    #[error("cannot access dataset {resource}: {source}")]
    ResourceAccess {
        resource: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GeoError {
    pub fn access(resource: impl Into<String>, source: io::Error) -> Self {
        GeoError::ResourceAccess { resource: resource.into(), source }
    }
}
