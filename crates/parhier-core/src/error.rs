pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown dimension: {name}")]
    UnknownDimension { name: String },

    #[error("Unknown aggregate dimension: {name}")]
    UnknownAggregate { name: String },

    #[error("Query {query:?} matches no category in dimension {dimension}")]
    InvalidQuery {
        dimension: String,
        query: Vec<String>,
    },

    #[error("Dimension position {index} is out of range ({len} visible)")]
    PositionOutOfRange { index: usize, len: usize },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
