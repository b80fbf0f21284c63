use crate::graph::NodeKey;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing node: {key}")]
    MissingNode { key: NodeKey },
    #[error("sankey graph JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
