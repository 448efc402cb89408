use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to encode or decode {collection} document: {source}")]
    Codec {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid key: {0}")]
    InvalidKey(String),
}
