#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("table error: {reason}")]
    Table { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
