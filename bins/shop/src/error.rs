use shop_api::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("output: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
