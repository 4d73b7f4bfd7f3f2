#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("{0}")]
    Plain(String),
    #[error("{0}")]
    Box(#[from] Box<dyn std::error::Error + Send + Sync>),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
