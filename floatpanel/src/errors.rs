#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
