use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
