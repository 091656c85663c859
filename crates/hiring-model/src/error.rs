use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("surrogate keys start at 1, got 0")]
    ZeroSurrogateKey,
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("row for {table} has {actual} values, expected {expected}")]
    RowWidth {
        table: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
