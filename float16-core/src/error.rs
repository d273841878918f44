use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Offset is out of bounds: {0}")]
    OutOfBounds(String),
    #[error("Backing memory has been detached")]
    Detached,
}
