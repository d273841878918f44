use float16_core::{ElementKind, StorageError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// Out-of-bounds offsets and detached backing memory.
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Construction delegate returned an incompatible array: {0}")]
    IncompatibleDelegate(String),
    #[error("Derived array too small: needed {required} elements, got {actual}")]
    DerivedTooSmall { required: usize, actual: usize },
    #[error("Reduce of empty array with no initial value")]
    EmptyReduce,
    #[error("Cannot mix {0} elements with binary16 values")]
    InvalidElementKind(ElementKind),
}

impl ArrayError {
    pub(crate) fn out_of_bounds(reason: impl Into<String>) -> Self {
        ArrayError::Storage(StorageError::OutOfBounds(reason.into()))
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, ArrayError::Storage(StorageError::OutOfBounds(_)))
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, ArrayError::Storage(StorageError::Detached))
    }
}
