//! # float16-core
//!
//! Storage layer for half-precision arrays.
//!
//! - [`ByteBuffer`]: a shared byte region that its owner can detach at any time
//! - [`Float16Storage`]: a window of binary16 words over a [`ByteBuffer`],
//!   re-checking detachment on every access
//! - [`ArraySource`] / [`Element`]: what an array can be built from, and the
//!   [`ElementKind`] of each source
//! - [`TypedView`]: a typed numeric window over a [`ByteBuffer`] (any element width)

pub mod buffer;
pub mod element;
pub mod error;
pub mod storage;

pub use buffer::ByteBuffer;
pub use element::{ArraySource, Element, ElementKind, TypedView};
pub use error::StorageError;
pub use storage::Float16Storage;
