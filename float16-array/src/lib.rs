//! # float16-array
//!
//! [`Float16Array`]: a fixed-length numeric array that stores IEEE 754
//! binary16 words and exposes them as `f64` values.
//!
//! Every write goes through [`float16_codec::encode`] and every read through
//! [`float16_codec::decode`]; callers never see the raw words unless they ask
//! for them. Arrays can own their storage or alias a caller's
//! [`ByteBuffer`](float16_core::ByteBuffer), which may be detached at any time.
//!
//! Derived arrays (`map`, `filter`, `slice`, `subarray`) are built by the
//! array's [`Species`], a construction delegate that specialized arrays can
//! replace.

pub mod array;
pub mod error;
pub mod format;
pub mod iter;
pub mod ordering;
pub mod species;

mod access;
mod search;
mod serde_impl;
mod transform;
mod view;

pub use array::{is_float16_array, Float16Array};
pub use error::ArrayError;
pub use iter::{Entries, Values};
pub use ordering::default_compare;
pub use species::{Construct, DefaultSpecies, Species};
