//! # float16
//!
//! IEEE 754 half-precision numbers for Rust programs that only have `f64`.
//!
//! - [`codec`]: bit-exact `f64` <-> binary16 conversion (`no_std`)
//! - [`storage`]: shared byte regions and binary16 storage windows
//! - [`Float16Array`]: a fixed-length array that stores binary16 words and
//!   reads and writes `f64` values
//!
//! ```
//! use float16::{encode, Float16Array};
//!
//! assert_eq!(encode(1.0), 0x3c00);
//!
//! let a = Float16Array::of(&[0.1, 2.0, 65520.0]);
//! assert_eq!(a.to_vec().unwrap(), vec![0.0999755859375, 2.0, f64::INFINITY]);
//! ```

pub use float16_array as array;
pub use float16_codec as codec;
pub use float16_core as storage;

pub use float16_array::{is_float16_array, ArrayError, Construct, Float16Array, Species};
pub use float16_codec::{decode, encode, round};
pub use float16_core::{ByteBuffer, ElementKind, StorageError, TypedView};
