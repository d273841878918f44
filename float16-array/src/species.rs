//! Construction delegates for derived arrays.
//!
//! `map`, `filter`, `slice` and `subarray` never build their result directly.
//! They resolve the source array's [`Species`] once per call and ask it for
//! an array, then check the result can hold what the operation will write.

use crate::{ArrayError, Float16Array};
use float16_core::{ByteBuffer, ElementKind};
use std::fmt;
use std::rc::Rc;

/// What a derived operation needs built.
#[derive(Debug, Clone)]
pub enum Construct {
    /// Zero-filled array of at least this many elements (`map`, `slice`).
    Length(usize),
    /// Array holding exactly these values (`filter`).
    Values(Vec<f64>),
    /// Aliasing view over an existing region (`subarray`). The result must
    /// share `buffer` and start at `byte_offset`.
    View {
        buffer: ByteBuffer,
        byte_offset: usize,
        length: usize,
    },
}

/// The constructor a specialized array uses for its derived arrays.
///
/// Implementations usually delegate to [`Float16Array::construct`] and
/// re-attach themselves with [`Float16Array::with_species`] so that derived
/// arrays stay specialized.
pub trait Species: fmt::Debug {
    /// Element kind this delegate declares. 64-bit integer kinds are
    /// rejected before `construct` is called; every other kind is accepted
    /// and values are stored through the returned array.
    fn element_kind(&self) -> ElementKind {
        ElementKind::Float16
    }

    fn construct(self: Rc<Self>, request: Construct) -> Result<Float16Array, ArrayError>;
}

/// Builds plain arrays.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSpecies;

impl Species for DefaultSpecies {
    fn construct(self: Rc<Self>, request: Construct) -> Result<Float16Array, ArrayError> {
        Float16Array::construct(request)
    }
}
