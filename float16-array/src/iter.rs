//! Value and entry iterators.
//!
//! Iterators read through the array on every step, so they see writes made
//! while iterating. Detachment surfaces as one `Err` item, after which the
//! iterator is exhausted.

use crate::{ArrayError, Float16Array};
use std::iter::FusedIterator;
use std::ops::Range;

/// Decoded values in index order. Created by [`Float16Array::values`].
#[derive(Debug)]
pub struct Values<'a> {
    array: &'a Float16Array,
    index: usize,
    end: usize,
    done: bool,
}

impl<'a> Values<'a> {
    fn new(array: &'a Float16Array) -> Self {
        Self {
            array,
            index: 0,
            end: array.len(),
            done: false,
        }
    }
}

impl Iterator for Values<'_> {
    type Item = Result<f64, ArrayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Err(e) = self.array.ensure_attached() {
            self.done = true;
            return Some(Err(e));
        }
        if self.index >= self.end {
            self.done = true;
            return None;
        }

        let value = self.array.value_at(self.index);
        self.index += 1;
        if value.is_err() {
            self.done = true;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.end - self.index;
        (0, Some(remaining + 1))
    }
}

impl FusedIterator for Values<'_> {}

/// `(index, value)` pairs in index order. Created by [`Float16Array::entries`].
#[derive(Debug)]
pub struct Entries<'a> {
    values: Values<'a>,
}

impl Iterator for Entries<'_> {
    type Item = Result<(usize, f64), ArrayError>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.values.index;
        self.values.next().map(|value| value.map(|v| (index, v)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl FusedIterator for Entries<'_> {}

impl Float16Array {
    /// Valid indices, `0..len`.
    pub fn keys(&self) -> Result<Range<usize>, ArrayError> {
        self.ensure_attached()?;
        Ok(0..self.len())
    }

    pub fn values(&self) -> Values<'_> {
        Values::new(self)
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries {
            values: Values::new(self),
        }
    }
}

impl<'a> IntoIterator for &'a Float16Array {
    type Item = Result<f64, ArrayError>;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}
