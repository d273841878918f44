//! Callback-driven transforms. Callbacks receive `(value, index, &array)`.

use crate::species::Construct;
use crate::{ArrayError, Float16Array};

impl Float16Array {
    /// New array of `f(value, index, self)` for every element, built by the species.
    pub fn map<F>(&self, mut f: F) -> Result<Float16Array, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> f64,
    {
        self.ensure_attached()?;
        let len = self.len();
        let species = self.resolve_species()?;
        let mapped = Self::construct_derived(species, Construct::Length(len), Some(len))?;

        for i in 0..len {
            let value = self.value_at(i)?;
            mapped.put(i, f(value, i, self))?;
        }
        Ok(mapped)
    }

    /// New array of the elements `predicate` accepts, built by the species.
    pub fn filter<F>(&self, mut predicate: F) -> Result<Float16Array, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        self.ensure_attached()?;
        let mut kept = Vec::new();
        for i in 0..self.len() {
            let value = self.value_at(i)?;
            if predicate(value, i, self) {
                kept.push(value);
            }
        }

        let species = self.resolve_species()?;
        Self::construct_derived(species, Construct::Values(kept), None)
    }

    pub fn for_each<F>(&self, mut f: F) -> Result<(), ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array),
    {
        self.ensure_attached()?;
        for i in 0..self.len() {
            f(self.value_at(i)?, i, self);
        }
        Ok(())
    }

    /// Fold left to right, seeded with the first element.
    pub fn reduce<F>(&self, mut f: F) -> Result<f64, ArrayError>
    where
        F: FnMut(f64, f64, usize, &Float16Array) -> f64,
    {
        self.ensure_attached()?;
        let len = self.len();
        if len == 0 {
            return Err(ArrayError::EmptyReduce);
        }

        let mut acc = self.value_at(0)?;
        for i in 1..len {
            acc = f(acc, self.value_at(i)?, i, self);
        }
        Ok(acc)
    }

    /// Fold left to right from an explicit seed.
    pub fn reduce_with<T, F>(&self, init: T, mut f: F) -> Result<T, ArrayError>
    where
        F: FnMut(T, f64, usize, &Float16Array) -> T,
    {
        self.ensure_attached()?;
        let mut acc = init;
        for i in 0..self.len() {
            acc = f(acc, self.value_at(i)?, i, self);
        }
        Ok(acc)
    }

    /// Fold right to left, seeded with the last element.
    pub fn reduce_right<F>(&self, mut f: F) -> Result<f64, ArrayError>
    where
        F: FnMut(f64, f64, usize, &Float16Array) -> f64,
    {
        self.ensure_attached()?;
        let len = self.len();
        if len == 0 {
            return Err(ArrayError::EmptyReduce);
        }

        let mut acc = self.value_at(len - 1)?;
        for i in (0..len - 1).rev() {
            acc = f(acc, self.value_at(i)?, i, self);
        }
        Ok(acc)
    }

    /// Fold right to left from an explicit seed.
    pub fn reduce_right_with<T, F>(&self, init: T, mut f: F) -> Result<T, ArrayError>
    where
        F: FnMut(T, f64, usize, &Float16Array) -> T,
    {
        self.ensure_attached()?;
        let mut acc = init;
        for i in (0..self.len()).rev() {
            acc = f(acc, self.value_at(i)?, i, self);
        }
        Ok(acc)
    }

    /// True if `predicate` holds for every element (vacuously true when empty).
    pub fn every<F>(&self, mut predicate: F) -> Result<bool, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        self.ensure_attached()?;
        for i in 0..self.len() {
            if !predicate(self.value_at(i)?, i, self) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn some<F>(&self, mut predicate: F) -> Result<bool, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        self.ensure_attached()?;
        for i in 0..self.len() {
            if predicate(self.value_at(i)?, i, self) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
