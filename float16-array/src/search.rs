//! Predicate and value searches.
//!
//! `index_of`/`last_index_of` compare with `==`, so NaN never matches;
//! `includes` treats NaN as equal to NaN.

use crate::{ArrayError, Float16Array};

impl Float16Array {
    /// First value accepted by `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Result<Option<f64>, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        Ok(self.find_entry(0..self.len(), &mut predicate)?.map(|(_, v)| v))
    }

    pub fn find_index<F>(&self, mut predicate: F) -> Result<Option<usize>, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        Ok(self.find_entry(0..self.len(), &mut predicate)?.map(|(i, _)| i))
    }

    /// Last value accepted by `predicate`, scanning from the end.
    pub fn find_last<F>(&self, mut predicate: F) -> Result<Option<f64>, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        Ok(self
            .find_entry((0..self.len()).rev(), &mut predicate)?
            .map(|(_, v)| v))
    }

    pub fn find_last_index<F>(&self, mut predicate: F) -> Result<Option<usize>, ArrayError>
    where
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        Ok(self
            .find_entry((0..self.len()).rev(), &mut predicate)?
            .map(|(i, _)| i))
    }

    /// Index of the first element equal to `element` at or after `from_index`.
    pub fn index_of(&self, element: f64, from_index: Option<i64>) -> Result<Option<usize>, ArrayError> {
        self.ensure_attached()?;
        let start = forward_start(from_index, self.len());
        for i in start..self.len() {
            if self.value_at(i)? == element {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    /// Index of the last element equal to `element` at or before `from_index`.
    pub fn last_index_of(
        &self,
        element: f64,
        from_index: Option<i64>,
    ) -> Result<Option<usize>, ArrayError> {
        self.ensure_attached()?;
        let len = self.len() as i64;
        let start = match from_index {
            None => len - 1,
            Some(from) if from >= 0 => from.min(len - 1),
            Some(from) => len + from,
        };
        if start < 0 {
            return Ok(None);
        }

        for i in (0..=start as usize).rev() {
            if self.value_at(i)? == element {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    /// Whether any element at or after `from_index` equals `element`, NaN included.
    pub fn includes(&self, element: f64, from_index: Option<i64>) -> Result<bool, ArrayError> {
        self.ensure_attached()?;
        let start = forward_start(from_index, self.len());
        let want_nan = element.is_nan();
        for i in start..self.len() {
            let value = self.value_at(i)?;
            if value == element || (want_nan && value.is_nan()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn find_entry<I, F>(&self, indices: I, predicate: &mut F) -> Result<Option<(usize, f64)>, ArrayError>
    where
        I: Iterator<Item = usize>,
        F: FnMut(f64, usize, &Float16Array) -> bool,
    {
        self.ensure_attached()?;
        for i in indices {
            let value = self.value_at(i)?;
            if predicate(value, i, self) {
                return Ok(Some((i, value)));
            }
        }
        Ok(None)
    }
}

/// Start of a forward scan: negative counts from the end, floored at 0.
fn forward_start(from_index: Option<i64>, len: usize) -> usize {
    match from_index {
        None => 0,
        Some(from) if from >= 0 => usize::try_from(from).unwrap_or(usize::MAX).min(len),
        Some(from) => (len as i64 + from).max(0) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_variants() {
        let a = Float16Array::of(&[1.0, 4.0, 3.0, 6.0, 5.0]);
        let even = |v: f64, _: usize, _: &Float16Array| v % 2.0 == 0.0;
        assert_eq!(a.find(even).unwrap(), Some(4.0));
        assert_eq!(a.find_index(even).unwrap(), Some(1));
        assert_eq!(a.find_last(even).unwrap(), Some(6.0));
        assert_eq!(a.find_last_index(even).unwrap(), Some(3));
        assert_eq!(a.find(|v, _, _| v > 10.0).unwrap(), None);
        assert_eq!(a.find_last_index(|v, _, _| v > 10.0).unwrap(), None);
    }

    #[test]
    fn test_find_last_visits_descending() {
        let a = Float16Array::of(&[1.0, 2.0, 3.0]);
        let mut order = Vec::new();
        a.find_last(|_, i, _| {
            order.push(i);
            false
        })
        .unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_index_of() {
        let a = Float16Array::of(&[1.0, 2.0, 1.0, 2.0]);
        assert_eq!(a.index_of(2.0, None).unwrap(), Some(1));
        assert_eq!(a.index_of(2.0, Some(2)).unwrap(), Some(3));
        assert_eq!(a.index_of(1.0, Some(-2)).unwrap(), Some(2));
        assert_eq!(a.index_of(1.0, Some(-100)).unwrap(), Some(0));
        assert_eq!(a.index_of(1.0, Some(i64::MAX)).unwrap(), None);
        assert_eq!(a.index_of(7.0, None).unwrap(), None);
    }

    #[test]
    fn test_last_index_of() {
        let a = Float16Array::of(&[1.0, 2.0, 1.0, 2.0]);
        assert_eq!(a.last_index_of(1.0, None).unwrap(), Some(2));
        assert_eq!(a.last_index_of(2.0, Some(2)).unwrap(), Some(1));
        assert_eq!(a.last_index_of(2.0, Some(100)).unwrap(), Some(3));
        assert_eq!(a.last_index_of(2.0, Some(-2)).unwrap(), Some(1));
        assert_eq!(a.last_index_of(1.0, Some(-5)).unwrap(), None);
        assert_eq!(Float16Array::new().last_index_of(1.0, None).unwrap(), None);
    }

    #[test]
    fn test_nan_and_zero_matching() {
        let a = Float16Array::of(&[0.0, f64::NAN]);
        assert!(a.includes(f64::NAN, None).unwrap());
        assert_eq!(a.index_of(f64::NAN, None).unwrap(), None);
        assert_eq!(a.last_index_of(f64::NAN, None).unwrap(), None);
        assert_eq!(a.index_of(-0.0, None).unwrap(), Some(0));
        assert!(a.includes(f64::NAN, Some(-1)).unwrap());
        assert!(!a.includes(0.0, Some(1)).unwrap());
        assert!(!a.includes(1.0, None).unwrap());
    }

    #[test]
    fn test_search_detached() {
        let a = Float16Array::of(&[1.0]);
        a.buffer().detach();
        assert!(a.index_of(1.0, None).unwrap_err().is_detached());
        assert!(a.includes(1.0, None).unwrap_err().is_detached());
        assert!(a.find(|_, _, _| true).unwrap_err().is_detached());
    }
}
