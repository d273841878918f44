//! Element access and in-place mutation.

use crate::array::clamp_relative;
use crate::ordering::{default_compare, merge_sort_by};
use crate::{ArrayError, Float16Array};
use float16_codec::{decode, encode};
use float16_core::ArraySource;
use std::cmp::Ordering;

impl Float16Array {
    /// Value at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Result<Option<f64>, ArrayError> {
        Ok(self.storage.get_value(index)?)
    }

    /// Encode `value` into slot `index`. Writes past the end are ignored.
    pub fn put(&self, index: usize, value: f64) -> Result<(), ArrayError> {
        self.storage.set_value(index, value)?;
        Ok(())
    }

    /// Value at a relative index; negative indices count from the end.
    pub fn at(&self, index: i64) -> Result<Option<f64>, ArrayError> {
        self.ensure_attached()?;
        let len = self.len() as i64;
        let k = if index >= 0 { index } else { len + index };
        if k < 0 || k >= len {
            return Ok(None);
        }
        self.get(k as usize)
    }

    /// Copy every element of `source` into this array starting at `offset`.
    ///
    /// Bounds are checked before anything is written. A source sharing this
    /// array's memory is read in full first, so overlap is safe.
    pub fn set<S>(&self, source: &S, offset: i64) -> Result<(), ArrayError>
    where
        S: ArraySource + ?Sized,
    {
        if offset < 0 {
            return Err(ArrayError::out_of_bounds(format!("negative offset {}", offset)));
        }
        self.ensure_attached()?;

        let kind = source.element_kind();
        if kind.is_wide_integer() {
            return Err(ArrayError::InvalidElementKind(kind));
        }

        let words = match source.read_words() {
            Some(words) => words?,
            None => source.read_values()?.into_iter().map(encode).collect(),
        };

        let len = self.len();
        let fits = usize::try_from(offset)
            .ok()
            .and_then(|start| start.checked_add(words.len()))
            .is_some_and(|end| end <= len);
        if !fits {
            return Err(ArrayError::out_of_bounds(format!(
                "{} elements at offset {} exceed length {}",
                words.len(),
                offset,
                len
            )));
        }

        self.storage.write_from(offset as usize, &words)?;
        Ok(())
    }

    /// Store `value` in every slot of `start..end` (relative, clamped).
    pub fn fill(&self, value: f64, start: i64, end: Option<i64>) -> Result<&Self, ArrayError> {
        self.ensure_attached()?;
        let len = self.len();
        let from = clamp_relative(start, len);
        let to = end.map_or(len, |end| clamp_relative(end, len));
        self.storage.fill(from, to, encode(value))?;
        Ok(self)
    }

    /// Move the words of `start..end` to `target`, as if through a temporary copy.
    pub fn copy_within(
        &self,
        target: i64,
        start: i64,
        end: Option<i64>,
    ) -> Result<&Self, ArrayError> {
        self.ensure_attached()?;
        let len = self.len();
        let to = clamp_relative(target, len);
        let from = clamp_relative(start, len);
        let last = end.map_or(len, |end| clamp_relative(end, len));

        let count = last.saturating_sub(from).min(len - to);
        if count > 0 {
            let words = self.storage.read_range(from, from + count)?;
            self.storage.write_from(to, &words)?;
        }
        Ok(self)
    }

    /// Reverse the element order in place.
    pub fn reverse(&self) -> Result<&Self, ArrayError> {
        let mut words = self.storage.read_all()?;
        words.reverse();
        self.storage.write_from(0, &words)?;
        Ok(self)
    }

    /// Sort in place by [`default_compare`].
    pub fn sort(&self) -> Result<&Self, ArrayError> {
        self.sort_by(default_compare)
    }

    /// Sort in place by decoded value with a caller comparator.
    ///
    /// The sort is stable. Only existing words are reordered, nothing is
    /// re-encoded. A comparator that is not a total order leaves the words
    /// in an unspecified order.
    pub fn sort_by<F>(&self, mut compare: F) -> Result<&Self, ArrayError>
    where
        F: FnMut(f64, f64) -> Ordering,
    {
        let mut words = self.storage.read_all()?;
        merge_sort_by(&mut words, |a, b| compare(decode(a), decode(b)));
        self.storage.write_from(0, &words)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float16_core::{ByteBuffer, TypedView};

    fn values(a: &Float16Array) -> Vec<f64> {
        a.to_vec().unwrap()
    }

    #[test]
    fn test_get_put() {
        let a = Float16Array::with_length(2).unwrap();
        a.put(0, 0.1).unwrap();
        a.put(5, 1.0).unwrap();
        assert_eq!(a.get(0).unwrap(), Some(0.0999755859375));
        assert_eq!(a.get(2).unwrap(), None);
        assert_eq!(values(&a), vec![0.0999755859375, 0.0]);
    }

    #[test]
    fn test_at() {
        let a = Float16Array::of(&[1.0, 2.0, 3.0]);
        assert_eq!(a.at(0).unwrap(), Some(1.0));
        assert_eq!(a.at(-1).unwrap(), Some(3.0));
        assert_eq!(a.at(-3).unwrap(), Some(1.0));
        assert_eq!(a.at(-4).unwrap(), None);
        assert_eq!(a.at(3).unwrap(), None);
    }

    #[test]
    fn test_set_bounds() {
        let short = Float16Array::with_length(4).unwrap();
        let err = short.set(&[1.0, 2.0, 3.0], 2).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(values(&short), vec![0.0; 4]);

        let long = Float16Array::with_length(6).unwrap();
        long.set(&[1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(values(&long), vec![0.0, 0.0, 1.0, 2.0, 3.0, 0.0]);

        assert!(long.set(&[1.0], -1).unwrap_err().is_out_of_bounds());
        assert!(long.set(&[1.0], i64::MAX).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn test_set_from_other_kinds() {
        let a = Float16Array::with_length(3).unwrap();
        a.set(&[7u8, 8], 1).unwrap();
        assert_eq!(values(&a), vec![0.0, 7.0, 8.0]);

        let b = Float16Array::of(&[-1.0, -2.0]);
        a.set(&b, 0).unwrap();
        assert_eq!(values(&a), vec![-1.0, -2.0, 8.0]);

        assert!(matches!(
            a.set(&[1i64], 0),
            Err(ArrayError::InvalidElementKind(_))
        ));
    }

    #[test]
    fn test_set_overlapping_view() {
        let a = Float16Array::of(&[1.0, 2.0, 3.0, 4.0]);
        let head = a.subarray(0, Some(3)).unwrap();
        a.set(&head, 1).unwrap();
        assert_eq!(values(&a), vec![1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_set_detached_source() {
        let a = Float16Array::with_length(2).unwrap();
        let source = TypedView::from_slice(&[1i16, 2]);
        source.buffer().detach();
        assert!(a.set(&source, 0).unwrap_err().is_detached());

        let f16_source = Float16Array::from_buffer(ByteBuffer::new(4), 0, None).unwrap();
        f16_source.buffer().detach();
        assert!(a.set(&f16_source, 0).unwrap_err().is_detached());
    }

    #[test]
    fn test_fill() {
        let a = Float16Array::with_length(5).unwrap();
        a.fill(1.0, 1, Some(-1)).unwrap();
        assert_eq!(values(&a), vec![0.0, 1.0, 1.0, 1.0, 0.0]);
        a.fill(2.0, -2, None).unwrap();
        assert_eq!(values(&a), vec![0.0, 1.0, 1.0, 2.0, 2.0]);
        a.fill(9.0, 4, Some(2)).unwrap();
        assert_eq!(values(&a), vec![0.0, 1.0, 1.0, 2.0, 2.0]);
        a.fill(65536.0, -100, Some(100)).unwrap();
        assert!(values(&a).iter().all(|&v| v == f64::INFINITY));
    }

    #[test]
    fn test_copy_within_overlap() {
        let a = Float16Array::of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        a.copy_within(1, 0, Some(3)).unwrap();
        assert_eq!(values(&a), vec![1.0, 1.0, 2.0, 3.0, 5.0]);

        let b = Float16Array::of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        b.copy_within(0, 3, None).unwrap();
        assert_eq!(values(&b), vec![4.0, 5.0, 3.0, 4.0, 5.0]);

        let c = Float16Array::of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        c.copy_within(-2, -4, Some(-3)).unwrap();
        assert_eq!(values(&c), vec![1.0, 2.0, 3.0, 2.0, 5.0]);
    }

    #[test]
    fn test_copy_within_keeps_raw_words() {
        let a = Float16Array::from_words(&[0x7c01, 0]);
        a.copy_within(1, 0, None).unwrap();
        assert_eq!(a.to_words().unwrap(), vec![0x7c01, 0x7c01]);
    }

    #[test]
    fn test_reverse_twice() {
        let a = Float16Array::of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        a.reverse().unwrap();
        assert_eq!(values(&a), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        a.reverse().unwrap().reverse().unwrap();
        assert_eq!(values(&a), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        a.reverse().unwrap();
        assert_eq!(values(&a), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_sort_default() {
        let a = Float16Array::of(&[f64::NAN, -0.0, 0.0, 1.0, -1.0]);
        a.sort().unwrap();
        let sorted = values(&a);
        assert_eq!(sorted[0], -1.0);
        assert!(sorted[1] == 0.0 && sorted[1].is_sign_negative());
        assert!(sorted[2] == 0.0 && sorted[2].is_sign_positive());
        assert_eq!(sorted[3], 1.0);
        assert!(sorted[4].is_nan());
    }

    #[test]
    fn test_sort_by_descending() {
        let a = Float16Array::of(&[3.0, 1.0, 2.0]);
        a.sort_by(|x, y| y.partial_cmp(&x).unwrap()).unwrap();
        assert_eq!(values(&a), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_sort_by_inconsistent_comparator() {
        let words: Vec<u16> = (0..500u16).map(|i| i.wrapping_mul(40_503) ^ 0x1234).collect();
        let a = Float16Array::from_words(&words);

        // linear congruential coin flips: no consistent order at all
        let mut state: u32 = 12345;
        a.sort_by(|_, _| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            match (state >> 16) % 3 {
                0 => Ordering::Less,
                1 => Ordering::Greater,
                _ => Ordering::Equal,
            }
        })
        .unwrap();

        let mut before = words;
        let mut after = a.to_words().unwrap();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sort_by_is_stable() {
        // -0 and +0 compare equal under partial_cmp and keep their order
        let a = Float16Array::of(&[0.0, 1.0, -0.0, -1.0]);
        a.sort_by(|x, y| x.partial_cmp(&y).unwrap_or(Ordering::Equal)).unwrap();
        assert_eq!(a.to_words().unwrap(), vec![0xbc00, 0x0000, 0x8000, 0x3c00]);
    }

    #[test]
    fn test_detached_mutations_fail() {
        let a = Float16Array::of(&[1.0, 2.0]);
        a.buffer().detach();
        assert!(a.get(0).unwrap_err().is_detached());
        assert!(a.put(0, 1.0).unwrap_err().is_detached());
        assert!(a.at(0).unwrap_err().is_detached());
        assert!(a.fill(0.0, 0, None).unwrap_err().is_detached());
        assert!(a.reverse().unwrap_err().is_detached());
        assert!(a.sort().unwrap_err().is_detached());
        assert!(a.copy_within(0, 1, None).unwrap_err().is_detached());
        assert!(a.set(&[1.0], 0).unwrap_err().is_detached());
    }
}
