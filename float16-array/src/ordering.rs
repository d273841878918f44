use std::cmp::Ordering;

/// Default element order for [`Float16Array::sort`](crate::Float16Array::sort).
///
/// Ascending numeric order with NaN after every number and equal to other
/// NaNs; `-0.0` sorts before `+0.0`.
pub fn default_compare(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    if x < y {
        return Ordering::Less;
    }
    if x > y {
        return Ordering::Greater;
    }

    // equal; only the zeros can still differ
    match (x.is_sign_negative(), y.is_sign_negative()) {
        (true, false) if x == 0.0 => Ordering::Less,
        (false, true) if x == 0.0 => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Stable bottom-up merge sort.
///
/// `compare` need not be a total order; the result is then some permutation
/// of the input, never a panic.
pub(crate) fn merge_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(T, T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut scratch = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = start.saturating_add(width).min(len);
            let end = mid.saturating_add(width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut scratch[start..end], &mut compare);
            start = end;
        }
        items.copy_from_slice(&scratch);
        width = width.saturating_mul(2);
    }
}

/// Merge two runs into `out`, which holds exactly `left.len() + right.len()` slots.
fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(T, T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // ties keep the left element first
        let take_right = j < right.len()
            && (i >= left.len() || compare(right[j], left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}
