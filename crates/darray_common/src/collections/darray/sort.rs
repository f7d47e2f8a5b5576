use core::{cmp::Ordering, mem};

/// Unstable in-place quicksort using a Lomuto partition around the last element.
///
/// Recursion only goes into the smaller partition, the larger one is handled by the loop,
/// which keeps the stack depth at *O*(log n) even for degenerate inputs.
pub(super) fn quicksort<T, F>(mut v: &mut [T], cmp: &mut F) where
    F: FnMut(&T, &T) -> Ordering
{
    while v.len() > 1 {
        let mid = partition(v, cmp);
        let (left, right) = mem::take(&mut v).split_at_mut(mid);
        // `right[0]` is the pivot, which is already in its final place
        let right = &mut right[1..];

        if left.len() < right.len() {
            quicksort(left, cmp);
            v = right;
        } else {
            quicksort(right, cmp);
            v = left;
        }
    }
}

/// Partition `v` around its last element, returning the final index of the pivot.
fn partition<T, F>(v: &mut [T], cmp: &mut F) -> usize where
    F: FnMut(&T, &T) -> Ordering
{
    let pivot = v.len() - 1;
    let mut store = 0;
    for idx in 0..pivot {
        if cmp(&v[idx], &v[pivot]) == Ordering::Less {
            v.swap(idx, store);
            store += 1;
        }
    }
    v.swap(store, pivot);
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<i32>) -> Vec<i32> {
        quicksort(&mut v, &mut i32::cmp);
        v
    }

    #[test]
    fn partition_places_pivot() {
        let mut v = [5, 1, 4, 2, 3];
        let mid = partition(&mut v, &mut i32::cmp);
        assert_eq!(mid, 2);
        assert_eq!(v[mid], 3);
        assert!(v[..mid].iter().all(|&x| x < 3));
        assert!(v[mid + 1..].iter().all(|&x| x > 3));
    }

    #[test]
    fn sorts_small_inputs() {
        assert_eq!(sorted(vec![]), Vec::<i32>::new());
        assert_eq!(sorted(vec![1]), vec![1]);
        assert_eq!(sorted(vec![2, 1]), vec![1, 2]);
        assert_eq!(sorted(vec![3, -1, 2, -1]), vec![-1, -1, 2, 3]);
    }

    #[test]
    fn sorts_degenerate_inputs() {
        let ascending: Vec<i32> = (0..2000).collect();
        let descending: Vec<i32> = (0..2000).rev().collect();
        assert_eq!(sorted(ascending.clone()), ascending);
        assert_eq!(sorted(descending), ascending);
        assert_eq!(sorted(vec![7; 1000]), vec![7; 1000]);
    }

    #[test]
    fn honors_comparator() {
        let mut v = vec![1, 5, 2, 4, 3];
        quicksort(&mut v, &mut |a: &i32, b: &i32| b.cmp(a));
        assert_eq!(v, [5, 4, 3, 2, 1]);
    }
}
