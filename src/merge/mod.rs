//! The module provides the merging primitive of the recursive position-sort.
//!
//! Merging is behind the [`Merge`] trait so that the algorithm on top is
//! independent of how two sorted runs are combined: [`LinearMerge`] is the
//! two-pointer production default, [`SortingMerge`] re-sorts the
//! concatenation and serves as a baseline, and [`BitonicMerge`] runs a
//! fixed-topology merging network whose memory access pattern does not
//! depend on the keys, the variant to instantiate when the merged data is
//! secret.

/// Combines two sequences, each sorted in ascending order, into a single
/// sorted sequence.
///
/// On equal elements those of `left` must come first. The position-sort
/// builds keys whose order is total and strict, so implementations are free
/// to assume no two elements compare equal across its inputs;
/// [`LinearMerge`] and [`SortingMerge`] are nevertheless stable.
///
/// A conforming implementation must not inspect elements beyond comparing
/// them.
pub trait Merge {
    /// Merges `left` and `right` into their sorted union.
    fn merge<K: Ord>(left: Vec<K>, right: Vec<K>) -> Vec<K>;
}

/// Two-pointer merge in `O(|left| + |right|)` comparisons. The default.
pub struct LinearMerge;

impl Merge for LinearMerge {
    fn merge<K: Ord>(left: Vec<K>, right: Vec<K>) -> Vec<K> {
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let mut l = left.into_iter();
        let mut r = right.into_iter();
        let mut a = l.next();
        let mut b = r.next();
        loop {
            match (a.take(), b.take()) {
                (Some(x), Some(y)) => {
                    if x <= y {
                        merged.push(x);
                        a = l.next();
                        b = Some(y);
                    } else {
                        merged.push(y);
                        a = Some(x);
                        b = r.next();
                    }
                }
                (Some(x), None) => {
                    merged.push(x);
                    merged.extend(l);
                    return merged;
                }
                (None, Some(y)) => {
                    merged.push(y);
                    merged.extend(r);
                    return merged;
                }
                (None, None) => return merged,
            }
        }
    }
}

/// Concatenates the two runs and stable-sorts the result.
///
/// `O(n log n)`: too slow for the position-sort's complexity bound, kept as
/// the simplest possible implementation to test the others against.
pub struct SortingMerge;

impl Merge for SortingMerge {
    fn merge<K: Ord>(left: Vec<K>, right: Vec<K>) -> Vec<K> {
        let mut merged = left;
        merged.extend(right);
        merged.sort();
        merged
    }
}

/// Bitonic merging network.
///
/// The two runs are laid out as an ascending-then-descending sequence padded
/// to a power of two, and a halving cascade of compare-exchanges sorts it.
/// The sequence of compared lanes is a function of the lengths alone, never
/// of the keys, which is what makes the network usable on secret data;
/// `O(n log n)` compare-exchanges. Requires a strict order over the inputs
/// (no two elements comparing equal), which the position-sort guarantees.
pub struct BitonicMerge;

impl Merge for BitonicMerge {
    fn merge<K: Ord>(left: Vec<K>, right: Vec<K>) -> Vec<K> {
        let n = left.len() + right.len();
        if n == 0 {
            return Vec::new();
        }
        let padded = n.next_power_of_two();

        // ascending run, +inf padding, descending run: a bitonic sequence
        let mut lanes: Vec<Option<K>> = Vec::with_capacity(padded);
        lanes.extend(left.into_iter().map(Some));
        lanes.resize_with(padded - right.len(), || None);
        lanes.extend(right.into_iter().rev().map(Some));

        bitonic_pass(&mut lanes);

        lanes.truncate(n);
        lanes.into_iter().flatten().collect()
    }
}

// An empty lane acts as a +inf sentinel.
fn outranks<K: Ord>(a: &Option<K>, b: &Option<K>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x > y,
        (None, Some(_)) => true,
        _ => false,
    }
}

// One stage of the network: compare-exchange across the two halves, then
// recurse into each half. `lanes` must have power-of-two length and hold a
// bitonic sequence; it ends up sorted ascending.
fn bitonic_pass<K: Ord>(lanes: &mut [Option<K>]) {
    let half = lanes.len() / 2;
    if half == 0 {
        return;
    }
    for i in 0..half {
        if outranks(&lanes[i], &lanes[i + half]) {
            lanes.swap(i, i + half);
        }
    }
    let (low, high) = lanes.split_at_mut(half);
    bitonic_pass(low);
    bitonic_pass(high);
}

#[cfg(test)]
#[generic_tests::define]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_empty_inputs<M: Merge>() {
        assert_eq!(M::merge(Vec::<u32>::new(), Vec::new()), Vec::new());
        assert_eq!(M::merge(vec![1, 2], Vec::new()), vec![1, 2]);
        assert_eq!(M::merge(Vec::new(), vec![1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_interleaved_runs<M: Merge>() {
        let merged = M::merge(vec![0, 2, 4, 6], vec![1, 3, 5]);
        assert_eq!(merged, vec![0, 1, 2, 3, 4, 5, 6]);

        let merged = M::merge(vec![10, 11], vec![0, 1, 2, 3]);
        assert_eq!(merged, vec![0, 1, 2, 3, 10, 11]);
    }

    #[test]
    fn test_random_runs<M: Merge>() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let n = rng.gen_range(0..200);
            let k = rng.gen_range(0..200);
            let mut left: Vec<u32> = (0..n).map(|_| rng.gen_range(0..1000)).collect();
            let mut right: Vec<u32> = (0..k).map(|_| rng.gen_range(0..1000)).collect();
            left.sort();
            right.sort();

            let mut expected = left.clone();
            expected.extend(right.iter().copied());
            expected.sort();

            assert_eq!(M::merge(left, right), expected);
        }
    }

    #[instantiate_tests(<LinearMerge>)]
    mod linear {}

    #[instantiate_tests(<SortingMerge>)]
    mod sorting {}

    #[instantiate_tests(<BitonicMerge>)]
    mod bitonic {}
}
