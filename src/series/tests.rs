use super::*;
use crate::merge::{BitonicMerge, SortingMerge};
use crate::perf_and_test_utils::{apply_series_ref, gen_series, sort_series_ref, sort_series_step};

// Cut points allowed to the recursion but never picked by the shipped
// strategies: always 1, and always t - 1.
struct FirstSplit;
impl SplitStrategy for FirstSplit {
    fn split_point(_t: usize) -> usize {
        1
    }
}

struct LastSplit;
impl SplitStrategy for LastSplit {
    fn split_point(t: usize) -> usize {
        t - 1
    }
}

#[test]
fn test_apply_known_series() {
    let series: Vec<Insertion<i32>> = [(0, 4), (0, 5), (1, 6), (6, 7), (4, 8), (1, 9)]
        .map(Insertion::from)
        .to_vec();
    assert_eq!(
        apply_series(&[1, 2, 3], &series).unwrap(),
        vec![5, 9, 6, 4, 1, 8, 2, 3, 7]
    );
}

#[test]
fn test_empty_series_is_identity() {
    let base = vec![7_u32, 8, 9];
    assert_eq!(apply_series(&base, &[]).unwrap(), base);
    assert_eq!(sort_series::<u32>(&[], 3).unwrap(), vec![]);
}

#[test]
fn test_empty_base() {
    let series = vec![Insertion::new(0, 'a'), Insertion::new(1, 'b'), Insertion::new(0, 'c')];
    assert_eq!(apply_series(&[], &series).unwrap(), vec!['c', 'a', 'b']);
}

#[test]
fn test_single_insertion() {
    let series = vec![Insertion::new(2, 9_u8)];
    assert_eq!(apply_series(&[1, 2, 3], &series).unwrap(), vec![1, 2, 9, 3]);
    assert_eq!(sort_series(&series, 3).unwrap(), series);
}

#[test]
fn test_out_of_range_is_reported() {
    let err = apply_series(&[0_u8, 0], &[Insertion::new(3, 1)]).unwrap_err();
    assert_eq!(
        err,
        SeriesError::PositionOutOfRange {
            index: 0,
            pos: 3,
            bound: 2
        }
    );

    // the bound grows with every applied request
    let series = vec![Insertion::new(2, 1_u8), Insertion::new(4, 1)];
    let err = apply_series(&[0_u8, 0], &series).unwrap_err();
    assert_eq!(
        err,
        SeriesError::PositionOutOfRange {
            index: 1,
            pos: 4,
            bound: 3
        }
    );
    assert!(sort_series(&series, 2).is_err());

    // the same series is fine on a longer base
    assert!(apply_series(&[0_u8, 0, 0], &series).is_ok());

    let message = format!("{}", err);
    assert!(message.contains("request 1"));
    assert!(message.contains("position 4"));
}

#[test]
fn test_matches_reference() {
    for t in 0..8 {
        for m in 0..6 {
            for _ in 0..20 {
                let base: Vec<u64> = (0..m as u64).collect();
                let series = gen_series(m, t);

                let expected_sorted = sort_series_ref(&series);
                assert_eq!(sort_series(&series, m).unwrap(), expected_sorted);

                let expected = apply_series_ref(&base, &series);
                assert_eq!(apply_series(&base, &series).unwrap(), expected);
                assert_eq!(par_apply_series(&base, &series).unwrap(), expected);
            }
        }
    }
}

#[test]
fn test_merge_and_split_strategies_agree() {
    for t in 0..40 {
        let m = 5;
        let series = gen_series(m, t);
        let expected = sort_series(&series, m).unwrap();

        assert_eq!(
            sort_series_with::<SortingMerge, HalvingSplit, u64>(&series, m).unwrap(),
            expected
        );
        assert_eq!(
            sort_series_with::<BitonicMerge, HalvingSplit, u64>(&series, m).unwrap(),
            expected
        );
        assert_eq!(
            sort_series_with::<LinearMerge, PowerOfTwoSplit, u64>(&series, m).unwrap(),
            expected
        );
        assert_eq!(
            sort_series_with::<LinearMerge, FirstSplit, u64>(&series, m).unwrap(),
            expected
        );
        assert_eq!(
            sort_series_with::<LinearMerge, LastSplit, u64>(&series, m).unwrap(),
            expected
        );
        assert_eq!(
            sort_series_with::<BitonicMerge, PowerOfTwoSplit, u64>(&series, m).unwrap(),
            expected
        );
    }
}

#[test]
fn test_sorted_positions_are_distinct_and_bounded() {
    for _ in 0..20 {
        let (m, t) = (9, 50);
        let series = gen_series(m, t);
        let sorted = sort_series(&series, m).unwrap();

        assert_eq!(sorted.len(), t);
        assert!(sorted.windows(2).all(|w| w[0].pos < w[1].pos));
        assert!(sorted.last().unwrap().pos < m + t);
    }
}

#[test]
fn test_conservation() {
    for _ in 0..20 {
        let (m, t) = (12, 30);
        let base: Vec<u64> = (1000..1000 + m as u64).collect();
        let series = gen_series(m, t);

        let result = apply_series(&base, &series).unwrap();
        assert_eq!(result.len(), m + t);

        // dropping the inserted positions recovers the base, in order
        let inserted: Vec<usize> = sort_series(&series, m)
            .unwrap()
            .into_iter()
            .map(|ins| ins.pos)
            .collect();
        let survivors: Vec<u64> = result
            .iter()
            .enumerate()
            .filter(|(i, _)| !inserted.contains(i))
            .map(|(_, &v)| v)
            .collect();
        assert_eq!(survivors, base);
    }
}

#[test]
fn test_extensibility() {
    let m = 4;
    let series = gen_series(m, 12);

    let mut expected = Vec::new();
    for i in 0..series.len() {
        sort_series_step(&mut expected, &series[i]);
        assert_eq!(sort_series(&series[..=i], m).unwrap(), expected);
    }
}

#[test]
fn test_parallel_matches_serial_on_large_input() {
    let (m, t) = (1000, 3 * PAR_CUTOFF);
    let base: Vec<u64> = (0..m as u64).collect();
    let series = gen_series(m, t);

    let sorted = sort_series(&series, m).unwrap();
    assert_eq!(par_sort_series(&series, m).unwrap(), sorted);

    let applied = apply_series(&base, &series).unwrap();
    assert_eq!(par_apply_series(&base, &series).unwrap(), applied);
}

// The payload type only has to be cloneable; check the common integer widths.
macro_rules! test_apply_payload {
    ($($t:ty),*) => {
        $(::paste::paste! {
            #[test]
            fn [<test_apply_series_ $t>]() {
                let base: Vec<$t> = vec![1, 2, 3];
                let series = vec![
                    Insertion::new(0, 4 as $t),
                    Insertion::new(2, 5 as $t),
                    Insertion::new(5, 6 as $t),
                ];
                let expected = apply_series_ref(&base, &series);
                assert_eq!(apply_series(&base, &series).unwrap(), expected);
                assert_eq!(expected, vec![4, 1, 5, 2, 3, 6]);
            }
        })*
    }
}

test_apply_payload![i8, u8, i16, u16, i32, u32, i64, u64, isize, usize];

#[test]
fn test_insertion_serialize_deserialize() {
    let series = gen_series(5, 8);
    let serialized = bincode::serialize(&series).unwrap();
    let deserialized = bincode::deserialize::<Vec<Insertion<u64>>>(&serialized).unwrap();
    assert_eq!(series, deserialized);
}
