//! The module implements the recursive position-sort of an insertion series
//! and the linear pass that applies the series to a base sequence.
//!
//! An insertion series is an ordered sequence of [`Insertion`] requests.
//! Applying it sequentially is quadratic: every request shifts the elements
//! after its position. [`sort_series`] instead computes the position every
//! inserted value occupies once the *whole* series has been applied, in
//! $\Theta(t \log t)$ time, and [`apply_series`] materializes the final
//! sequence from those positions in a single linear pass.
//!
//! ## Technical details
//!
//! The series is cut into two halves, each half is solved as if the other did
//! not exist, and the two partial solutions are merged. The merge step is
//! where the work happens. A left-half entry at partial position `x` keeps
//! `x` as its merge key; a right-half entry at partial position `x` with rank
//! `j` inside its half takes the displaced key `x - j`. Both runs are merged
//! by ascending key, with right-origin entries ahead of left-origin entries
//! at equal key: a right-half request aimed at the slot an earlier left-half
//! value settled in lands in front of that value. The prefix sums of the
//! right-origin indicator over the merged order count, for every entry, how
//! many right-half values land before it; adding that count to the entry's
//! stored key lifts it to its position in the combined sequence. Right-half
//! entries get back exactly the `j` they were displaced by (their partial
//! positions already accounted for everything to their left), while left-half
//! entries are pushed past the right-half values that overtook them.
//!
//! Each level of the recursion costs a linear merge plus a linear prefix sum,
//! and there are $\Theta(\log t)$ levels. The cut point of every level is a
//! free parameter (see [`SplitStrategy`]): any cut yields the same output, so
//! the recursion can be shaped to taste, e.g. for fork-join parallelism
//! ([`par_sort_series`]) or power-of-two merging networks.
//!
//! ## Example
//! ```
//! use cww::{sort_series, Insertion};
//!
//! // Inserting 'a' at 0 and then 'b' at 0 pushes 'a' to position 1.
//! let series = vec![Insertion::new(0, 'a'), Insertion::new(0, 'b')];
//! let sorted = sort_series(&series, 3).unwrap();
//! assert_eq!(sorted, vec![Insertion::new(0, 'b'), Insertion::new(1, 'a')]);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use rayon::prelude::*;

use crate::merge::{LinearMerge, Merge};
use crate::utils::{par_prefix_sums, prefix_sums};

// Sub-series shorter than this are solved serially even on the parallel path.
const PAR_CUTOFF: usize = 1 << 12;

/// A single request of an insertion series: insert `value` at position `pos`
/// of the sequence as it exists when the request is applied.
///
/// The position-sort returns the same type, with `pos` holding the position
/// the value occupies once the whole series has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion<T> {
    /// Position addressed by the request.
    pub pos: usize,
    /// Value to insert.
    pub value: T,
}

impl<T> Insertion<T> {
    /// Creates a request to insert `value` at position `pos`.
    pub fn new(pos: usize, value: T) -> Self {
        Insertion { pos, value }
    }
}

impl<T> From<(usize, T)> for Insertion<T> {
    fn from((pos, value): (usize, T)) -> Self {
        Insertion { pos, value }
    }
}

/// Errors that can occur while processing an insertion series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// A request addressed a position beyond the end of the sequence as it
    /// exists at its point of the series. Signals a caller bug or corrupted
    /// input; positions are never clamped.
    PositionOutOfRange {
        /// Index of the offending request in the series.
        index: usize,
        /// The position it asked for.
        pos: usize,
        /// The largest position addressable at that point.
        bound: usize,
    },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::PositionOutOfRange { index, pos, bound } => {
                write!(
                    f,
                    "request {}: position {} out of range (at most {} is addressable at that point)",
                    index, pos, bound
                )
            }
        }
    }
}

impl std::error::Error for SeriesError {}

/// Chooses the cut point at which the recursive position-sort divides a
/// series. Every cut in `[1, t - 1]` produces the same output; the choice
/// only shapes the recursion tree.
pub trait SplitStrategy {
    /// Returns the cut point for a series of length `t >= 2`.
    /// Must lie in `[1, t - 1]`.
    fn split_point(t: usize) -> usize;
}

/// Cuts a series in the middle. The default.
pub struct HalvingSplit;

impl SplitStrategy for HalvingSplit {
    fn split_point(t: usize) -> usize {
        t / 2
    }
}

/// Cuts at the largest power of two below the series length, so the left
/// sub-problem always has power-of-two size. Suits merging networks and
/// streaming ingestion, where solved prefixes of size 1, 2, 4, ... are
/// extended by merging in the newly arrived suffix.
pub struct PowerOfTwoSplit;

impl SplitStrategy for PowerOfTwoSplit {
    fn split_point(t: usize) -> usize {
        1_usize << (usize::BITS - 1 - (t - 1).leading_zeros())
    }
}

// Transient key of the merge step. `key` is the entry's partial position,
// displaced by `rank` for right-half entries; the comparison implements the
// interleave rule: ascending key, right-origin before left-origin on equal
// keys, right-half entries in their own order.
struct Tagged<T> {
    key: i64,
    from_left: bool,
    rank: usize,
    value: T,
}

impl<T> Tagged<T> {
    #[inline(always)]
    fn tag(&self) -> (i64, bool, usize) {
        (self.key, self.from_left, self.rank)
    }
}

impl<T> PartialEq for Tagged<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }
}

impl<T> Eq for Tagged<T> {}

impl<T> PartialOrd for Tagged<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Tagged<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag().cmp(&other.tag())
    }
}

#[inline(always)]
fn tag_left<T>(ins: Insertion<T>) -> Tagged<T> {
    Tagged {
        key: ins.pos as i64,
        from_left: true,
        rank: 0,
        value: ins.value,
    }
}

#[inline(always)]
fn tag_right<T>(rank: usize, ins: Insertion<T>) -> Tagged<T> {
    Tagged {
        key: ins.pos as i64 - rank as i64,
        from_left: false,
        rank,
        value: ins.value,
    }
}

#[inline(always)]
fn untag<T>(tagged: Tagged<T>, offset: i64) -> Insertion<T> {
    Insertion {
        pos: (tagged.key + offset) as usize,
        value: tagged.value,
    }
}

// Combines the solutions of two adjacent sub-series into the solution of
// their concatenation. See the module documentation for the displacement and
// tie-break rules.
fn sort_merge<M, T>(left: Vec<Insertion<T>>, right: Vec<Insertion<T>>) -> Vec<Insertion<T>>
where
    M: Merge,
{
    let left_tagged: Vec<_> = left.into_iter().map(tag_left).collect();
    let right_tagged: Vec<_> = right
        .into_iter()
        .enumerate()
        .map(|(rank, ins)| tag_right(rank, ins))
        .collect();

    let merged = M::merge(left_tagged, right_tagged);

    let from_right: Vec<i64> = merged.iter().map(|t| i64::from(!t.from_left)).collect();
    let offsets = prefix_sums(&from_right);

    merged
        .into_iter()
        .zip(offsets)
        .map(|(tagged, offset)| untag(tagged, offset))
        .collect()
}

// Parallel rendition of `sort_merge`: tagging, prefix sums, and untagging
// run chunked; only the merge itself is whatever `M` makes of it.
fn par_sort_merge<M, T>(left: Vec<Insertion<T>>, right: Vec<Insertion<T>>) -> Vec<Insertion<T>>
where
    M: Merge,
    T: Send + Sync,
{
    let left_tagged: Vec<_> = left.into_par_iter().map(tag_left).collect();
    let right_tagged: Vec<_> = right
        .into_par_iter()
        .enumerate()
        .map(|(rank, ins)| tag_right(rank, ins))
        .collect();

    let merged = M::merge(left_tagged, right_tagged);

    let from_right: Vec<i64> = merged.par_iter().map(|t| i64::from(!t.from_left)).collect();
    let mut offsets = par_prefix_sums(&from_right);
    offsets.truncate(merged.len());

    merged
        .into_par_iter()
        .zip(offsets)
        .map(|(tagged, offset)| untag(tagged, offset))
        .collect()
}

fn sort_rec<M, S, T>(series: &[Insertion<T>]) -> Vec<Insertion<T>>
where
    M: Merge,
    S: SplitStrategy,
    T: Clone,
{
    if series.len() <= 1 {
        return series.to_vec();
    }
    let cut = S::split_point(series.len());
    debug_assert!(cut >= 1 && cut < series.len());

    let left = sort_rec::<M, S, T>(&series[..cut]);
    let right = sort_rec::<M, S, T>(&series[cut..]);
    sort_merge::<M, T>(left, right)
}

fn par_sort_rec<M, S, T>(series: &[Insertion<T>]) -> Vec<Insertion<T>>
where
    M: Merge,
    S: SplitStrategy,
    T: Clone + Send + Sync,
{
    if series.len() < PAR_CUTOFF {
        return sort_rec::<M, S, T>(series);
    }
    let cut = S::split_point(series.len());
    debug_assert!(cut >= 1 && cut < series.len());

    let (left, right) = rayon::join(
        || par_sort_rec::<M, S, T>(&series[..cut]),
        || par_sort_rec::<M, S, T>(&series[cut..]),
    );
    par_sort_merge::<M, T>(left, right)
}

// Checks that every request addresses a position that exists at its point of
// the series: request `i` may address `0..=base_len + i`.
pub(crate) fn validate_positions<I>(positions: I, base_len: usize) -> Result<(), SeriesError>
where
    I: IntoIterator<Item = usize>,
{
    for (index, pos) in positions.into_iter().enumerate() {
        let bound = base_len + index;
        if pos > bound {
            return Err(SeriesError::PositionOutOfRange { index, pos, bound });
        }
    }
    Ok(())
}

// Position-only sort for callers that carry no payloads; the zero-sized
// payload makes this the plain position-sort at no extra cost.
pub(crate) fn sort_positions(positions: &[usize]) -> Vec<usize> {
    let series: Vec<Insertion<()>> = positions.iter().map(|&pos| Insertion::new(pos, ())).collect();
    sort_rec::<LinearMerge, HalvingSplit, ()>(&series)
        .into_iter()
        .map(|ins| ins.pos)
        .collect()
}

// Materializes the final sequence in one pass: between consecutive final
// positions, the output is filled from the base.
fn interleave<T: Clone>(base: &[T], sorted: Vec<Insertion<T>>) -> Vec<T> {
    let mut result = Vec::with_capacity(base.len() + sorted.len());
    let mut remaining = base.iter().cloned();
    for ins in sorted {
        let due = ins.pos - result.len();
        result.extend(remaining.by_ref().take(due));
        result.push(ins.value);
    }
    result.extend(remaining);
    result
}

/// Computes, for every request of `series`, the position its value occupies
/// once the whole series has been applied to a base sequence of `base_len`
/// elements.
///
/// The result is ordered by final position; for `t` requests the positions
/// are `t` distinct values in `[0, base_len + t)`. The base elements occupy
/// exactly the remaining positions, in their original order.
///
/// # Errors
///
/// [`SeriesError::PositionOutOfRange`] if request `i` addresses a position
/// greater than `base_len + i`.
///
/// # Examples
///
/// ```
/// use cww::{sort_series, Insertion};
///
/// let series = vec![Insertion::new(2, 'x'), Insertion::new(0, 'y')];
/// let sorted = sort_series(&series, 2).unwrap();
/// assert_eq!(sorted, vec![Insertion::new(0, 'y'), Insertion::new(3, 'x')]);
///
/// assert!(sort_series(&[Insertion::new(3, 'x')], 2).is_err());
/// ```
pub fn sort_series<T: Clone>(
    series: &[Insertion<T>],
    base_len: usize,
) -> Result<Vec<Insertion<T>>, SeriesError> {
    sort_series_with::<LinearMerge, HalvingSplit, T>(series, base_len)
}

/// [`sort_series`] with explicit merge and split-point strategies.
///
/// # Examples
///
/// ```
/// use cww::{sort_series, sort_series_with, BitonicMerge, Insertion, PowerOfTwoSplit};
///
/// let series: Vec<Insertion<u8>> = vec![(0, 7).into(), (1, 8).into(), (0, 9).into()];
/// assert_eq!(
///     sort_series_with::<BitonicMerge, PowerOfTwoSplit, u8>(&series, 4).unwrap(),
///     sort_series(&series, 4).unwrap()
/// );
/// ```
pub fn sort_series_with<M, S, T>(
    series: &[Insertion<T>],
    base_len: usize,
) -> Result<Vec<Insertion<T>>, SeriesError>
where
    M: Merge,
    S: SplitStrategy,
    T: Clone,
{
    validate_positions(series.iter().map(|ins| ins.pos), base_len)?;
    Ok(sort_rec::<M, S, T>(series))
}

/// [`sort_series`] with the recursion forked across threads.
///
/// The two sub-series of every level above a fixed cutoff are solved by
/// `rayon::join`; the merge step's bookkeeping runs chunked. Output is
/// identical to the serial version.
pub fn par_sort_series<T>(
    series: &[Insertion<T>],
    base_len: usize,
) -> Result<Vec<Insertion<T>>, SeriesError>
where
    T: Clone + Send + Sync,
{
    validate_positions(series.iter().map(|ins| ins.pos), base_len)?;
    Ok(par_sort_rec::<LinearMerge, HalvingSplit, T>(series))
}

/// Applies an insertion series to `base` and returns the final sequence.
///
/// Equivalent to inserting every request's value at its position, one request
/// after the other, but runs in `O((m + t) log t)` instead of `O((m + t) t)`.
/// An empty series returns a copy of `base`; an empty base is allowed.
///
/// # Errors
///
/// [`SeriesError::PositionOutOfRange`] if request `i` addresses a position
/// greater than `base.len() + i`.
///
/// # Examples
///
/// ```
/// use cww::{apply_series, Insertion};
///
/// let series: Vec<Insertion<i32>> =
///     [(0, 4), (0, 5), (1, 6), (6, 7), (4, 8), (1, 9)].map(Insertion::from).to_vec();
/// let result = apply_series(&[1, 2, 3], &series).unwrap();
/// assert_eq!(result, vec![5, 9, 6, 4, 1, 8, 2, 3, 7]);
/// ```
pub fn apply_series<T: Clone>(
    base: &[T],
    series: &[Insertion<T>],
) -> Result<Vec<T>, SeriesError> {
    apply_series_with::<LinearMerge, HalvingSplit, T>(base, series)
}

/// [`apply_series`] with explicit merge and split-point strategies.
pub fn apply_series_with<M, S, T>(
    base: &[T],
    series: &[Insertion<T>],
) -> Result<Vec<T>, SeriesError>
where
    M: Merge,
    S: SplitStrategy,
    T: Clone,
{
    validate_positions(series.iter().map(|ins| ins.pos), base.len())?;
    Ok(interleave(base, sort_rec::<M, S, T>(series)))
}

/// [`apply_series`] with the position-sort forked across threads.
pub fn par_apply_series<T>(base: &[T], series: &[Insertion<T>]) -> Result<Vec<T>, SeriesError>
where
    T: Clone + Send + Sync,
{
    validate_positions(series.iter().map(|ins| ins.pos), base.len())?;
    Ok(interleave(
        base,
        par_sort_rec::<LinearMerge, HalvingSplit, T>(series),
    ))
}

#[cfg(test)]
mod tests;
