//! The module generates constant-weight binary words: words of $m + t$ bits
//! of which exactly $t$ are one, determined by an ordered sequence of $t$
//! insertion positions.
//!
//! [`constant_weight_word`] starts from a word of $m$ zeros and inserts a one
//! bit at each given position in turn; the $i$-th position may address any of
//! the $m + i + 1$ slots of the word as it exists at that point, so the
//! $\prod_{i} (m + i + 1)$ valid inputs cover every weight-$t$ word the same
//! number ($t!$) of times, and uniform positions give a uniform word. The
//! word is computed through the recursive position-sort of
//! [`sort_series`](crate::sort_series), not by repeated insertion.
//!
//! When $t > m$ it is cheaper to generate the word with the roles of the two
//! bit values exchanged, i.e. describe the positions of the $m$ zeros inside
//! $t$ ones, and flip the result with [`Word::complement`].
//!
//! ## Example
//! ```
//! use cww::{constant_weight_positions, constant_weight_word};
//!
//! // inserting 1 at 0 twice into 00: 00 -> 100 -> 1100
//! let word = constant_weight_word(2, &[0, 0]).unwrap();
//! assert_eq!(format!("{:?}", word), "Word[1100]");
//! assert_eq!(constant_weight_positions(&[0, 0]), vec![0, 1]);
//! ```

use crate::series::{apply_series, sort_positions, validate_positions, Insertion, SeriesError};
use crate::word::Word;

/// Builds the word of `zeros + positions.len()` bits obtained by inserting a
/// one bit at each entry of `positions`, in order, into a word of `zeros`
/// zero bits.
///
/// The result has exactly `positions.len()` one bits; their positions are
/// those reported by [`constant_weight_positions`].
///
/// # Errors
///
/// [`SeriesError::PositionOutOfRange`] if `positions[i] > zeros + i` for
/// some `i`.
///
/// # Examples
///
/// ```
/// use cww::constant_weight_word;
///
/// let word = constant_weight_word(0, &[0, 1, 2]).unwrap();
/// assert_eq!(word.iter().collect::<Vec<_>>(), vec![true, true, true]);
///
/// let word = constant_weight_word(4, &[2, 0]).unwrap();
/// assert_eq!(format!("{:?}", word), "Word[100100]");
/// assert!(constant_weight_word(1, &[2]).is_err());
/// ```
pub fn constant_weight_word(zeros: usize, positions: &[usize]) -> Result<Word, SeriesError> {
    validate_positions(positions.iter().copied(), zeros)?;
    let ones = sort_positions(positions);
    Ok(merge_bits(zeros, &ones))
}

/// Computes the positions of the one bits of the word
/// [`constant_weight_word`] would build, sorted ascending.
///
/// For `t` input positions the result holds `t` distinct values; with the
/// implied count of zeros `m` they lie in `[0, m + t)`. The bound
/// `positions[i] <= m + i` is the caller's responsibility: `m` is not a
/// parameter here, and any input is mapped to *some* strictly increasing
/// sequence.
///
/// # Examples
///
/// ```
/// use cww::constant_weight_positions;
///
/// assert_eq!(constant_weight_positions(&[0, 1, 2]), vec![0, 1, 2]);
/// assert_eq!(constant_weight_positions(&[3, 3, 3]), vec![3, 4, 5]);
/// ```
pub fn constant_weight_positions(positions: &[usize]) -> Vec<usize> {
    sort_positions(positions)
}

/// Builds a constant-weight ternary word: entries of `positions` whose
/// matching `negate` flag is set insert a -1 instead of a 1 into a word of
/// `zeros` zero entries.
///
/// A direct reuse of [`apply_series`](crate::apply_series) with payloads
/// drawn from $\{-1, 1\}$; the positions of the nonzero entries are the same
/// as in the binary word.
///
/// # Errors
///
/// [`SeriesError::PositionOutOfRange`] as for [`constant_weight_word`].
///
/// # Panics
///
/// Panics if `positions` and `negate` have different lengths.
///
/// # Examples
///
/// ```
/// use cww::constant_weight_ternary;
///
/// let word = constant_weight_ternary(2, &[0, 0], &[false, true]).unwrap();
/// assert_eq!(word, vec![-1, 1, 0, 0]);
/// ```
pub fn constant_weight_ternary(
    zeros: usize,
    positions: &[usize],
    negate: &[bool],
) -> Result<Vec<i8>, SeriesError> {
    assert_eq!(
        positions.len(),
        negate.len(),
        "one sign flag per inserted position"
    );
    let series: Vec<Insertion<i8>> = positions
        .iter()
        .zip(negate)
        .map(|(&pos, &neg)| Insertion::new(pos, if neg { -1 } else { 1 }))
        .collect();
    apply_series(&vec![0; zeros], &series)
}

// Emits the word in one pass over its bit positions: positions claimed by
// the sorted one-positions produce a one, every other position consumes the
// next zero of the base.
fn merge_bits(zeros: usize, ones: &[usize]) -> Word {
    let n_bits = zeros + ones.len();
    let mut word = Word::with_capacity(n_bits);
    let mut next_one = 0;
    for bit_pos in 0..n_bits {
        if next_one < ones.len() && ones[next_one] == bit_pos {
            word.push(true);
            next_one += 1;
        } else {
            word.push(false);
        }
    }
    word
}
