//! This library provides fast application of *insertion series* and
//! generation of *constant-weight binary words*.
//!
//! An insertion series is an ordered sequence of requests "insert value $y$ at
//! position $x$", applied one after the other to a base sequence. Every
//! insertion shifts the elements after it, so the naive loop costs
//! $\Theta(t^2)$ operations for $t$ requests. The recursive position-sort
//! implemented here computes where every inserted value lands once the whole
//! series has been applied in $\Theta(t \log t)$ time, after which a single
//! linear pass materializes the final sequence. Nothing in the computation
//! indexes a sequence at an input-dependent offset, which makes the approach
//! suitable for code that must not leak its inputs through memory access
//! patterns.
//!
//! The direct specialization [`constant_weight_word`] maps a sequence of $t$
//! integers, the $i$-th in $[0, m+i]$, to a word of $m+t$ bits of which
//! exactly $t$ are set: the word obtained by inserting a one bit at each given
//! position into a word of $m$ zeros. Uniformly distributed inputs produce
//! uniformly distributed words, which is how secret vectors are encoded in
//! code-based and lattice-based cryptosystems such as McEliece [[1](#bib)]
//! and NTRU [[2](#bib)]. This crate only performs the positions-to-word
//! transformation; drawing the positions from a random-number generator (and
//! rejection-sampling them into range) is the caller's concern.
//!
//! ## Example
//! ```
//! use cww::{apply_series, constant_weight_word, Insertion};
//!
//! let word = constant_weight_word(2, &[0, 0]).unwrap();
//! assert_eq!(word.iter().collect::<Vec<_>>(), vec![true, true, false, false]);
//!
//! let series = vec![Insertion::new(1, "b"), Insertion::new(1, "c")];
//! assert_eq!(apply_series(&["a", "d"], &series).unwrap(), vec!["a", "c", "b", "d"]);
//! ```
//!
//! ## <a name="bib">Bibliography</a>
//! 1. Robert J. McEliece. *A public-key cryptosystem based on algebraic coding theory.* DSN Progress Report 42-44, 1978.
//! 2. Jeffrey Hoffstein, Jill Pipher, and Joseph H. Silverman. *NTRU: A ring-based public key cryptosystem.* In ANTS, pages 267-288. Springer, 1998.

pub mod merge;
pub use merge::{BitonicMerge, LinearMerge, Merge, SortingMerge};

pub mod utils;

pub mod series;
pub use series::{
    apply_series, apply_series_with, par_apply_series, par_sort_series, sort_series,
    sort_series_with, HalvingSplit, Insertion, PowerOfTwoSplit, SeriesError, SplitStrategy,
};

pub mod cww;
pub use cww::{constant_weight_positions, constant_weight_ternary, constant_weight_word};

pub mod word;
pub use word::Word;

pub mod perf_and_test_utils;
