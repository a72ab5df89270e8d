//! The module provides the prefix-sum primitive used by the position-sort
//! merge step, in a serial and a chunked parallel version.

use num_traits::PrimInt;
use rayon::prelude::*;

// Below this length the parallel scan degenerates to the serial one.
const PAR_CHUNK: usize = 1 << 14;

/// Computes the cumulative sums of `increments`.
///
/// The output is one entry longer than the input: `out[0] = 0` and
/// `out[k] = out[k - 1] + increments[k - 1]`, so the last entry is the total.
///
/// # Examples
///
/// ```
/// use cww::utils::prefix_sums;
///
/// assert_eq!(prefix_sums(&[1, 2, 3]), vec![0, 1, 3, 6]);
/// assert_eq!(prefix_sums::<i32>(&[]), vec![0]);
/// ```
pub fn prefix_sums<T: PrimInt>(increments: &[T]) -> Vec<T> {
    let mut sums = Vec::with_capacity(increments.len() + 1);
    let mut running = T::zero();
    sums.push(running);
    for &x in increments {
        running = running + x;
        sums.push(running);
    }
    sums
}

/// Computes the cumulative sums of `increments` with a two-pass chunked scan.
///
/// Every chunk is reduced to its local sum, the serial scan of those sums
/// yields each chunk's carry, and a second parallel pass rewrites each chunk
/// with its carry folded in. Output is identical to [`prefix_sums`].
pub fn par_prefix_sums<T: PrimInt + Send + Sync>(increments: &[T]) -> Vec<T> {
    if increments.len() <= PAR_CHUNK {
        return prefix_sums(increments);
    }

    let chunk_sums: Vec<T> = increments
        .par_chunks(PAR_CHUNK)
        .map(|chunk| chunk.iter().fold(T::zero(), |acc, &x| acc + x))
        .collect();
    let carries = prefix_sums(&chunk_sums);

    let mut sums = vec![T::zero(); increments.len() + 1];
    sums[1..]
        .par_chunks_mut(PAR_CHUNK)
        .zip(increments.par_chunks(PAR_CHUNK))
        .zip(carries[..chunk_sums.len()].par_iter())
        .for_each(|((out, chunk), &carry)| {
            let mut running = carry;
            for (slot, &x) in out.iter_mut().zip(chunk) {
                running = running + x;
                *slot = running;
            }
        });

    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_prefix_sums() {
        assert_eq!(prefix_sums::<u32>(&[]), vec![0]);
        assert_eq!(prefix_sums(&[5_u64]), vec![0, 5]);
        assert_eq!(prefix_sums(&[1_i64, 2, 3]), vec![0, 1, 3, 6]);
    }

    #[test]
    fn test_prefix_sums_signed() {
        assert_eq!(prefix_sums(&[1_i32, -2, 4, -4]), vec![0, 1, -1, 3, -1]);
    }

    #[test]
    fn test_par_prefix_sums_matches_serial() {
        let mut rng = rand::thread_rng();
        for n in [0, 1, PAR_CHUNK, PAR_CHUNK + 1, 3 * PAR_CHUNK + 17] {
            let increments: Vec<i64> = (0..n).map(|_| rng.gen_range(-100..100)).collect();
            assert_eq!(par_prefix_sums(&increments), prefix_sums(&increments));
        }
    }
}
