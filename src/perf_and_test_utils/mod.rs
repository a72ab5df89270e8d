//! Utilities to generate random inputs, time the operations, and pin the
//! fast implementations against their quadratic sequential formulations.
//! Nothing in this module belongs to the production path.

use rand::Rng;
use std::time::Instant;

use crate::series::Insertion;

/// Returns the name of the type of its argument.
pub fn type_of<T>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// Measures the latency of an operation repeated over a batch of queries,
/// reporting per-query nanoseconds over several runs.
pub struct TimingQueries {
    n_runs: usize,
    n_queries: usize,
    min: u128,
    max: u128,
    total: u128,
    timer: Option<Instant>,
}

impl TimingQueries {
    /// Prepares a measurement of `n_runs` runs of `n_queries` queries each.
    pub fn new(n_runs: usize, n_queries: usize) -> Self {
        TimingQueries {
            n_runs,
            n_queries,
            min: u128::MAX,
            max: 0,
            total: 0,
            timer: None,
        }
    }

    /// Starts timing one run.
    pub fn start(&mut self) {
        self.timer = Some(Instant::now());
    }

    /// Stops timing the current run and records it.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            let elapsed = timer.elapsed().as_nanos() / self.n_queries.max(1) as u128;
            self.min = self.min.min(elapsed);
            self.max = self.max.max(elapsed);
            self.total += elapsed;
        }
    }

    /// Returns (min, max, avg) nanoseconds per query over the recorded runs.
    pub fn get(&self) -> (u128, u128, u128) {
        (self.min, self.max, self.total / self.n_runs.max(1) as u128)
    }
}

/// Generates `t` positions forming a valid insertion sequence for a base of
/// `base_len` elements: the `i`-th entry is uniform in `[0, base_len + i]`.
pub fn gen_positions(base_len: usize, t: usize) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    (0..t).map(|i| rng.gen_range(0..=base_len + i)).collect()
}

/// Generates a valid series of `t` insertions of random `u64` values for a
/// base of `base_len` elements.
pub fn gen_series(base_len: usize, t: usize) -> Vec<Insertion<u64>> {
    let mut rng = rand::thread_rng();
    (0..t)
        .map(|i| Insertion::new(rng.gen_range(0..=base_len + i), rng.gen()))
        .collect()
}

/// Sequential definition of `apply_series`: one `Vec::insert` per request.
/// Quadratic; the behavior the fast path must reproduce.
///
/// # Panics
/// Panics on an out-of-range position.
pub fn apply_series_ref<T: Clone>(base: &[T], series: &[Insertion<T>]) -> Vec<T> {
    let mut result = base.to_vec();
    for ins in series {
        assert!(ins.pos <= result.len(), "position out of range");
        result.insert(ins.pos, ins.value.clone());
    }
    result
}

/// One step of the sequential position-sort: entries at or after the new
/// request's position shift up by one, then the request is placed.
pub fn sort_series_step<T: Clone>(sorted: &mut Vec<Insertion<T>>, ins: &Insertion<T>) {
    let at = sorted.iter().take_while(|entry| entry.pos < ins.pos).count();
    for entry in &mut sorted[at..] {
        entry.pos += 1;
    }
    sorted.insert(at, ins.clone());
}

/// Sequential definition of `sort_series`: repeated relative-index
/// adjustment. Quadratic; the behavior the fast path must reproduce.
pub fn sort_series_ref<T: Clone>(series: &[Insertion<T>]) -> Vec<Insertion<T>> {
    let mut sorted = Vec::with_capacity(series.len());
    for ins in series {
        sort_series_step(&mut sorted, ins);
    }
    sorted
}

/// Sequential definition of `constant_weight_word`, as a vector of bits.
///
/// # Panics
/// Panics on an out-of-range position.
pub fn cww_ref(zeros: usize, positions: &[usize]) -> Vec<bool> {
    let mut word = vec![false; zeros];
    for &pos in positions {
        assert!(pos <= word.len(), "position out of range");
        word.insert(pos, true);
    }
    word
}

/// Sequential definition of `constant_weight_positions`.
pub fn cww_positions_ref(positions: &[usize]) -> Vec<usize> {
    let mut sorted: Vec<usize> = Vec::with_capacity(positions.len());
    for &pos in positions {
        let at = sorted.iter().take_while(|&&p| p < pos).count();
        for p in &mut sorted[at..] {
            *p += 1;
        }
        sorted.insert(at, pos);
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    // The references themselves are pinned by hand-checked values.
    #[test]
    fn test_apply_series_ref() {
        let series: Vec<Insertion<i32>> = [(0, 4), (0, 5), (1, 6), (6, 7), (4, 8), (1, 9)]
            .map(Insertion::from)
            .to_vec();
        assert_eq!(
            apply_series_ref(&[1, 2, 3], &series),
            vec![5, 9, 6, 4, 1, 8, 2, 3, 7]
        );
    }

    #[test]
    fn test_sort_series_ref() {
        let series = vec![Insertion::new(0, 'a'), Insertion::new(0, 'b')];
        assert_eq!(
            sort_series_ref(&series),
            vec![Insertion::new(0, 'b'), Insertion::new(1, 'a')]
        );
    }

    #[test]
    fn test_cww_ref() {
        assert_eq!(cww_ref(2, &[0, 0]), vec![true, true, false, false]);
        assert_eq!(cww_positions_ref(&[0, 0]), vec![0, 1]);
    }
}
