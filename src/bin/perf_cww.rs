use cww::perf_and_test_utils::{gen_positions, gen_series, TimingQueries};
use cww::{
    apply_series, constant_weight_positions, constant_weight_word, par_apply_series,
    par_sort_series, sort_series,
};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of base elements and of insertions
    #[clap(short, long, value_parser)]
    #[arg(default_value_t = 1 << 20)]
    n: usize,
    /// Number of measured runs
    #[clap(short, long, value_parser)]
    #[arg(default_value_t = 5)]
    runs: usize,
}

fn main() {
    let args = Args::parse();
    let n = args.n;

    let positions = gen_positions(n, n);

    let mut t = TimingQueries::new(args.runs, n);
    let mut checksum = 0;
    for _ in 0..args.runs {
        t.start();
        let sorted = constant_weight_positions(&positions);
        t.stop();
        checksum = sorted.len();
    }
    let (t_min, t_max, t_avg) = t.get();
    println!(
        "[exp: cww_positions, n: {}, min_time (ns/insertion): {}, max_time (ns/insertion): {}, avg_time (ns/insertion): {}, n_runs: {}]",
        n, t_min, t_max, t_avg, args.runs
    );

    let mut t = TimingQueries::new(args.runs, n);
    let mut weight = 0;
    for _ in 0..args.runs {
        t.start();
        let word = constant_weight_word(n, &positions).unwrap();
        t.stop();
        weight = word.count_ones();
    }
    let (t_min, t_max, t_avg) = t.get();
    println!(
        "[exp: cww_word, n: {}, min_time (ns/insertion): {}, max_time (ns/insertion): {}, avg_time (ns/insertion): {}, n_runs: {}]",
        n, t_min, t_max, t_avg, args.runs
    );

    let base: Vec<u64> = (0..n as u64).collect();
    let series = gen_series(n, n);

    let mut t = TimingQueries::new(args.runs, n);
    for _ in 0..args.runs {
        t.start();
        let sorted = sort_series(&series, n).unwrap();
        t.stop();
        checksum += sorted.len();
    }
    let (t_min, t_max, t_avg) = t.get();
    println!(
        "[exp: sort_series, n: {}, min_time (ns/insertion): {}, max_time (ns/insertion): {}, avg_time (ns/insertion): {}, n_runs: {}]",
        n, t_min, t_max, t_avg, args.runs
    );

    let mut t = TimingQueries::new(args.runs, n);
    for _ in 0..args.runs {
        t.start();
        let sorted = par_sort_series(&series, n).unwrap();
        t.stop();
        checksum += sorted.len();
    }
    let (t_min, t_max, t_avg) = t.get();
    println!(
        "[exp: par_sort_series, n: {}, min_time (ns/insertion): {}, max_time (ns/insertion): {}, avg_time (ns/insertion): {}, n_runs: {}]",
        n, t_min, t_max, t_avg, args.runs
    );

    let mut t = TimingQueries::new(args.runs, n);
    for _ in 0..args.runs {
        t.start();
        let result = apply_series(&base, &series).unwrap();
        t.stop();
        checksum += result.len();
    }
    let (t_min, t_max, t_avg) = t.get();
    println!(
        "[exp: apply_series, n: {}, min_time (ns/insertion): {}, max_time (ns/insertion): {}, avg_time (ns/insertion): {}, n_runs: {}]",
        n, t_min, t_max, t_avg, args.runs
    );

    let mut t = TimingQueries::new(args.runs, n);
    for _ in 0..args.runs {
        t.start();
        let result = par_apply_series(&base, &series).unwrap();
        t.stop();
        checksum += result.len();
    }
    let (t_min, t_max, t_avg) = t.get();
    println!(
        "[exp: par_apply_series, n: {}, min_time (ns/insertion): {}, max_time (ns/insertion): {}, avg_time (ns/insertion): {}, n_runs: {}]",
        n, t_min, t_max, t_avg, args.runs
    );

    println!("fake {} {}", checksum, weight);
}
