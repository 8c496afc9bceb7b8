use crate::driver::{pop_set, Seconds};
use crate::error::Result;
use crate::report::{
    format_shrink_line, size_width, write_countdown, write_done, write_grouped, write_header,
    write_row,
};
use crate::set::Key;
use crate::stats::SampleStatistics;
use crate::strategy::{default_strategies, Strategy};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;

pub const ITERATIONS: usize = 9;

pub const FIXED_SIZES: [Key; 5] = [100_000, 200_000, 300_000, 400_000, 1_000_000];

/// Tested sizes: steps of 20k below 100k, then steps of 100k below 700k.
pub fn default_sizes() -> Vec<Key> {
    let mut sizes = Vec::new();
    let mut n: Key = 20_000;

    while n < 700_000 {
        sizes.push(n);
        n += if n < 100_000 { 20_000 } else { 100_000 };
    }

    sizes
}

/// Timing samples gathered per tested size.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    seconds_by_size: BTreeMap<Key, SampleStatistics>,
}

impl Summary {
    pub fn put(&mut self, n: Key, secs: Seconds) {
        self.seconds_by_size.entry(n).or_default().put(secs);
    }

    pub fn get(&self, n: Key) -> Option<&SampleStatistics> {
        self.seconds_by_size.get(&n)
    }

    pub fn len(&self) -> usize {
        self.seconds_by_size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds_by_size.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, &SampleStatistics)> + '_ {
        self.seconds_by_size.iter().map(|(&n, stats)| (n, stats))
    }

    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        let width = size_width(self.seconds_by_size.keys().cloned());

        write_header(out, width)?;

        for (n, stats) in self.iter() {
            write_row(out, n, stats, width)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Benchmark {
    sizes: Vec<Key>,
    iterations: usize,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new(default_sizes(), ITERATIONS)
    }
}

impl Benchmark {
    pub fn new(sizes: Vec<Key>, iterations: usize) -> Self {
        Self { sizes, iterations }
    }

    pub fn sizes(&self) -> &[Key] {
        &self.sizes
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Times `KeySet` drains over every trial round and size, then prints the
    /// summary table.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Summary> {
        self.run_with(out, pop_set)
    }

    /// Same as `run` with a caller-supplied drain timer.
    ///
    /// The first error stops the run before anything past the countdown is
    /// written.
    pub fn run_with<W, F>(&self, out: &mut W, mut time: F) -> Result<Summary>
    where
        W: Write,
        F: FnMut(Key) -> Result<Seconds>,
    {
        info!(
            sizes = self.sizes.len(),
            iterations = self.iterations,
            "starting benchmark"
        );

        let mut summary = Summary::default();

        for trial in 0..self.iterations {
            write_countdown(out, self.iterations - trial)?;

            for &n in &self.sizes {
                summary.put(n, time(n)?);
            }
        }

        write_done(out)?;
        summary.write(out)?;
        info!("benchmark finished");

        Ok(summary)
    }
}

pub type StrategyStats = BTreeMap<(&'static str, Key), SampleStatistics>;

/// Times several pop strategies over the same sizes.
#[derive(Debug, Clone)]
pub struct Comparison {
    strategies: Vec<Strategy>,
    sizes: Vec<Key>,
    iterations: usize,
}

impl Default for Comparison {
    fn default() -> Self {
        Self::new(default_strategies(), default_sizes(), ITERATIONS)
    }
}

impl Comparison {
    pub fn new(strategies: Vec<Strategy>, sizes: Vec<Key>, iterations: usize) -> Self {
        Self {
            strategies,
            sizes,
            iterations,
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Prints the countdown, then one table per strategy ordered by name.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<StrategyStats> {
        info!(
            strategies = self.strategies.len(),
            sizes = self.sizes.len(),
            iterations = self.iterations,
            "starting comparison"
        );

        let mut stats = StrategyStats::new();

        for trial in 0..self.iterations {
            write_countdown(out, self.iterations - trial)?;

            for &n in &self.sizes {
                for strategy in self.strategies.iter().filter(|s| s.applies_to(n)) {
                    let secs = strategy.time(n)?;
                    stats.entry((strategy.name(), n)).or_default().put(secs);
                }
            }
        }

        write_done(out)?;
        write_grouped(out, &stats)?;
        info!("comparison finished");

        Ok(stats)
    }
}

/// Drains each of `sizes` once, printing one line per size.
pub fn shrink<W: Write>(sizes: &[Key], out: &mut W) -> Result<()> {
    for &n in sizes {
        let secs = pop_set(n)?;
        writeln!(out, "{}", format_shrink_line(n, secs))?;
    }

    Ok(())
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::driver::pop_set_with;
    use crate::driver::specs::OffByOne;
    use crate::error::BenchError;
    use crate::set::KeySet;
    use crate::strategy::{BTreePopLast, HashRetain};
    use itertools::assert_equal;

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_schedule() {
        assert_eq!(
            default_sizes(),
            vec![
                20_000, 40_000, 60_000, 80_000, 100_000, 200_000, 300_000, 400_000, 500_000,
                600_000,
            ],
        );
    }

    #[test]
    fn default_benchmark() {
        let bench = Benchmark::default();

        assert_eq!(bench.iterations(), 9);
        assert_eq!(bench.sizes().len(), 10);
        assert_eq!(Comparison::default().strategies().len(), 7);
    }

    #[test]
    fn summary_groups_by_size() {
        let mut summary = Summary::default();
        summary.put(40_000, 0.2);
        summary.put(20_000, 0.1);
        summary.put(40_000, 0.4);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary.get(40_000).unwrap().count(), 2);
        assert_eq!(summary.get(20_000).unwrap().mean(), 0.1);
        assert_eq!(
            summary.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            vec![20_000, 40_000]
        );
    }

    #[test]
    fn summary_widens_for_large_sizes() {
        let mut summary = Summary::default();
        summary.put(20_000, 0.1);
        summary.put(Key::max_value(), 0.1);

        let mut out = Vec::new();
        summary.write(&mut out).unwrap();

        assert_eq!(
            text(out),
            concat!(
                "      size seconds\n",
                "     20000 0.100 ±0%\n",
                "4294967295 0.100 ±0%\n",
            )
        );
    }

    #[test]
    fn run_prints_countdown_then_table() {
        let mut out = Vec::new();
        let summary = Benchmark::new(vec![1_000, 2_000], 3).run(&mut out).unwrap();
        let text = text(out);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "321 done!");
        assert_eq!(lines[1], "     size seconds");
        assert!(lines[2].starts_with("     1000 "));
        assert!(lines[3].starts_with("     2000 "));
        assert!(summary.iter().all(|(_, stats)| stats.count() == 3));
    }

    #[test]
    fn checksum_failure_stops_the_run() {
        let mut out = Vec::new();
        let result =
            Benchmark::new(vec![1_000, 2_000], 3).run_with(&mut out, pop_set_with::<OffByOne>);

        assert!(matches!(
            result,
            Err(BenchError::ChecksumMismatch {
                actual: 500_500,
                expected: 499_500
            })
        ));
        assert_eq!(text(out), "3");
    }

    #[test]
    fn comparison_prints_one_table_per_strategy() {
        let strategies = vec![
            Strategy::of::<KeySet>("hash_remove_next"),
            Strategy::of::<BTreePopLast>("btree_pop_last"),
            Strategy::of::<HashRetain>("hash_retain").up_to(1_000),
        ];
        let mut out = Vec::new();
        let stats = Comparison::new(strategies, vec![1_000, 2_000], 2)
            .run(&mut out)
            .unwrap();
        let text = text(out);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "21 done!");
        assert_equal(
            lines[1..].iter().filter(|line| !line.starts_with(' ')),
            &["btree_pop_last", "hash_remove_next", "hash_retain"],
        );
        assert_eq!(lines[2], "       size seconds");
        assert!(lines[3].starts_with("       1000 "));
        assert_eq!(lines.len(), 1 + 4 + 4 + 3);

        assert_eq!(stats.len(), 5);
        assert!(stats.get(&("hash_retain", 2_000)).is_none());
        assert!(stats.values().all(|s| s.count() == 2));
    }

    #[test]
    fn comparison_stops_on_a_broken_strategy() {
        let strategies = vec![
            Strategy::of::<KeySet>("hash_remove_next"),
            Strategy::of::<OffByOne>("off_by_one"),
        ];
        let mut out = Vec::new();
        let result = Comparison::new(strategies, vec![100], 2).run(&mut out);

        assert!(matches!(result, Err(BenchError::ChecksumMismatch { .. })));
        assert_eq!(text(out), "2");
    }

    #[test]
    fn shrink_prints_one_line_per_size() {
        let mut out = Vec::new();
        shrink(&[1_000, 2_000], &mut out).unwrap();

        assert_equal(
            text(out).lines().map(|line| line.split(':').next().unwrap()),
            vec!["Shrinking set size=1k", "Shrinking set size=2k"],
        );
    }
}
