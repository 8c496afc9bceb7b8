#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod driver;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod set;
pub mod stats;
pub mod strategy;
mod support;

pub use driver::{pop_set, pop_set_with, Seconds};
pub use error::{BenchError, Result};
pub use orchestrator::{Benchmark, Comparison, Summary};
pub use set::{ArbitraryPop, Key, KeySet};
pub use stats::SampleStatistics;
pub use strategy::Strategy;

use tracing::{warn, Level};

/// Logs go to stderr so they never interleave with the report on stdout.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .init();

    if cfg!(debug_assertions) {
        warn!("Run with --release for meaningful measurements");
    }
}
