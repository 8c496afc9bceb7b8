use crate::error::{BenchError, Result};
use crate::set::{ArbitraryPop, Key, KeySet};
use std::iter::FromIterator;
use std::time::Instant;
use tracing::debug;

pub type Seconds = f64;

/// Sum of `0..n`, the total every full drain must reproduce.
pub fn expected_total(n: Key) -> u64 {
    let n = u64::from(n);
    n * n.saturating_sub(1) / 2
}

pub fn checksum(actual: u64, n: Key) -> Result<()> {
    let expected = expected_total(n);

    if actual != expected {
        debug!(n, actual, expected, "drained total does not match");
        return Err(BenchError::ChecksumMismatch { actual, expected });
    }

    Ok(())
}

/// Pops every key out of `set`, returning the sum of the popped keys.
pub fn drain<S: ArbitraryPop>(set: &mut S) -> Result<u64> {
    let mut total: u64 = 0;

    while !set.is_drained() {
        total += u64::from(set.pop_arbitrary()?);
    }

    Ok(total)
}

/// Fills a container with `0..n` and times how long it takes to empty it.
///
/// Only the drain is timed: population and the checksum run outside the
/// measured interval.
pub fn pop_set_with<S>(n: Key) -> Result<Seconds>
where
    S: ArbitraryPop + FromIterator<Key>,
{
    let mut set: S = (0..n).collect();

    let begin = Instant::now();
    let total = drain(&mut set)?;
    let secs = begin.elapsed().as_secs_f64();

    checksum(total, n)?;
    debug!(n, secs, "drained");

    Ok(secs)
}

pub fn pop_set(n: Key) -> Result<Seconds> {
    pop_set_with::<KeySet>(n)
}
