use crate::driver::Seconds;
use crate::set::Key;
use crate::stats::SampleStatistics;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub const MIN_SIZE_WIDTH: usize = 9;

/// Column width that fits every size in `sizes`, never narrower than nine.
pub fn size_width<I: IntoIterator<Item = Key>>(sizes: I) -> usize {
    sizes
        .into_iter()
        .max()
        .map_or(0, |n| n.to_string().len())
        .max(MIN_SIZE_WIDTH)
}

/// Prints the number of trial rounds still to run, without a separator.
pub fn write_countdown<W: Write>(out: &mut W, remaining: usize) -> io::Result<()> {
    write!(out, "{}", remaining)?;
    out.flush()
}

pub fn write_done<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, " done!")
}

pub fn write_header<W: Write>(out: &mut W, width: usize) -> io::Result<()> {
    writeln!(out, "{:>width$} seconds", "size", width = width)
}

pub fn format_row(n: Key, stats: &SampleStatistics, width: usize) -> String {
    format!(
        "{:>width$} {:.3} ±{:.0}%",
        n,
        stats.mean(),
        stats.relative_deviation() * 100.0,
        width = width
    )
}

pub fn write_row<W: Write>(
    out: &mut W,
    n: Key,
    stats: &SampleStatistics,
    width: usize,
) -> io::Result<()> {
    writeln!(out, "{}", format_row(n, stats, width))
}

/// One indented table per strategy, each headed by the strategy name.
pub fn write_grouped<W: Write>(
    out: &mut W,
    stats: &BTreeMap<(&'static str, Key), SampleStatistics>,
) -> io::Result<()> {
    let width = size_width(stats.keys().map(|&(_, n)| n));
    let mut prev_name = "";

    for (&(name, n), stat) in stats {
        if prev_name != name {
            prev_name = name;
            writeln!(out, "{}", name)?;
            write!(out, "  ")?;
            write_header(out, width)?;
        }

        writeln!(out, "  {}", format_row(n, stat, width))?;
    }

    Ok(())
}

/// One line of the fixed-list mode.
pub fn format_shrink_line(n: Key, secs: Seconds) -> String {
    format!("Shrinking set size={}k: {:.3}s", n / 1000, secs)
}
