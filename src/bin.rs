use set_pop_bench::{init_tracing, Benchmark};
use std::io::stdout;
use std::process;

pub fn main() {
    init_tracing();

    let stdout = stdout();
    let mut out = stdout.lock();

    if let Err(err) = Benchmark::default().run(&mut out) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
