use set_pop_bench::init_tracing;
use set_pop_bench::orchestrator::Comparison;
use std::io::stdout;
use std::process;

pub fn main() {
    init_tracing();

    let stdout = stdout();
    let mut out = stdout.lock();

    if let Err(err) = Comparison::default().run(&mut out) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
