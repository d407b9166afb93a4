use std::env;
use std::process;

use trailblaze::cli::run_with_args;
use trailblaze::logging::init_logging;

fn main() {
    let args: Vec<String> = env::args().collect();
    init_logging(args.iter().any(|arg| arg == "-v" || arg == "--verbose"));
    process::exit(run_with_args(&args));
}
