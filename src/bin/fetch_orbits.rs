//! Command-line front end of the orbit data fetcher.

use camino::Utf8PathBuf;
use clap::Parser;

use cy3_orbits::env_state::FetchEnv;
use cy3_orbits::phase::Phase;
use cy3_orbits::pipeline::{run, RunContext};

/// Orbit data fetcher and processor
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Phase of the mission
    #[arg(long, default_value = "geo")]
    phase: Phase,

    /// Use cached data instead of querying the service
    #[arg(long)]
    use_cache: bool,

    /// Data directory
    #[arg(long, default_value = "./data-fetched/today")]
    data_dir: Utf8PathBuf,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    println!("Running ...");

    let ctx = RunContext::new(args.phase, args.data_dir, args.use_cache);
    let env = FetchEnv::new();

    if let Err(err) = run(&ctx, &env) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
