//! L1 cache simulator CLI.
//!
//! This binary replays a memory trace through a set-associative cache. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then flag overrides.
//! 2. **Replay:** Streams the trace (file or stdin) through the cache in order.
//! 3. **Report:** Prints cache parameters and statistics, as text or JSON.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use l1sim_core::common::SimError;
use l1sim_core::config::Config;
use l1sim_core::sim::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "l1sim",
    author,
    version,
    about = "Trace-driven set-associative L1 cache simulator",
    long_about = "Replay a memory trace through an LRU, write-allocate, write-back cache.\n\nEach trace line is `<op> <hex-address>` with op 0 = read, 1 = write.\n\nExamples:\n  l1sim traces/gcc.trace\n  l1sim --size 32768 --ways 4 traces/gcc.trace\n  cat trace.txt | l1sim --config l1.json -"
)]
struct Cli {
    /// Trace file to replay (`-` for stdin).
    trace: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cache capacity in bytes.
    #[arg(long)]
    size: Option<usize>,

    /// Line size in bytes.
    #[arg(long)]
    line: Option<usize>,

    /// Associativity (ways per set).
    #[arg(long)]
    ways: Option<usize>,

    /// Physical address width in bits.
    #[arg(long)]
    address_bits: Option<u32>,

    /// Log every access as it is replayed.
    #[arg(long)]
    echo: bool,

    /// Print the final counters, ratios and skipped count as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Resolves the effective configuration: defaults, then file, then flags.
    fn load_config(&self) -> Result<Config, SimError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(size) = self.size {
            config.cache.size_bytes = size;
        }
        if let Some(line) = self.line {
            config.cache.line_bytes = line;
        }
        if let Some(ways) = self.ways {
            config.cache.ways = ways;
        }
        if let Some(bits) = self.address_bits {
            config.cache.address_bits = bits;
        }
        config.trace.echo_accesses |= self.echo;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.echo);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins; `--echo` raises the default to `info`.
fn init_logging(echo: bool) {
    let default = if echo { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let config = cli.load_config()?;
    let mut sim = Simulator::new(&config)?;

    if cli.trace.as_os_str() == "-" {
        sim.run(io::stdin().lock())?;
    } else {
        sim.run_file(&cli.trace)?;
    }

    if cli.json {
        let mut out = io::stdout().lock();
        let report = sim.stats().report(sim.skipped());
        serde_json::to_writer_pretty(&mut out, &report).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        sim.stats().print(sim.cache.geometry(), sim.skipped())?;
    }
    Ok(())
}
