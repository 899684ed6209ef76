//! heat2d - distributed 2-D heat diffusion.
//!
//! ```bash
//! # 4 workers as threads of one process
//! heat2d 256 256 2 2 1000 0.2
//!
//! # 4 MPI processes (built with --features mpi)
//! mpirun -n 4 heat2d 256 256 2 2 1000 0.2 --backend mpi
//! ```

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use heat2d::{Report, RunOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// One thread per worker inside this process
    Local,
    /// One MPI process per worker
    Mpi,
}

/// Explicit finite-difference heat diffusion over a PX×PY worker grid
#[derive(Parser, Debug)]
#[command(name = "heat2d")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Global grid columns
    nx: usize,
    /// Global grid rows
    ny: usize,
    /// Worker-grid columns
    px: usize,
    /// Worker-grid rows
    py: usize,
    /// Number of time steps
    steps: usize,
    /// Diffusion coefficient (stable for alpha <= 0.25)
    #[arg(allow_negative_numbers = true)]
    alpha: f64,

    /// Communication backend
    #[arg(short, long, value_enum, default_value_t = Backend::Local)]
    backend: Backend,

    /// Number of workers for the local backend (default: PX * PY; ignored with MPI)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn solve(cli: &Cli, opts: &RunOptions) -> heat2d::Result<Option<Report>> {
    match cli.backend {
        Backend::Local => {
            let Some(workers) = cli.workers.or(opts.shape().workers()) else {
                let e = heat2d::HeatError::InvalidConfig(format!(
                    "worker grid {}x{} is too large",
                    opts.px, opts.py
                ));
                error!("{e}");
                return Err(e);
            };
            let stats = heat2d::run_local(opts, workers)?;
            Ok(Some(Report::new(opts.clone(), stats)))
        }
        #[cfg(feature = "mpi")]
        Backend::Mpi => {
            let stats = heat2d::run_mpi(opts)?;
            Ok(stats.map(|s| Report::new(opts.clone(), s)))
        }
        #[cfg(not(feature = "mpi"))]
        Backend::Mpi => {
            let e = heat2d::HeatError::Unsupported("heat2d was built without the `mpi` feature");
            error!("{e}");
            Err(e)
        }
    }
}

/// Whether this process should print usage errors. Under `mpirun` every rank
/// parses the same arguments, so only rank 0 speaks.
#[cfg(feature = "mpi")]
fn prints_usage() -> bool {
    use mpi::traits::Communicator;
    mpi::initialize().map_or(true, |universe| universe.world().rank() == 0)
}

#[cfg(not(feature = "mpi"))]
fn prints_usage() -> bool {
    true
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if prints_usage() {
                let _ = e.print();
            }
            return ExitCode::from(e.exit_code() as u8);
        }
    };
    setup_logging(cli.verbose, cli.quiet);

    let opts = RunOptions {
        nx: cli.nx,
        ny: cli.ny,
        px: cli.px,
        py: cli.py,
        steps: cli.steps,
        alpha: cli.alpha,
    };

    match solve(&cli, &opts) {
        Ok(Some(report)) => {
            if cli.json {
                match report.to_json() {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        error!("{e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{report}");
            }
            ExitCode::SUCCESS
        }
        // not the coordinator
        Ok(None) => ExitCode::SUCCESS,
        // already reported where it was detected
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_run() {
        let args = ["heat2d", "8", "6", "2", "3", "10", "-0.1", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!((cli.nx, cli.ny, cli.px, cli.py, cli.steps), (8, 6, 2, 3, 10));
        assert_eq!(cli.alpha, -0.1);
        assert_eq!(cli.backend, Backend::Local);
        assert!(cli.json);
    }

    #[test]
    fn missing_arguments_are_reported_not_fatal() {
        let e = Cli::try_parse_from(["heat2d", "8", "6", "2"]).unwrap_err();
        assert_eq!(e.exit_code(), 2);
        let both = ["heat2d", "8", "6", "2", "2", "1", "0.1", "-v", "-q"];
        assert!(Cli::try_parse_from(both).is_err());
    }

    #[test]
    fn oversized_worker_grid_fails_without_panicking() {
        let px = usize::MAX.to_string();
        let cli = Cli::try_parse_from(["heat2d", "4", "4", px.as_str(), "2", "1", "0.1"]).unwrap();
        let opts = RunOptions { nx: 4, ny: 4, px: cli.px, py: cli.py, steps: 1, alpha: 0.1 };
        assert!(matches!(solve(&cli, &opts), Err(heat2d::HeatError::InvalidConfig(_))));
    }
}
