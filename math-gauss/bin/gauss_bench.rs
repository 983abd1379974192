//! Gaussian elimination benchmark
//!
//! Builds the reproducible benchmark system, times the forward elimination
//! phase on a pool of workers and optionally verifies and prints the result.
//!
//! Exit codes: 0 on success, 2 on an invalid integer argument, 3 when the
//! matrix is singular, 1 for any other failure.
//!
//! Usage:
//!   cargo run --release --bin gauss-bench -- -s 2048 -n 8
//!   cargo run --release --bin gauss-bench -- -s 4 -v -p

use clap::{Parser, ValueEnum};
use math_audio_gauss::error::EXIT_FAILURE;
use math_audio_gauss::report::{
    DEFAULT_TOLERANCE, write_array, write_matrix, write_verification,
};
use math_audio_gauss::{
    EliminationConfig, GaussError, GaussianElimination, LinearSystem, Schedule, verify_solution,
};
use std::error::Error;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

/// Matrix dimension used when `-s` is missing or not positive
const DEFAULT_SIZE: usize = 1024;

/// Worker count used when `-n` is missing or not positive
const DEFAULT_WORKERS: usize = 1;

#[derive(Parser, Debug)]
#[command(
    name = "gauss-bench",
    about = "Time Gaussian elimination with partial pivoting on a pool of workers"
)]
struct Cli {
    /// Matrix dimension (non-positive values fall back to the default)
    #[arg(short = 's', long = "size", default_value_t = DEFAULT_SIZE as i64, allow_negative_numbers = true)]
    size: i64,

    /// Number of workers (non-positive values fall back to the default)
    #[arg(short = 'n', long = "workers", default_value_t = DEFAULT_WORKERS as i64, allow_negative_numbers = true)]
    workers: i64,

    /// Run back substitution and print `b[i] x[i]` for every row
    #[arg(short = 'v', long = "verify")]
    verify: bool,

    /// Print the reduced matrix and the B, V and C vectors
    ///
    /// V and C only exist after back substitution, so they need `-v` too.
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// How row tasks are handed to the workers
    #[arg(long, value_enum, default_value_t = ScheduleChoice::Queue)]
    schedule: ScheduleChoice,

    /// Log progress every N elimination steps (0 = silent)
    #[arg(long, default_value_t = 0)]
    progress_every: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ScheduleChoice {
    Queue,
    Block,
    Sequential,
}

impl From<ScheduleChoice> for Schedule {
    fn from(choice: ScheduleChoice) -> Self {
        match choice {
            ScheduleChoice::Queue => Schedule::Queue,
            ScheduleChoice::Block => Schedule::Block,
            ScheduleChoice::Sequential => Schedule::Sequential,
        }
    }
}

/// Keep positive values and echo them as `<flag> = <value>`, warn and fall
/// back to `default` otherwise
fn positive_or(value: i64, default: usize, flag: char, what: &str) -> usize {
    match usize::try_from(value) {
        Ok(v) if v > 0 => {
            println!("{} = {}", flag, v);
            v
        }
        _ => {
            println!(
                "Entered {} is not positive, hence using the default ({})",
                what, default
            );
            default
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let size = positive_or(cli.size, DEFAULT_SIZE, 's', "size");
    let workers = positive_or(cli.workers, DEFAULT_WORKERS, 'n', "workers");

    let config = EliminationConfig {
        workers,
        schedule: cli.schedule.into(),
        progress_interval: cli.progress_every,
    };
    log::info!(
        "Solving {}x{} system with {} worker(s), {:?} schedule",
        size,
        size,
        config.workers,
        config.schedule
    );

    let gauss = GaussianElimination::new(config)?;
    let system = LinearSystem::generate_with(size, gauss.pool())?;

    let start = Instant::now();
    let eliminated = gauss.eliminate(system)?;
    let elapsed = start.elapsed();

    let solution = cli.verify.then(|| eliminated.solve());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Application time: {:?}", elapsed)?;

    let reduced = eliminated.system();
    if cli.print {
        write_matrix(&mut out, reduced.matrix())?;
        write_array(&mut out, reduced.rhs().view())?;
        if let Some(solution) = &solution {
            // V and C carry the same values
            write_array(&mut out, solution.x.view())?;
            write_array(&mut out, solution.x.view())?;
        }
    }

    if let Some(solution) = &solution {
        write_verification(&mut out, reduced.rhs().view(), solution)?;

        let original = LinearSystem::generate(size)?;
        let check = verify_solution(&original, &eliminated, solution, DEFAULT_TOLERANCE)?;
        if check.passed() {
            log::info!("Verified: relative residual {:.3e}", check.residual);
        } else {
            log::warn!(
                "Residual above tolerance: {:.3e} (permuted {:.3e}, tolerance {:.1e})",
                check.residual,
                check.permuted_residual,
                check.tolerance
            );
        }
    }

    out.flush()?;
    Ok(())
}

/// Process exit code for a failed run: the library's code for a
/// [`GaussError`], [`EXIT_FAILURE`] for anything else
fn exit_code_for(err: &(dyn Error + 'static)) -> i32 {
    err.downcast_ref::<GaussError>()
        .map_or(EXIT_FAILURE, GaussError::exit_code)
}

fn main() {
    env_logger::init();

    // Invalid integers are rejected here with exit code 2
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        println!("{}", err);
        process::exit(exit_code_for(err.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_invalid_integers_exit_with_usage_code() {
        for args in [
            ["gauss-bench", "-s", "abc"],
            ["gauss-bench", "-n", "abc"],
            ["gauss-bench", "-s", "1.5"],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{:?}", args);
        }
    }

    #[test]
    fn test_negative_values_reach_the_fallback() {
        let cli = Cli::try_parse_from(["gauss-bench", "-s", "-3", "-n", "-1"])
            .expect("negative integers are accepted");
        assert_eq!(cli.size, -3);
        assert_eq!(cli.workers, -1);

        assert_eq!(positive_or(cli.size, DEFAULT_SIZE, 's', "size"), 1024);
        assert_eq!(positive_or(cli.workers, DEFAULT_WORKERS, 'n', "workers"), 1);
    }

    #[test]
    fn test_positive_or() {
        assert_eq!(positive_or(-5, DEFAULT_SIZE, 's', "size"), 1024);
        assert_eq!(positive_or(0, 1, 'n', "workers"), 1);
        assert_eq!(positive_or(7, DEFAULT_SIZE, 's', "size"), 7);
        assert_eq!(positive_or(i64::MIN, 4, 'n', "workers"), 4);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gauss-bench"]).expect("no arguments is valid");
        assert_eq!(cli.size, DEFAULT_SIZE as i64);
        assert_eq!(cli.workers, DEFAULT_WORKERS as i64);
        assert!(!cli.verify);
        assert!(!cli.print);
        assert!(matches!(Schedule::from(cli.schedule), Schedule::Queue));
    }

    #[test]
    fn test_exit_code_for() {
        let singular: Box<dyn Error> = Box::new(GaussError::SingularMatrix { column: 0 });
        assert_eq!(exit_code_for(singular.as_ref()), 3);

        let pool: Box<dyn Error> = Box::new(GaussError::InvalidWorkerCount(0));
        assert_eq!(exit_code_for(pool.as_ref()), EXIT_FAILURE);

        let io: Box<dyn Error> = Box::new(io::Error::other("broken pipe"));
        assert_eq!(exit_code_for(io.as_ref()), 1);
    }

    #[test]
    fn test_print_help_mentions_verify() {
        let command = Cli::command();
        let print = command
            .get_arguments()
            .find(|arg| arg.get_id() == "print")
            .expect("print flag exists");
        let help = print
            .get_long_help()
            .or(print.get_help())
            .expect("print flag is documented")
            .to_string();
        assert!(help.contains("-v"), "{}", help);
    }

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }
}
