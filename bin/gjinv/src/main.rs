use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use log::info;

use gjinv_cpu::{RayonDispatcher, SerialDispatcher};
use gjinv_hal::GridDispatcher;
use gjinv_math::{Matrix, Scalar};
use gjinv_solver::{residual, Inverter, InverterConfig};

mod input;
mod output;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Invert a square matrix with grid-parallel Gauss-Jordan elimination.
#[derive(Parser)]
#[command(name = "gjinv", version)]
struct Cli {
    /// Matrix file, one row per line. `-` or absent reads stdin.
    input: Option<PathBuf>,
    /// Invert the built-in 2x2 example [[1, 2], [3, 4]].
    #[arg(long, conflicts_with_all = ["input", "random"])] demo: bool,
    /// Invert a random diagonally dominant N x N matrix.
    #[arg(long, value_name = "N", conflicts_with = "input")] random: Option<usize>,
    #[arg(long, default_value_t = 13)] seed: u64,
    /// Absolute pivot magnitude treated as zero (defaults: 1e-12 f64, 1e-6 f32).
    /// Not scaled by the input; lower it for matrices with tiny entries.
    #[arg(long)] epsilon: Option<f64>,
    /// Grid worker threads, 0 = one per CPU.
    #[arg(long, default_value_t = 0)] threads: usize,
    /// Run every pass on the calling thread.
    #[arg(long, conflicts_with_all = ["threads", "pin_cores"])] serial: bool,
    #[arg(long)] pin_cores: bool,
    #[arg(long, default_value_t = 2)] precision: usize,
    /// Compute in single precision.
    #[arg(long)] f32: bool,
    /// Report the identity residual of the result on stderr.
    #[arg(long)] verify: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let rows = load_rows(cli)?;
    let text = if cli.f32 {
        invert_as::<f32>(cli, &rows)?
    } else {
        invert_as::<f64>(cli, &rows)?
    };
    println!("{}", text);
    Ok(())
}

fn load_rows(cli: &Cli) -> anyhow::Result<Vec<Vec<f64>>> {
    if cli.demo {
        return Ok(input::demo_rows());
    }
    if let Some(n) = cli.random {
        if n == 0 { bail!("--random needs N >= 1"); }
        return Ok(input::random_rows(n, cli.seed));
    }

    let text = match &cli.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };
    input::parse_rows(&text)
}

fn dispatcher<T: Scalar>(cli: &Cli) -> anyhow::Result<Box<dyn GridDispatcher<T>>> {
    if cli.serial {
        return Ok(Box::new(SerialDispatcher));
    }
    Ok(Box::new(RayonDispatcher::new(cli.threads, cli.pin_cores)?))
}

fn invert_as<T: Scalar>(cli: &Cli, rows: &[Vec<f64>]) -> anyhow::Result<String> {
    let rows: Vec<Vec<T>> = rows
        .iter()
        .map(|r| r.iter().map(|&v| T::from_f64(v)).collect())
        .collect();
    let matrix = Matrix::from_rows(&rows)?;

    let config = match cli.epsilon {
        Some(eps) => InverterConfig { epsilon: T::from_f64(eps) },
        None => InverterConfig::default(),
    };
    let inverter = Inverter::new(dispatcher::<T>(cli)?, config);

    let props = inverter.properties();
    info!(
        ">>> GJINV: {}x{} on {} ({} workers) <<<",
        matrix.rows, matrix.cols, props.engine, props.workers
    );

    let inv = inverter
        .invert(&matrix)
        .with_context(|| format!("inverting {}x{} matrix", matrix.rows, matrix.cols))?;

    if cli.verify {
        let err = residual(&matrix, &inv)?;
        eprintln!("{} identity residual {:.3e}", "verified:".green().bold(), err.to_f64());
    }

    Ok(output::format_matrix(&inv, cli.precision))
}
