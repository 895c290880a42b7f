//! gen-mkn: write A.hex, B.hex and O.hex for GEMM (A[M x K], B[K x N], O[M x N]).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use gemm_vectors::{generate_gemm_hex, GemmConfig, GemmShape, OutputConfig, ValueRange};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gen-mkn")]
#[command(version, about = "Generate A.hex, B.hex, and O.hex for GEMM (A[MxK], B[KxN], O[MxN]).")]
struct Cli {
    /// Rows of A / O (M)
    #[arg(long = "M", value_name = "M")]
    m: usize,

    /// Inner dimension (K)
    #[arg(long = "K", value_name = "K")]
    k: usize,

    /// Columns of B / O (N)
    #[arg(long = "N", value_name = "N")]
    n: usize,

    /// Random seed; omit for a fresh random run
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory, created if absent
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Hex values per line (<= 0 means one per line)
    #[arg(long = "tokens-per-line", default_value_t = 1, allow_negative_numbers = true)]
    tokens_per_line: i64,

    /// Also write decimal .txt dumps of each matrix
    #[arg(long = "dump_txt", visible_alias = "dump-txt", action = ArgAction::SetTrue)]
    dump_txt: bool,

    /// Inclusive value range for A, as LO:HI
    #[arg(long = "a-range", default_value_t = ValueRange::FULL_I8, allow_hyphen_values = true)]
    a_range: ValueRange,

    /// Inclusive value range for B, as LO:HI
    #[arg(long = "b-range", default_value_t = ValueRange::FULL_I8, allow_hyphen_values = true)]
    b_range: ValueRange,

    /// Filename for A matrix hex
    #[arg(long = "A-file", default_value = "A.hex")]
    a_file: String,

    /// Filename for B matrix hex
    #[arg(long = "B-file", default_value = "B.hex")]
    b_file: String,

    /// Filename for output hex
    #[arg(long = "O-file", default_value = "O.hex")]
    o_file: String,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GemmConfig::new(GemmShape::new(cli.m, cli.k, cli.n))
        .with_ranges(cli.a_range, cli.b_range);
    let output = OutputConfig {
        dir: cli.out,
        a_file: cli.a_file,
        b_file: cli.b_file,
        o_file: cli.o_file,
        tokens_per_line: cli.tokens_per_line,
        dump_txt: cli.dump_txt,
    };

    generate_gemm_hex(&config, &output, cli.seed)
        .with_context(|| format!("generating {}x{}x{} GEMM vectors", cli.m, cli.k, cli.n))?;
    Ok(())
}

/// Print a failed run with its cause chain; returns the process exit status.
fn report(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    ExitCode::from(report(&run(cli)))
}
