use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Runs a Universal Machine program image.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to the program image (a sequence of 32-bit big-endian platters).
    program: PathBuf,

    /// Increase diagnostic verbosity (-v for debug, -vv for trace). Only
    /// affects what is written to stderr; the emulated program's own
    /// stdin/stdout are untouched.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "run failed");
            eprintln!("um: {}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<(), um::Error> {
    tracing::debug!(path = %cli.program.display(), "loading image");
    let file = File::open(&cli.program)?;
    let image = um::load_image(file)?;

    let io = um::stdio();
    let mut engine = um::Engine::new(image, io);
    engine.run()
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Small, distinct exit codes per error kind. Not a stable ABI — just enough
/// for a caller's shell script to tell failure modes apart.
fn exit_code_for(err: &um::Error) -> u8 {
    match err {
        um::Error::MalformedImage(_) => 1,
        um::Error::Io(_) => 2,
        um::Error::InvalidInstruction { .. } => 3,
        um::Error::InvalidOperation { .. } => 4,
    }
}
